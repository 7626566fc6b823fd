use serde::{Deserialize, Serialize};

/// Client-side configuration for the extraction pipeline.
///
/// Intentionally empty. The pipeline reads no environment variables and
/// holds no credentials: the model API key lives with the server-side caller
/// that owns the LLM transport and must never reach this crate. Unknown keys
/// are rejected so a credential field cannot be reintroduced silently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientConfig {}
