use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Node taxonomy for the attack flow graph. Serialized names are part of the
/// model output contract and must match the prompt text exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Action,
    Tool,
    Malware,
    Asset,
    Infrastructure,
    Url,
    Vulnerability,
    #[serde(rename = "AND_operator")]
    AndOperator,
    #[serde(rename = "OR_operator")]
    OrOperator,
}

impl NodeType {
    pub const ALL: [NodeType; 9] = [
        NodeType::Action,
        NodeType::Tool,
        NodeType::Malware,
        NodeType::Asset,
        NodeType::Infrastructure,
        NodeType::Url,
        NodeType::Vulnerability,
        NodeType::AndOperator,
        NodeType::OrOperator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Action => "action",
            NodeType::Tool => "tool",
            NodeType::Malware => "malware",
            NodeType::Asset => "asset",
            NodeType::Infrastructure => "infrastructure",
            NodeType::Url => "url",
            NodeType::Vulnerability => "vulnerability",
            NodeType::AndOperator => "AND_operator",
            NodeType::OrOperator => "OR_operator",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeData {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub name: String,
    pub description: String,
    /// Literal quote from the article backing this node (2-3 sentences)
    pub source_excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,

    // Type-specific fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub technique_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactic_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tactic_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique within the combined graph across all chunks
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: NodeData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type", default = "default_edge_type")]
    pub edge_type: String,
    pub label: String,
}

fn default_edge_type() -> String {
    "floating".to_string()
}

/// The top-level value the model is instructed to emit: exactly two array
/// fields, nothing else.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttackFlow {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl AttackFlow {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse attack flow JSON")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize attack flow")
    }
}

/// One chunk's parsed extraction plus provenance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedChunk {
    pub article_id: String,
    pub chunk_index: usize,
    pub flow: AttackFlow,
}

/// Chronological attack-stage ordering used for node ordering, with the
/// matching ATT&CK tactic ids.
pub const TACTIC_ORDER: [(&str, &str); 12] = [
    ("TA0001", "Initial Access"),
    ("TA0002", "Execution"),
    ("TA0003", "Persistence"),
    ("TA0004", "Privilege Escalation"),
    ("TA0005", "Defense Evasion"),
    ("TA0006", "Credential Access"),
    ("TA0007", "Discovery"),
    ("TA0008", "Lateral Movement"),
    ("TA0009", "Collection"),
    ("TA0011", "Command and Control"),
    ("TA0010", "Exfiltration"),
    ("TA0040", "Impact"),
];

/// Position of a tactic in the chronological ordering, for sorting nodes by
/// attack stage
pub fn tactic_rank(tactic_name: &str) -> Option<usize> {
    TACTIC_ORDER
        .iter()
        .position(|(_, name)| name.eq_ignore_ascii_case(tactic_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_node() -> Node {
        Node {
            id: "action-1".to_string(),
            node_type: NodeType::Action,
            data: NodeData {
                node_type: NodeType::Action,
                name: "Spearphishing Attachment".to_string(),
                description: "Phishing email with a macro document".to_string(),
                source_excerpt: "The actor sent emails with weaponized attachments. \
                    Opening the document executed a macro."
                    .to_string(),
                confidence: Some(Confidence::High),
                technique_id: Some("T1566.001".to_string()),
                tactic_id: Some("TA0001".to_string()),
                tactic_name: Some("Initial Access".to_string()),
                command_line: None,
                role: None,
            },
        }
    }

    #[test]
    fn node_type_serializes_to_contract_names() {
        for node_type in NodeType::ALL {
            let json = serde_json::to_value(node_type).unwrap();
            assert_eq!(json, json!(node_type.as_str()));
        }
    }

    #[test]
    fn operator_names_keep_uppercase_prefix() {
        assert_eq!(
            serde_json::to_value(NodeType::AndOperator).unwrap(),
            json!("AND_operator")
        );
        assert_eq!(
            serde_json::from_value::<NodeType>(json!("OR_operator")).unwrap(),
            NodeType::OrOperator
        );
    }

    #[test]
    fn absent_optional_fields_are_skipped() {
        let mut node = sample_node();
        node.data.technique_id = None;
        node.data.tactic_id = None;
        node.data.tactic_name = None;

        let json = serde_json::to_value(&node).unwrap();
        let data = json.get("data").unwrap();
        assert!(data.get("technique_id").is_none());
        assert!(data.get("command_line").is_none());
        assert!(data.get("source_excerpt").is_some());
    }

    #[test]
    fn edge_type_defaults_to_floating() {
        let edge: Edge = serde_json::from_value(json!({
            "id": "edge-1",
            "source": "action-1",
            "target": "tool-1",
            "label": "Uses"
        }))
        .unwrap();
        assert_eq!(edge.edge_type, "floating");
    }

    #[test]
    fn parses_model_response() {
        let response = r#"{
            "nodes": [
                {
                    "id": "vulnerability-1",
                    "type": "vulnerability",
                    "data": {
                        "type": "vulnerability",
                        "name": "CVE-2023-4966",
                        "description": "Citrix Bleed session hijack flaw",
                        "source_excerpt": "The group exploited CVE-2023-4966 on internet-facing appliances. Sessions were hijacked without credentials.",
                        "confidence": "high"
                    }
                },
                {
                    "id": "asset-1",
                    "type": "asset",
                    "data": {
                        "type": "asset",
                        "name": "NetScaler appliance",
                        "description": "Internet-facing gateway",
                        "source_excerpt": "The victim operated NetScaler gateways exposed to the internet. These devices were the initial target.",
                        "confidence": "medium",
                        "role": "vpn gateway"
                    }
                }
            ],
            "edges": [
                {"id": "edge-1", "source": "vulnerability-1", "target": "asset-1", "type": "floating", "label": "Affects"}
            ]
        }"#;

        let flow = AttackFlow::from_json(response).unwrap();
        assert_eq!(flow.nodes.len(), 2);
        assert_eq!(flow.edges.len(), 1);
        assert_eq!(flow.nodes[0].node_type, NodeType::Vulnerability);
        assert_eq!(flow.nodes[1].data.role.as_deref(), Some("vpn gateway"));
        assert_eq!(flow.edges[0].label, "Affects");
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(AttackFlow::from_json("not json").is_err());
    }

    #[test]
    fn tactic_order_runs_initial_access_to_impact() {
        assert_eq!(TACTIC_ORDER[0].1, "Initial Access");
        assert_eq!(TACTIC_ORDER[11].1, "Impact");
        assert_eq!(tactic_rank("Initial Access"), Some(0));
        assert_eq!(tactic_rank("lateral movement"), Some(7));
        assert_eq!(tactic_rank("Reconnaissance"), None);
        assert!(tactic_rank("Exfiltration") < tactic_rank("Impact"));
        assert!(tactic_rank("Command and Control") < tactic_rank("Exfiltration"));
    }
}
