/// Fixed instruction block for the first pass over an article.
///
/// Kept as a single constant so every caller sends byte-identical policy
/// text; chunk text is appended separately by the build functions below. The
/// taxonomy and field names stated here are the contract the response
/// handler parses, see [`crate::schema`].
pub const FLOW_EXTRACTION_PROMPT: &str = r#"You are a cyber threat intelligence analyst. Convert the following threat intelligence article into an attack flow graph of nodes and edges.

INSTRUCTIONS:
1. Identify every attacker action, tool, malware, asset, infrastructure component, URL, and vulnerability the article explicitly describes.
2. Emit one node per item and one edge per explicitly stated relationship.
3. Output ONLY valid JSON, nothing else.
4. Use the exact schema below.

SCHEMA:
{
  "nodes": [
    {
      "id": "action-1",
      "type": "action",
      "data": {
        "type": "action",
        "name": "Spearphishing Attachment",
        "description": "brief description of what happened",
        "source_excerpt": "literal quote from the article",
        "confidence": "high",
        "technique_id": "T1566.001",
        "tactic_id": "TA0001",
        "tactic_name": "Initial Access"
      }
    }
  ],
  "edges": [
    {"id": "edge-1", "source": "action-1", "target": "tool-1", "type": "floating", "label": "Uses"}
  ]
}

NODE TYPES (the "type" field must be exactly one of):
- action: one attacker technique or step; include technique_id, tactic_id and tactic_name from MITRE ATT&CK when the article names or clearly describes them
- tool: legitimate or dual-use software the attacker ran; include command_line when the article quotes one
- malware: malicious software such as implants, loaders, stealers, ransomware
- asset: a victim system or resource; include role (for example "domain controller", "mail server")
- infrastructure: attacker-controlled servers, domains, IP addresses
- url: a specific URL involved in the attack
- vulnerability: a CVE or a described weakness
- AND_operator: logic gate, all incoming steps are required before the outgoing step
- OR_operator: logic gate, any one incoming step is enough for the outgoing step

EDGE LABELS (by source type -> target type):
- action -> action: "Then"
- action -> tool: "Uses"
- action -> malware: "Deploys"
- action -> asset: "Targets"
- action -> infrastructure: "Connects To"
- action -> url: "Retrieves"
- action -> vulnerability: "Exploits"
- vulnerability -> asset: "Affects"
- malware -> infrastructure: "Beacons To"
- edges into and out of AND_operator and OR_operator nodes: "Then"

RULES:
- Only create a node or an edge when the article states it explicitly. Never infer, never speculate.
- Every node carries a source_excerpt: a literal 2-3 sentence quote from the article that is the evidence for it.
- Set confidence to "high", "medium" or "low" based on how directly the article supports the item.
- Order nodes chronologically by attack stage: Initial Access, Execution, Persistence, Privilege Escalation, Defense Evasion, Credential Access, Discovery, Lateral Movement, Collection, Command and Control, Exfiltration, Impact.
- Place each edge immediately after its source node so the graph can be drawn incrementally while the output streams.
- Number ids sequentially within each type: action-1, action-2, tool-1, malware-1, and edge-1, edge-2 for edges.
- The top-level JSON object has exactly two fields: "nodes" and "edges". No other top-level fields.
- Output ONLY the JSON object, no markdown, no explanations."#;

/// Base prompt plus the first chunk's text
pub fn build_extraction_prompt(chunk_text: &str) -> String {
    format!(
        "{}\n\nTEXT:\n{}\n\nJSON OUTPUT:",
        FLOW_EXTRACTION_PROMPT, chunk_text
    )
}

/// Reminder sent with every chunk after the first.
///
/// Progress is displayed 1-based. Id continuity across parts is advisory
/// text only: nothing here tracks which ids the model already emitted, the
/// model carries that through its own conversation context. Out-of-range
/// indices are interpolated as given, the caller owns their validity.
pub fn build_continuation_prompt(chunk_index: usize, total_chunks: usize) -> String {
    format!(
        r#"Continue converting the same article into the attack flow graph. This is part {} of {}.

Keep emitting the same JSON: a single object with "nodes" and "edges" arrays, following all earlier instructions. Continue id numbering from where the previous part left off. For example, if the last node was action-5, the next action node is action-6. Do not restart numbering and do not repeat nodes or edges already emitted for earlier parts.

Output ONLY the JSON object, no markdown, no explanations."#,
        chunk_index + 1,
        total_chunks
    )
}

/// Full prompt for one chunk: base prompt for the first, continuation for
/// the rest
pub fn build_chunk_prompt(chunk_index: usize, total_chunks: usize, chunk_text: &str) -> String {
    if chunk_index == 0 {
        build_extraction_prompt(chunk_text)
    } else {
        format!(
            "{}\n\nTEXT:\n{}\n\nJSON OUTPUT:",
            build_continuation_prompt(chunk_index, total_chunks),
            chunk_text
        )
    }
}
