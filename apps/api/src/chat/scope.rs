use serde::Serialize;

/// Substrings that mark a reply as declining to answer. These are fragments
/// of [`crate::chat::prompts::REFUSAL_SENTENCE`]; the check only holds while
/// the model reproduces that sentence verbatim. A reply that merely quotes a
/// marker without refusing is misclassified — accepted heuristic limitation.
pub const OUT_OF_SCOPE_MARKERS: &[&str] = &["not available in my portfolio", "not in my resume"];

#[derive(Debug, Clone, Serialize)]
pub struct ScopeResult {
    pub reply_text: String,
    pub in_scope: bool,
}

/// Labels a generated reply as in-scope or out-of-scope. `in_scope` is
/// derived from the reply text every time, never stored independently.
pub fn classify(reply_text: &str) -> ScopeResult {
    let out_of_scope = OUT_OF_SCOPE_MARKERS
        .iter()
        .any(|marker| reply_text.contains(marker));
    ScopeResult {
        reply_text: reply_text.to_string(),
        in_scope: !out_of_scope,
    }
}
