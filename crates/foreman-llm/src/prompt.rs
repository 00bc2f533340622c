//! Prompt synthesis from structured manufacturing fields

use std::fmt::Write as _;

/// Role preamble opening every synthesized prompt
const PREAMBLE: &str = "You are a manufacturing operations assistant.";

/// Closing instruction appended after the labeled fields
const CLOSING: &str = "Write the best response. Use bullet points where useful. Be specific and actionable.";

/// Placeholder for empty optional fields
const NOT_APPLICABLE: &str = "N/A";

/// Alternative input shape used when no raw prompt is supplied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredPromptFields {
    /// Kind of deliverable, e.g. "SOP", "5-Why", "CAPA", "Handover"
    pub task: String,
    /// Manufacturing process, e.g. "CNC milling"
    pub process: String,
    /// Problem statement, e.g. "surface finish defects"
    pub issue: String,
    /// Free-form constraints, e.g. "ISO 9001, keep it short"
    pub constraints: String,
    /// Intended readers
    pub audience: String,
    /// Desired writing tone
    pub tone: String,
}

impl StructuredPromptFields {
    pub const DEFAULT_AUDIENCE: &'static str = "operators";
    pub const DEFAULT_TONE: &'static str = "clear, practical";

    /// A task plus at least one of process or issue
    pub fn is_usable(&self) -> bool {
        !self.task.is_empty() && !(self.process.is_empty() && self.issue.is_empty())
    }

    /// Render the prompt
    ///
    /// Field order and labels are fixed; empty process, issue and
    /// constraints render as `N/A`.
    pub fn render(&self) -> String {
        let mut prompt = String::with_capacity(256);

        let _ = writeln!(prompt, "{PREAMBLE}");
        let _ = writeln!(prompt, "Task: {}", self.task);
        let _ = writeln!(prompt, "Audience: {}", self.audience);
        let _ = writeln!(prompt, "Tone: {}", self.tone);
        let _ = writeln!(prompt, "Process: {}", or_not_applicable(&self.process));
        let _ = writeln!(prompt, "Issue: {}", or_not_applicable(&self.issue));
        let _ = writeln!(prompt, "Constraints: {}", or_not_applicable(&self.constraints));
        let _ = writeln!(prompt);
        prompt.push_str(CLOSING);

        prompt
    }
}

impl Default for StructuredPromptFields {
    fn default() -> Self {
        Self {
            task: String::new(),
            process: String::new(),
            issue: String::new(),
            constraints: String::new(),
            audience: Self::DEFAULT_AUDIENCE.to_owned(),
            tone: Self::DEFAULT_TONE.to_owned(),
        }
    }
}

fn or_not_applicable(value: &str) -> &str {
    if value.is_empty() { NOT_APPLICABLE } else { value }
}
