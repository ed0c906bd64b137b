//! Keyword hints attached to assistant replies.
//!
//! Detection is plain substring matching on the user's message. It only
//! decorates the reply; nothing is actually computed or searched.

/// Arithmetic symbols and Russian "calculate/count/solve" verbs. Case-sensitive.
const MATH_MARKERS: &[&str] = &["+", "-", "*", "/", "=", "вычисли", "посчитай", "реши"];

/// Russian "when/where/who/what is/find/search". Matched against the lowercased message.
const SEARCH_MARKERS: &[&str] = &["когда", "где", "кто", "что такое", "найди", "поиск"];

pub const MATH_SUFFIX: &str = " 🔢";
pub const SEARCH_SUFFIX: &str = " 🌐";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolHints {
    pub math: bool,
    pub search: bool,
}

impl ToolHints {
    pub fn detect(message: &str) -> Self {
        let lowered = message.to_lowercase();
        Self {
            math: MATH_MARKERS.iter().any(|m| message.contains(m)),
            search: SEARCH_MARKERS.iter().any(|m| lowered.contains(m)),
        }
    }

    pub fn has_tools(&self) -> bool {
        self.math || self.search
    }

    /// Append the math marker, then the search marker.
    pub fn annotate(&self, reply: &str) -> String {
        let mut annotated = String::with_capacity(reply.len() + 10);
        annotated.push_str(reply);
        if self.math {
            annotated.push_str(MATH_SUFFIX);
        }
        if self.search {
            annotated.push_str(SEARCH_SUFFIX);
        }
        annotated
    }
}
