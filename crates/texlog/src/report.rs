use serde::{Deserialize, Serialize};

/// Severity class of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Typesetting,
}

/// A single diagnostic extracted from the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source line the engine attributed the problem to, when the log said.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    /// The file open on the file stack when the diagnostic fired.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub level: Level,
    /// Human-readable message, stripped of the log's framing.
    pub message: String,
    /// For errors, the multi-line context block that followed the `!` line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// The exact log text the diagnostic came from. Doubles as the
    /// deduplication key.
    pub raw: String,
}

/// The bucketed result of a parse call.
///
/// `errors`, `warnings` and `typesetting` are disjoint views filtered by
/// level; `all` holds every kept diagnostic in encounter order. Built once
/// when the scan finishes, never mutated afterward.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogReport {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub typesetting: Vec<Diagnostic>,
    pub all: Vec<Diagnostic>,
}

impl LogReport {
    /// True when the scan produced no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
