//! # texlog
//!
//! Parser for LaTeX engine log files (`*.log`) with structured diagnostic output.
//!
//! ## Overview
//!
//! This crate transforms the unstructured, line-wrapped output of TeX engines
//! (pdfTeX, XeTeX, LuaTeX, etc.) into a [`LogReport`] of typed [`Diagnostic`]s.
//! The parser handles:
//!
//! - **Line wrapping**: TeX logs hard-wrap at 79 characters, splitting paths
//!   and messages across physical lines
//! - **File stack tracking**: Matching `(file.tex` and `)` pairs so each
//!   diagnostic is attributed to the source file that was open when it fired
//! - **Diagnostic extraction**: `!` errors with their multi-line context
//!   blocks, `LaTeX Warning:` and `Package ... Warning:` messages, and
//!   over/underfull box reports
//! - **Best-effort recovery**: a truncated or garbled log still yields a
//!   report, never a failure
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐            ┌─────────────┐            ┌─────────────┐
//! │   raw text   │ ─────────► │   LogText   │ ─────────► │  LogParser  │
//! │  (.log file) │  rejoin    │ (reassembled│  scan      │ (two-state  │
//! └──────────────┘  wrapped   │    lines)   │  lines     │   machine)  │
//!                   lines     └─────────────┘            └──────┬──────┘
//!                                                               │
//!                                                               ▼
//!                                                           LogReport
//! ```
//!
//! [`LogText`](log_text::LogText) undoes the engine's fixed-column wrapping
//! and exposes a line cursor. [`LogParser`] walks that cursor, tracking the
//! open-file stack and collecting error blocks, then buckets the results.
//!
//! ## Examples
//!
//! ```
//! use texlog::{parse_log, ParseOptions};
//!
//! let log = "! Undefined control sequence.\nl.29 \\foo\n";
//! let report = parse_log(log, &ParseOptions::default()).unwrap();
//!
//! assert_eq!(report.errors.len(), 1);
//! assert_eq!(report.errors[0].message, "Undefined control sequence.");
//! assert_eq!(report.errors[0].line, Some(29));
//! ```
//!
//! ### Exporting to JSON
//!
//! The report types implement `serde::Serialize`:
//!
//! ```no_run
//! use texlog::{parse_log, ParseOptions};
//! use std::fs;
//!
//! let log = fs::read_to_string("main.log")?;
//! let report = parse_log(&log, &ParseOptions::default())?;
//! let json = serde_json::to_string_pretty(&report)?;
//! fs::write("diagnostics.json", json)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Wrapped-line reassembly and the line cursor.
pub mod log_text;
/// Parse configuration and its validation errors.
pub mod options;
/// The scanning state machine.
pub mod parser;
/// Diagnostic records and the bucketed report.
pub mod report;

#[cfg(test)]
mod tests;

pub use options::{ConfigError, FileMatch, ParseOptions};
pub use parser::LogParser;
pub use report::{Diagnostic, Level, LogReport};

/// Parses a full build log in one call.
///
/// Returns `Err` only if `options` carries an invalid file base-name
/// pattern; the scan itself never fails, and a malformed or truncated log
/// produces a partial (possibly empty) report.
pub fn parse_log(text: &str, options: &ParseOptions) -> Result<LogReport, ConfigError> {
    Ok(LogParser::new(text, options)?.parse())
}
