use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::log_text::LogText;
use crate::options::{ConfigError, FileMatcher, ParseOptions};
use crate::report::{Diagnostic, Level, LogReport};

static LATEX_WARNING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^LaTeX Warning: (.*)$").unwrap());
static PACKAGE_WARNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Package|Class) ([\w@-]+) Warning: (.*)$").unwrap());
static PACKAGE_CONTINUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\(([\w@-]+)\)\s*(.*)$").unwrap());
static BOX_WARNING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Over|Under)full \\[vh]box").unwrap());
static ERROR_AT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^l\.[0-9]+").unwrap());
static LINE_REF: Lazy<Regex> = Lazy::new(|| Regex::new(r"l\.([0-9]+)").unwrap());
static LINE_IN_MESSAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"line ([0-9]+)").unwrap());
static BOX_AT_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"lines? ([0-9]+)").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    Normal,
    CollectingError,
}

/// The scanning state machine over a reassembled log.
///
/// `LogParser` walks the [`LogText`] cursor one logical line at a time. In
/// `Normal` state each line is classified (fatal error, warning, box report,
/// or plain text scanned for file-open/close parentheses); hitting a `!`
/// line switches to `CollectingError`, which consumes the engine's
/// multi-line error block before returning to `Normal`.
///
/// File context comes from a stack of open files fed by `(path` and `)`
/// tokens. Parentheses that do not open a file (most of them) are counted on
/// a separate depth counter so their closes never pop the file stack.
///
/// Each parse call owns its parser; there is no shared state across calls.
pub struct LogParser {
    log: LogText,
    state: ParserState,
    file_matcher: FileMatcher,
    ignore_duplicates: bool,
    diagnostics: Vec<Diagnostic>,
    current_error: Option<Diagnostic>,
    file_stack: Vec<String>,
    open_parens: usize,
}

impl LogParser {
    /// Builds a parser over `text`.
    ///
    /// Fails only if `options.file_match` carries an invalid pattern; the
    /// scan itself is infallible.
    pub fn new(text: &str, options: &ParseOptions) -> Result<Self, ConfigError> {
        Ok(Self {
            log: LogText::new(text),
            state: ParserState::Normal,
            file_matcher: FileMatcher::compile(&options.file_match)?,
            ignore_duplicates: options.ignore_duplicates,
            diagnostics: Vec::new(),
            current_error: None,
            file_stack: Vec::new(),
            open_parens: 0,
        })
    }

    /// Runs the scan to exhaustion and buckets the results.
    pub fn parse(mut self) -> LogReport {
        while let Some(line) = self.log.next_line() {
            if self.state == ParserState::Normal {
                if line.starts_with('!') {
                    self.begin_error(&line);
                } else if let Some(message) = match_latex_warning(&line) {
                    let raw = message.clone();
                    self.push_warning(message, raw);
                } else if let Some((package, first)) = match_package_warning(&line) {
                    self.collect_package_warning(&line, &package, first);
                } else if BOX_WARNING.is_match(&line) {
                    self.push_box_warning(&line);
                } else {
                    self.scan_parens_for_filenames(&line);
                }
            }

            if self.state == ParserState::CollectingError {
                self.collect_error_block();
            }
        }

        self.into_report()
    }

    /// Seeds a pending error from a `!` line and enters collection.
    fn begin_error(&mut self, line: &str) {
        self.state = ParserState::CollectingError;
        self.current_error = Some(Diagnostic {
            line: None,
            file: self.current_file(),
            level: Level::Error,
            // "! " prefix dropped.
            message: line.get(2..).unwrap_or("").to_string(),
            content: None,
            raw: format!("{line}\n"),
        });
    }

    /// Consumes the engine's canonical error block: everything up to the
    /// `l.<n>` marker, then two blank-terminated chunks of context and help
    /// text. A log truncated mid-block still yields the diagnostic, with the
    /// line number left unknown if the marker never arrived.
    fn collect_error_block(&mut self) {
        let Some(mut error) = self.current_error.take() else {
            self.state = ParserState::Normal;
            return;
        };

        let mut content = self
            .log
            .collect_until(|l| ERROR_AT_LINE.is_match(l))
            .join("\n");
        content.push('\n');
        content.push_str(&self.log.collect_until_blank().join("\n"));
        content.push('\n');
        content.push_str(&self.log.collect_until_blank().join("\n"));

        error.raw.push_str(&content);
        if let Some(caps) = LINE_REF.captures(&error.raw) {
            error.line = caps[1].parse().ok();
        }
        error.content = Some(content);

        self.diagnostics.push(error);
        self.state = ParserState::Normal;
    }

    /// Consumes the `(pkgname)   ...` continuation lines a package or class
    /// warning spreads its message over, space-joining them into one
    /// message. The first non-continuation line is pushed back for normal
    /// classification.
    fn collect_package_warning(&mut self, first_line: &str, package: &str, mut message: String) {
        let mut raw = first_line.to_string();
        while let Some(next) = self.log.next_line() {
            let continued = match PACKAGE_CONTINUATION.captures(&next) {
                Some(caps) if &caps[1] == package => {
                    let text = caps[2].trim();
                    if !text.is_empty() {
                        message.push(' ');
                        message.push_str(text);
                    }
                    true
                }
                _ => false,
            };
            if continued {
                raw.push('\n');
                raw.push_str(&next);
            } else {
                self.log.rewind();
                break;
            }
        }
        self.push_warning(message, raw);
    }

    fn push_warning(&mut self, message: String, raw: String) {
        let line = LINE_IN_MESSAGE
            .captures(&message)
            .and_then(|caps| caps[1].parse().ok());
        self.diagnostics.push(Diagnostic {
            line,
            file: self.current_file(),
            level: Level::Warning,
            message,
            content: None,
            raw,
        });
    }

    fn push_box_warning(&mut self, line: &str) {
        let line_no = BOX_AT_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse().ok());
        self.diagnostics.push(Diagnostic {
            line: line_no,
            file: self.current_file(),
            level: Level::Typesetting,
            message: line.to_string(),
            content: None,
            raw: line.to_string(),
        });
    }

    /// Walks a line's `(` and `)` tokens, maintaining the open-file stack.
    ///
    /// A `(` followed by something the file policy accepts pushes a file;
    /// any other `(` bumps the non-file depth counter. A `)` closes the
    /// innermost non-file group if one is open, otherwise pops the file
    /// stack — and with an empty stack it is simply ignored, since a
    /// truncated log must not abort the scan.
    fn scan_parens_for_filenames(&mut self, line: &str) {
        let mut rest = line;
        while let Some(pos) = rest.find(|c| c == '(' || c == ')') {
            let token = rest.as_bytes()[pos];
            rest = &rest[pos + 1..];

            if token == b'(' {
                if let Some((filename, after)) = self.consume_file_name(rest) {
                    self.file_stack.push(filename);
                    rest = after;
                } else {
                    self.open_parens += 1;
                }
            } else if self.open_parens > 0 {
                self.open_parens -= 1;
            } else {
                self.file_stack.pop();
            }
        }
    }

    /// Tries to read a filename at the start of `rest` (text just after a
    /// `(`). The name runs to the next space or `)`, or to end of line.
    fn consume_file_name<'a>(&self, rest: &'a str) -> Option<(String, &'a str)> {
        if !self.file_matcher.accepts(rest) {
            return None;
        }
        match rest.find(|c| c == ' ' || c == ')') {
            Some(end) => Some((rest[..end].to_string(), &rest[end..])),
            None => Some((rest.to_string(), "")),
        }
    }

    fn current_file(&self) -> Option<String> {
        self.file_stack.last().cloned()
    }

    /// Post-pass: optional raw-text dedup, then partition by level.
    fn into_report(self) -> LogReport {
        let mut report = LogReport::default();
        let mut seen: HashSet<String> = HashSet::new();

        for diagnostic in self.diagnostics {
            if self.ignore_duplicates && !seen.insert(diagnostic.raw.clone()) {
                continue;
            }
            match diagnostic.level {
                Level::Error => report.errors.push(diagnostic.clone()),
                Level::Warning => report.warnings.push(diagnostic.clone()),
                Level::Typesetting => report.typesetting.push(diagnostic.clone()),
            }
            report.all.push(diagnostic);
        }

        report
    }
}

fn match_latex_warning(line: &str) -> Option<String> {
    LATEX_WARNING
        .captures(line)
        .map(|caps| caps[1].to_string())
}

fn match_package_warning(line: &str) -> Option<(String, String)> {
    PACKAGE_WARNING
        .captures(line)
        .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
}
