use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// One or more `/`-delimited segments, optionally rooted. This is the loose
/// shape test used to decide whether the text after `(` names a file.
static PATH_SHAPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/?([^/]+/)+").unwrap());

/// Policy for deciding whether the token after a `(` is a file being opened.
///
/// Most parentheses in a TeX log are arbitrary grouping, not file opens, and
/// the log carries no marker distinguishing the two. Real-world logs vary in
/// which heuristic works best, so both historical policies are available.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileMatch {
    /// Accept any token shaped like a path: one or more `/`-delimited
    /// segments, optionally rooted at `/`.
    #[default]
    PathShaped,
    /// Accept only tokens whose start matches one of these regex patterns.
    BaseNames(Vec<String>),
}

impl FileMatch {
    /// The historical default prefix list: build-output trees and system
    /// TeX installs.
    pub fn default_base_names() -> Self {
        Self::BaseNames(vec!["compiles".to_string(), "/usr/local".to_string()])
    }
}

/// Configuration for a parse call.
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// How file-open tokens are recognized. See [`FileMatch`].
    pub file_match: FileMatch,
    /// Drop diagnostics whose `raw` text repeats an earlier diagnostic's.
    /// Off by default.
    pub ignore_duplicates: bool,
}

/// Invalid configuration, reported at parser construction rather than
/// surfacing mid-scan.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid file base-name pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A [`FileMatch`] with its patterns compiled.
#[derive(Debug)]
pub(crate) enum FileMatcher {
    PathShaped,
    BaseNames(Vec<Regex>),
}

impl FileMatcher {
    pub(crate) fn compile(policy: &FileMatch) -> Result<Self, ConfigError> {
        match policy {
            FileMatch::PathShaped => Ok(Self::PathShaped),
            FileMatch::BaseNames(patterns) => {
                let mut compiled = Vec::with_capacity(patterns.len());
                for pattern in patterns {
                    let regex =
                        Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                            pattern: pattern.clone(),
                            source,
                        })?;
                    compiled.push(regex);
                }
                Ok(Self::BaseNames(compiled))
            }
        }
    }

    /// Whether `candidate` (the remainder of the line after `(`) begins with
    /// something this policy accepts as a filename.
    pub(crate) fn accepts(&self, candidate: &str) -> bool {
        match self {
            Self::PathShaped => PATH_SHAPED.is_match(candidate),
            Self::BaseNames(patterns) => patterns
                .iter()
                .any(|p| p.find(candidate).map_or(false, |m| m.start() == 0)),
        }
    }
}
