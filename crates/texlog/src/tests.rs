use crate::report::Level;
use crate::{parse_log, ConfigError, FileMatch, ParseOptions};

fn parse(text: &str) -> crate::LogReport {
    parse_log(text, &ParseOptions::default()).unwrap()
}

#[test]
fn test_parse_empty_log() {
    let report = parse("");
    assert!(report.is_empty());
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());
    assert!(report.typesetting.is_empty());
}

#[test]
fn test_undefined_control_sequence() {
    let log = "! Undefined control sequence.\nl.29 \\foo\n";
    let report = parse(log);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.level, Level::Error);
    assert_eq!(error.message, "Undefined control sequence.");
    assert_eq!(error.line, Some(29));
    assert!(error.raw.starts_with("! Undefined control sequence."));
}

#[test]
fn test_error_block_collection() {
    let log = "\
! Undefined control sequence.
<recently read> \\foo
l.29 \\foo
          bar

The control sequence at the end of the top line
of your error message was never \\def'ed.

(./after.tex)
";
    let report = parse(log);
    assert_eq!(report.errors.len(), 1);
    let error = &report.errors[0];
    assert_eq!(error.line, Some(29));
    let content = error.content.as_deref().unwrap();
    assert!(content.contains("l.29 \\foo"));
    assert!(content.contains("never \\def'ed."));
    assert!(error.raw.contains("l.29 \\foo"));
}

#[test]
fn test_line_extraction_from_marker() {
    let log = "! Extra }, or forgotten \\right.\nl.46 ...\n";
    let report = parse(log);
    assert_eq!(report.errors[0].line, Some(46));
}

#[test]
fn test_truncated_error_block_still_emits() {
    // Log cut off before the l.<n> marker ever appears.
    let log = "! Emergency stop.\n<*> main.tex";
    let report = parse(log);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].message, "Emergency stop.");
    assert_eq!(report.errors[0].line, None);
}

#[test]
fn test_back_to_back_errors() {
    let log = "\
! Missing $ inserted.
l.30 x

help one

! Missing } inserted.
l.46 y

help two

";
    let report = parse(log);
    assert_eq!(report.errors.len(), 2);
    assert_eq!(report.errors[0].line, Some(30));
    assert_eq!(report.errors[1].line, Some(46));
}

#[test]
fn test_citation_warning() {
    let log = "LaTeX Warning: Citation 'X' on page 1 undefined on input line 7.\n";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    let warning = &report.warnings[0];
    assert_eq!(warning.level, Level::Warning);
    assert_eq!(warning.line, Some(7));
    assert_eq!(
        warning.message,
        "Citation 'X' on page 1 undefined on input line 7."
    );
    assert_eq!(warning.raw, warning.message);
}

#[test]
fn test_warning_without_line_number() {
    let log = "LaTeX Warning: There were undefined references.\n";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, None);
}

#[test]
fn test_package_warning_single_line() {
    let log = "Package natbib Warning: Citation `blah' undefined on input line 6.\n";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, Some(6));
    assert_eq!(
        report.warnings[0].message,
        "Citation `blah' undefined on input line 6."
    );
}

#[test]
fn test_package_warning_continuation_lines_join() {
    let log = "\
Package biblatex Warning: Data encoding is UTF-8
(biblatex)                Using fallback driver.
LaTeX Warning: There were undefined references.
";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 2);
    assert_eq!(
        report.warnings[0].message,
        "Data encoding is UTF-8 Using fallback driver."
    );
    // The raw text keeps the original framing for deduplication.
    assert!(report.warnings[0].raw.starts_with("Package biblatex Warning:"));
    assert!(report.warnings[0].raw.contains("(biblatex)"));
    // The non-continuation line was pushed back and classified normally.
    assert_eq!(
        report.warnings[1].message,
        "There were undefined references."
    );
}

#[test]
fn test_package_warning_line_number_in_continuation() {
    let log = "\
Package natbib Warning: Citation `blah' on page 1 undefined
(natbib)                on input line 6.
";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, Some(6));
    assert_eq!(
        report.warnings[0].message,
        "Citation `blah' on page 1 undefined on input line 6."
    );
}

#[test]
fn test_overfull_hbox() {
    let log = "Overfull \\hbox (29.11179pt too wide) in paragraph at lines 9--10\n";
    let report = parse(log);
    assert_eq!(report.typesetting.len(), 1);
    let boxed = &report.typesetting[0];
    assert_eq!(boxed.level, Level::Typesetting);
    assert_eq!(boxed.line, Some(9));
    assert_eq!(
        boxed.message,
        "Overfull \\hbox (29.11179pt too wide) in paragraph at lines 9--10"
    );
    assert_eq!(boxed.raw, boxed.message);
}

#[test]
fn test_underfull_vbox() {
    let log = "Underfull \\vbox (badness 10000) detected at line 46\n";
    let report = parse(log);
    assert_eq!(report.typesetting.len(), 1);
    assert_eq!(report.typesetting[0].line, Some(46));
}

#[test]
fn test_nested_file_attribution() {
    let log = "\
(compiles/x/a.tex
LaTeX Warning: Reference `a' on page 1 undefined on input line 3.
(compiles/x/b.tex
LaTeX Warning: Reference `b' on page 1 undefined on input line 5.
)
LaTeX Warning: Reference `c' on page 2 undefined on input line 9.
)
LaTeX Warning: There were undefined references.
";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 4);
    assert_eq!(report.warnings[0].file.as_deref(), Some("compiles/x/a.tex"));
    assert_eq!(report.warnings[1].file.as_deref(), Some("compiles/x/b.tex"));
    assert_eq!(report.warnings[2].file.as_deref(), Some("compiles/x/a.tex"));
    assert_eq!(report.warnings[3].file, None);
}

#[test]
fn test_non_file_parens_do_not_disturb_file_stack() {
    // The (Info) and (preloaded format=...) parens are ordinary grouping;
    // their closes must not pop the open file.
    let log = "\
(compiles/x/a.tex
Latexmk: (Info) some message (preloaded format=pdflatex)
LaTeX Warning: Reference `a' on page 1 undefined on input line 3.
)
";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].file.as_deref(), Some("compiles/x/a.tex"));
}

#[test]
fn test_unmatched_close_with_empty_stack_is_ignored() {
    let log = "\
) stray close
(compiles/x/a.tex
LaTeX Warning: Reference `a' on page 1 undefined on input line 3.
";
    let report = parse(log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].file.as_deref(), Some("compiles/x/a.tex"));
}

#[test]
fn test_errors_inherit_current_file() {
    let log = "\
(compiles/x/a.tex
! Undefined control sequence.
l.29 \\foo
";
    let report = parse(log);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].file.as_deref(), Some("compiles/x/a.tex"));
}

#[test]
fn test_base_name_policy_is_narrower() {
    let log = "\
(./local/a.tex
LaTeX Warning: Reference `a' on page 1 undefined on input line 3.
";
    let options = ParseOptions {
        file_match: FileMatch::default_base_names(),
        ..Default::default()
    };
    let report = parse_log(log, &options).unwrap();
    // ./local/a.tex does not match the compiled prefixes, so no file was open.
    assert_eq!(report.warnings[0].file, None);

    // The default path-shaped policy accepts it.
    let report = parse(log);
    assert_eq!(report.warnings[0].file.as_deref(), Some("./local/a.tex"));
}

#[test]
fn test_invalid_base_name_pattern_is_config_error() {
    let options = ParseOptions {
        file_match: FileMatch::BaseNames(vec!["(unclosed".to_string()]),
        ..Default::default()
    };
    let err = parse_log("", &options).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPattern { .. }));
}

#[test]
fn test_duplicates_kept_by_default() {
    let line = "Overfull \\hbox (1.0pt too wide) in paragraph at lines 9--10\n";
    let log = format!("{line}{line}");
    let report = parse(&log);
    assert_eq!(report.all.len(), 2);
    assert_eq!(report.typesetting.len(), 2);
}

#[test]
fn test_ignore_duplicates_keeps_first_occurrence() {
    let line = "Overfull \\hbox (1.0pt too wide) in paragraph at lines 9--10\n";
    let other = "Underfull \\vbox (badness 10000) detected at line 46\n";
    let log = format!("{line}{other}{line}");
    let options = ParseOptions {
        ignore_duplicates: true,
        ..Default::default()
    };
    let report = parse_log(&log, &options).unwrap();
    assert_eq!(report.all.len(), 2);
    assert!(report.all[0].message.starts_with("Overfull"));
    assert!(report.all[1].message.starts_with("Underfull"));

    // Dedup never grows the result.
    let kept = parse(&log);
    assert!(report.all.len() <= kept.all.len());
}

#[test]
fn test_report_partition() {
    let log = "\
! Missing $ inserted.
l.30 x

help

LaTeX Warning: There were undefined references.
Overfull \\hbox (1.0pt too wide) in paragraph at lines 9--10
";
    let report = parse(log);
    assert_eq!(report.all.len(), 3);
    assert_eq!(
        report.errors.len() + report.warnings.len() + report.typesetting.len(),
        report.all.len()
    );
    assert!(report.errors.iter().all(|d| d.level == Level::Error));
    assert!(report.warnings.iter().all(|d| d.level == Level::Warning));
    assert!(report
        .typesetting
        .iter()
        .all(|d| d.level == Level::Typesetting));
}

#[test]
fn test_wrapped_warning_line_is_reassembled() {
    // Split a long warning at the engine's wrap column and check the parser
    // sees it whole again.
    let full = "LaTeX Warning: Reference `fig:a-rather-long-label-name' on page 12 \
                undefined on input line 1234.";
    assert!(full.len() > 79);
    let (head, tail) = full.split_at(79);
    let log = format!("{head}\n{tail}\n");
    let report = parse(&log);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].line, Some(1234));
    assert_eq!(format!("LaTeX Warning: {}", report.warnings[0].message), full);
}
