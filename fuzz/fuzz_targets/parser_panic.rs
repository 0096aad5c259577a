#![no_main]
use libfuzzer_sys::fuzz_target;
use texlog::{parse_log, ParseOptions};

fuzz_target!(|data: &[u8]| {
    // The parser promises a report for any input text, so any panic here is
    // a bug. Lossy conversion maximizes coverage of inputs that are
    // "almost" text.
    let s = String::from_utf8_lossy(data);
    let _ = parse_log(&s, &ParseOptions::default());
});
