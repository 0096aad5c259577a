/// Column at which TeX engines hard-wrap log output.
const LOG_WRAP_LIMIT: usize = 79;

/// A build log reassembled into logical lines, with a sequential cursor.
///
/// TeX engines wrap log output at 79 columns, splitting file
/// paths and messages mid-token. `LogText` undoes that: a physical line is
/// appended to the previous logical line iff the previous physical line is
/// exactly the wrap limit long and does not end in `...` (the engine's own
/// marker that it truncated the line deliberately).
///
/// A line of exactly 79 columns that legitimately ends there cannot be told
/// apart from a wrapped one except via the `...` marker. That is an accepted
/// approximation inherited from the log format itself.
pub struct LogText {
    lines: Vec<String>,
    row: usize,
}

impl LogText {
    /// Normalizes line endings and rejoins wrapped lines.
    pub fn new(text: &str) -> Self {
        let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut lines: Vec<String> = Vec::new();
        let mut prev_wrapped = false;
        for physical in normalized.split('\n') {
            if prev_wrapped {
                if let Some(last) = lines.last_mut() {
                    last.push_str(physical);
                }
            } else {
                lines.push(physical.to_string());
            }
            // The wrap test looks at the physical line, not the accumulated
            // logical one: three 79-column lines in a row all join up.
            prev_wrapped = physical.len() == LOG_WRAP_LIMIT && !physical.ends_with("...");
        }

        Self { lines, row: 0 }
    }

    /// Advances the cursor, returning the next logical line, or `None` once
    /// the sequence is exhausted.
    pub fn next_line(&mut self) -> Option<String> {
        let line = self.lines.get(self.row).cloned();
        if line.is_some() {
            self.row += 1;
        }
        line
    }

    /// Moves the cursor back exactly one line. No-op at the start.
    pub fn rewind(&mut self) {
        self.row = self.row.saturating_sub(1);
    }

    /// Advances until a line satisfies `stop` or the sequence is exhausted,
    /// returning every line read (the stopping line included).
    pub fn collect_until<F>(&mut self, stop: F) -> Vec<String>
    where
        F: Fn(&str) -> bool,
    {
        let mut collected = Vec::new();
        while let Some(line) = self.next_line() {
            let done = stop(&line);
            collected.push(line);
            if done {
                break;
            }
        }
        collected
    }

    /// [`collect_until`](Self::collect_until) specialized to a line that is
    /// empty or all spaces.
    pub fn collect_until_blank(&mut self) -> Vec<String> {
        self.collect_until(|line| line.bytes().all(|b| b == b' '))
    }
}
