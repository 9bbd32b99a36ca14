use super::parse::{LyricLine, parse};

/// Pick the current and next line for `position_ms`.
///
/// Scans forward: every line at or before the position becomes current
/// (with its successor as next) and the scan stops at the first later line.
/// This expects ascending timestamps; out-of-order input latches onto
/// whatever the scan reached before stopping.
pub fn select(lines: &[LyricLine], position_ms: u64) -> (Option<&LyricLine>, Option<&LyricLine>) {
    let mut current = None;
    let mut next = None;

    for (i, line) in lines.iter().enumerate() {
        if line.timestamp_ms > position_ms {
            break;
        }
        current = Some(line);
        next = lines.get(i + 1);
    }

    (current, next)
}

/// Lyrics of the active track plus the last emitted current/next pair.
#[derive(Debug, Default)]
pub struct LyricsTracker {
    lines: Vec<LyricLine>,
    current: String,
    next: String,
}

impl LyricsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the lyrics with a freshly parsed payload and forget the
    /// emitted pair.
    pub fn load(&mut self, raw: &str) {
        self.lines = parse(raw);
        self.current.clear();
        self.next.clear();
    }

    /// Recompute the pair for `position_ms`. Returns `true` only when either
    /// line differs from what was last reported.
    pub fn update(&mut self, position_ms: u64) -> bool {
        let (current, next) = select(&self.lines, position_ms);
        let current = current.map(|l| l.text.as_str()).unwrap_or_default();
        let next = next.map(|l| l.text.as_str()).unwrap_or_default();

        if self.current == current && self.next == next {
            return false;
        }

        self.current = current.to_string();
        self.next = next.to_string();
        true
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn next(&self) -> &str {
        &self.next
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
