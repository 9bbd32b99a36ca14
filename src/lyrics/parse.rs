use std::sync::LazyLock;

use regex::Regex;

static LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[(\d{2}):(\d{2})\.(\d{2,3})\](.*)$").expect("lyric line pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    pub timestamp_ms: u64,
    pub text: String,
}

/// Parse a raw lyrics payload.
///
/// Only lines starting with a `[mm:ss.xx]` or `[mm:ss.xxx]` tag survive;
/// everything else (including `[ar:...]` style headers) is dropped. Order is
/// preserved and not checked.
pub fn parse(raw: &str) -> Vec<LyricLine> {
    raw.lines().filter_map(|line| parse_line(line.trim())).collect()
}

fn parse_line(line: &str) -> Option<LyricLine> {
    let caps = LINE_RE.captures(line)?;
    let minutes: u64 = caps[1].parse().ok()?;
    let seconds: u64 = caps[2].parse().ok()?;
    // The fraction is taken as milliseconds whatever its width, so `.50`
    // is 50 ms.
    let millis: u64 = caps[3].parse().ok()?;

    Some(LyricLine {
        timestamp_ms: (minutes * 60 + seconds) * 1000 + millis,
        text: caps[4].trim().to_string(),
    })
}
