use super::*;

const SONG: &str = "[00:10.00]A\n[00:20.00]B\n[00:30.00]C";

fn texts(lines: &[LyricLine]) -> Vec<&str> {
    lines.iter().map(|l| l.text.as_str()).collect()
}

fn pair(lines: &[LyricLine], position_ms: u64) -> (String, String) {
    let (current, next) = select(lines, position_ms);
    (
        current.map(|l| l.text.clone()).unwrap_or_default(),
        next.map(|l| l.text.clone()).unwrap_or_default(),
    )
}

#[test]
fn parse_keeps_only_timestamped_lines_in_order() {
    let raw = "[ar:Someone]\n\
               [ti:Something]\n\
               \n\
               plain text line\n\
               [00:01.50] first \r\n\
               [1:02.00]too few minute digits\n\
               [00:03.123]second\n\
               [00:04]no fraction\n\
               \t[00:05.00]third";

    let lines = parse(raw);

    assert_eq!(texts(&lines), vec!["first", "second", "third"]);
    assert_eq!(lines[0].timestamp_ms, 1_050);
    assert_eq!(lines[1].timestamp_ms, 3_123);
    assert_eq!(lines[2].timestamp_ms, 5_000);
}

#[test]
fn parse_handles_minutes_and_empty_text() {
    let lines = parse("[02:05.10]\n[10:00.000]end");
    assert_eq!(lines[0].timestamp_ms, 125_010);
    assert_eq!(lines[0].text, "");
    assert_eq!(lines[1].timestamp_ms, 600_000);
}

#[test]
fn two_and_three_digit_fractions_are_both_milliseconds() {
    let lines = parse("[00:10.50]half\n[00:10.05]x\n[00:10.500]y");
    let stamps: Vec<u64> = lines.iter().map(|l| l.timestamp_ms).collect();
    assert_eq!(stamps, vec![10_050, 10_005, 10_500]);
}

#[test]
fn parse_of_empty_payload_is_empty() {
    assert!(parse("").is_empty());
    assert!(parse("no tags here\nat all").is_empty());
}

#[test]
fn select_picks_last_line_at_or_before_position() {
    let lines = parse(SONG);

    assert_eq!(pair(&lines, 15_000), ("A".into(), "B".into()));
    assert_eq!(pair(&lines, 25_000), ("B".into(), "C".into()));
    assert_eq!(pair(&lines, 5_000), (String::new(), String::new()));
    assert_eq!(pair(&lines, 10_000), ("A".into(), "B".into()));
    assert_eq!(pair(&lines, 99_000), ("C".into(), String::new()));
}

#[test]
fn select_stops_at_first_later_timestamp() {
    // Out of order: the scan halts at 00:40 and never sees 00:15.
    let lines = parse("[00:10.00]A\n[00:40.00]B\n[00:15.00]C");
    assert_eq!(pair(&lines, 20_000), ("A".into(), "B".into()));
}

#[test]
fn tracker_reports_only_changes() {
    let mut tracker = LyricsTracker::new();
    tracker.load(SONG);

    assert!(tracker.update(15_000));
    assert_eq!(tracker.current(), "A");
    assert_eq!(tracker.next(), "B");

    assert!(!tracker.update(15_000));
    assert!(!tracker.update(17_500));

    assert!(tracker.update(21_000));
    assert_eq!(tracker.current(), "B");
    assert_eq!(tracker.next(), "C");
}

#[test]
fn tracker_before_first_line_reports_nothing_new() {
    let mut tracker = LyricsTracker::new();
    tracker.load(SONG);
    assert!(!tracker.update(5_000));
    assert_eq!(tracker.current(), "");
    assert_eq!(tracker.next(), "");
}

#[test]
fn tracker_without_lyrics_clears_lines() {
    let mut tracker = LyricsTracker::new();
    tracker.load(SONG);
    assert!(tracker.update(25_000));

    tracker.load("");
    assert!(tracker.is_empty());
    assert_eq!(tracker.current(), "");
    assert!(!tracker.update(25_000));
    assert_eq!(tracker.next(), "");
}
