use super::types::{BackendEvent, BackendNotice, MediaStatus, PlaybackState, coalesce_positions};

fn at(generation: u64, event: BackendEvent) -> BackendNotice {
    BackendNotice::new(generation, event)
}

fn tick(generation: u64, ms: u64) -> BackendNotice {
    at(generation, BackendEvent::PositionChanged(ms))
}

#[test]
fn consecutive_ticks_collapse_to_the_latest() {
    let notices = vec![tick(1, 100), tick(1, 150), tick(1, 200)];
    assert_eq!(coalesce_positions(notices), vec![tick(1, 200)]);
}

#[test]
fn ticks_are_flushed_before_other_events() {
    let notices = vec![
        tick(1, 9_800),
        tick(1, 9_950),
        at(1, BackendEvent::MediaStatusChanged(MediaStatus::EndOfMedia)),
        at(1, BackendEvent::PlaybackStateChanged(PlaybackState::Playing)),
        tick(1, 0),
        tick(1, 40),
    ];
    assert_eq!(
        coalesce_positions(notices),
        vec![
            tick(1, 9_950),
            at(1, BackendEvent::MediaStatusChanged(MediaStatus::EndOfMedia)),
            at(1, BackendEvent::PlaybackStateChanged(PlaybackState::Playing)),
            tick(1, 40),
        ]
    );
}

#[test]
fn ticks_from_different_loads_are_not_merged() {
    let notices = vec![tick(3, 41_000), tick(3, 41_250), tick(4, 0), tick(4, 250)];
    assert_eq!(
        coalesce_positions(notices),
        vec![tick(3, 41_250), tick(4, 250)]
    );
}

#[test]
fn nothing_in_nothing_out() {
    assert!(coalesce_positions(Vec::new()).is_empty());
}
