use super::naming::{distinct_artist, guess_from_base_name, names_from_base_name};
use super::scan::lyrics_from_tags;
use super::UNKNOWN_ARTIST;

#[test]
fn three_segments_take_second_and_third() {
    assert_eq!(
        guess_from_base_name("01 - Yesterday - The Beatles"),
        ("Yesterday".to_string(), "The Beatles".to_string())
    );
    assert_eq!(
        guess_from_base_name("01 - Title - Artist - Extra"),
        ("Title".to_string(), "Artist".to_string())
    );
}

#[test]
fn two_segments_are_title_then_artist() {
    assert_eq!(
        guess_from_base_name("Yesterday - The Beatles"),
        ("Yesterday".to_string(), "The Beatles".to_string())
    );
}

#[test]
fn single_segment_is_all_title() {
    assert_eq!(
        guess_from_base_name("track07"),
        ("track07".to_string(), String::new())
    );
    // A bare dash without surrounding spaces is not a separator.
    assert_eq!(
        guess_from_base_name("AC-DC"),
        ("AC-DC".to_string(), String::new())
    );
}

#[test]
fn fallbacks_fill_missing_artist() {
    assert_eq!(
        names_from_base_name("track07"),
        ("track07".to_string(), UNKNOWN_ARTIST.to_string())
    );
}

#[test]
fn equal_title_and_artist_become_unknown_artist() {
    assert_eq!(
        names_from_base_name("Echo - Echo"),
        ("Echo".to_string(), UNKNOWN_ARTIST.to_string())
    );
    assert_eq!(distinct_artist("Song", "Song".to_string()), UNKNOWN_ARTIST);
    assert_eq!(distinct_artist("Song", "Band".to_string()), "Band");
}

#[test]
fn title_named_like_the_sentinel_still_differs_from_artist() {
    let (title, artist) = names_from_base_name(UNKNOWN_ARTIST);
    assert_eq!(title, UNKNOWN_ARTIST);
    assert_ne!(title, artist);
}

#[test]
fn lyrics_heuristic_needs_length_and_a_marker() {
    let long_lines = "first line of the song goes here\nsecond line of the song goes here";
    let long_marker = "these are the LYRICS for a song without any line breaks at all";
    let long_plain = "a very long comment that has no markers and no line breaks whatsoever";
    let short = "short\nlyric";

    let tags = vec![
        ("Comment".to_string(), long_plain.to_string()),
        ("Short".to_string(), short.to_string()),
        ("Unknown(\"USLT\")".to_string(), long_lines.to_string()),
        ("Description".to_string(), long_marker.to_string()),
    ];
    assert_eq!(lyrics_from_tags(&tags).as_deref(), Some(long_lines));

    let tags = vec![("Description".to_string(), long_marker.to_string())];
    assert_eq!(lyrics_from_tags(&tags).as_deref(), Some(long_marker));

    let tags = vec![
        ("Comment".to_string(), long_plain.to_string()),
        ("Short".to_string(), short.to_string()),
    ];
    assert_eq!(lyrics_from_tags(&tags), None);
}
