//! Filename heuristics used before (and instead of) embedded metadata.

pub const UNKNOWN_ARTIST: &str = "Unknown Artist";

const SEGMENT_SEPARATOR: &str = " - ";

/// Guess `(title, artist)` from a file base name.
///
/// `"01 - Title - Artist"` yields the second and third segments,
/// `"Title - Artist"` yields both segments, anything else is all title.
/// The artist is empty when the name gives no hint.
pub fn guess_from_base_name(base: &str) -> (String, String) {
    let parts: Vec<&str> = base.split(SEGMENT_SEPARATOR).collect();
    match parts.as_slice() {
        [_, title, artist, ..] => (title.trim().to_string(), artist.trim().to_string()),
        [title, artist] => (title.trim().to_string(), artist.trim().to_string()),
        _ => (base.trim().to_string(), String::new()),
    }
}

/// Filename guess with the empty-field fallbacks applied.
pub fn names_from_base_name(base: &str) -> (String, String) {
    let (title, artist) = guess_from_base_name(base);
    let title = if title.is_empty() {
        base.to_string()
    } else {
        title
    };
    let artist = if artist.is_empty() {
        UNKNOWN_ARTIST.to_string()
    } else {
        artist
    };
    let artist = distinct_artist(&title, artist);
    (title, artist)
}

/// Force the artist to the sentinel when it would duplicate the title.
///
/// A track literally titled "Unknown Artist" gets an empty artist instead.
pub fn distinct_artist(title: &str, artist: String) -> String {
    if artist != title {
        artist
    } else if title == UNKNOWN_ARTIST {
        String::new()
    } else {
        UNKNOWN_ARTIST.to_string()
    }
}
