//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{path::Path, time::Duration};

use crate::audio::MediaBackend;
use crate::config::PlaybackSettings;
use crate::session::SessionController;
use crate::store::SettingsStore;

/// Key bindings in display order.
const CONTROLS: &[(&str, &str)] = &[
    ("j/k", "up/down"),
    ("h/l", "prev/next song"),
    ("H/L", "scrub"),
    ("enter", "play selected song"),
    ("space/p", "play/pause"),
    ("gg/G", "top/bottom"),
    ("r", "play mode"),
    ("+/-", "volume"),
    ("m", "mute"),
    ("q", "quit"),
];

/// Render the controls help text, incorporating scrub seconds.
fn controls_text(scrub_seconds: u64) -> String {
    CONTROLS
        .iter()
        .map(|(k, v)| {
            if *k == "H/L" {
                format!("[{k}] {v} -/+{scrub_seconds}s")
            } else {
                format!("[{k}] {v}")
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Format a `Duration` as `MM:SS`.
fn format_mmss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn time_text(position_ms: u64, duration_ms: u64) -> String {
    let elapsed = format_mmss(Duration::from_millis(position_ms));
    if duration_ms == 0 {
        elapsed
    } else {
        format!("{elapsed}/{}", format_mmss(Duration::from_millis(duration_ms)))
    }
}

/// First and one-past-last row of a `height`-row window over `total` rows,
/// centered on `selected` where possible.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

/// Cursor and loading state owned by the event loop.
pub struct ListView<'a> {
    pub selected: usize,
    pub folder: Option<&'a Path>,
    /// Tracks ingested so far while a folder load is running.
    pub scanning: Option<usize>,
}

/// Render the entire UI into the provided `frame`.
pub fn draw<B: MediaBackend, S: SettingsStore>(
    frame: &mut Frame,
    session: &SessionController<B, S>,
    view: &ListView<'_>,
    playback: &PlaybackSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header_text = match (view.scanning, view.folder) {
        (Some(n), _) => format!("scanning... {n} tracks"),
        (None, Some(dir)) => dir.display().to_string(),
        (None, None) => String::new(),
    };
    let header = Paragraph::new(header_text)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" lilt ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status = {
        let mut parts: Vec<String> = Vec::new();

        parts.push(format!("MODE: {}", session.play_mode().label()));

        match session.current_index() {
            Some(_) => {
                let np = session.now_playing();
                let song = if np.artist.is_empty() {
                    np.title.clone()
                } else {
                    format!("{} - {}", np.title, np.artist)
                };
                parts.push(format!(
                    "Song: {song} [{}]",
                    time_text(session.position_ms(), session.duration_ms())
                ));
                if !np.album.is_empty() {
                    parts.push(format!("Album: {}", np.album));
                }
                parts.push(if session.is_playing() { "Playing" } else { "Paused" }.to_string());
            }
            None => parts.push("Stopped".to_string()),
        }

        if session.is_muted() {
            parts.push("Volume: muted".to_string());
        } else {
            parts.push(format!("Volume: {:.0}%", session.volume() * 100.0));
        }

        parts.join(" • ")
    };

    let status_par = Paragraph::new(status)
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" status "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Lyrics
    let lyric_lines = if session.current_index().is_some() && !session.has_lyrics() {
        vec![Line::from("no lyrics".dim())]
    } else {
        vec![
            Line::from(session.current_lyric().bold()),
            Line::from(session.next_lyric().dim()),
        ]
    };
    let lyrics = Paragraph::new(lyric_lines)
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title(" lyrics "));
    frame.render_widget(lyrics, chunks[2]);

    // Main list
    {
        let catalog = session.catalog();
        let total = catalog.len();
        let list_height = chunks[3].height.saturating_sub(2) as usize;
        let selected = view.selected.min(total.saturating_sub(1));
        let (start, end) = visible_window(total, list_height, selected);

        let visible_items: Vec<ListItem> = catalog
            .iter()
            .enumerate()
            .skip(start)
            .take(end - start)
            .map(|(i, track)| {
                let marker = if session.is_current(i) { "♪ " } else { "  " };
                ListItem::new(format!("{marker}{}", track.display_name))
            })
            .collect();

        let list = List::new(visible_items)
            .block(Block::default().borders(Borders::ALL).title(" tracks "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if total > 0 {
            state.select(Some(selected - start));
        }
        frame.render_stateful_widget(list, chunks[3], &mut state);
    }

    let footer = Paragraph::new(controls_text(playback.scrub_seconds))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(footer, chunks[4]);
}
