//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::app::{App, InputMode};
use crate::audio::AudioEngine;
use crate::config::{ControlsSettings, UiSettings};
use crate::player::{MAX_VOLUME, PlaybackState};

pub mod marquee;
pub mod spectrum;
pub mod theme;

use marquee::Marquee;
use spectrum::{Spectrum, SpectrumView};
use theme::{Palette, palette, theme};

/// Render the controls help text with the configured step sizes.
fn controls_text(controls: &ControlsSettings) -> String {
    let seek_secs = controls.seek_step_ms / 1000;
    [
        "[space/p] play/pause".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{seek_secs}s"),
        format!("[-/+] volume -/+{}", controls.volume_step),
        "[x] stop".to_string(),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        "[v] list".to_string(),
        "[j/k] up/down".to_string(),
        "[enter] play selected".to_string(),
        "[/] filter".to_string(),
        "[a] add path".to_string(),
        "[d] remove".to_string(),
        "[C] clear".to_string(),
        "[t] theme".to_string(),
        "[m] dark/light".to_string(),
        "[z] spectrum".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Format milliseconds as `MM:SS`.
fn format_mmss(ms: u64) -> String {
    let secs = ms / 1000;
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// The `MM:SS / MM:SS` line under the display.
fn time_text(position_ms: u64, duration_ms: u64) -> String {
    format!("{} / {}", format_mmss(position_ms), format_mmss(duration_ms))
}

/// Progress in `0.0..=1.0`; zero while the duration is unknown.
fn progress_ratio(position_ms: u64, duration_ms: u64) -> f64 {
    if duration_ms == 0 {
        return 0.0;
    }
    (position_ms as f64 / duration_ms as f64).clamp(0.0, 1.0)
}

fn status_text<E: AudioEngine>(app: &App<E>) -> String {
    let state = match app.player.state() {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };
    let on_off = |b: bool| if b { "ON" } else { "OFF" };
    format!(
        "{state} • Shuffle: {} • Repeat: {} • Tracks: {}",
        on_off(app.player.is_shuffled()),
        on_off(app.player.is_repeated()),
        app.playlist.len()
    )
}

/// Window of `visible` (display-order indices) that keeps `selected` centred.
/// Returns `(start, end, selected_pos_in_window)`.
fn list_window(visible: &[usize], selected: Option<usize>, height: usize) -> (usize, usize, Option<usize>) {
    let total = visible.len();
    let sel_pos = selected.and_then(|s| visible.iter().position(|&i| i == s));
    if total <= height || height == 0 {
        return (0, total, sel_pos);
    }

    let pos = sel_pos.unwrap_or(0);
    let mut start = pos.saturating_sub(height / 2);
    if start + height > total {
        start = total - height;
    }
    (start, start + height, sel_pos.map(|p| p - start))
}

fn panel(title: &str, colors: &Palette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(colors.border))
        .style(Style::default().bg(colors.panel).fg(colors.text))
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<E: AudioEngine>(
    frame: &mut Frame,
    app: &App<E>,
    marquee: &Marquee,
    spectrum: &Spectrum,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let colors = palette(app.prefs.is_dark);
    let accent = theme(app.prefs.theme_index).accent;

    frame.render_widget(
        Block::default().style(Style::default().bg(colors.background)),
        frame.area(),
    );

    let mut constraints = vec![
        Constraint::Length(3),
        Constraint::Length(10),
        Constraint::Length(3),
        Constraint::Length(3),
    ];
    if app.prefs.is_list_visible {
        constraints.push(Constraint::Min(3));
    } else {
        constraints.push(Constraint::Min(0));
    }
    if app.input_mode != InputMode::Normal {
        constraints.push(Constraint::Length(3));
    }
    constraints.push(Constraint::Length(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(accent))
        .block(panel("turkamp", &colors).title_alignment(Alignment::Center));
    frame.render_widget(header, chunks[0]);

    // Display: scrolling title over the spectrum.
    {
        let block = panel("now playing", &colors);
        let inner = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(1)])
            .split(inner);

        let title = marquee.window(rows[0].width as usize);
        frame.render_widget(
            Paragraph::new(title).style(Style::default().fg(colors.text).add_modifier(Modifier::BOLD)),
            rows[0],
        );
        frame.render_widget(
            SpectrumView {
                heights: spectrum.heights(),
                mode: app.prefs.spectrum_mode,
                style: Style::default().fg(accent),
            },
            rows[1],
        );
    }

    // Progress
    let position = app.player.position_ms();
    let duration = app.player.duration_ms();
    let progress = Gauge::default()
        .block(panel("time", &colors))
        .gauge_style(Style::default().fg(accent).bg(colors.panel))
        .ratio(progress_ratio(position, duration))
        .label(time_text(position, duration));
    frame.render_widget(progress, chunks[2]);

    // Status and volume side by side.
    {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(chunks[3]);

        let status = Paragraph::new(status_text(app)).block(
            panel("status", &colors).padding(Padding {
                left: 1,
                right: 0,
                top: 0,
                bottom: 0,
            }),
        );
        frame.render_widget(status, cols[0]);

        let volume = app.player.volume();
        let gauge = Gauge::default()
            .block(panel("volume", &colors))
            .gauge_style(Style::default().fg(accent).bg(colors.panel))
            .ratio(f64::from(volume) / f64::from(MAX_VOLUME))
            .label(format!("{volume}%"));
        frame.render_widget(gauge, cols[1]);
    }

    if app.prefs.is_list_visible {
        draw_list(frame, app, chunks[4], &colors, accent);
    }

    let mut next = 5;
    if app.input_mode != InputMode::Normal {
        let (title, hint) = match app.input_mode {
            InputMode::Filter => ("filter", "esc clears, enter keeps"),
            _ => ("add path", "enter adds, esc cancels"),
        };
        let prompt = Paragraph::new(format!("{}▏", app.input))
            .block(panel(&format!("{title} ({hint})"), &colors));
        frame.render_widget(prompt, chunks[next]);
        next += 1;
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(panel("controls", &colors).padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        }))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[next]);
}

fn draw_list<E: AudioEngine>(frame: &mut Frame, app: &App<E>, area: Rect, colors: &Palette, accent: ratatui::style::Color) {
    let visible = app.playlist.visible_indices();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end, selected) = list_window(&visible, app.playlist.current_index(), height);
    let playing = app.player.current_track();
    let tracks = app.playlist.tracks();

    let items: Vec<ListItem> = visible[start..end]
        .iter()
        .filter_map(|&i| tracks.get(i).map(|t| (i, t)))
        .map(|(i, t)| {
            let item = ListItem::new(format!("{:>3}. {}", i + 1, t.display));
            if Some(i) == playing {
                item.style(Style::default().fg(accent))
            } else {
                item
            }
        })
        .collect();

    let title = if app.playlist.filter_text().is_empty() {
        format!("playlist ({})", app.playlist.len())
    } else {
        format!(
            "playlist ({}/{}) filter: {}",
            visible.len(),
            app.playlist.len(),
            app.playlist.filter_text()
        )
    };

    let list = List::new(items)
        .block(panel(&title, colors))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests;
