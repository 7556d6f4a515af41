use super::*;
use crate::app::Command;
use crate::player::PlaybackController;
use crate::player::tests::{MockEngine, playlist_on_disk};
use crate::session::SessionStore;
use ratatui::{Terminal, backend::TestBackend};

#[test]
fn format_mmss_pads_and_rolls_minutes() {
    assert_eq!(format_mmss(0), "00:00");
    assert_eq!(format_mmss(59_999), "00:59");
    assert_eq!(format_mmss(61_000), "01:01");
    assert_eq!(time_text(5_000, 185_000), "00:05 / 03:05");
}

#[test]
fn progress_ratio_is_zero_without_duration_and_clamped() {
    assert_eq!(progress_ratio(1_000, 0), 0.0);
    assert_eq!(progress_ratio(500, 1_000), 0.5);
    assert_eq!(progress_ratio(2_000, 1_000), 1.0);
}

#[test]
fn controls_text_uses_configured_steps() {
    let controls = ControlsSettings {
        seek_step_ms: 10_000,
        volume_step: 3,
    };
    let text = controls_text(&controls);
    assert!(text.contains("[H/L] seek -/+10s"));
    assert!(text.contains("[-/+] volume -/+3"));
}

#[test]
fn list_window_centres_selection_in_long_lists() {
    let visible: Vec<usize> = (0..20).collect();
    assert_eq!(list_window(&visible, Some(10), 5), (8, 13, Some(2)));
    assert_eq!(list_window(&visible, Some(19), 5), (15, 20, Some(4)));
    assert_eq!(list_window(&visible, None, 5), (0, 5, None));
    assert_eq!(list_window(&visible[..3], Some(1), 5), (0, 3, Some(1)));
}

#[test]
fn list_window_ignores_hidden_selection() {
    let visible = vec![0, 2, 4];
    assert_eq!(list_window(&visible, Some(3), 10), (0, 3, None));
}

#[test]
fn marquee_scrolls_long_text_and_wraps_after_gap() {
    let mut m = Marquee::default();
    m.set_text("abcdef");
    assert_eq!(m.window(10), "abcdef");
    assert_eq!(m.window(4), "abcd");

    m.tick();
    assert_eq!(m.window(4), "bcde");

    for _ in 0..(6 + marquee::GAP - 1) {
        m.tick();
    }
    assert_eq!(m.window(4), "abcd");
}

#[test]
fn marquee_restarts_only_on_new_text() {
    let mut m = Marquee::default();
    m.set_text("hello world");
    m.tick();
    m.tick();
    m.set_text("hello world");
    assert_eq!(m.window(3), "llo");

    m.set_text("other text");
    assert_eq!(m.window(3), "oth");
}

#[test]
fn spectrum_rises_while_playing_and_decays_when_stopped() {
    let mut s = Spectrum::new(8);
    assert!(s.heights().iter().all(|&h| h == 0.0));

    for _ in 0..30 {
        s.animate(true);
    }
    assert!(s.heights().iter().all(|&h| h > 0.05 && h <= 1.0));

    for _ in 0..60 {
        s.animate(false);
    }
    assert!(s.heights().iter().all(|&h| h < 0.01));
}

#[test]
fn spectrum_symbols_follow_the_mode() {
    let heights = [0.5, 1.0, 0.0];

    assert_eq!(spectrum::symbol_at(0, &heights, 0, 0, 4), Some("█"));
    assert_eq!(spectrum::symbol_at(0, &heights, 0, 2, 4), None);
    assert_eq!(spectrum::symbol_at(2, &heights, 0, 3, 4), Some("█"));
    assert_eq!(spectrum::symbol_at(2, &heights, 0, 0, 4), None);
    assert_eq!(spectrum::symbol_at(4, &heights, 0, 1, 4), Some("●"));
    assert_eq!(spectrum::symbol_at(8, &heights, 0, 1, 4), Some("╱"));
    assert_eq!(spectrum::symbol_at(8, &heights, 1, 3, 4), Some("╲"));
    assert_eq!(spectrum::symbol_at(9, &heights, 1, 3, 4), Some("▓"));
    assert_eq!(spectrum::symbol_at(9, &heights, 1, 0, 4), Some("░"));

    // Empty bars and out-of-range bars draw nothing.
    for mode in 0..spectrum::MODE_COUNT {
        assert_eq!(spectrum::symbol_at(mode, &heights, 2, 0, 4), None);
        assert_eq!(spectrum::symbol_at(mode, &heights, 9, 0, 4), None);
    }
}

#[test]
fn theme_lookup_wraps() {
    assert_eq!(theme::theme(0), theme::theme(theme::THEMES.len()));
    assert_ne!(theme::palette(true).background, theme::palette(false).background);
}

fn render_to_string(app: &App<MockEngine>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
    let mut marquee = Marquee::default();
    marquee.set_text(app.now_playing("Ready"));
    let spectrum = Spectrum::new(10);
    terminal
        .draw(|f| {
            draw(
                f,
                app,
                &marquee,
                &spectrum,
                &UiSettings::default(),
                &ControlsSettings::default(),
            )
        })
        .unwrap();

    terminal
        .backend()
        .buffer()
        .content()
        .iter()
        .map(|c| c.symbol())
        .collect()
}

#[test]
fn draw_shows_title_time_and_filtered_rows() {
    let (_music, playlist) = playlist_on_disk(&["Alpha.mp3", "Beta.mp3"]);
    let mut app = App::new(
        playlist,
        PlaybackController::new(MockEngine::default()),
        SessionStore::disabled(),
    );
    app.dispatch(Command::PlayPause);
    app.dispatch(Command::ToggleListVisible);
    app.dispatch(Command::SetFilter("bet".into()));

    let screen = render_to_string(&app);
    assert!(screen.contains("Alpha.mp3"));
    assert!(screen.contains("00:00 / 00:00"));
    assert!(screen.contains("2. Beta.mp3"));
    assert!(!screen.contains("1. Alpha.mp3"));
    assert!(screen.contains("Shuffle: OFF"));
}

#[test]
fn draw_hides_list_when_toggled_off() {
    let (_music, playlist) = playlist_on_disk(&["Alpha.mp3"]);
    let app = App::new(
        playlist,
        PlaybackController::new(MockEngine::default()),
        SessionStore::disabled(),
    );

    let screen = render_to_string(&app);
    assert!(screen.contains("Ready"));
    assert!(!screen.contains("1. Alpha.mp3"));
}
