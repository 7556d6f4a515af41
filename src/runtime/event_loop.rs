use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, Command, InputMode};
use crate::audio::{AudioEngine, EngineEvent};
use crate::config::{self, ControlsSettings};
use crate::mpris::MprisHandle;
use crate::player::PlaybackState;
use crate::runtime::mpris_sync::{MprisView, update_mpris};
use crate::ui::{self, marquee::Marquee, spectrum::Spectrum};

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    pub marquee: Marquee,
    pub spectrum: Spectrum,
    last_scroll: Instant,
    last_spectrum: Instant,
    /// What MPRIS was last told.
    last_mpris: Option<MprisView>,
}

impl EventLoopState {
    pub fn new(settings: &config::Settings) -> Self {
        let now = Instant::now();
        Self {
            marquee: Marquee::default(),
            spectrum: Spectrum::new(settings.ui.spectrum_bars),
            last_scroll: now,
            last_spectrum: now,
            last_mpris: None,
        }
    }

    /// Advance the marquee and spectrum by however many ticks have elapsed.
    fn animate<E: AudioEngine>(&mut self, app: &App<E>, ui: &config::UiSettings) {
        self.marquee.set_text(app.now_playing(&ui.header_text));

        let scroll = Duration::from_millis(ui.scroll_tick_ms.max(1));
        while self.last_scroll.elapsed() >= scroll {
            self.marquee.tick();
            self.last_scroll += scroll;
        }

        let frame = Duration::from_millis(ui.spectrum_tick_ms.max(1));
        if self.last_spectrum.elapsed() >= frame {
            self.spectrum
                .animate(app.player.state() == PlaybackState::Playing);
            self.last_spectrum = Instant::now();
        }
    }
}

/// Strip the quoting terminals add around dropped paths.
fn clean_path_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = trimmed
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| trimmed.strip_prefix('"').and_then(|s| s.strip_suffix('"')))
        .unwrap_or(trimmed);
    (!unquoted.is_empty()).then(|| PathBuf::from(unquoted))
}

/// Translate a key press into a command, updating the app's input line along the way.
pub(crate) fn command_for_key<E: AudioEngine>(
    key: KeyEvent,
    app: &mut App<E>,
    controls: &ControlsSettings,
) -> Option<Command> {
    match app.input_mode {
        InputMode::Filter => match key.code {
            KeyCode::Esc => {
                app.input.clear();
                app.input_mode = InputMode::Normal;
                Some(Command::SetFilter(String::new()))
            }
            KeyCode::Enter => {
                app.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Backspace => {
                app.input.pop();
                Some(Command::SetFilter(app.input.clone()))
            }
            KeyCode::Down => Some(Command::SelectNext),
            KeyCode::Up => Some(Command::SelectPrevious),
            KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::SelectNext)
            }
            KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Command::SelectPrevious)
            }
            KeyCode::Char(c) if !c.is_control() => {
                app.input.push(c);
                Some(Command::SetFilter(app.input.clone()))
            }
            _ => None,
        },

        InputMode::AddPath => match key.code {
            KeyCode::Esc => {
                app.input.clear();
                app.input_mode = InputMode::Normal;
                None
            }
            KeyCode::Enter => {
                let path = clean_path_input(&app.input);
                app.input.clear();
                app.input_mode = InputMode::Normal;
                path.map(|p| Command::AddPaths(vec![p]))
            }
            KeyCode::Backspace => {
                app.input.pop();
                None
            }
            KeyCode::Char(c) if !c.is_control() => {
                app.input.push(c);
                None
            }
            _ => None,
        },

        InputMode::Normal => {
            let seek = i64::try_from(controls.seek_step_ms).unwrap_or(i64::MAX);
            match key.code {
                KeyCode::Char('q') => Some(Command::Quit),
                KeyCode::Char('p') | KeyCode::Char(' ') => Some(Command::PlayPause),
                KeyCode::Char('x') => Some(Command::Stop),
                KeyCode::Char('l') => Some(Command::Next),
                KeyCode::Char('h') => Some(Command::Previous),
                KeyCode::Char('L') => Some(Command::SeekBy(seek)),
                KeyCode::Char('H') => Some(Command::SeekBy(-seek)),
                KeyCode::Char('+') | KeyCode::Char('=') => {
                    Some(Command::ChangeVolume(controls.volume_step))
                }
                KeyCode::Char('-') => Some(Command::ChangeVolume(-controls.volume_step)),
                KeyCode::Char('s') => Some(Command::ToggleShuffle),
                KeyCode::Char('r') => Some(Command::ToggleRepeat),
                KeyCode::Char('t') => Some(Command::CycleTheme),
                KeyCode::Char('m') => Some(Command::ToggleDarkMode),
                KeyCode::Char('v') => Some(Command::ToggleListVisible),
                KeyCode::Char('z') => Some(Command::CycleSpectrumMode),
                KeyCode::Char('j') | KeyCode::Down => Some(Command::SelectNext),
                KeyCode::Char('k') | KeyCode::Up => Some(Command::SelectPrevious),
                KeyCode::Enter => Some(Command::PlaySelected),
                KeyCode::Char('d') | KeyCode::Delete => Some(Command::RemoveSelected),
                KeyCode::Char('C') => Some(Command::Clear),
                KeyCode::Char('/') => {
                    app.input = app.playlist.filter_text().to_string();
                    app.input_mode = InputMode::Filter;
                    None
                }
                KeyCode::Char('a') => {
                    app.input.clear();
                    app.input_mode = InputMode::AddPath;
                    None
                }
                _ => None,
            }
        }
    }
}

/// Main terminal event loop: handles input, UI drawing, engine notifications
/// and MPRIS. Returns `Ok(())` when shutdown is requested.
pub fn run<E: AudioEngine>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App<E>,
    engine_rx: &mpsc::Receiver<EngineEvent>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<Command>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let poll = Duration::from_millis(settings.ui.spectrum_tick_ms.clamp(1, 50));

    loop {
        while let Ok(ev) = engine_rx.try_recv() {
            app.handle_engine_event(ev);
        }

        while let Ok(cmd) = control_rx.try_recv() {
            if app.dispatch(cmd) {
                return Ok(());
            }
        }

        // Keep MPRIS in sync even when playback changes come from media keys or auto-advance.
        let view = MprisView::of(app);
        if state.last_mpris.as_ref() != Some(&view) {
            update_mpris(mpris, app);
            state.last_mpris = Some(view);
        }

        state.animate(app, &settings.ui);
        terminal.draw(|f| {
            ui::draw(
                f,
                app,
                &state.marquee,
                &state.spectrum,
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(cmd) = command_for_key(key, app, &settings.controls) {
                    if app.dispatch(cmd) {
                        return Ok(());
                    }
                }
            }
        }
    }
}
