use std::env;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::Command;
use crate::audio::AudioPlayer;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();
    settings::init_logging(&settings.logging);

    // Every argument is treated like a path dropped onto the window.
    let args: Vec<PathBuf> = env::args_os().skip(1).map(PathBuf::from).collect();

    let (audio_player, engine_rx) = AudioPlayer::new(settings.audio.clone());
    let mut app = startup::build_app(audio_player, &settings, args);

    let (control_tx, control_rx) = mpsc::channel::<Command>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        let mut state = event_loop::EventLoopState::new(&settings);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &engine_rx,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.shutdown();
    app.player
        .engine_mut()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    log::info!("bye");

    run_result
}
