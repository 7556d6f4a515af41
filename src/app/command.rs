use std::path::PathBuf;

/// A discrete user intent. Keys and MPRIS both produce these; `App::dispatch`
/// applies them one at a time on the event thread.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    PlayPause,
    Play,
    Pause,
    Stop,
    Next,
    Previous,
    /// Start the track under the playlist cursor.
    PlaySelected,
    SeekBy(i64),
    /// Absolute position in milliseconds.
    SeekTo(u64),
    SetVolume(i32),
    ChangeVolume(i32),
    ToggleShuffle,
    ToggleRepeat,
    CycleTheme,
    ToggleDarkMode,
    ToggleListVisible,
    CycleSpectrumMode,
    /// Move the cursor to the next/previous row the filter shows.
    SelectNext,
    SelectPrevious,
    /// Files or folders, as if dropped onto the playlist.
    AddPaths(Vec<PathBuf>),
    /// Drop the row under the cursor.
    RemoveSelected,
    Clear,
    SetFilter(String),
    Quit,
}
