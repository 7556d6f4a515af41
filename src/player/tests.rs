use super::*;
use crate::audio::{AudioEngine, EngineEvent};
use crate::playlist::Playlist;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum EngineCall {
    Load(PathBuf),
    Play,
    Pause,
    Stop,
    SetPosition(u64),
    SetVolume(f32),
}

/// Engine double that records every call it receives.
#[derive(Default)]
pub(crate) struct MockEngine {
    pub calls: Vec<EngineCall>,
}

impl MockEngine {
    pub fn loaded(&self) -> Vec<PathBuf> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                EngineCall::Load(p) => Some(p.clone()),
                _ => None,
            })
            .collect()
    }
}

impl AudioEngine for MockEngine {
    fn load(&mut self, path: &Path) {
        self.calls.push(EngineCall::Load(path.to_path_buf()));
    }
    fn play(&mut self) {
        self.calls.push(EngineCall::Play);
    }
    fn pause(&mut self) {
        self.calls.push(EngineCall::Pause);
    }
    fn stop(&mut self) {
        self.calls.push(EngineCall::Stop);
    }
    fn set_position(&mut self, position_ms: u64) {
        self.calls.push(EngineCall::SetPosition(position_ms));
    }
    fn set_volume(&mut self, volume: f32) {
        self.calls.push(EngineCall::SetVolume(volume));
    }
}

/// Playlist of real (empty) files so existence checks pass.
pub(crate) fn playlist_on_disk(names: &[&str]) -> (TempDir, Playlist) {
    let dir = tempdir().unwrap();
    let mut playlist = Playlist::default();
    for n in names {
        let p = dir.path().join(n);
        fs::write(&p, b"fake audio").unwrap();
        assert!(playlist.add(&p));
    }
    (dir, playlist)
}

fn controller() -> PlaybackController<MockEngine> {
    PlaybackController::new(MockEngine::default())
}

#[test]
fn play_track_loads_and_plays_existing_file() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    let mut c = controller();

    assert!(c.play_track(&mut playlist, 1));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.current_track(), Some(1));
    assert_eq!(c.title(), Some("B.mp3"));
    assert_eq!(playlist.current_index(), Some(1));
    assert_eq!(
        c.engine().calls,
        vec![EngineCall::Load(dir.path().join("B.mp3")), EngineCall::Play]
    );
}

#[test]
fn play_track_missing_file_changes_nothing() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    fs::remove_file(dir.path().join("B.mp3")).unwrap();
    let mut c = controller();

    assert!(!c.play_track(&mut playlist, 1));
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert_eq!(c.current_track(), None);
    assert!(c.engine().calls.is_empty());

    assert!(!c.play_track(&mut playlist, 7));
    assert!(c.engine().calls.is_empty());
}

#[test]
fn play_track_missing_file_keeps_paused_state() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);
    c.pause();
    let calls_before = c.engine().calls.len();

    fs::remove_file(dir.path().join("B.mp3")).unwrap();
    assert!(!c.play_track(&mut playlist, 1));
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.current_track(), Some(0));
    assert_eq!(c.engine().calls.len(), calls_before);
}

#[test]
fn toggle_on_empty_playlist_does_nothing() {
    let mut playlist = Playlist::default();
    let mut c = controller();

    assert!(!c.toggle_play_pause(&mut playlist));
    assert_eq!(c.state(), PlaybackState::Stopped);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn toggle_starts_first_track_then_pauses_and_resumes() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    let mut c = controller();

    assert!(c.toggle_play_pause(&mut playlist));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(playlist.current_index(), Some(0));

    assert!(!c.toggle_play_pause(&mut playlist));
    assert_eq!(c.state(), PlaybackState::Paused);

    assert!(!c.toggle_play_pause(&mut playlist));
    assert_eq!(c.state(), PlaybackState::Playing);

    assert_eq!(
        c.engine().calls,
        vec![
            EngineCall::Load(dir.path().join("A.mp3")),
            EngineCall::Play,
            EngineCall::Pause,
            EngineCall::Play,
        ]
    );
}

#[test]
fn toggle_starts_the_selected_track_when_nothing_loaded() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    playlist.set_current_index(2);
    let mut c = controller();

    c.toggle_play_pause(&mut playlist);
    assert_eq!(c.current_track(), Some(2));
    assert_eq!(c.engine().loaded(), vec![dir.path().join("C.mp3")]);
}

#[test]
fn next_cycles_through_the_whole_playlist() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3", "D.mp3"]);
    for start in 0..playlist.len() {
        let mut c = controller();
        playlist.set_current_index(start);
        for _ in 0..playlist.len() {
            assert!(c.next(&mut playlist));
        }
        assert_eq!(playlist.current_index(), Some(start));
    }
}

#[test]
fn previous_undoes_next() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    for start in 0..playlist.len() {
        let mut c = controller();
        playlist.set_current_index(start);
        c.next(&mut playlist);
        c.previous(&mut playlist);
        assert_eq!(playlist.current_index(), Some(start));
        assert_eq!(c.current_track(), Some(start));
    }
}

#[test]
fn next_and_previous_without_selection_wrap_sensibly() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c = controller();
    assert!(c.next(&mut playlist));
    assert_eq!(playlist.current_index(), Some(0));

    let (_dir2, mut playlist2) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c2 = controller();
    assert!(c2.previous(&mut playlist2));
    assert_eq!(playlist2.current_index(), Some(2));
}

#[test]
fn next_and_previous_on_empty_playlist_are_no_ops() {
    let mut playlist = Playlist::default();
    let mut c = controller();
    assert!(!c.next(&mut playlist));
    assert!(!c.previous(&mut playlist));
    assert!(c.engine().calls.is_empty());
}

#[test]
fn filter_does_not_change_traversal() {
    let (_dir, mut plain) = playlist_on_disk(&["rock.mp3", "jazz.mp3", "rock2.mp3"]);
    let (_dir2, mut filtered) = playlist_on_disk(&["rock.mp3", "jazz.mp3", "rock2.mp3"]);
    filtered.set_filter("rock");

    let mut a = controller();
    let mut b = controller();
    for _ in 0..5 {
        a.next(&mut plain);
        b.next(&mut filtered);
        assert_eq!(plain.current_index(), filtered.current_index());
    }
    assert_eq!(filtered.len(), 3);
}

#[test]
fn shuffle_uses_the_picker_and_may_repeat_the_current_track() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut picks = vec![2usize, 2, 0];
    let mut c = controller().with_shuffle_picker(move |len| {
        assert_eq!(len, 3);
        picks.remove(0)
    });
    c.set_shuffled(true);

    c.next(&mut playlist);
    assert_eq!(playlist.current_index(), Some(2));
    c.next(&mut playlist);
    assert_eq!(playlist.current_index(), Some(2));
    c.next(&mut playlist);
    assert_eq!(playlist.current_index(), Some(0));
}

#[test]
fn shuffle_random_picks_stay_in_range() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c = controller();
    c.set_shuffled(true);
    for _ in 0..50 {
        assert!(c.next(&mut playlist));
        assert!(playlist.current_index().unwrap() < 3);
    }
}

#[test]
fn previous_ignores_shuffle() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c = controller().with_shuffle_picker(|_| panic!("previous must not shuffle"));
    c.set_shuffled(true);
    playlist.set_current_index(1);
    c.previous(&mut playlist);
    assert_eq!(playlist.current_index(), Some(0));
}

#[test]
fn next_moves_cursor_past_a_missing_file() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    fs::remove_file(dir.path().join("B.mp3")).unwrap();
    let mut c = controller();
    c.play_track(&mut playlist, 0);

    assert!(!c.next(&mut playlist));
    assert_eq!(playlist.current_index(), Some(1));
    assert_eq!(c.current_track(), Some(0));

    assert!(c.next(&mut playlist));
    assert_eq!(c.current_track(), Some(2));
}

#[test]
fn end_of_media_advances_to_the_next_track() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);

    c.handle_engine_event(EngineEvent::EndOfMedia, &mut playlist);

    assert_eq!(playlist.current_index(), Some(1));
    assert_eq!(c.current_track(), Some(1));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(
        c.engine().loaded(),
        vec![dir.path().join("A.mp3"), dir.path().join("B.mp3")]
    );
}

#[test]
fn end_of_media_with_repeat_restarts_the_same_track() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    let mut c = controller();
    c.set_repeated(true);
    c.play_track(&mut playlist, 2);
    c.on_position_changed(90_000);
    let loads_before = c.engine().loaded().len();

    c.on_end_of_media(&mut playlist);

    assert_eq!(playlist.current_index(), Some(2));
    assert_eq!(c.current_track(), Some(2));
    assert_eq!(c.position_ms(), 0);
    assert_eq!(c.engine().loaded().len(), loads_before);
    assert_eq!(
        &c.engine().calls[c.engine().calls.len() - 2..],
        &[EngineCall::SetPosition(0), EngineCall::Play]
    );
}

#[test]
fn end_of_media_stops_when_nothing_can_start() {
    let (dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);
    fs::remove_file(dir.path().join("B.mp3")).unwrap();

    c.on_end_of_media(&mut playlist);
    assert_eq!(c.state(), PlaybackState::Stopped);
}

#[test]
fn seek_relative_clamps_to_duration() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);
    c.on_duration_changed(10_000);
    c.on_position_changed(8_000);

    c.seek_relative(5_000);
    assert_eq!(c.position_ms(), 10_000);

    c.seek_relative(-60_000);
    assert_eq!(c.position_ms(), 0);

    c.seek_to(4_000);
    assert_eq!(c.position_ms(), 4_000);
    assert_eq!(c.engine().calls.last(), Some(&EngineCall::SetPosition(4_000)));
}

#[test]
fn seek_with_unknown_duration_is_not_clamped_to_zero() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);
    c.on_position_changed(8_000);

    c.seek_relative(5_000);
    assert_eq!(c.position_ms(), 13_000);
    assert_eq!(c.engine().calls.last(), Some(&EngineCall::SetPosition(13_000)));

    c.seek_relative(-60_000);
    assert_eq!(c.position_ms(), 0);
}

#[test]
fn seek_without_source_does_not_touch_engine() {
    let mut c = controller();
    c.seek_relative(5_000);
    assert!(c.engine().calls.is_empty());
}

#[test]
fn volume_is_clamped_and_normalized() {
    let mut c = controller();
    c.set_volume(150);
    assert_eq!(c.volume(), 100);
    assert_eq!(c.engine().calls.last(), Some(&EngineCall::SetVolume(1.0)));

    c.change_volume_by(-9999);
    assert_eq!(c.volume(), 0);
    assert_eq!(c.engine().calls.last(), Some(&EngineCall::SetVolume(0.0)));

    c.set_volume(40);
    c.change_volume_by(5);
    assert_eq!(c.volume(), 45);
    assert_eq!(c.engine().calls.last(), Some(&EngineCall::SetVolume(0.45)));

    c.change_volume_by(i32::MAX);
    assert_eq!(c.volume(), 100);
}

#[test]
fn engine_notifications_are_mirrored() {
    let mut playlist = Playlist::default();
    let mut c = controller();
    c.handle_engine_event(EngineEvent::DurationChanged(180_000), &mut playlist);
    c.handle_engine_event(EngineEvent::PositionChanged(1_500), &mut playlist);
    c.handle_engine_event(EngineEvent::StateChanged(PlaybackState::Paused), &mut playlist);

    assert_eq!(c.duration_ms(), 180_000);
    assert_eq!(c.position_ms(), 1_500);
    assert_eq!(c.state(), PlaybackState::Paused);
}

#[test]
fn invalid_media_stops_and_forgets_the_source() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 1);

    c.handle_engine_event(EngineEvent::InvalidMedia, &mut playlist);
    assert_eq!(c.state(), PlaybackState::Stopped);

    // Nothing loaded any more, so play starts the selection again.
    assert!(c.toggle_play_pause(&mut playlist));
    assert_eq!(c.current_track(), Some(1));
}

#[test]
fn stop_then_play_resumes_the_loaded_source() {
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3"]);
    let mut c = controller();
    c.play_track(&mut playlist, 0);
    c.stop();
    assert_eq!(c.state(), PlaybackState::Stopped);

    assert!(!c.toggle_play_pause(&mut playlist));
    assert_eq!(c.state(), PlaybackState::Playing);
    assert_eq!(c.engine().loaded().len(), 1);
}

#[test]
fn removed_rows_keep_current_track_consistent() {
    let mut c = controller();
    let (_dir, mut playlist) = playlist_on_disk(&["A.mp3", "B.mp3", "C.mp3"]);
    c.play_track(&mut playlist, 2);

    c.on_track_removed(0);
    assert_eq!(c.current_track(), Some(1));
    c.on_track_removed(1);
    assert_eq!(c.current_track(), None);
}

#[test]
fn toggles_flip_flags() {
    let mut c = controller();
    assert!(!c.is_shuffled());
    c.toggle_shuffle();
    assert!(c.is_shuffled());
    c.toggle_repeat();
    assert!(c.is_repeated());
    c.set_repeated(false);
    assert!(!c.is_repeated());
}
