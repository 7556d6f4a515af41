use serde::{Deserialize, Serialize};

/// Snapshot of everything restored at the next start.
///
/// Every field has a default so records written by older versions (or edited
/// by hand) still load; unknown keys are ignored. Numeric fields are kept wide
/// so an out-of-range value is corrected on restore instead of failing the
/// whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    pub theme_index: i64,
    pub volume: i64,
    pub is_dark: bool,
    pub is_shuffled: bool,
    pub is_repeated: bool,
    pub is_list_visible: bool,
    /// Playlist cursor, `-1` when nothing is selected.
    pub current_index: i64,
    pub spectrum_mode: i64,
    pub playlist: Vec<String>,
}

impl Default for SessionRecord {
    fn default() -> Self {
        Self {
            theme_index: 0,
            volume: 75,
            is_dark: true,
            is_shuffled: false,
            is_repeated: false,
            is_list_visible: false,
            current_index: -1,
            spectrum_mode: 0,
            playlist: Vec::new(),
        }
    }
}
