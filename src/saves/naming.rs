//! Save file naming
//!
//! Saves live at `<saves>/<system id>/<rom name without extension>.srm`, the
//! layout RetroArch uses, so the files can be synced with it.

use std::path::{Path, PathBuf};

use crate::error::SaveError;
use crate::saves::results::Game;
use crate::storage::validation::is_valid_segment;

pub const SAVE_EXTENSION: &str = "srm";

/// Replace the last extension of `file_name` with `.srm`
pub fn save_file_name(file_name: &str) -> String {
    let stem = file_name
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(file_name);
    format!("{stem}.{SAVE_EXTENSION}")
}

/// Where the save for `game` lives under `saves_dir`
pub fn save_file_location(saves_dir: &Path, game: &Game) -> Result<PathBuf, SaveError> {
    if !is_valid_segment(&game.system_id) {
        return Err(SaveError::InvalidGame(format!(
            "system id {:?}",
            game.system_id
        )));
    }

    let name = save_file_name(&game.file_name);
    if !is_valid_segment(&name) {
        return Err(SaveError::InvalidGame(format!(
            "file name {:?}",
            game.file_name
        )));
    }

    Ok(saves_dir.join(&game.system_id).join(name))
}
