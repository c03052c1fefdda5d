use std::path::Path;

use tracing::debug;

use crate::drift::DriftError;
use crate::state::{Deserializer, ShortcutTable, State, SHORTCUT_FILE};
use crate::storage::Storage;

pub fn load_state(
    directory: &Path,
    location: &str,
    storage: &dyn Storage,
    deserializer: &dyn Deserializer<State>,
) -> Result<State, DriftError> {
    let path = directory.join(location);
    debug!(path = %path.display(), "loading state");
    let raw = storage.load(&path)?;
    Ok(deserializer.load(&raw)?)
}

pub fn load_shortcuts(
    directory: &Path,
    storage: &dyn Storage,
    deserializer: &dyn Deserializer<ShortcutTable>,
) -> Result<ShortcutTable, DriftError> {
    let path = directory.join(SHORTCUT_FILE);
    let raw = storage.load(&path)?;
    Ok(deserializer.load(&raw)?)
}
