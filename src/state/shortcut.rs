use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::state::schema::{Deserializer, SchemaValidationError};
use crate::state::ShortcutTable;
use crate::storage::{Storage, StorageError};

pub const SHORTCUT_FILE: &str = "shortcut.json";
/// Maintained by the state capture tooling; never user-assignable.
pub const RESERVED_SHORTCUT: &str = "most-recent";

#[derive(Debug, Error)]
pub enum ShortcutError {
    #[error("shortcut '{0}' is reserved")]
    Reserved(String),
    #[error("no state file '{file}' in {directory}")]
    MissingFile { file: String, directory: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Schema(#[from] SchemaValidationError),
}

/// Maps a logical state identifier to its file name, falling back to the
/// identifier itself so literal file names pass through.
pub fn resolve<'a>(shortcuts: &'a BTreeMap<String, String>, identifier: &'a str) -> &'a str {
    shortcuts
        .get(identifier)
        .map(String::as_str)
        .unwrap_or(identifier)
}

pub fn add_shortcut(
    directory: &Path,
    storage: &dyn Storage,
    schema: &dyn Deserializer<ShortcutTable>,
    alias: &str,
    target: &str,
) -> Result<ShortcutTable, ShortcutError> {
    if alias == RESERVED_SHORTCUT {
        return Err(ShortcutError::Reserved(alias.to_string()));
    }
    let table_path = directory.join(SHORTCUT_FILE);
    let mut table = schema.load(&storage.load(&table_path)?)?;

    let file = table.resolve(target).to_string();
    if !directory.join(&file).is_file() {
        return Err(ShortcutError::MissingFile {
            file,
            directory: directory.display().to_string(),
        });
    }

    table.shortcuts.insert(alias.to_string(), file.clone());
    storage.write(&table_path, &schema.dump(&table)?)?;
    info!(alias, file = %file, "registered shortcut");
    Ok(table)
}
