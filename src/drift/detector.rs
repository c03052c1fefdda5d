use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::drift::differ::diff;
use crate::drift::loader::{load_shortcuts, load_state};
use crate::drift::validator::{check_comparable, StateMismatchError};
use crate::drift::{DriftError, DriftOutcome, DriftRow};
use crate::report::DriftReporter;
use crate::state::{Deserializer, ShortcutSchema, ShortcutTable, State, StateSchema};
use crate::storage::{valid_directory, Storage};

/// Inputs for one start/end comparison.
#[derive(Debug, Clone)]
pub struct DriftRequest {
    pub query_directory: PathBuf,
    pub start_state: String,
    pub end_state: String,
}

/// Top-level entry point. Every load, decode, or comparability failure is
/// logged here and yields `None`; the caller must treat `None` as "comparison
/// skipped", not "no drift".
pub fn run_drift_detection(
    request: &DriftRequest,
    storage: &dyn Storage,
    reporter: &dyn DriftReporter,
) -> Option<DriftOutcome> {
    let directory = request.query_directory.as_path();
    if !valid_directory(directory) {
        error!(directory = %directory.display(), "Invalid drift detection directory");
        return None;
    }

    let outcome = match detect_drift(
        directory,
        storage,
        &StateSchema,
        &ShortcutSchema,
        &request.start_state,
        &request.end_state,
    ) {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(
                start = %request.start_state,
                end = %request.end_state,
                directory = %directory.display(),
                "Unable to create drift states from files {},{} for \n{} in directory {}.",
                request.start_state,
                request.end_state,
                err,
                directory.display()
            );
            return None;
        }
    };

    info!(
        check = %outcome.end_state.name,
        additions = outcome.additions.len(),
        removals = outcome.removals.len(),
        "drift detection complete"
    );
    if let Err(err) = reporter.report(&outcome.to_report()) {
        warn!("failed reporting drift: {err:#}");
    }
    Some(outcome)
}

pub fn detect_drift(
    query_directory: &Path,
    storage: &dyn Storage,
    state_deserializer: &dyn Deserializer<State>,
    shortcut_deserializer: &dyn Deserializer<ShortcutTable>,
    start_ref: &str,
    end_ref: &str,
) -> Result<DriftOutcome, DriftError> {
    let shortcuts = load_shortcuts(query_directory, storage, shortcut_deserializer)?;
    let start_location = shortcuts.resolve(start_ref);
    let end_location = shortcuts.resolve(end_ref);
    debug!(start = start_location, end = end_location, "resolved state locations");

    let start_state = load_state(query_directory, start_location, storage, state_deserializer)?;
    let end_state = load_state(query_directory, end_location, storage, state_deserializer)?;

    let (additions, removals) = perform_drift_detection(&start_state, &end_state)?;
    Ok(DriftOutcome {
        additions,
        removals,
        end_state,
    })
}

/// Returns `(additions, removals)` between two already-loaded states.
pub fn perform_drift_detection(
    start: &State,
    end: &State,
) -> Result<(Vec<DriftRow>, Vec<DriftRow>), StateMismatchError> {
    check_comparable(start, end)?;
    Ok((diff(start, end), diff(end, start)))
}
