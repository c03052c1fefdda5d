pub mod csv;
pub mod json;
pub mod table;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Marker used for a drift row's direction in tabular output.
pub fn change_marker(addition: bool) -> &'static str {
    if addition {
        "+"
    } else {
        "-"
    }
}
