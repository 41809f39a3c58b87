//! Snapshot exporters. Exports read a snapshot and never touch the engine.

pub mod csv;
pub mod json;

pub use self::csv::{to_csv_string, write_csv};
pub use self::json::{to_json_string, write_json};

/// Suggested file name for an export, e.g. `slot-sim-1700000000000.csv`.
pub fn export_file_name(extension: &str) -> String {
    format!("slot-sim-{}.{extension}", crate::util::clock::now_ms())
}
