//! Infrastructure adapters for exporting run state.

pub mod export;

pub use export::{export_file_name, to_csv_string, to_json_string, write_csv, write_json};
