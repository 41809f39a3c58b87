//! JSON snapshot export.

use std::io::Write;

use crate::core::{EngineSnapshot, SchedulerError};

/// Write `snapshot` as pretty-printed JSON.
pub fn write_json<W: Write>(snapshot: &EngineSnapshot, mut out: W) -> Result<(), SchedulerError> {
    serde_json::to_writer_pretty(&mut out, snapshot)?;
    out.flush()?;
    Ok(())
}

/// Render `snapshot` as a compact JSON string.
pub fn to_json_string(snapshot: &EngineSnapshot) -> Result<String, SchedulerError> {
    Ok(serde_json::to_string(snapshot)?)
}
