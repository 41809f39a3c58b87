//! Two-section CSV export: slot rows followed by transaction rows.

use std::borrow::Cow;
use std::io::Write;

use crate::core::{EngineSnapshot, SchedulerError};

const SLOT_HEADER: &str = "type,slot,used,extUsed,capacity";
const TX_HEADER: &str = "type,id,cu,priority,group,createdAt,deadline,scheduledSlot,retries,mode";

/// Quote a field when it contains a delimiter, quote or line break.
fn field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Write `snapshot` as CSV.
pub fn write_csv<W: Write>(snapshot: &EngineSnapshot, mut out: W) -> Result<(), SchedulerError> {
    writeln!(out, "{SLOT_HEADER}")?;
    for slot in &snapshot.slots {
        writeln!(
            out,
            "slot,{},{},{},{}",
            slot.index, slot.used, slot.external_used, slot.capacity
        )?;
    }
    writeln!(out, "{TX_HEADER}")?;
    for tx in &snapshot.transactions {
        let scheduled = tx.scheduled_slot.map(|s| s.to_string()).unwrap_or_default();
        writeln!(
            out,
            "tx,{},{},{},{},{},{},{},{},{}",
            tx.id,
            tx.cu,
            tx.priority,
            field(&tx.group),
            tx.created_at_slot,
            tx.deadline_slot,
            scheduled,
            tx.retry_count,
            tx.mode
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Render `snapshot` as a CSV string.
pub fn to_csv_string(snapshot: &EngineSnapshot) -> Result<String, SchedulerError> {
    let mut buf = Vec::new();
    write_csv(snapshot, &mut buf)?;
    String::from_utf8(buf).map_err(|e| SchedulerError::Serialization(e.to_string()))
}
