//! Write-only exports of learned state for external analysis or rendering.

use std::path::Path;

use crate::{Result, learning::ValueTable};

/// Write the value table as CSV, one row per cell.
///
/// Columns: `row`, `col`, `return_sum`, `visit_count`, `mean_value`.
/// This is a one-way export; nothing in the crate reads it back.
pub fn write_values_csv<P: AsRef<Path>>(values: &ValueTable, path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["row", "col", "return_sum", "visit_count", "mean_value"])?;

    for (cell, return_sum, visit_count, mean_value) in values.cells() {
        writer.write_record(&[
            cell.row.to_string(),
            cell.col.to_string(),
            return_sum.to_string(),
            visit_count.to_string(),
            mean_value.to_string(),
        ])?;
    }

    writer.flush()?;
    Ok(())
}
