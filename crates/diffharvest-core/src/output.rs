//! Output serialization.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use diffharvest_commit::Record;
use tracing::info;

use crate::{CoreError, CoreResult};

/// Writes `records` to `path` as a pretty-printed JSON array.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_records(path: impl AsRef<Path>, records: &[Record]) -> CoreResult<()> {
    let path = path.as_ref();
    let write_error = |source| CoreError::WriteOutput {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n").map_err(write_error)?;
    writer.flush().map_err(write_error)?;

    info!(?path, count = records.len(), "wrote records");
    Ok(())
}
