//! CSV loading into a player collection

use crate::error::Result;
use crate::player::{PlayerCollection, PlayerRecord};
use crate::types::{Attributes, RecordSchema};
use anyhow::Context;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, warn};

/// Load a collection from a delimited file on disk
pub fn load_collection(
    path: impl AsRef<Path>,
    schema: Arc<RecordSchema>,
    delimiter: u8,
) -> Result<PlayerCollection> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open snapshot file {}", path.display()))?;
    let collection = read_collection(file, schema, delimiter)
        .with_context(|| format!("Failed to read snapshot file {}", path.display()))?;

    debug!("Loaded {} players from {}", collection.size(), path.display());
    Ok(collection)
}

/// Read a collection from any delimited source
///
/// Rows that do not match the header width are skipped with a warning; any
/// other read failure is returned. Bytes that are not valid UTF-8 (Latin-1
/// names from spreadsheet exports) are decoded lossily so the row is kept.
/// A later row for an identity already seen replaces the earlier one.
pub fn read_collection<R: Read>(
    rdr: R,
    schema: Arc<RecordSchema>,
    delimiter: u8,
) -> Result<PlayerCollection> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(rdr);
    let headers: Vec<String> = reader
        .byte_headers()
        .context("Missing header row")?
        .iter()
        .map(decode)
        .collect();

    let mut collection = PlayerCollection::with_schema(schema.clone());
    for (line, result) in reader.byte_records().enumerate() {
        let row = match result {
            Ok(row) => row,
            Err(e) if matches!(e.kind(), csv::ErrorKind::UnequalLengths { .. }) => {
                warn!("skipping malformed row {}: {}", line + 2, e);
                continue;
            }
            Err(e) => return Err(e).with_context(|| format!("Failed to read row {}", line + 2)),
        };

        let attributes: Attributes = headers
            .iter()
            .zip(row.iter())
            .map(|(category, value)| (category.clone(), decode(value)))
            .collect();
        let record = PlayerRecord::new(attributes, schema.clone());
        let identity = record
            .get_identity()
            .with_context(|| format!("Row {} has no player name", line + 2))?;

        if collection.contains(&identity) {
            warn!("duplicate entry for '{}', using latest row", identity);
        }
        collection.add(record)?;
    }

    Ok(collection)
}

fn decode(field: &[u8]) -> String {
    String::from_utf8_lossy(field).into_owned()
}
