//! Builds in-memory alias indexes from a cached dataset file.
//!
//! Both entry points share a parse step: the document's `results`
//! sequence is traversed in order, and a later record with a duplicate
//! id overwrites the earlier one. An absent or unreadable file yields an
//! empty index so a cold-start process can run in degraded mode; a file
//! that exists but does not hold the expected shape is a format error.

use std::fs;
use std::io;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{AliasRecord, Kind, PeerRecord, RadioId, SubscriberRecord, TgidRecord};
use crate::index::{FlatIndex, StructuredIndex};

use super::error::DatasetError;

/// Top-level shape of a dataset document.
#[derive(Debug, Deserialize)]
struct Document {
    results: Vec<Value>,
}

/// The two fields every flat entry needs.
#[derive(Debug, Deserialize)]
struct FlatRow {
    id: u64,
    callsign: String,
}

/// Source fields for a peer record.
#[derive(Debug, Deserialize)]
struct PeerRow {
    id: u64,
    callsign: String,
    city: String,
    state: String,
    country: String,
    frequency: Value,
    color_code: Value,
    offset: Value,
    ts_linked: String,
    trustee: String,
    ipsc_network: String,
}

/// Source fields for a subscriber record.
#[derive(Debug, Deserialize)]
struct SubscriberRow {
    id: u64,
    callsign: String,
    fname: String,
    surname: String,
    city: String,
    state: String,
    country: String,
}

/// Source fields for a talkgroup record.
#[derive(Debug, Deserialize)]
struct TgidRow {
    id: u64,
    callsign: String,
}

/// Build a flat `id -> display name` index from the cached dataset file.
pub fn build_flat(
    storage_dir: impl AsRef<Path>,
    file_name: &str,
) -> Result<FlatIndex, DatasetError> {
    let Some(document) = read_document(&storage_dir.as_ref().join(file_name))? else {
        return Ok(FlatIndex::default());
    };

    let mut index = FlatIndex::default();
    for (position, value) in document.results.into_iter().enumerate() {
        let row: FlatRow = parse_row(position, value)?;
        index.insert(RadioId::new(row.id), row.callsign);
    }
    Ok(index)
}

/// Build a structured `id -> alias record` index of the given kind from
/// the cached dataset file.
pub fn build_structured(
    storage_dir: impl AsRef<Path>,
    file_name: &str,
    kind: Kind,
) -> Result<StructuredIndex, DatasetError> {
    let Some(document) = read_document(&storage_dir.as_ref().join(file_name))? else {
        return Ok(StructuredIndex::default());
    };

    let mut index = StructuredIndex::default();
    for (position, value) in document.results.into_iter().enumerate() {
        let (id, record) = match kind {
            Kind::Peer => {
                let row: PeerRow = parse_row(position, value)?;
                (
                    row.id,
                    AliasRecord::Peer(PeerRecord {
                        callsign: row.callsign,
                        city: row.city,
                        state: row.state,
                        country: row.country,
                        freq: row.frequency,
                        cc: row.color_code,
                        offset: row.offset,
                        linked: row.ts_linked,
                        trustee: row.trustee,
                        network: row.ipsc_network,
                    }),
                )
            }
            Kind::Subscriber => {
                let row: SubscriberRow = parse_row(position, value)?;
                let name = format!("{} {}", row.fname, row.surname);
                (
                    row.id,
                    AliasRecord::Subscriber(SubscriberRecord {
                        callsign: row.callsign,
                        name,
                        city: row.city,
                        state: row.state,
                        country: row.country,
                    }),
                )
            }
            Kind::Tgid => {
                let row: TgidRow = parse_row(position, value)?;
                (row.id, AliasRecord::Tgid(TgidRecord { name: row.callsign }))
            }
        };
        index.insert(RadioId::new(id), record);
    }
    Ok(index)
}

/// Read and decode the cached document.
///
/// `None` means the file is absent or unreadable, which the builders map
/// to an empty index. A file that exists but does not decode into a
/// document with a `results` sequence is a format error, distinct from
/// absence.
fn read_document(path: &Path) -> Result<Option<Document>, DatasetError> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(file = %path.display(), "no cached dataset, building an empty index");
            return Ok(None);
        }
        Err(e) => {
            warn!(file = %path.display(), error = %e, "cached dataset unreadable, building an empty index");
            return Ok(None);
        }
    };

    serde_json::from_str(&contents)
        .map(Some)
        .map_err(|e| DatasetError::Document {
            message: e.to_string(),
        })
}

fn parse_row<T: DeserializeOwned>(position: usize, value: Value) -> Result<T, DatasetError> {
    serde_json::from_value(value).map_err(|e| DatasetError::Record {
        index: position,
        message: e.to_string(),
    })
}
