//! Decoding raw product records from JSON.
//!
//! The expected document is an array of flat objects. The `"id"` key of each
//! object becomes the record id; every other key is an attribute. Objects
//! without an id are identified by their zero-based position in the array.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde_json::{Map, Value};

use crate::catalog::Catalog;
use crate::data::{RawRecord, RawValue};
use crate::error::Result;

const ID_KEY: &str = "id";

/// Parse records from a JSON string.
pub fn parse_records(json: &str) -> Result<Vec<RawRecord>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_str(json)?;
    objects_to_records(objects)
}

/// Read records from any reader producing a JSON document.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<RawRecord>> {
    let objects: Vec<Map<String, Value>> = serde_json::from_reader(reader)?;
    objects_to_records(objects)
}

/// Read a JSON file and build a catalog from it.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_records(BufReader::new(file))?;
    log::info!("loaded {} records from {}", records.len(), path.display());
    Catalog::build(records)
}

fn objects_to_records(objects: Vec<Map<String, Value>>) -> Result<Vec<RawRecord>> {
    objects
        .into_iter()
        .enumerate()
        .map(|(position, object)| object_to_record(position, object))
        .collect()
}

fn object_to_record(position: usize, object: Map<String, Value>) -> Result<RawRecord> {
    let mut id = None;
    let mut attributes = Vec::with_capacity(object.len());

    for (key, value) in object {
        if key == ID_KEY {
            id = match value {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            };
            continue;
        }
        // Arrays and nested objects match no RawValue variant.
        let raw: RawValue = serde_json::from_value(value)?;
        attributes.push((key, raw));
    }

    Ok(RawRecord {
        id: id.unwrap_or_else(|| position.to_string()),
        attributes,
    })
}
