use std::io::Read;

use serde::{Deserialize, Serialize};

/// One canonical place name together with the spellings that should resolve
/// to it. Variants are free-form data: transliteration alternates, colonial
/// names, common typos.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationEntry {
    pub canonical: String,
    pub variants: Vec<String>,
}

/// The configuration surface of the whole subsystem: an ordered list of
/// (canonical, variants) pairs. A JSON array rather than an object so the
/// entry order written in the data file is the order the matcher scans in.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct VariantTable {
    pub entries: Vec<LocationEntry>,
}

/// Indian place names bundled with the crate. Extending coverage is an edit
/// to this file, not to code.
const BUILTIN_TABLE: &str = include_str!("../data/locations.json");

impl VariantTable {
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> serde_json::Result<Self> {
        serde_json::from_reader(reader)
    }

    pub fn builtin() -> Self {
        Self::from_json_str(BUILTIN_TABLE).expect("builtin location table")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
