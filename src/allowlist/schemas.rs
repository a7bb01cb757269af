use std::{collections::BTreeMap, path::Path};

use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct RawEntry {
    pub inputs: Vec<Value>,
    pub proof: Vec<String>,
    pub root: String,
    pub leaf: String,
    #[serde(default)]
    pub reasons: Option<Value>,
}

/// The allowlist document: one entry per eligible address, keyed by the
/// address the proof belongs to.
#[derive(Deserialize, Debug)]
pub struct Allowlist(pub BTreeMap<String, RawEntry>);

impl Allowlist {
    pub async fn read_from_file(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let contents = tokio::fs::read(path).await?;
        Ok(serde_json::from_slice::<Self>(&contents)?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}
