//! Storage-creation event model
//!
//! Mirrors the notification payload object storage delivers when a new
//! object lands in a bucket. Object keys arrive percent-encoded with
//! `+` standing in for a space; [`EventRecord::decoded_key`] undoes
//! both before the key is used against the storage API.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct StorageEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

impl StorageEvent {
    /// Parse a raw notification body.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// The record this invocation processes. Multiple records per event
    /// are not supported; only the first is returned.
    pub fn first_record(&self) -> Option<&EventRecord> {
        self.records.first()
    }
}

impl EventRecord {
    pub fn bucket(&self) -> &str {
        &self.s3.bucket.name
    }

    /// Object key with URL encoding removed (`+` as space, then
    /// percent-decoding).
    pub fn decoded_key(&self) -> Result<String, anyhow::Error> {
        let spaced = self.s3.object.key.replace('+', " ");
        let decoded = urlencoding::decode(&spaced)
            .map_err(|e| anyhow::anyhow!("invalid object key encoding: {}", e))?;
        Ok(decoded.into_owned())
    }
}
