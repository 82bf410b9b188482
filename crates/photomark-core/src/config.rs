//! Configuration module
//!
//! Process-wide configuration is read from the environment once at
//! startup and is immutable thereafter. The bounding box and the
//! destination bucket are required; a missing or non-numeric
//! `MAX_WIDTH`/`MAX_HEIGHT` fails startup rather than surfacing
//! per-invocation.

use std::env;
use std::path::PathBuf;

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

const DEFAULT_WATERMARK_PATH: &str = "assets/watermark.png";
const DEFAULT_COPYRIGHT_TEXT: &str = "Copyright (c) 2026 Photomark Media";
const DEFAULT_RECEIVE_WAIT_SECS: i32 = 20;

/// Application configuration (worker process).
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub destination_bucket: String,
    pub max_width: u32,
    pub max_height: u32,
    pub copyright_text: String,
    pub watermark_path: PathBuf,
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
    pub event_queue_url: Option<String>,
    /// Long-poll wait passed to the event queue receive call.
    pub receive_wait_secs: i32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let destination_bucket = env::var("DESTINATION_BUCKET")
            .map_err(|_| anyhow::anyhow!("DESTINATION_BUCKET must be set"))?;

        let max_width = env::var("MAX_WIDTH")
            .map_err(|_| anyhow::anyhow!("MAX_WIDTH must be set"))?
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("MAX_WIDTH must be a positive integer"))?;

        let max_height = env::var("MAX_HEIGHT")
            .map_err(|_| anyhow::anyhow!("MAX_HEIGHT must be set"))?
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("MAX_HEIGHT must be a positive integer"))?;

        let storage_backend = match env::var("STORAGE_BACKEND")
            .unwrap_or_else(|_| "s3".to_string())
            .to_lowercase()
            .as_str()
        {
            "s3" => StorageBackend::S3,
            "local" => StorageBackend::Local,
            other => {
                return Err(anyhow::anyhow!(
                    "STORAGE_BACKEND must be 's3' or 'local', got '{}'",
                    other
                ))
            }
        };

        let config = AppConfig {
            destination_bucket,
            max_width,
            max_height,
            copyright_text: env::var("COPYRIGHT_TEXT")
                .unwrap_or_else(|_| DEFAULT_COPYRIGHT_TEXT.to_string()),
            watermark_path: env::var("WATERMARK_PATH")
                .unwrap_or_else(|_| DEFAULT_WATERMARK_PATH.to_string())
                .into(),
            storage_backend,
            s3_region: env::var("S3_REGION").ok().or_else(|| env::var("AWS_REGION").ok()),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
            event_queue_url: env::var("EVENT_QUEUE_URL").ok(),
            receive_wait_secs: env::var("RECEIVE_WAIT_SECS")
                .unwrap_or_else(|_| DEFAULT_RECEIVE_WAIT_SECS.to_string())
                .parse()
                .unwrap_or(DEFAULT_RECEIVE_WAIT_SECS),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_width == 0 || self.max_height == 0 {
            return Err(anyhow::anyhow!(
                "MAX_WIDTH and MAX_HEIGHT must both be greater than zero"
            ));
        }

        if self.destination_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("DESTINATION_BUCKET must not be empty"));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_region.is_none() && self.s3_endpoint.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using the S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using the local storage backend"
                    ));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> AppConfig {
        AppConfig {
            destination_bucket: "photos-out".to_string(),
            max_width: 1024,
            max_height: 768,
            copyright_text: DEFAULT_COPYRIGHT_TEXT.to_string(),
            watermark_path: DEFAULT_WATERMARK_PATH.into(),
            storage_backend: StorageBackend::Local,
            s3_region: None,
            s3_endpoint: None,
            local_storage_path: Some("/tmp/photomark".to_string()),
            event_queue_url: None,
            receive_wait_secs: DEFAULT_RECEIVE_WAIT_SECS,
        }
    }

    #[test]
    fn test_validate_accepts_local_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_bounding_box() {
        let mut config = base_config();
        config.max_width = 0;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.max_height = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_destination() {
        let mut config = base_config();
        config.destination_bucket = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_s3_requires_region_or_endpoint() {
        let mut config = base_config();
        config.storage_backend = StorageBackend::S3;
        assert!(config.validate().is_err());

        config.s3_region = Some("us-east-1".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_local_requires_path() {
        let mut config = base_config();
        config.local_storage_path = None;
        assert!(config.validate().is_err());
    }
}
