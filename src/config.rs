//! Store configuration

use crate::error::{Result, StoreError};

/// Connection and paging settings for a store instance.
///
/// The credential fields are carried for the client implementation; this
/// layer only validates that they are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub endpoint: String,
    pub instance: String,
    pub access_key_id: String,
    pub access_key_secret: String,
    /// Rows requested on the first page of a range scan
    pub first_range_page: i32,
    /// Rows requested on every later page of a range scan
    pub max_range_page: i32,
}

impl StoreConfig {
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }
}

/// Builder for [`StoreConfig`]
#[derive(Debug, Default)]
pub struct StoreConfigBuilder {
    endpoint: Option<String>,
    instance: Option<String>,
    access_key_id: Option<String>,
    access_key_secret: Option<String>,
    first_range_page: Option<i32>,
    max_range_page: Option<i32>,
}

impl StoreConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    pub fn access_key_id(mut self, id: impl Into<String>) -> Self {
        self.access_key_id = Some(id.into());
        self
    }

    pub fn access_key_secret(mut self, secret: impl Into<String>) -> Self {
        self.access_key_secret = Some(secret.into());
        self
    }

    pub fn first_range_page(mut self, rows: i32) -> Self {
        self.first_range_page = Some(rows);
        self
    }

    pub fn max_range_page(mut self, rows: i32) -> Self {
        self.max_range_page = Some(rows);
        self
    }

    pub fn build(self) -> Result<StoreConfig> {
        let endpoint = require(self.endpoint, "endpoint")?;
        let instance = require(self.instance, "instance")?;
        let access_key_id = require(self.access_key_id, "access_key_id")?;
        let access_key_secret = require(self.access_key_secret, "access_key_secret")?;
        let first_range_page = self.first_range_page.unwrap_or(100);
        let max_range_page = self.max_range_page.unwrap_or(500);
        if first_range_page <= 0 || max_range_page <= 0 {
            return Err(StoreError::config("range page sizes must be positive"));
        }
        Ok(StoreConfig {
            endpoint,
            instance,
            access_key_id,
            access_key_secret,
            first_range_page,
            max_range_page,
        })
    }
}

fn require(value: Option<String>, name: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(StoreError::config(format!("{} is required", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> StoreConfigBuilder {
        StoreConfig::builder()
            .endpoint("https://inst.region.ots.example.com")
            .instance("inst")
            .access_key_id("ak")
            .access_key_secret("sk")
    }

    #[test]
    fn test_build_with_defaults() {
        let config = builder().build().unwrap();
        assert_eq!(config.first_range_page, 100);
        assert_eq!(config.max_range_page, 500);
    }

    #[test]
    fn test_build_with_custom_paging() {
        let config = builder()
            .first_range_page(10)
            .max_range_page(50)
            .build()
            .unwrap();
        assert_eq!(config.first_range_page, 10);
        assert_eq!(config.max_range_page, 50);
    }

    #[test]
    fn test_missing_fields_fail() {
        assert!(StoreConfig::builder().build().is_err());
        assert!(
            StoreConfig::builder()
                .endpoint("e")
                .instance("i")
                .access_key_id("  ")
                .access_key_secret("s")
                .build()
                .is_err()
        );
    }

    #[test]
    fn test_nonpositive_paging_fails() {
        assert!(builder().first_range_page(0).build().is_err());
        assert!(builder().max_range_page(-1).build().is_err());
    }
}
