//! HTTP client for a single vault
//!
//! A vault answers `GET /` with its value as a decimal body and stores the
//! decimal body of `POST /`. Every call is a single attempt bounded by the
//! client timeout; any failure is reported as [`Error::VaultUnreachable`].

use crate::common::{Error, Result, StoredValue, VaultAddress};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct VaultClient {
    http: reqwest::Client,
}

impl VaultClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;
        Ok(Self { http })
    }

    /// Fetch the value currently stored in `vault`
    pub async fn read(&self, vault: &VaultAddress) -> Result<StoredValue> {
        let resp = self
            .http
            .get(vault.url())
            .send()
            .await
            .map_err(|e| vault_error(vault, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(vault_error(vault, format!("invalid status code {}", status)));
        }

        let body = resp
            .text()
            .await
            .map_err(|e| vault_error(vault, format!("error reading body: {}", e)))?;

        body.trim()
            .parse::<StoredValue>()
            .map_err(|e| vault_error(vault, format!("invalid body {:?}: {}", body, e)))
    }

    /// Store `value` in `vault`
    pub async fn write(&self, vault: &VaultAddress, value: StoredValue) -> Result<()> {
        let resp = self
            .http
            .post(vault.url())
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(value.to_string())
            .send()
            .await
            .map_err(|e| vault_error(vault, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(vault_error(vault, format!("invalid status code {}", status)));
        }
        Ok(())
    }
}

fn vault_error(vault: &VaultAddress, reason: impl ToString) -> Error {
    Error::VaultUnreachable {
        vault: vault.to_string(),
        reason: reason.to_string(),
    }
}
