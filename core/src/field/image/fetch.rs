//! HTTP(S) retrieval of image bytes.
//!
//! The request itself is async; [`block_on`] drives it to completion on a
//! private current-thread runtime for callers without one.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, StatusCode, redirect};
use serde::{Deserialize, Serialize};
use tokio::runtime::{Builder, Handle};
use tracing::{debug, info, instrument};
use url::Url;

use crate::error::FetchError;

const MAX_REDIRECTS: usize = 10;
const DEFAULT_USER_AGENT: &str = concat!("stylefield/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchOptions {
    /// Request timeout in seconds. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
    pub user_agent: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchOptions {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    fn client(&self) -> Result<Client, FetchError> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(&self.user_agent);
        if let Some(timeout) = self.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Fetches the full response body. Only `200 OK` counts as success.
#[instrument(skip(url, options), fields(url = %url))]
pub(crate) async fn fetch_bytes(url: &Url, options: &FetchOptions) -> Result<Bytes, FetchError> {
    let client = options.client()?;
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if status != StatusCode::OK {
        debug!(%status, "rejecting response");
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.bytes().await?;
    info!(bytes = body.len(), "fetched image");
    Ok(body)
}

/// Runs `future` to completion on the calling thread.
///
/// Returns [`FetchError::NestedRuntime`] when called from within a tokio
/// runtime, where blocking would stall the executor.
pub(crate) fn block_on<F: Future>(future: F) -> Result<F::Output, FetchError> {
    if Handle::try_current().is_ok() {
        return Err(FetchError::NestedRuntime);
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FetchError::Runtime)?;
    Ok(runtime.block_on(future))
}
