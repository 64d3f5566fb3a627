//! HTTP implementation of the remote store.
//!
//! Talks JSON over HTTPS to the room backend:
//!
//! - `POST {base}/control_device` with `{room_id, type, state}`
//! - `GET {base}/status?room_id=<id>` returning `{"data": [...]}`
//!
//! Every operation is bounded by the client timeout and every failure
//! is absorbed into a [`SyncOutcome`] or an empty snapshot. The engines
//! behind this client must keep driving hardware whether or not the
//! backend is reachable.

use crate::store::{RemoteStore, SyncOutcome};
use crate::types::{DeviceSnapshot, PushRequest, StatusResponse};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use roomlink_core::{DeviceKind, RoomId};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Errors raised while constructing the client.
///
/// Construction is the only fallible moment; after that the client
/// never returns errors, only outcomes.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The configured base URL does not parse or cannot host the
    /// endpoint paths.
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// The underlying HTTP client could not be built.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),
}

/// Async client for the room backend.
///
/// Cheap to clone; clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpSyncClient {
    http: reqwest::Client,
    control_url: Url,
    status_url: Url,
    room: RoomId,
}

impl HttpSyncClient {
    /// Build a client for `room` against `base_url`.
    ///
    /// `timeout` bounds every push and poll; when it elapses the
    /// operation is abandoned for the cycle.
    ///
    /// # Errors
    /// Returns [`SyncError`] if the base URL is unusable or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, room: RoomId, timeout: Duration) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        // Normalize to a trailing slash so join() appends instead of
        // replacing the last path segment.
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base: Url = base
            .parse()
            .map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let control_url = base
            .join("control_device")
            .map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        let status_url = base
            .join("status")
            .map_err(|e| SyncError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        Ok(Self {
            http,
            control_url,
            status_url,
            room,
        })
    }

    /// The room every call is scoped to.
    #[must_use]
    pub fn room(&self) -> RoomId {
        self.room
    }
}

impl RemoteStore for HttpSyncClient {
    async fn push(&self, device: DeviceKind, state: &str) -> SyncOutcome {
        debug!(%device, state, room = %self.room, "pushing device state");

        let body = PushRequest {
            room_id: self.room.as_u32(),
            device,
            state: state.to_string(),
        };

        match self
            .http
            .post(self.control_url.clone())
            .json(&body)
            .send()
            .await
        {
            Ok(response) if response.status() == StatusCode::OK => {
                debug!(%device, state, "state delivered");
                SyncOutcome::Delivered
            }
            Ok(response) => {
                let status = response.status().as_u16();
                warn!(%device, state, status, "backend rejected state push");
                SyncOutcome::Rejected { status }
            }
            Err(e) => {
                warn!(%device, state, error = %e, "state push failed");
                SyncOutcome::Unreachable {
                    message: e.to_string(),
                }
            }
        }
    }

    async fn poll(&self) -> DeviceSnapshot {
        let mut url = self.status_url.clone();
        url.query_pairs_mut()
            .append_pair("room_id", &self.room.as_u32().to_string());

        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(room = %self.room, error = %e, "status poll failed");
                return DeviceSnapshot::empty();
            }
        };

        if response.status() != StatusCode::OK {
            warn!(
                room = %self.room,
                status = response.status().as_u16(),
                "status poll rejected"
            );
            return DeviceSnapshot::empty();
        }

        match response.json::<StatusResponse>().await {
            Ok(status) => DeviceSnapshot::from_records(&status.data),
            Err(e) => {
                warn!(room = %self.room, error = %e, "status poll returned malformed body");
                DeviceSnapshot::empty()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_url() {
        let result = HttpSyncClient::new(
            "not a url",
            RoomId::new(1).unwrap(),
            Duration::from_secs(5),
        );
        assert!(matches!(result, Err(SyncError::InvalidBaseUrl(_))));
    }

    #[test]
    fn test_endpoint_urls_are_joined() {
        let client = HttpSyncClient::new(
            "https://attcam.cc/api/devices/",
            RoomId::new(3).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(
            client.control_url.as_str(),
            "https://attcam.cc/api/devices/control_device"
        );
        assert_eq!(
            client.status_url.as_str(),
            "https://attcam.cc/api/devices/status"
        );
        assert_eq!(client.room().as_u32(), 3);
    }

    #[test]
    fn test_trailing_slash_is_optional() {
        let a = HttpSyncClient::new(
            "https://attcam.cc/api/devices",
            RoomId::new(1).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();
        let b = HttpSyncClient::new(
            "https://attcam.cc/api/devices/",
            RoomId::new(1).unwrap(),
            Duration::from_secs(5),
        )
        .unwrap();

        assert_eq!(a.control_url, b.control_url);
    }
}
