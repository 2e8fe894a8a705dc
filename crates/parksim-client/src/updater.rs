//! ---
//! park_section: "05-networking-external-interfaces"
//! park_subsection: "module"
//! park_type: "source"
//! park_scope: "code"
//! park_description: "PATCH client for the parking_slots collection."
//! park_version: "v0.1.0"
//! park_owner: "tbd"
//! ---
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, IntCounter};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use url::Url;

use parksim_common::RemoteSettings;
use parksim_sim::SlotSample;

static SLOT_UPDATES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "slot_updates_total",
        "Total number of occupancy updates accepted by the backend"
    )
    .expect("metric registration to succeed")
});

static SLOT_UPDATE_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "slot_update_failures_total",
        "Total number of occupancy updates that failed in transport or at the backend"
    )
    .expect("metric registration to succeed")
});

const COLLECTION_SEGMENTS: [&str; 3] = ["rest", "v1", "parking_slots"];

/// Failure categories for a single update attempt.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// or body-read failure).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The backend answered with a non-success status.
    #[error("backend rejected update with HTTP {status}: {body}")]
    Rejected { status: StatusCode, body: String },
    /// A success status whose body was not the requested JSON representation.
    #[error("backend returned an unparseable representation: {0}")]
    MalformedBody(#[source] serde_json::Error),
}

/// Sink for occupancy samples. The production implementation PATCHes the
/// hosted backend; tests substitute recording stubs.
#[async_trait]
pub trait OccupancyWriter: Send + Sync {
    /// Push one sample, returning the updated row representation on success.
    async fn write(&self, sample: &SlotSample) -> Result<Value, UpdateError>;
}

/// JSON body sent with each PATCH. The slot identifier travels in the
/// query-string filter, not the body.
#[derive(Debug, Serialize)]
struct OccupancyPatch {
    occupied: bool,
    last_updated: DateTime<Utc>,
}

/// Client issuing one best-effort PATCH per sample against the
/// `parking_slots` collection. No retries, no backoff; each attempt is
/// independent and the caller decides what a failure means.
#[derive(Debug, Clone)]
pub struct SlotUpdater {
    client: Client,
    settings: RemoteSettings,
}

impl SlotUpdater {
    #[must_use]
    pub fn new(settings: RemoteSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Target URL for a slot update: the collection path plus a PostgREST
    /// equality filter, e.g. `…/rest/v1/parking_slots?slot_id=eq.7`.
    fn endpoint(&self, slot_id: u32) -> Url {
        let mut url = self.settings.base_url.clone();
        url.path_segments_mut()
            .expect("base url validated at configuration load")
            .pop_if_empty()
            .extend(COLLECTION_SEGMENTS);
        url.query_pairs_mut()
            .append_pair("slot_id", &format!("eq.{slot_id}"));
        url
    }

    /// Issue one PATCH for the sample and parse the echoed representation.
    pub async fn apply(&self, sample: &SlotSample) -> Result<Value, UpdateError> {
        let url = self.endpoint(sample.slot_id);
        debug!(slot_id = sample.slot_id, occupied = sample.occupied, url = %url, "dispatching occupancy update");
        let patch = OccupancyPatch {
            occupied: sample.occupied,
            last_updated: sample.last_updated,
        };
        let outcome = self.dispatch(url, &patch).await;
        match &outcome {
            Ok(_) => SLOT_UPDATES_TOTAL.inc(),
            Err(_) => SLOT_UPDATE_FAILURES_TOTAL.inc(),
        }
        outcome
    }

    async fn dispatch(&self, url: Url, patch: &OccupancyPatch) -> Result<Value, UpdateError> {
        let response = self
            .client
            .patch(url)
            .header("apikey", &self.settings.service_role)
            .bearer_auth(&self.settings.service_role)
            .header("Prefer", "return=representation")
            .json(patch)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpdateError::Rejected { status, body });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(UpdateError::MalformedBody)
    }
}

#[async_trait]
impl OccupancyWriter for SlotUpdater {
    async fn write(&self, sample: &SlotSample) -> Result<Value, UpdateError> {
        self.apply(sample).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> RemoteSettings {
        RemoteSettings::from_lookup(|key| match key {
            "SUPABASE_URL" => Some("https://demo.supabase.co".to_owned()),
            "SUPABASE_SERVICE_ROLE" => Some("test-role".to_owned()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn endpoint_appends_collection_path_and_equality_filter() {
        let updater = SlotUpdater::new(settings());
        let url = updater.endpoint(7);
        assert_eq!(
            url.as_str(),
            "https://demo.supabase.co/rest/v1/parking_slots?slot_id=eq.7"
        );
    }

    #[test]
    fn endpoint_filter_tracks_the_sampled_slot() {
        let updater = SlotUpdater::new(settings());
        for slot_id in 1..=10 {
            let url = updater.endpoint(slot_id);
            assert!(url.as_str().contains(&format!("slot_id=eq.{slot_id}")));
        }
    }

    #[test]
    fn patch_body_carries_occupancy_and_timestamp_only() {
        let patch = OccupancyPatch {
            occupied: true,
            last_updated: Utc::now(),
        };
        let value = serde_json::to_value(&patch).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["occupied"], true);
        assert!(object["last_updated"].is_string());
    }
}
