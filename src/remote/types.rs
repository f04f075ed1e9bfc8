//! Wire payloads for the service API.

use crate::booking::BookingRequest;
use crate::model::{MachineState, QueueItem, Snapshot};

/// `GET /status` body.
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub machines: Vec<MachineState>,
    #[serde(default)]
    pub queue: Vec<QueueItem>,
}

impl From<StatusResponse> for Snapshot {
    fn from(v: StatusResponse) -> Self {
        Snapshot {
            machines: v.machines,
            queue: v.queue,
        }
    }
}

/// `POST /book` query string.
#[derive(Debug, serde::Serialize)]
pub(super) struct BookQuery<'a> {
    pub(super) name: &'a str,
    pub(super) wing: &'a str,
    pub(super) duration: u64,
}

impl<'a> From<&'a BookingRequest> for BookQuery<'a> {
    fn from(b: &'a BookingRequest) -> Self {
        Self {
            name: &b.name,
            wing: &b.wing,
            duration: b.duration_secs,
        }
    }
}
