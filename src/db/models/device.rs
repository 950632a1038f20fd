//! Device stress-test record models.
//!
//! Field names serialize in camelCase so record snapshots exported from the
//! operator dashboard deserialize directly into `DeviceRecord`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Operator-driven lifecycle state of a device under test. The evaluation
/// engine reads this but never transitions it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DeviceStatus {
    Active,
    Testing,
    Failed,
    Completed,
}

impl DeviceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceStatus::Active => "Active",
            DeviceStatus::Testing => "Testing",
            DeviceStatus::Failed => "Failed",
            DeviceStatus::Completed => "Completed",
        }
    }
}

/// Pass/Fail classification of a completed stress test, derived from the
/// test duration and the ending battery level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Pass => "Pass",
            Verdict::Fail => "Fail",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub id: String,
    pub imei: String,
    pub sn: String,
    pub model: String,
    pub os_version: String,
    pub before_battery: i64,
    pub after_battery: i64,
    pub time_in: String,
    #[serde(default)]
    pub time_out: Option<String>,
    pub status: DeviceStatus,
    /// Derived Pass/Fail, persisted as a side effect of evaluation. Always
    /// recomputed from the source fields on read, never trusted as stored.
    #[serde(default)]
    pub condition: Option<Verdict>,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub assigned: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl DeviceRecord {
    /// Create a record for a device being checked in: time out empty,
    /// status Active, store-assigned id.
    pub fn check_in(draft: DeviceDraft, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            imei: draft.imei,
            sn: draft.sn,
            model: draft.model,
            os_version: draft.os_version,
            before_battery: draft.before_battery,
            after_battery: 0,
            time_in: draft.time_in,
            time_out: None,
            status: DeviceStatus::Active,
            condition: None,
            remarks: draft.remarks,
            notes: draft.notes,
            assigned: draft.assigned,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check-out time, with the dashboard's "empty string means still
    /// running" convention normalized to absence.
    pub fn time_out(&self) -> Option<&str> {
        self.time_out
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
    }

    /// Parse a one-shot batch of record snapshots, as delivered by the
    /// persistence collaborator.
    pub fn batch_from_json(raw: &str) -> Result<Vec<DeviceRecord>> {
        serde_json::from_str(raw).context("failed to parse device record snapshot batch")
    }
}

/// Fields an operator supplies when checking a device in.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDraft {
    pub imei: String,
    pub sn: String,
    pub model: String,
    pub os_version: String,
    pub before_battery: i64,
    pub time_in: String,
    #[serde(default)]
    pub remarks: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub assigned: Option<String>,
}
