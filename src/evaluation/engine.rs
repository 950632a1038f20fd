use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::db::{
    models::{DeviceRecord, DeviceStatus, Verdict},
    Database,
};
use crate::evaluation::policy::{evaluate, Evaluation};
use crate::log_error;
use crate::timing::{duration_label, record_duration};

const ENABLE_LOGS: bool = true;

/// One record rendered for the display collaborator: source fields plus the
/// derived duration and verdict. Placeholders stand in where no value is
/// meaningful, never a guess.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRow {
    pub id: String,
    pub imei: String,
    pub sn: String,
    pub model: String,
    pub os_version: String,
    pub before_battery: i64,
    pub after_battery: i64,
    pub time_in: String,
    pub time_out: String,
    pub duration_label: String,
    pub total_minutes: Option<i64>,
    pub status: DeviceStatus,
    pub condition: Option<Verdict>,
    pub remarks: String,
    pub notes: String,
    pub assigned: Option<String>,
}

impl DeviceRow {
    pub fn from_record(record: &DeviceRecord, now: DateTime<Utc>) -> Self {
        let elapsed = record_duration(&record.time_in, record.time_out(), now);
        Self {
            id: record.id.clone(),
            imei: record.imei.clone(),
            sn: record.sn.clone(),
            model: record.model.clone(),
            os_version: record.os_version.clone(),
            before_battery: record.before_battery,
            after_battery: record.after_battery,
            time_in: record.time_in.clone(),
            time_out: record
                .time_out()
                .map(str::to_string)
                .unwrap_or_else(|| "In Progress".to_string()),
            duration_label: duration_label(elapsed.as_ref()),
            total_minutes: elapsed.map(|e| e.total_minutes),
            status: record.status,
            condition: evaluate(record, now).verdict(),
            remarks: record.remarks.clone(),
            notes: record.notes.clone(),
            assigned: record.assigned.clone(),
        }
    }
}

/// Keeps the persisted `condition` field of each record consistent with its
/// source fields.
///
/// Evaluation itself is pure (`policy::evaluate`); this type owns the write
/// side. Every sync pass recomputes the verdict from the source fields and
/// rewrites it, so a stale stored verdict self-heals the next time the
/// record is read. Redundant writes of the same verdict are expected and
/// harmless.
#[derive(Clone)]
pub struct Evaluator {
    db: Database,
}

impl Evaluator {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Evaluate a record and, when it has a verdict, persist it without
    /// waiting for the store. The caller gets the verdict immediately; a
    /// failed write is logged and retried naturally by the next sync pass.
    pub async fn sync(&self, record: &DeviceRecord, now: DateTime<Utc>) -> Evaluation {
        let evaluation = evaluate(record, now);

        if let Some(verdict) = evaluation.verdict() {
            let db = self.db.clone();
            let device_id = record.id.clone();
            tokio::spawn(async move {
                if let Err(err) = db.update_condition(&device_id, verdict, Utc::now()).await {
                    log_error!("Failed to persist verdict for device {device_id}: {err}");
                }
            });
        }

        evaluation
    }

    /// Explicit command path: persist a verdict and surface the store error.
    pub async fn persist(&self, device_id: &str, verdict: Verdict) -> Result<()> {
        self.db.update_condition(device_id, verdict, Utc::now()).await
    }

    /// Render one record, syncing its verdict as a side effect of the read.
    pub async fn refresh_device(
        &self,
        device_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<DeviceRow>> {
        let Some(record) = self.db.get_device(device_id).await? else {
            return Ok(None);
        };

        self.sync(&record, now).await;
        Ok(Some(DeviceRow::from_record(&record, now)))
    }

    /// One display pass over the whole fleet: fetch every record, sync each
    /// verdict, and return render-ready rows.
    pub async fn refresh_all(&self, now: DateTime<Utc>) -> Result<Vec<DeviceRow>> {
        let records = self.db.list_devices().await?;
        let mut rows = Vec::with_capacity(records.len());

        for record in &records {
            self.sync(record, now).await;
            rows.push(DeviceRow::from_record(record, now));
        }

        Ok(rows)
    }
}
