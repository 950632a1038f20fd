use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};

use crate::db::models::{DeviceStatus, Verdict};

pub fn parse_datetime(value: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("failed to parse {field}"))
}

pub fn parse_status(value: &str) -> Result<DeviceStatus> {
    match value {
        "Active" => Ok(DeviceStatus::Active),
        "Testing" => Ok(DeviceStatus::Testing),
        "Failed" => Ok(DeviceStatus::Failed),
        "Completed" => Ok(DeviceStatus::Completed),
        other => Err(anyhow!("unknown device status {other}")),
    }
}

pub fn parse_condition(value: Option<String>) -> Result<Option<Verdict>> {
    match value.as_deref() {
        None => Ok(None),
        Some("Pass") => Ok(Some(Verdict::Pass)),
        Some("Fail") => Ok(Some(Verdict::Fail)),
        Some(other) => Err(anyhow!("unknown condition {other}")),
    }
}
