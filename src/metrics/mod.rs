use serde::Serialize;

use crate::db::models::{DeviceRecord, DeviceStatus};

/// Summary statistics over the whole device fleet, as shown on the
/// dashboard's metric cards and progress ring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FleetStats {
    pub total_devices: usize,
    pub active_tests: usize,
    pub running_tests: usize,
    pub failed_devices: usize,
    pub completed_devices: usize,
    pub assigned_devices: usize,
    /// Share of devices with a recorded check-out, as a percentage.
    pub tested_percent: f64,
}

impl FleetStats {
    pub fn from_records(records: &[DeviceRecord]) -> Self {
        let total_devices = records.len();
        let count_status = |status: DeviceStatus| {
            records.iter().filter(|r| r.status == status).count()
        };

        let tested = records.iter().filter(|r| r.time_out().is_some()).count();
        let tested_percent = if total_devices == 0 {
            0.0
        } else {
            tested as f64 / total_devices as f64 * 100.0
        };

        Self {
            total_devices,
            active_tests: count_status(DeviceStatus::Active),
            running_tests: count_status(DeviceStatus::Testing),
            failed_devices: count_status(DeviceStatus::Failed),
            completed_devices: count_status(DeviceStatus::Completed),
            assigned_devices: records
                .iter()
                .filter(|r| r.assigned.as_deref().is_some_and(|a| !a.is_empty()))
                .count(),
            tested_percent,
        }
    }
}
