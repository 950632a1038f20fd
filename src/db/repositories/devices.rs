use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_condition, parse_datetime, parse_status},
    models::{DeviceRecord, DeviceStatus, Verdict},
};

const DEVICE_COLUMNS: &str = "id, imei, sn, model, os_version, before_battery, after_battery, \
     time_in, time_out, status, condition, remarks, notes, assigned, created_at, updated_at";

fn row_to_device(row: &Row) -> Result<DeviceRecord> {
    let status: String = row.get("status")?;
    let condition: Option<String> = row.get("condition")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(DeviceRecord {
        id: row.get("id")?,
        imei: row.get("imei")?,
        sn: row.get("sn")?,
        model: row.get("model")?,
        os_version: row.get("os_version")?,
        before_battery: row.get("before_battery")?,
        after_battery: row.get("after_battery")?,
        time_in: row.get("time_in")?,
        time_out: row.get("time_out")?,
        status: parse_status(&status)?,
        condition: parse_condition(condition)?,
        remarks: row.get("remarks")?,
        notes: row.get("notes")?,
        assigned: row.get("assigned")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    pub async fn insert_device(&self, device: &DeviceRecord) -> Result<()> {
        let record = device.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO devices (id, imei, sn, model, os_version, before_battery, after_battery,
                                      time_in, time_out, status, condition, remarks, notes, assigned,
                                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                params![
                    record.id,
                    record.imei,
                    record.sn,
                    record.model,
                    record.os_version,
                    record.before_battery,
                    record.after_battery,
                    record.time_in,
                    record.time_out,
                    record.status.as_str(),
                    record.condition.map(|v| v.as_str()),
                    record.remarks,
                    record.notes,
                    record.assigned,
                    record.created_at.to_rfc3339(),
                    record.updated_at.to_rfc3339(),
                ],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn get_device(&self, device_id: &str) -> Result<Option<DeviceRecord>> {
        let device_id = device_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DEVICE_COLUMNS} FROM devices WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![device_id])?;
            let device = match rows.next()? {
                Some(row) => Some(row_to_device(row)?),
                None => None,
            };
            Ok(device)
        })
        .await
    }

    pub async fn list_devices(&self) -> Result<Vec<DeviceRecord>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {DEVICE_COLUMNS} FROM devices ORDER BY created_at"
            ))?;

            let mut rows = stmt.query([])?;
            let mut devices = Vec::new();
            while let Some(row) = rows.next()? {
                devices.push(row_to_device(row)?);
            }

            Ok(devices)
        })
        .await
    }

    /// Operator edit of a record's source fields. Leaves `condition` alone;
    /// the next evaluation pass recomputes it from the edited fields.
    pub async fn update_device(&self, device: &DeviceRecord) -> Result<()> {
        let record = device.clone();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE devices
                 SET imei = ?1,
                     sn = ?2,
                     model = ?3,
                     os_version = ?4,
                     before_battery = ?5,
                     after_battery = ?6,
                     time_in = ?7,
                     time_out = ?8,
                     status = ?9,
                     remarks = ?10,
                     notes = ?11,
                     assigned = ?12,
                     updated_at = ?13
                 WHERE id = ?14",
                params![
                    record.imei,
                    record.sn,
                    record.model,
                    record.os_version,
                    record.before_battery,
                    record.after_battery,
                    record.time_in,
                    record.time_out,
                    record.status.as_str(),
                    record.remarks,
                    record.notes,
                    record.assigned,
                    Utc::now().to_rfc3339(),
                    record.id,
                ],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("device not found"));
            }

            Ok(())
        })
        .await
    }

    /// Record a device check-out: the ending time and battery reading.
    pub async fn check_out(
        &self,
        device_id: &str,
        time_out: &str,
        after_battery: i64,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let device_id = device_id.to_string();
        let time_out = time_out.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE devices
                 SET time_out = ?1,
                     after_battery = ?2,
                     updated_at = ?3
                 WHERE id = ?4",
                params![time_out, after_battery, updated_at.to_rfc3339(), device_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("device not found"));
            }

            Ok(())
        })
        .await
    }

    pub async fn set_status(
        &self,
        device_id: &str,
        status: DeviceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let device_id = device_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE devices
                 SET status = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![status.as_str(), updated_at.to_rfc3339(), device_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("device not found"));
            }

            Ok(())
        })
        .await
    }

    /// Persist a derived verdict. Touches only `condition` and `updated_at`,
    /// so repeating the same verdict leaves the stored value unchanged.
    pub async fn update_condition(
        &self,
        device_id: &str,
        verdict: Verdict,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let device_id = device_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE devices
                 SET condition = ?1,
                     updated_at = ?2
                 WHERE id = ?3",
                params![verdict.as_str(), updated_at.to_rfc3339(), device_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("device not found"));
            }

            Ok(())
        })
        .await
    }

    pub async fn delete_device(&self, device_id: &str) -> Result<()> {
        let device_id = device_id.to_string();
        self.execute(move |conn| {
            conn.execute("DELETE FROM devices WHERE id = ?1", params![device_id])?;
            Ok(())
        })
        .await
    }

    /// Ingest a one-shot batch of record snapshots, replacing any existing
    /// rows with the same id.
    pub async fn import_batch(&self, devices: Vec<DeviceRecord>) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;

            for record in &devices {
                tx.execute(
                    "INSERT OR REPLACE INTO devices (id, imei, sn, model, os_version, before_battery,
                                                     after_battery, time_in, time_out, status, condition,
                                                     remarks, notes, assigned, created_at, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)",
                    params![
                        record.id,
                        record.imei,
                        record.sn,
                        record.model,
                        record.os_version,
                        record.before_battery,
                        record.after_battery,
                        record.time_in,
                        record.time_out,
                        record.status.as_str(),
                        record.condition.map(|v| v.as_str()),
                        record.remarks,
                        record.notes,
                        record.assigned,
                        record.created_at.to_rfc3339(),
                        record.updated_at.to_rfc3339(),
                    ],
                )?;
            }

            tx.commit()?;
            Ok(())
        })
        .await
    }
}
