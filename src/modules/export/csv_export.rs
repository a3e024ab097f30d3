//! CSV Export
//!
//! Writes access records, devices, and users to CSV files.

use std::path::Path;

use anyhow::Result;

use crate::domain::access::{AccessRecord, Device, Member};

/// Write access records to CSV file
pub fn write_records(path: &Path, records: &[AccessRecord]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["id", "user", "device", "method", "time", "result"])?;

    for record in records {
        wtr.write_record([
            record.id.to_string(),
            record.user.clone(),
            record.device.clone(),
            record.method.clone(),
            record.time.clone(),
            record.result.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(records.len())
}

/// Write devices to CSV file
pub fn write_devices(path: &Path, devices: &[Device]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["id", "name", "location", "status", "last_active"])?;

    for device in devices {
        wtr.write_record([
            device.id.to_string(),
            device.name.clone(),
            device.location.clone(),
            device.status.as_str().to_string(),
            device.last_active.clone(),
        ])?;
    }

    wtr.flush()?;
    Ok(devices.len())
}

/// Write users to CSV file
pub fn write_members(path: &Path, members: &[Member]) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["id", "username", "name", "role", "status"])?;

    for member in members {
        wtr.write_record([
            member.id.to_string(),
            member.username.clone(),
            member.name.clone(),
            member.role.as_str().to_string(),
            member.status.as_str().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(members.len())
}
