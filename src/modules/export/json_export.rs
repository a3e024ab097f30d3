//! JSON Export
//!
//! Writes the saved system settings to a JSON file.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::Local;
use serde::Serialize;

use crate::domain::access::SettingsForm;

#[derive(Serialize)]
struct SettingsExport<'a> {
    exported_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    exported_by: Option<&'a str>,
    settings: &'a SettingsForm,
}

/// Write settings to a pretty-printed JSON file
pub fn write_settings(path: &Path, settings: &SettingsForm, operator: Option<&str>) -> Result<()> {
    let export = SettingsExport {
        exported_at: Local::now().to_rfc3339(),
        exported_by: operator,
        settings,
    };
    let json = serde_json::to_string_pretty(&export)?;
    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
