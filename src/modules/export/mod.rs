//! Export Module
//!
//! Writes the active section's data to the export directory.
//!
//! - 'e' key or `:export` triggers export of the current section
//! - Devices, Users, Records → CSV
//! - Settings → JSON
//! - Files are named `<section>-<timestamp>.<ext>`, with a `-<n>` suffix if
//!   that name is already taken

mod csv_export;
mod json_export;

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::{info, warn};

use crate::app::{App, Section};
use crate::core::{Action, NotifyLevel};

/// Create the export directory if needed
fn ensure_export_dir(dir: &Path) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}

/// Generate a timestamped filename (millisecond resolution)
fn generate_filename(prefix: &str, extension: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d-%H%M%S-%3f");
    format!("{}-{}.{}", prefix, timestamp, extension)
}

/// First free path for `filename` in `dir`
fn unique_path(dir: &Path, filename: &str) -> PathBuf {
    let path = dir.join(filename);
    if !path.exists() {
        return path;
    }
    let (stem, extension) = filename.rsplit_once('.').unwrap_or((filename, ""));
    (1..)
        .map(|n| {
            if extension.is_empty() {
                dir.join(format!("{stem}-{n}"))
            } else {
                dir.join(format!("{stem}-{n}.{extension}"))
            }
        })
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

/// Export the data behind the active section
pub fn export_current_section(app: &App) -> Action {
    match app.active_section {
        Section::Devices => {
            if app.devices.is_empty() {
                return empty("devices");
            }
            write_with(app, "devices", "csv", |path| {
                csv_export::write_devices(path, &app.devices)
            })
        }
        Section::Users => {
            if app.members.is_empty() {
                return empty("users");
            }
            write_with(app, "users", "csv", |path| {
                csv_export::write_members(path, &app.members)
            })
        }
        Section::Records => {
            if app.records.is_empty() {
                return empty("access records");
            }
            write_with(app, "records", "csv", |path| {
                csv_export::write_records(path, &app.records)
            })
        }
        Section::Settings => write_with(app, "settings", "json", |path| {
            json_export::write_settings(path, &app.settings.saved, app.ctx.operator.as_deref())
                .map(|_| 1)
        }),
        Section::Overview => Action::Notify(
            "Nothing to export in this view".to_string(),
            NotifyLevel::Warn,
        ),
    }
}

fn empty(what: &str) -> Action {
    Action::Notify(format!("No {what} to export"), NotifyLevel::Warn)
}

fn write_with(
    app: &App,
    prefix: &str,
    extension: &str,
    write: impl FnOnce(&Path) -> anyhow::Result<usize>,
) -> Action {
    let export_dir = match ensure_export_dir(&app.export_dir) {
        Ok(dir) => dir,
        Err(e) => {
            warn!(dir = %app.export_dir.display(), error = %e, "export dir unavailable");
            return Action::Notify(
                format!("Failed to create export directory: {}", e),
                NotifyLevel::Error,
            );
        }
    };

    let filename = generate_filename(prefix, extension);
    let path = unique_path(&export_dir, &filename);

    match write(&path) {
        Ok(count) => {
            info!(path = %path.display(), rows = count, "exported {prefix}");
            Action::Notify(
                format!("Exported {} to {}", prefix, path.display()),
                NotifyLevel::Info,
            )
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "export failed");
            Action::Notify(format!("Export failed: {}", e), NotifyLevel::Error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MockProvider;

    fn temp_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "gatehouse-export-{}-{}",
            tag,
            std::process::id()
        ))
    }

    fn exported_files(dir: &Path) -> Vec<PathBuf> {
        fs::read_dir(dir)
            .map(|entries| entries.filter_map(|e| e.ok()).map(|e| e.path()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_generate_filename_shape() {
        let name = generate_filename("records", "csv");
        assert!(name.starts_with("records-"));
        assert!(name.ends_with(".csv"));
    }

    #[test]
    fn test_unique_path_skips_taken_names() {
        let dir = temp_dir("unique");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        let first = unique_path(&dir, "devices-1.csv");
        assert_eq!(first, dir.join("devices-1.csv"));
        fs::write(&first, "id\n").unwrap();
        let second = unique_path(&dir, "devices-1.csv");
        assert_eq!(second, dir.join("devices-1-1.csv"));
        fs::write(&second, "id\n").unwrap();
        assert_eq!(unique_path(&dir, "devices-1.csv"), dir.join("devices-1-2.csv"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_back_to_back_exports_keep_both_files() {
        let dir = temp_dir("twice");
        let _ = fs::remove_dir_all(&dir);
        let mut app = App::new();
        app.export_dir = dir.clone();
        app.devices = MockProvider::devices();
        app.switch_section("devices");

        for _ in 0..2 {
            let action = export_current_section(&app);
            assert!(matches!(action, Action::Notify(_, NotifyLevel::Info)));
        }
        assert_eq!(exported_files(&dir).len(), 2);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_overview_has_nothing_to_export() {
        let app = App::new();
        assert!(matches!(
            export_current_section(&app),
            Action::Notify(_, NotifyLevel::Warn)
        ));
    }

    #[test]
    fn test_empty_dataset_warns() {
        let mut app = App::new();
        app.switch_section("devices");
        assert_eq!(
            export_current_section(&app),
            Action::Notify("No devices to export".to_string(), NotifyLevel::Warn)
        );
    }

    #[test]
    fn test_records_export_writes_csv() {
        let dir = temp_dir("records");
        let _ = fs::remove_dir_all(&dir);
        let mut app = App::new();
        app.export_dir = dir.clone();
        app.records = MockProvider::records();
        app.switch_section("records");

        let action = export_current_section(&app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Info)));

        let files = exported_files(&dir);
        assert_eq!(files.len(), 1);
        let content = fs::read_to_string(&files[0]).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("id,user,device,method,time,result"));
        assert_eq!(lines.count(), app.records.len());
        assert!(content.contains("failed"));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_settings_export_writes_json() {
        let dir = temp_dir("settings");
        let _ = fs::remove_dir_all(&dir);
        let mut app = App::new();
        app.export_dir = dir.clone();
        app.switch_section("settings");

        let action = export_current_section(&app);
        assert!(matches!(action, Action::Notify(_, NotifyLevel::Info)));

        let files = exported_files(&dir);
        assert_eq!(files.len(), 1);
        let value: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&files[0]).unwrap()).unwrap();
        assert_eq!(value["settings"]["session_timeout_minutes"], 30);
        assert_eq!(value["settings"]["data_retention_days"], 90);
        let _ = fs::remove_dir_all(&dir);
    }
}
