//! Reads battery state from sysfs-style pseudo-files.
//!
//! Layout: `<power_supply_dir>/BAT*/capacity` holds the charge level and the
//! sibling `status` file the state label.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::types::BatteryStatus;
use crate::error::Result;

/// Filesystem access used by the pseudo-file probes.
pub trait SysFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Paths of the entries of `dir`, in no particular order.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// The real filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFs;

impl SysFs for RealFs {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect()
    }
}

/// Equivalent of globbing `<dir>/BAT*/capacity`, sorted.
///
/// A missing directory means no batteries; any other listing error is a
/// fault and is returned.
pub fn battery_capacity_files(sysfs: &dyn SysFs, dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match sysfs.list_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files: Vec<PathBuf> = entries
        .into_iter()
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("BAT"))
        })
        .map(|path| path.join("capacity"))
        .collect();
    files.sort();
    Ok(files)
}

/// One [`BatteryStatus`] per readable capacity file under `dir`.
pub fn read_sysfs_batteries(sysfs: &dyn SysFs, dir: &Path) -> Result<Vec<BatteryStatus>> {
    let mut batteries = Vec::new();

    for capacity_file in battery_capacity_files(sysfs, dir)? {
        let capacity = match sysfs.read_to_string(&capacity_file) {
            Ok(data) => data,
            Err(e) => {
                log::debug!("skipping {}: {}", capacity_file.display(), e);
                continue;
            }
        };
        let status = capacity_file
            .parent()
            .map(|battery_dir| battery_dir.join("status"))
            .and_then(|status_file| sysfs.read_to_string(&status_file).ok())
            .unwrap_or_default();

        batteries.push(battery_from_sysfs(&capacity, &status));
    }

    Ok(batteries)
}

/// Unparsable or non-finite capacity reads as 0, empty status as "Unknown".
fn battery_from_sysfs(capacity: &str, status: &str) -> BatteryStatus {
    let status = status.trim();
    BatteryStatus {
        percent: capacity
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0),
        status: if status.is_empty() {
            "Unknown".to_string()
        } else {
            status.to_string()
        },
        ..Default::default()
    }
}
