mod cli;

pub(crate) use cli::as_cli;

use anyhow::{Context, Result};
use std::path::Path;

use budgetwise::models::Snapshot;

/// Flags that take a value; everything else starting with `--` is a switch.
const VALUE_FLAGS: &[&str] = &["--snapshot", "--month", "--preset", "--date", "--desc"];

/// A missing file is an empty snapshot so a first write can create it.
pub(crate) fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        log::warn!("No snapshot at {}, starting empty", path.display());
        return Ok(Snapshot::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))?;
    Snapshot::from_json(&raw)
        .with_context(|| format!("Invalid snapshot JSON: {}", path.display()))
}

pub(crate) fn save_snapshot(path: &Path, snapshot: &Snapshot) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(snapshot).context("Failed to encode snapshot")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
    log::info!("Saved snapshot to {}", path.display());
    Ok(())
}

pub(crate) fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

pub(crate) fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

/// Arguments that are neither flags nor flag values. Negative numbers are
/// positional.
pub(crate) fn positionals(args: &[String]) -> Vec<&str> {
    let mut out = Vec::new();
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if VALUE_FLAGS.contains(&arg.as_str()) {
            skip_next = true;
        } else if !arg.starts_with("--") {
            out.push(arg.as_str());
        }
    }
    out
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_positionals_skip_flag_values() {
        let a = args(&["savings", "-200", "Vacation", "--snapshot", "s.json", "--yes"]);
        assert_eq!(positionals(&a), vec!["savings", "-200", "Vacation"]);
        assert_eq!(flag_value(&a, "--snapshot"), Some("s.json"));
        assert!(has_flag(&a, "--yes"));
        assert!(!has_flag(&a, "--yearly"));
    }

    #[test]
    fn test_shellexpand_plain_path() {
        assert_eq!(shellexpand("/tmp/out.csv"), "/tmp/out.csv");
    }

    #[test]
    fn test_snapshot_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        assert_eq!(load_snapshot(&path).unwrap(), Snapshot::default());

        let snapshot = Snapshot::from_json(
            r#"{"profile": {"monthlyIncome": 50000, "savingsGoal": 10000, "targetExpenses": 40000}}"#,
        )
        .unwrap();
        save_snapshot(&path, &snapshot).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn test_invalid_snapshot_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{not json").unwrap();
        let err = load_snapshot(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
