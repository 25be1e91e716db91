use std::fs;
use std::path::Path;

use dash_logging::{dash_error, dash_info, dash_warn};
use jobdash_core::JobColumn;
use serde::{Deserialize, Serialize};

pub(crate) const PREFS_FILENAME: &str = ".jobdash_prefs.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PersistedPrefs {
    visible_columns: Vec<String>,
}

/// Loads the visible-column preference, if a readable file exists. Unknown
/// column names (from an older or newer build) are skipped with a warning.
pub(crate) fn load_column_prefs(path: &Path) -> Option<Vec<JobColumn>> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return None;
        }
        Err(err) => {
            dash_warn!("Failed to read prefs from {:?}: {}", path, err);
            return None;
        }
    };

    let prefs: PersistedPrefs = match ron::from_str(&content) {
        Ok(prefs) => prefs,
        Err(err) => {
            dash_warn!("Failed to parse prefs from {:?}: {}", path, err);
            return None;
        }
    };

    let columns: Vec<JobColumn> = prefs
        .visible_columns
        .iter()
        .filter_map(|name| {
            let column = JobColumn::parse(name);
            if column.is_none() {
                dash_warn!("Skipping unknown column {:?} in prefs", name);
            }
            column
        })
        .collect();

    dash_info!("Loaded column prefs from {:?}", path);
    Some(columns)
}

/// Writes the preference file through a sibling temp file and rename, so a
/// crash mid-write never leaves a torn file behind.
pub(crate) fn save_column_prefs(path: &Path, visible: &[JobColumn]) {
    let prefs = PersistedPrefs {
        visible_columns: visible.iter().map(|column| column.as_str().to_owned()).collect(),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&prefs, pretty) {
        Ok(text) => text,
        Err(err) => {
            dash_error!("Failed to serialize prefs: {}", err);
            return;
        }
    };

    let tmp = path.with_extension("ron.tmp");
    if let Err(err) = fs::write(&tmp, content).and_then(|()| fs::rename(&tmp, path)) {
        dash_error!("Failed to write prefs to {:?}: {}", path, err);
    }
}

#[cfg(test)]
mod tests {
    use super::{load_column_prefs, save_column_prefs, PREFS_FILENAME};
    use jobdash_core::JobColumn;

    #[test]
    fn saved_prefs_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILENAME);

        let visible = vec![JobColumn::JobTitle, JobColumn::Salary, JobColumn::Benefits];
        save_column_prefs(&path, &visible);
        assert_eq!(load_column_prefs(&path), Some(visible));
    }

    #[test]
    fn missing_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_column_prefs(&dir.path().join(PREFS_FILENAME)), None);
    }

    #[test]
    fn corrupt_file_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILENAME);
        std::fs::write(&path, "(visible_columns: [").unwrap();
        assert_eq!(load_column_prefs(&path), None);
    }

    #[test]
    fn unknown_column_names_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILENAME);
        std::fs::write(
            &path,
            "(visible_columns: [\"salary\", \"hologram\", \"location\"])",
        )
        .unwrap();
        assert_eq!(
            load_column_prefs(&path),
            Some(vec![JobColumn::Salary, JobColumn::Location])
        );
    }

    #[test]
    fn save_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(PREFS_FILENAME);
        save_column_prefs(&path, &[JobColumn::JobTitle]);
        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec![PREFS_FILENAME.to_owned()]);
    }
}
