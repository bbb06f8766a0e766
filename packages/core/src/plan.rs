use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::{Break, RespiteResult, TimeValue};

/// Current plan format version
pub const PLAN_FORMAT_VERSION: u32 = 1;

/// Represents a saved study-session plan: the session duration plus the
/// breaks laid out against it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionPlan {
    /// Format version for forward compatibility
    #[serde(default = "default_version")]
    pub version: u32,
    pub id: String,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    /// Total planned session length, set once by session setup
    pub duration: TimeValue,
    #[serde(default)]
    pub breaks: Vec<Break>,
}

fn default_version() -> u32 {
    PLAN_FORMAT_VERSION
}

impl SessionPlan {
    pub fn new(name: impl Into<String>, duration: TimeValue) -> Self {
        let now = chrono::Utc::now();
        Self {
            version: PLAN_FORMAT_VERSION,
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            duration,
            breaks: Vec::new(),
        }
    }

    fn data_dir() -> PathBuf {
        directories::ProjectDirs::from("app", "respite", "Respite")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("respite"))
    }

    /// Directory holding all saved plans.
    pub fn plans_dir() -> PathBuf {
        Self::data_dir().join("plans")
    }

    pub fn plan_file(&self) -> PathBuf {
        Self::plans_dir().join(format!("{}.json", self.id))
    }

    /// Save the plan to the default location.
    pub fn save(&self) -> RespiteResult<()> {
        let plan_file = self.plan_file();
        if let Some(parent) = plan_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        self.save_to_file(&plan_file)
    }

    /// Save the plan to a specific path as pretty-printed JSON.
    pub fn save_to_file(&self, path: &Path) -> RespiteResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a plan by ID from the default location.
    pub fn load(plan_id: &str) -> RespiteResult<Self> {
        Self::load_from_file(&Self::plans_dir().join(format!("{plan_id}.json")))
    }

    /// Load a plan from a JSON file, rejecting newer format versions.
    pub fn load_from_file(path: &Path) -> RespiteResult<Self> {
        let json = std::fs::read_to_string(path)?;
        let plan: SessionPlan = serde_json::from_str(&json)?;

        if plan.version > PLAN_FORMAT_VERSION {
            return Err(crate::RespiteError::plan(format!(
                "Plan file version {} is newer than supported version {}. Please update Respite.",
                plan.version, PLAN_FORMAT_VERSION
            )));
        }

        Ok(plan)
    }

    /// List all saved plans, most recently updated first. Files that fail
    /// to parse are skipped.
    pub fn list_saved() -> RespiteResult<Vec<SessionPlan>> {
        let plans_dir = Self::plans_dir();
        let mut plans = Vec::new();

        if !plans_dir.exists() {
            return Ok(plans);
        }

        for entry in std::fs::read_dir(plans_dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Ok(plan) = Self::load_from_file(&path) {
                    plans.push(plan);
                }
            }
        }

        plans.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(plans)
    }

    /// Refresh the updated-at stamp after a mutation.
    pub fn mark_modified(&mut self) {
        self.updated_at = chrono::Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DEFAULT_BREAK_DURATION;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_plan_new() {
        let plan = SessionPlan::new("Morning session", TimeValue::new(1, 30, 0));
        assert_eq!(plan.name, "Morning session");
        assert_eq!(plan.version, PLAN_FORMAT_VERSION);
        assert_eq!(plan.duration, TimeValue::new(1, 30, 0));
        assert!(plan.breaks.is_empty());
    }

    #[test]
    fn test_plan_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let mut plan = SessionPlan::new("Roundtrip", TimeValue::new(2, 0, 0));
        plan.breaks.push(Break::new(
            TimeValue::new(0, 45, 0),
            DEFAULT_BREAK_DURATION,
        ));

        plan.save_to_file(file.path()).unwrap();
        let loaded = SessionPlan::load_from_file(file.path()).unwrap();

        assert_eq!(loaded.id, plan.id);
        assert_eq!(loaded.duration, plan.duration);
        assert_eq!(loaded.breaks, plan.breaks);
    }

    #[test]
    fn test_version_too_new() {
        let mut file = NamedTempFile::new().unwrap();
        let mut plan = SessionPlan::new("Future", TimeValue::new(1, 0, 0));
        plan.version = PLAN_FORMAT_VERSION + 1;
        write!(file, "{}", serde_json::to_string(&plan).unwrap()).unwrap();

        let result = SessionPlan::load_from_file(file.path());
        assert!(result.is_err());
        if let Err(e) = result {
            assert!(e.to_string().contains("newer than supported"));
        }
    }

    #[test]
    fn test_missing_breaks_field_defaults_empty() {
        let mut file = NamedTempFile::new().unwrap();
        let json = format!(
            r#"{{"version":1,"id":"abc","name":"Legacy",
                "created_at":"{now}","updated_at":"{now}",
                "duration":{{"hours":1,"minutes":0,"seconds":0}}}}"#,
            now = chrono::Utc::now().to_rfc3339()
        );
        write!(file, "{json}").unwrap();

        let plan = SessionPlan::load_from_file(file.path()).unwrap();
        assert!(plan.breaks.is_empty());
    }

    #[test]
    fn test_mark_modified_advances_stamp() {
        let mut plan = SessionPlan::new("Stamp", TimeValue::new(1, 0, 0));
        let before = plan.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        plan.mark_modified();
        assert!(plan.updated_at > before);
    }
}
