use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which list a project belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ProjectStatus {
    Active,
    Finished,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Finished => "finished",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ProjectStatus::Active => ProjectStatus::Finished,
            ProjectStatus::Finished => ProjectStatus::Active,
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The validated output of one form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub manday: f64,
}

impl ProjectRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>, manday: f64) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            manday,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub title: String,
    pub description: String,
    pub manday: f64,
    pub status: ProjectStatus,
}

/// Top-level shape of an exported project list. TOML needs a table at the
/// root, so the list is wrapped rather than written bare.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProjectsDocument<'a> {
    pub projects: &'a [Project],
}

const MANDAYS_PER_MONTH: f64 = 20.0;

impl Project {
    pub fn from_record(id: impl Into<String>, record: ProjectRecord) -> Self {
        Self {
            id: id.into(),
            title: record.title,
            description: record.description,
            manday: record.manday,
            status: ProjectStatus::Active,
        }
    }

    /// Human readable effort: days below one month, months from there on.
    pub fn effort_label(&self) -> String {
        if self.manday.is_nan() {
            "unknown effort".to_string()
        } else if self.manday < MANDAYS_PER_MONTH {
            let unit = if self.manday == 1.0 { "man-day" } else { "man-days" };
            format!("{} {unit}", self.manday)
        } else {
            format!("{} man-months", self.manday / MANDAYS_PER_MONTH)
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(1.0, "1 man-day")]
    #[case(3.0, "3 man-days")]
    #[case(19.5, "19.5 man-days")]
    #[case(20.0, "1 man-months")]
    #[case(50.0, "2.5 man-months")]
    #[case(f64::NAN, "unknown effort")]
    fn effort_labels(#[case] manday: f64, #[case] expected: &str) {
        let project = Project::from_record("project-1", ProjectRecord::new("t", "d", manday));
        assert_eq!(project.effort_label(), expected);
    }

    #[test]
    fn status_toggles_and_serializes_lowercase() {
        assert_eq!(ProjectStatus::Active.toggled(), ProjectStatus::Finished);
        assert_eq!(ProjectStatus::Finished.toggled(), ProjectStatus::Active);
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Finished).unwrap(),
            "\"finished\""
        );
    }
}
