use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies a subject offering: course, specialization and subject code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectKey {
    /// Course code (e.g. `45052`)
    pub course: String,
    /// Course specialization (e.g. `0`)
    pub specialization: String,
    /// Subject code (e.g. `SCC0218`)
    pub code: String,
}

impl SubjectKey {
    pub fn new(
        course: impl Into<String>,
        specialization: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            course: course.into(),
            specialization: specialization.into(),
            code: code.into(),
        }
    }

    /// Path segments in URL order
    pub fn segments(&self) -> [&str; 3] {
        [&self.course, &self.specialization, &self.code]
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.course, self.specialization, self.code)
    }
}

/// Aggregate review counters for a subject
///
/// Invariant: `worth_it <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Number of reviews submitted
    pub total: u32,
    /// Number of reviews saying the subject is worth it
    pub worth_it: u32,
}

impl Stats {
    pub const fn new(total: u32, worth_it: u32) -> Self {
        Self { total, worth_it }
    }
}

/// A single prerequisite entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirement {
    /// Code of the required subject
    pub code: String,
    /// Whether the requirement is strong (must be passed) or weak (must be attended)
    #[serde(default)]
    pub strong: bool,
}

/// Subject record as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Subject code
    pub code: String,
    /// Subject name
    pub name: String,
    /// Long description
    #[serde(default)]
    pub description: String,
    /// Class credits
    #[serde(rename = "class")]
    pub class_credits: u32,
    /// Assignment credits
    #[serde(rename = "assign")]
    pub assignment_credits: u32,
    /// Total workload as displayed by the university (e.g. "60 h")
    #[serde(default)]
    pub hours: String,
    /// Ideal semester
    pub semester: u32,
    /// Whether the subject is elective
    #[serde(default)]
    pub optional: bool,
    /// Alternative requirement groups; the first group is the one displayed
    #[serde(default)]
    pub requirements: Vec<Vec<Requirement>>,
    /// Review counters
    #[serde(default)]
    pub stats: Stats,
}

/// Review categories; currently only the "worth it" verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewCategories {
    pub worth_it: bool,
}

/// One user's review of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectReview {
    pub categories: ReviewCategories,
}

impl SubjectReview {
    pub const fn new(worth_it: bool) -> Self {
        Self {
            categories: ReviewCategories { worth_it },
        }
    }

    pub const fn worth_it(&self) -> bool {
        self.categories.worth_it
    }
}

/// Grade distribution visible to authorized users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeStats {
    /// Histogram: grade (as sent by the API, e.g. "7.5") -> number of students
    #[serde(default)]
    pub grades: BTreeMap<String, u32>,
    /// Average grade
    pub average: f64,
    /// Approval rate in `[0, 1]`
    pub approval: f64,
}

impl GradeStats {
    pub fn has_data(&self) -> bool {
        !self.grades.is_empty()
    }
}

/// The requesting user's own grade
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserGrade {
    pub grade: f64,
}

/// Minimal subject reference used in relation lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectInfo {
    pub code: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Prerequisite neighbours of a subject
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectRelations {
    /// Subjects required before this one
    #[serde(default, deserialize_with = "null_as_empty")]
    pub predecessors: Vec<SubjectInfo>,
    /// Subjects that require this one
    #[serde(default, deserialize_with = "null_as_empty")]
    pub successors: Vec<SubjectInfo>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SubjectInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<SubjectInfo>>::deserialize(deserializer)?.unwrap_or_default())
}
