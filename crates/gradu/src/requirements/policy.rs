use super::category::Category;
use super::course::normalize_course_name;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::io::Read;
use std::path::Path;

pub const STANDARD_POLICY_VERSION: &str = "2024.1";

/// Versioned graduation policy. Every threshold the engine compares against lives here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraduationPolicy {
    pub version: String,
    pub required: BTreeMap<Category, u32>,
    pub major_designed_required: u32,
    pub pf_ratio_max: f64,
    pub pf_min_total_for_limit: u32,
    pub total_credits_min: u32,
    pub gpa_min: f64,
    pub english: EnglishThresholds,
    pub grade_points: BTreeMap<String, f64>,
    pub pass_markers: BTreeSet<String>,
    pub count_once: CountOnceRule,
    #[serde(default)]
    pub english_elective_excluded: BTreeSet<Category>,
}

/// Minimum foreign-taught credits, split by major and elective side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnglishThreshold {
    pub major: u32,
    pub elective: u32,
}

/// Two alternative ways to satisfy the English-instruction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnglishThresholds {
    pub primary: EnglishThreshold,
    pub alternate: EnglishThreshold,
}

/// Cross-listed course names that contribute credit at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountOnceRule {
    pub names: Vec<String>,
    pub categories: BTreeSet<Category>,
}

impl CountOnceRule {
    pub fn applies_to(&self, normalized_name: &str, category: Option<Category>) -> bool {
        let Some(category) = category else {
            return false;
        };
        self.categories.contains(&category)
            && self
                .names
                .iter()
                .any(|name| normalize_course_name(name) == normalized_name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("policy file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("policy {version} is invalid: {reason}")]
    Invalid { version: String, reason: String },
}

impl GraduationPolicy {
    /// The policy currently in force for the department.
    pub fn standard() -> Self {
        let required = BTreeMap::from([
            (Category::FaithWorldview, 9),
            (Category::PersonalityLeadership, 6),
            (Category::PracticalEnglish, 9),
            (Category::GeneralEdu, 5),
            (Category::Bsm, 18),
            (Category::IctIntro, 2),
            (Category::FreeElectiveBasic, 9),
            (Category::FreeElectiveMjr, 0),
            (Category::Major, 60),
        ]);

        let grade_points = [
            ("A+", 4.5),
            ("A0", 4.0),
            ("B+", 3.5),
            ("B0", 3.0),
            ("C+", 2.5),
            ("C0", 2.0),
            ("D+", 1.5),
            ("D0", 1.0),
            ("F", 0.0),
        ]
        .into_iter()
        .map(|(grade, point)| (grade.to_string(), point))
        .collect();

        Self {
            version: STANDARD_POLICY_VERSION.to_string(),
            required,
            major_designed_required: 12,
            pf_ratio_max: 0.30,
            pf_min_total_for_limit: 130,
            total_credits_min: 130,
            gpa_min: 0.0,
            english: EnglishThresholds {
                primary: EnglishThreshold {
                    major: 21,
                    elective: 9,
                },
                alternate: EnglishThreshold {
                    major: 24,
                    elective: 6,
                },
            },
            grade_points,
            pass_markers: ["P", "PD", "PASS"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            count_once: CountOnceRule {
                names: vec!["기독교 세계관".to_string()],
                categories: BTreeSet::from([Category::FaithWorldview, Category::GeneralEdu]),
            },
            english_elective_excluded: BTreeSet::new(),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, PolicyError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, PolicyError> {
        let policy: Self = serde_json::from_reader(reader)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Rejects tables the engine cannot evaluate meaningfully.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let invalid = |reason: String| PolicyError::Invalid {
            version: self.version.clone(),
            reason,
        };

        if self.version.trim().is_empty() {
            return Err(invalid("version must not be empty".to_string()));
        }
        if !self.pf_ratio_max.is_finite() || !(0.0..=1.0).contains(&self.pf_ratio_max) {
            return Err(invalid(format!(
                "pf_ratio_max {} must be within 0.0..=1.0",
                self.pf_ratio_max
            )));
        }
        if !self.gpa_min.is_finite() || self.gpa_min < 0.0 {
            return Err(invalid(format!("gpa_min {} must be >= 0", self.gpa_min)));
        }
        if let Some((grade, point)) = self
            .grade_points
            .iter()
            .find(|(_, point)| !point.is_finite() || **point < 0.0)
        {
            return Err(invalid(format!("grade point for {grade} is {point}")));
        }
        if let Some(marker) = self
            .pass_markers
            .iter()
            .find(|marker| self.grade_points.contains_key(marker.as_str()))
        {
            return Err(invalid(format!(
                "{marker} is both a pass marker and a letter grade"
            )));
        }

        Ok(())
    }

    /// Required credits for a category; categories missing from the table require zero.
    pub fn required_for(&self, category: Category) -> u32 {
        self.required.get(&category).copied().unwrap_or(0)
    }
}

impl Default for GraduationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
