use super::category::Category;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Category as recorded on a course. Labels outside the fixed set are kept verbatim so
/// they still count toward credit totals without producing a summary row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CourseCategory {
    Known(Category),
    Unrecognized(String),
}

impl CourseCategory {
    pub fn parse(raw: &str) -> Self {
        match Category::from_key(raw) {
            Some(category) => Self::Known(category),
            None => Self::Unrecognized(raw.trim().to_string()),
        }
    }

    pub fn known(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn is(&self, category: Category) -> bool {
        self.known() == Some(category)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(category) => category.key(),
            Self::Unrecognized(raw) => raw,
        }
    }
}

impl From<Category> for CourseCategory {
    fn from(value: Category) -> Self {
        Self::Known(value)
    }
}

impl fmt::Display for CourseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for CourseCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CourseCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// Academic term a course was taken in. Carried through storage, ignored by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "1")]
    First,
    #[serde(rename = "2")]
    Second,
    #[serde(rename = "sum")]
    Summer,
    #[serde(rename = "win")]
    Winter,
}

impl Term {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "1" => Some(Self::First),
            "2" => Some(Self::Second),
            "sum" => Some(Self::Summer),
            "win" => Some(Self::Winter),
            _ => None,
        }
    }
}

/// A completed (or in-progress) course as recorded by the student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub name: String,
    pub category: CourseCategory,
    pub credit: f64,
    #[serde(default)]
    pub designed_credit: Option<u32>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default, alias = "isEnglish")]
    pub is_foreign_taught: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<Term>,
}

impl Course {
    pub fn new(name: impl Into<String>, category: impl Into<CourseCategory>, credit: f64) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
            credit,
            designed_credit: None,
            grade: None,
            is_foreign_taught: false,
            academic_year: None,
            term: None,
        }
    }

    pub fn graded(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn designed(mut self, designed_credit: u32) -> Self {
        self.designed_credit = Some(designed_credit);
        self
    }

    pub fn foreign_taught(mut self) -> Self {
        self.is_foreign_taught = true;
        self
    }
}

/// Whitespace-stripped, case-folded course name used for identity comparisons.
pub fn normalize_course_name(name: &str) -> String {
    name.replace(['\u{feff}', '\u{200b}'], "")
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}
