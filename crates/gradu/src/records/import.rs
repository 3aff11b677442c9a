use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

use crate::requirements::{Course, CourseCategory, Term};

#[derive(Debug)]
pub enum CourseImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
    InvalidField {
        line: u64,
        field: &'static str,
        value: String,
    },
}

impl std::fmt::Display for CourseImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CourseImportError::Io(err) => write!(f, "failed to read course list: {}", err),
            CourseImportError::Csv(err) => write!(f, "invalid course CSV data: {}", err),
            CourseImportError::Json(err) => write!(f, "invalid course JSON data: {}", err),
            CourseImportError::InvalidField { line, field, value } => write!(
                f,
                "line {}: column '{}' has unsupported value '{}'",
                line, field, value
            ),
        }
    }
}

impl std::error::Error for CourseImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CourseImportError::Io(err) => Some(err),
            CourseImportError::Csv(err) => Some(err),
            CourseImportError::Json(err) => Some(err),
            CourseImportError::InvalidField { .. } => None,
        }
    }
}

impl From<std::io::Error> for CourseImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CourseImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CourseImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Loads course lists from CSV exports or JSON arrays.
pub struct CourseImporter;

impl CourseImporter {
    /// Picks the format from the file extension; anything other than `.json` is read as CSV.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Course>, CourseImportError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            Self::from_json(file)
        } else {
            Self::from_csv(file)
        }
    }

    pub fn from_json<R: Read>(reader: R) -> Result<Vec<Course>, CourseImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Header row: `name,category,credit,designed_credit,grade,is_english,academic_year,term`.
    /// Only `name`, `category` and `credit` are required.
    pub fn from_csv<R: Read>(reader: R) -> Result<Vec<Course>, CourseImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut courses = Vec::new();

        for record in csv_reader.deserialize::<CourseRow>() {
            let row = record?;
            let line = courses.len() as u64 + 2;
            courses.push(row.into_course(line)?);
        }

        Ok(courses)
    }
}

#[derive(Debug, Deserialize)]
struct CourseRow {
    name: String,
    category: String,
    credit: f64,
    #[serde(default)]
    designed_credit: Option<u32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    grade: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_english: Option<String>,
    #[serde(default)]
    academic_year: Option<u16>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    term: Option<String>,
}

impl CourseRow {
    fn into_course(self, line: u64) -> Result<Course, CourseImportError> {
        let is_foreign_taught = match self.is_english.as_deref() {
            None => false,
            Some(raw) => parse_flag(raw).ok_or_else(|| CourseImportError::InvalidField {
                line,
                field: "is_english",
                value: raw.to_string(),
            })?,
        };

        let term = match self.term.as_deref() {
            None => None,
            Some(raw) => Some(Term::from_code(raw).ok_or_else(|| {
                CourseImportError::InvalidField {
                    line,
                    field: "term",
                    value: raw.to_string(),
                }
            })?),
        };

        Ok(Course {
            name: self.name,
            category: CourseCategory::parse(&self.category),
            credit: self.credit,
            designed_credit: self.designed_credit,
            grade: self.grade,
            is_foreign_taught,
            academic_year: self.academic_year,
            term,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "y" | "yes" | "1" => Some(true),
        "false" | "n" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
