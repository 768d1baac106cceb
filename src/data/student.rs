use crate::error::{ChinoResult, InvalidStudentFieldSnafu};
use maud::{Render, html};
use regex::Regex;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::sync::LazyLock;

static STUDENT_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{1,4}-\d{3}-\d{5}$").expect("student id regex must compile")
});
static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]{2,}$").expect("full name regex must compile"));
static GMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Za-z0-9._%+-]+@gmail\.com$").expect("gmail regex must compile")
});
static YEAR_LEVEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:\d+|\d(?:st|nd|rd|th)\s+year)$").expect("year level regex must compile")
});

/// The one domain entity. Field names are camelCase on the wire and in the
/// persisted file; missing fields deserialize to empty strings so they fail
/// validation by name instead of being rejected by the decoder.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Student {
    pub student_id: String,
    pub full_name: String,
    pub gender: String,
    pub gmail: String,
    pub program: String,
    pub year_level: String,
    pub university: String,
}

impl Student {
    /// Checks every field in declaration order and reports the first failure.
    /// Shared by the JSON API, the htmx form handlers, and the CSV importer.
    pub fn validate(&self) -> ChinoResult<()> {
        ensure!(
            STUDENT_ID_RE.is_match(&self.student_id),
            InvalidStudentFieldSnafu {
                field: "studentId",
                reason: "expected a pattern like BP-113-00001",
            }
        );
        ensure!(
            FULL_NAME_RE.is_match(&self.full_name),
            InvalidStudentFieldSnafu {
                field: "fullName",
                reason: "expected letters and spaces only, at least 2 characters",
            }
        );
        ensure!(
            !self.gender.trim().is_empty(),
            InvalidStudentFieldSnafu {
                field: "gender",
                reason: "must not be empty",
            }
        );
        ensure!(
            GMAIL_RE.is_match(&self.gmail),
            InvalidStudentFieldSnafu {
                field: "gmail",
                reason: "expected a gmail.com address",
            }
        );
        ensure!(
            !self.program.trim().is_empty(),
            InvalidStudentFieldSnafu {
                field: "program",
                reason: "must not be empty",
            }
        );
        ensure!(
            YEAR_LEVEL_RE.is_match(&self.year_level),
            InvalidStudentFieldSnafu {
                field: "yearLevel",
                reason: "expected a number or an ordinal form like 5th Year",
            }
        );
        ensure!(
            !self.university.trim().is_empty(),
            InvalidStudentFieldSnafu {
                field: "university",
                reason: "must not be empty",
            }
        );

        Ok(())
    }
}

impl Render for Student {
    fn render(&self) -> maud::Markup {
        html! {
            (self.full_name) " (" (self.student_id) ")"
        }
    }
}
