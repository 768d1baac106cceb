use crate::{
    data::student::Student,
    error::{ChinoError, ChinoResult, MultipartSnafu},
    maud_conveniences::errors_list,
    routes::all_students::refreshed_table,
    state::ChinoState,
};
use axum::extract::{Multipart, State};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::ResultExt;

#[derive(Deserialize)]
struct CsvStudent {
    student_id: String,
    full_name: String,
    gender: String,
    gmail: String,
    program: String,
    year_level: String,
    university: String,
}

impl From<CsvStudent> for Student {
    fn from(row: CsvStudent) -> Self {
        Self {
            student_id: row.student_id,
            full_name: row.full_name,
            gender: row.gender,
            gmail: row.gmail,
            program: row.program,
            year_level: row.year_level,
            university: row.university,
        }
    }
}

pub async fn internal_put_import_students(
    State(state): State<ChinoState>,
    mut multipart: Multipart,
) -> ChinoResult<Markup> {
    let mut syntax_errors = vec![];
    let mut candidates = vec![];

    loop {
        let Some(field) = multipart.next_field().await.context(MultipartSnafu)? else {
            break;
        };

        let bytes = field.bytes().await.context(MultipartSnafu)?;
        let mut rdr = csv::Reader::from_reader(bytes.as_ref());

        for record in rdr.deserialize::<CsvStudent>() {
            match record {
                Ok(row) => candidates.push(Student::from(row)),
                Err(source) => {
                    syntax_errors.push(ChinoError::Csv { source });
                }
            }
        }
    }

    if !syntax_errors.is_empty() {
        return Ok(errors_list(
            Some("The following syntax errors were found in your CSV:"),
            syntax_errors.into_iter().map(|error| error.to_string()),
        ));
    }

    let outcome = state.store().import(candidates).await?;
    let students = state.store().load_all().await?;

    Ok(html! {
        p class="italic p-2" {"Imported " (outcome.added.len()) " student(s)."}

        @if !outcome.rejected.is_empty() {
            (errors_list(
                Some("Rows not imported:"),
                outcome.rejected.iter().map(ToString::to_string),
            ))
        }

        (refreshed_table(&students))
    })
}
