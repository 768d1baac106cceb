use crate::{
    data::{StudentIdForm, student::Student},
    error::{ChinoError, ChinoResult},
    maud_conveniences::{
        errors_list, form_element, form_submit_button, render_table, simple_form_element, title,
    },
    state::ChinoState,
};
use axum::{
    Form,
    extract::{Query, State},
};
use maud::{Markup, html};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct FilterQuery {
    #[serde(default)]
    filter: String,
}

fn matches_filter(student: &Student, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }

    let needle = needle.to_lowercase();
    [
        &student.student_id,
        &student.full_name,
        &student.gender,
        &student.gmail,
        &student.program,
        &student.year_level,
        &student.university,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&needle))
}

fn students_table(students: &[Student], filter: &str) -> Markup {
    let rows = students
        .iter()
        .filter(|student| matches_filter(student, filter))
        .map(|student| {
            [
                html! {(student.student_id)},
                html! {(student.full_name)},
                html! {(student.gender)},
                html! {(student.gmail)},
                html! {(student.program)},
                html! {(student.year_level)},
                html! {(student.university)},
                html! {
                    button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-2 rounded" hx-delete="/internal/students" hx-vals={"{\"student_id\": \"" (student.student_id) "\"}"} hx-target="#in_focus" {
                        "Delete"
                    }
                },
            ]
        })
        .collect();

    render_table(
        [
            "Student ID",
            "Full Name",
            "Gender",
            "Gmail",
            "Program",
            "Year Level",
            "University",
            "",
        ],
        rows,
    )
}

/// Out-of-band replacement for the table container, so mutation fragments can
/// refresh the list alongside their own confirmation message.
pub fn refreshed_table(students: &[Student]) -> Markup {
    html! {
        div id="all_students" hx-swap-oob="true" {
            (students_table(students, ""))
        }
    }
}

pub async fn internal_get_students(
    State(state): State<ChinoState>,
    Query(FilterQuery { filter }): Query<FilterQuery>,
) -> ChinoResult<Markup> {
    let students = state.store().load_all().await?;

    Ok(students_table(&students, filter.trim()))
}

pub async fn internal_delete_student(
    State(state): State<ChinoState>,
    Query(StudentIdForm { student_id }): Query<StudentIdForm>,
) -> ChinoResult<Markup> {
    let removed = match state.store().remove(&student_id).await {
        Ok(removed) => removed,
        Err(error @ ChinoError::MissingStudent { .. }) => {
            return Ok(errors_list(Some("Unable to delete"), [error.to_string()]));
        }
        Err(error) => return Err(error),
    };

    let students = state.store().load_all().await?;

    Ok(html! {
        p class="text-green-400 p-2" {"Removed " (removed)}
        (refreshed_table(&students))
    })
}

pub async fn internal_get_add_student_form() -> Markup {
    html! {
        (title("Add New Student"))

        form hx-put="/internal/students/new_student_form" hx-trigger="submit" hx-target="#in_focus" class="p-4" {
            (simple_form_element("student_id", "Student ID", true, None, Some("BP-113-00001")))
            (simple_form_element("full_name", "Full Name", true, None, None))
            (form_element("gender", "Gender", html!{
                select id="gender" name="gender" class="shadow appearance-none border rounded w-full py-2 px-3 leading-tight focus:outline-none focus:shadow-outline bg-gray-700 border-gray-600" {
                    option value="Female" {"Female"}
                    option value="Male" {"Male"}
                    option value="Prefer not to say" {"Prefer not to say"}
                }
            }))
            (simple_form_element("gmail", "Gmail", true, Some("email"), Some("you@gmail.com")))
            (simple_form_element("program", "Program", true, None, Some("BS Physics")))
            (simple_form_element("year_level", "Year Level", true, None, Some("5th Year")))
            (simple_form_element("university", "University", true, None, None))

            (form_submit_button(Some("Add Student")))
        }
    }
}

#[derive(Deserialize)]
pub struct NewStudentForm {
    student_id: String,
    full_name: String,
    gender: String,
    gmail: String,
    program: String,
    year_level: String,
    university: String,
}

pub async fn internal_put_new_student(
    State(state): State<ChinoState>,
    Form(form): Form<NewStudentForm>,
) -> ChinoResult<Markup> {
    let candidate = Student {
        student_id: form.student_id,
        full_name: form.full_name,
        gender: form.gender,
        gmail: form.gmail,
        program: form.program,
        year_level: form.year_level,
        university: form.university,
    };

    Ok(match state.store().create(candidate).await {
        Ok(stored) => {
            let students = state.store().load_all().await?;
            html! {
                p class="text-green-400 p-2" {"Added " (stored)}
                (refreshed_table(&students))
            }
        }
        Err(
            error @ (ChinoError::InvalidStudentField { .. } | ChinoError::DuplicateStudentId { .. }),
        ) => errors_list(Some("Unable to add student"), [error.to_string()]),
        Err(error) => return Err(error),
    })
}
