//! The JSON surface consumed programmatically; the htmx fragments in
//! [`super::all_students`] sit on the same store and validation rules.

use crate::{data::student::Student, error::ChinoResult, state::ChinoState};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

pub async fn get_students(State(state): State<ChinoState>) -> ChinoResult<Json<Vec<Student>>> {
    Ok(Json(state.store().load_all().await?))
}

#[axum::debug_handler]
pub async fn post_student(
    State(state): State<ChinoState>,
    Json(candidate): Json<Student>,
) -> ChinoResult<(StatusCode, Json<Student>)> {
    let stored = state.store().create(candidate).await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

pub async fn delete_student(
    State(state): State<ChinoState>,
    Path(student_id): Path<String>,
) -> ChinoResult<Json<Student>> {
    Ok(Json(state.store().remove(&student_id).await?))
}
