#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

#[macro_use]
extern crate tracing;

pub mod chat;
pub mod config;
pub mod data;
pub mod error;
pub mod maud_conveniences;
pub mod routes;
pub mod state;
pub mod store;

use crate::{
    routes::{
        all_students::{
            internal_delete_student, internal_get_add_student_form, internal_get_students,
            internal_put_new_student,
        },
        chat::{internal_post_chat, post_chat},
        health::get_health,
        import::internal_put_import_students,
        index::get_index_route,
        students::{delete_student, get_students, post_student},
    },
    state::ChinoState,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: ChinoState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", get(get_students).post(post_student))
        .route("/students/{student_id}", delete(delete_student))
        .route("/chat", post(post_chat))
        .route("/health", get(get_health))
        .route("/internal/get_students", get(internal_get_students))
        .route("/internal/students", delete(internal_delete_student))
        .route(
            "/internal/students/new_student_form",
            get(internal_get_add_student_form).put(internal_put_new_student),
        )
        .route("/internal/import_students", put(internal_put_import_students))
        .route("/internal/chat", post(internal_post_chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
