use serde::Deserialize;

pub mod student;

#[derive(Deserialize)]
pub struct StudentIdForm {
    pub student_id: String,
}
