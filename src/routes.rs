pub mod all_students;
pub mod chat;
pub mod health;
pub mod import;
pub mod index;
pub mod students;
