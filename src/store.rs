use crate::{
    data::student::Student,
    error::{
        ChinoError, ChinoResult, DecodeStoreSnafu, DuplicateStudentIdSnafu, EncodeStoreSnafu,
        MissingStudentSnafu, ReadStoreSnafu, SwapStoreSnafu, WriteStoreSnafu,
    },
};
use snafu::{OptionExt, ResultExt, ensure};
use std::{io::ErrorKind, path::PathBuf};
use tokio::{fs, sync::Mutex};

/// Bundled default dataset, swapped in whenever the persisted collection is
/// missing or empty.
const BUNDLED_SEED: &str = include_str!("../seed/students.json");

/// A single JSON file holding the whole collection. Mutations take the guard
/// for the full read-modify-write, so concurrent requests cannot lose each
/// other's updates, and every write goes through a temp-file-plus-rename swap
/// so a crashed write never leaves a torn file behind.
#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    write_guard: Mutex<()>,
}

#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub added: Vec<Student>,
    pub rejected: Vec<ChinoError>,
}

impl StudentStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_guard: Mutex::new(()),
        }
    }

    pub fn seed_students() -> ChinoResult<Vec<Student>> {
        serde_json::from_str(BUNDLED_SEED).context(DecodeStoreSnafu)
    }

    /// The full collection in stored order, reseeding first if needed.
    pub async fn load_all(&self) -> ChinoResult<Vec<Student>> {
        let _guard = self.write_guard.lock().await;
        self.load_inner().await
    }

    pub async fn create(&self, student: Student) -> ChinoResult<Student> {
        student.validate()?;

        let _guard = self.write_guard.lock().await;
        let mut students = self.load_inner().await?;
        ensure!(
            students
                .iter()
                .all(|existing| existing.student_id != student.student_id),
            DuplicateStudentIdSnafu {
                id: student.student_id.clone(),
            }
        );

        students.push(student.clone());
        self.replace_inner(&students).await?;

        info!(id = %student.student_id, "Added student");
        Ok(student)
    }

    pub async fn remove(&self, student_id: &str) -> ChinoResult<Student> {
        let _guard = self.write_guard.lock().await;
        let mut students = self.load_inner().await?;
        let position = students
            .iter()
            .position(|student| student.student_id == student_id)
            .context(MissingStudentSnafu { id: student_id })?;

        let removed = students.remove(position);
        self.replace_inner(&students).await?;

        info!(id = %student_id, "Removed student");
        Ok(removed)
    }

    /// One locked read-modify-write for a whole CSV batch; rejected rows do
    /// not stop the accepted ones.
    pub async fn import(&self, candidates: Vec<Student>) -> ChinoResult<ImportOutcome> {
        let _guard = self.write_guard.lock().await;
        let mut students = self.load_inner().await?;
        let mut outcome = ImportOutcome::default();

        for student in candidates {
            if let Err(error) = student.validate() {
                outcome.rejected.push(error);
                continue;
            }
            if students
                .iter()
                .any(|existing| existing.student_id == student.student_id)
            {
                outcome.rejected.push(
                    DuplicateStudentIdSnafu {
                        id: student.student_id,
                    }
                    .build(),
                );
                continue;
            }

            students.push(student.clone());
            outcome.added.push(student);
        }

        if !outcome.added.is_empty() {
            self.replace_inner(&students).await?;
        }

        Ok(outcome)
    }

    async fn load_inner(&self) -> ChinoResult<Vec<Student>> {
        let students = match fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).context(DecodeStoreSnafu)?,
            Err(source) if source.kind() == ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(source).context(ReadStoreSnafu {
                    path: self.path.clone(),
                });
            }
        };

        if students.is_empty() {
            let seed = Self::seed_students()?;
            self.replace_inner(&seed).await?;
            info!(path = ?self.path, "Seeded student store from the bundled dataset");
            return Ok(seed);
        }

        Ok(students)
    }

    async fn replace_inner(&self, students: &[Student]) -> ChinoResult<()> {
        let bytes = serde_json::to_vec_pretty(students).context(EncodeStoreSnafu)?;

        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &bytes)
            .await
            .context(WriteStoreSnafu {
                path: temp_path.clone(),
            })?;
        fs::rename(&temp_path, &self.path)
            .await
            .context(SwapStoreSnafu {
                path: self.path.clone(),
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ChinoError;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> StudentStore {
        StudentStore::new(dir.path().join("students.json"))
    }

    fn new_student() -> Student {
        Student {
            student_id: "BP-113-00001".to_string(),
            full_name: "Chelsea Greer".to_string(),
            gender: "Female".to_string(),
            gmail: "chelseagreer@gmail.com".to_string(),
            program: "BS Physics".to_string(),
            year_level: "5th Year".to_string(),
            university: "Caraga State University".to_string(),
        }
    }

    #[tokio::test]
    async fn seeds_a_missing_store_idempotently() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.load_all().await.unwrap();
        assert_eq!(first, StudentStore::seed_students().unwrap());
        assert!(dir.path().join("students.json").exists());

        let second = store.load_all().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn reseeds_an_empty_collection() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "[]").unwrap();

        let store = store_in(&dir);
        let students = store.load_all().await.unwrap();
        assert_eq!(students, StudentStore::seed_students().unwrap());
    }

    #[tokio::test]
    async fn reseeds_a_blank_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("students.json");
        std::fs::write(&path, "\n").unwrap();

        let store = store_in(&dir);
        assert!(!store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_appends_exactly_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let stored = store.create(new_student()).await.unwrap();
        assert_eq!(stored, new_student());

        let students = store.load_all().await.unwrap();
        let matches = students
            .iter()
            .filter(|student| student.student_id == "BP-113-00001")
            .count();
        assert_eq!(matches, 1);
        assert!(!dir.path().join("students.tmp").exists());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_ids_and_leaves_the_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.create(new_student()).await.unwrap();
        let before = store.load_all().await.unwrap();

        let error = store.create(new_student()).await.unwrap_err();
        assert!(matches!(
            error,
            ChinoError::DuplicateStudentId { ref id } if id == "BP-113-00001"
        ));
        assert_eq!(store.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn create_rejects_invalid_records_before_touching_the_store() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let mut student = new_student();
        student.year_level = "five".to_string();

        let error = store.create(student).await.unwrap_err();
        assert!(matches!(
            error,
            ChinoError::InvalidStudentField {
                field: "yearLevel",
                ..
            }
        ));
        assert!(!dir.path().join("students.json").exists());
    }

    #[tokio::test]
    async fn remove_returns_the_removed_record() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let seeded = store.load_all().await.unwrap();
        let target = seeded[0].clone();

        let removed = store.remove(&target.student_id).await.unwrap();
        assert_eq!(removed, target);

        let students = store.load_all().await.unwrap();
        assert_eq!(students.len(), seeded.len() - 1);
        assert!(
            students
                .iter()
                .all(|student| student.student_id != target.student_id)
        );
    }

    #[tokio::test]
    async fn remove_of_an_absent_id_leaves_the_collection_unchanged() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let before = store.load_all().await.unwrap();
        let error = store.remove("ZZ-999-99999").await.unwrap_err();
        assert!(matches!(error, ChinoError::MissingStudent { .. }));
        assert_eq!(store.load_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn import_partitions_valid_and_rejected_rows() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.load_all().await.unwrap();

        let fresh = new_student();
        let mut invalid = new_student();
        invalid.student_id = "QA-204-00042".to_string();
        invalid.gmail = "not-a-gmail".to_string();
        let in_batch_duplicate = new_student();

        let outcome = store
            .import(vec![fresh.clone(), invalid, in_batch_duplicate])
            .await
            .unwrap();
        assert_eq!(outcome.added, vec![fresh.clone()]);
        assert_eq!(outcome.rejected.len(), 2);

        let students = store.load_all().await.unwrap();
        let matches = students
            .iter()
            .filter(|student| student.student_id == fresh.student_id)
            .count();
        assert_eq!(matches, 1);
    }
}
