use aula_cache::{QueryKey, keys};
use aula_core::{ClientError, Paginated};
use aula_models::{CourseId, Student, StudentForm, StudentStats};
use serde_json::json;
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Students;

impl Resource for Students {
    type Item = Student;
    type Form = StudentForm;
    type Stats = StudentStats;

    const PATH: &'static str = "/students";
    const KEY: &'static str = keys::students::ROOT;
    const LABEL: &'static str = "Student";

    fn id(item: &Student) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Student) -> StudentForm {
        StudentForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::student_write()
    }

    fn stats_key() -> Option<QueryKey> {
        Some(keys::students::stats())
    }
}

pub struct StudentService;

impl StudentService {
    /// Students enrolled in one course, for pickers.
    #[instrument(skip(client))]
    pub async fn by_course(
        client: &HttpClient,
        course: &CourseId,
    ) -> Result<Paginated<Student>, ClientError> {
        client
            .get_page("/students", &json!({ "course": course, "limit": 100 }))
            .await
    }
}
