use aula_cache::{QueryKey, keys};
use aula_core::ClientError;
use aula_models::{Course, CourseForm, CourseId, EnrollStudentsRequest};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Courses;

impl Resource for Courses {
    type Item = Course;
    type Form = CourseForm;
    type Stats = Value;

    const PATH: &'static str = "/courses";
    const KEY: &'static str = keys::courses::ROOT;
    const LABEL: &'static str = "Course";

    fn id(item: &Course) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Course) -> CourseForm {
        CourseForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::course_write()
    }
}

pub struct CourseService;

impl CourseService {
    #[instrument(skip(client, request), fields(students = request.student_ids.len()))]
    pub async fn enroll(
        client: &HttpClient,
        course: &CourseId,
        request: &EnrollStudentsRequest,
    ) -> Result<Course, ClientError> {
        request.validate()?;
        client
            .post(&format!("/courses/{course}/students"), request)
            .await
    }
}
