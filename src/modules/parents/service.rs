use aula_cache::{QueryKey, keys};
use aula_core::ClientError;
use aula_models::{LinkStudentRequest, Parent, ParentForm, ParentId, StudentId};
use serde_json::Value;
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Parents;

impl Resource for Parents {
    type Item = Parent;
    type Form = ParentForm;
    type Stats = Value;

    const PATH: &'static str = "/parents";
    const KEY: &'static str = keys::parents::ROOT;
    const LABEL: &'static str = "Parent";

    fn id(item: &Parent) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Parent) -> ParentForm {
        ParentForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::parent_write()
    }
}

pub struct ParentService;

impl ParentService {
    #[instrument(skip(client))]
    pub async fn link_student(
        client: &HttpClient,
        parent: &ParentId,
        student: &StudentId,
    ) -> Result<Parent, ClientError> {
        let body = LinkStudentRequest {
            student_id: student.clone(),
        };
        client
            .post(&format!("/parents/{parent}/students"), &body)
            .await
    }
}
