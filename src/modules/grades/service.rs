use aula_cache::{QueryFn, QueryKey, keys};
use aula_core::ClientError;
use aula_models::{CourseAverage, Grade, GradeForm, GradeStats};
use serde_json::Value;
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Grades;

impl Resource for Grades {
    type Item = Grade;
    type Form = GradeForm;
    type Stats = GradeStats;

    const PATH: &'static str = "/grades";
    const KEY: &'static str = keys::grades::ROOT;
    const LABEL: &'static str = "Grade";

    fn id(item: &Grade) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Grade) -> GradeForm {
        GradeForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::grade_write()
    }

    fn stats_key() -> Option<QueryKey> {
        Some(keys::grades::stats())
    }
}

pub struct GradeService;

impl GradeService {
    /// Per-course, per-subject averages.
    #[instrument(skip(client, params))]
    pub async fn averages(
        client: &HttpClient,
        params: &Value,
    ) -> Result<Vec<CourseAverage>, ClientError> {
        client.get("/grades/averages", params).await
    }

    pub fn averages_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |key: QueryKey| {
            let client = client.clone();
            async move {
                let params = key.params::<Value>().unwrap_or(Value::Null);
                Self::averages(&client, &params).await
            }
        })
    }
}
