use aula_cache::{QueryKey, keys};
use aula_core::ClientError;
use aula_models::{
    Justification, JustificationForm, JustificationId, JustificationStats, ReviewRequest,
};
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Justifications;

impl Resource for Justifications {
    type Item = Justification;
    type Form = JustificationForm;
    type Stats = JustificationStats;

    const PATH: &'static str = "/justifications";
    const KEY: &'static str = keys::justifications::ROOT;
    const LABEL: &'static str = "Justification";

    fn id(item: &Justification) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Justification) -> JustificationForm {
        JustificationForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::justification_write()
    }

    fn stats_key() -> Option<QueryKey> {
        Some(keys::justifications::stats())
    }
}

pub struct JustificationService;

impl JustificationService {
    /// Approves or rejects a pending justification.
    #[instrument(skip(client, review), fields(status = review.status.as_str()))]
    pub async fn review(
        client: &HttpClient,
        id: &JustificationId,
        review: &ReviewRequest,
    ) -> Result<Justification, ClientError> {
        client
            .patch(&format!("/justifications/{id}/status"), review)
            .await
    }
}
