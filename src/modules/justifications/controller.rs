use std::ops::Deref;

use aula_cache::{Mutation, MutationError, keys};
use aula_core::stats::format_percentage;
use aula_models::{
    Justification, JustificationId, JustificationStats, JustificationStatus, ReviewRequest,
};
use serde_json::Value;

use crate::modules::crud::{CrudPage, StatCard};
use crate::modules::justifications::{JustificationService, Justifications};
use crate::notifications::ToastRequest;
use crate::state::AppState;

/// Absence justifications: submit, review and open attachments.
pub struct JustificationsPage {
    crud: CrudPage<Justifications>,
    review: Mutation<(JustificationId, ReviewRequest), Justification>,
}

impl Deref for JustificationsPage {
    type Target = CrudPage<Justifications>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl JustificationsPage {
    pub fn new(state: &AppState) -> Self {
        let client = state.client.clone();
        let ok = state.toaster.clone();
        let failed = state.toaster.clone();
        // the server rewrites matching attendance rows on review
        let review = Mutation::new(
            state.cache.clone(),
            move |(id, review): (JustificationId, ReviewRequest)| {
                let client = client.clone();
                async move { JustificationService::review(&client, &id, &review).await }
            },
        )
        .invalidates_all(keys::invalidate::justification_review())
        .on_success(move |justification: &Justification| {
            let title = match justification.status {
                JustificationStatus::Approved => "Justification approved",
                JustificationStatus::Rejected => "Justification rejected",
                JustificationStatus::Pending => "Justification updated",
            };
            ok.toast(ToastRequest::success(title, "The review was saved"));
        })
        .on_error(move |error| {
            failed.toast(ToastRequest::error("Error", error.message()));
        });

        Self {
            crud: CrudPage::new(state),
            review,
        }
    }

    pub fn filter_by_status(&self, status: Option<JustificationStatus>) {
        let value = status.map_or(Value::Null, |s| Value::from(s.as_str()));
        self.crud.set_filter("status", value);
    }

    pub async fn approve(
        &self,
        id: JustificationId,
        comment: Option<String>,
    ) -> Result<Justification, MutationError> {
        self.review_as(id, JustificationStatus::Approved, comment).await
    }

    pub async fn reject(
        &self,
        id: JustificationId,
        comment: Option<String>,
    ) -> Result<Justification, MutationError> {
        self.review_as(id, JustificationStatus::Rejected, comment).await
    }

    async fn review_as(
        &self,
        id: JustificationId,
        status: JustificationStatus,
        comment: Option<String>,
    ) -> Result<Justification, MutationError> {
        let review = ReviewRequest {
            status,
            review_comment: comment.filter(|c| !c.trim().is_empty()),
        };
        self.review.mutate((id, review)).await
    }

    pub fn is_reviewing(&self) -> bool {
        self.review.is_pending()
    }

    /// Where the attached document can be opened, if there is one.
    pub fn document_url(&self, justification: &Justification) -> Option<String> {
        justification
            .document
            .as_deref()
            .and_then(|doc| self.crud.app().client.document_url(doc))
    }
}

pub fn stat_cards(stats: &JustificationStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Total", stats.total),
        StatCard::new("Pending", stats.pending),
        StatCard::new("Approved", stats.approved),
        StatCard::new("Rejected", stats.rejected),
        StatCard::new("Approval rate", format_percentage(stats.approval_rate())),
    ]
}
