use std::ops::Deref;

use aula_cache::{Mutation, MutationError, keys};
use aula_models::{Parent, ParentId, StudentId};

use crate::modules::crud::CrudPage;
use crate::modules::parents::{ParentService, Parents};
use crate::notifications::ToastRequest;
use crate::state::AppState;

/// Parents list plus linking a student to a parent.
pub struct ParentsPage {
    crud: CrudPage<Parents>,
    link: Mutation<(ParentId, StudentId), Parent>,
}

impl Deref for ParentsPage {
    type Target = CrudPage<Parents>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl ParentsPage {
    pub fn new(state: &AppState) -> Self {
        let client = state.client.clone();
        let ok = state.toaster.clone();
        let failed = state.toaster.clone();
        let link = Mutation::new(
            state.cache.clone(),
            move |(parent, student): (ParentId, StudentId)| {
                let client = client.clone();
                async move { ParentService::link_student(&client, &parent, &student).await }
            },
        )
        .invalidates_all(keys::invalidate::parent_link())
        .on_success(move |parent: &Parent| {
            ok.toast(ToastRequest::success(
                "Student linked",
                format!("Linked to {} {}", parent.first_name, parent.last_name),
            ));
        })
        .on_error(move |error| {
            failed.toast(ToastRequest::error("Error", error.message()));
        });

        Self {
            crud: CrudPage::new(state),
            link,
        }
    }

    pub async fn link_student(
        &self,
        parent: ParentId,
        student: StudentId,
    ) -> Result<Parent, MutationError> {
        self.link.mutate((parent, student)).await
    }

    pub fn is_linking(&self) -> bool {
        self.link.is_pending()
    }
}
