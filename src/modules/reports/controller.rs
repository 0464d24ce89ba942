use std::ops::Deref;

use aula_cache::MutationError;
use aula_models::{GenerateReportRequest, Report};

use crate::modules::crud::CrudPage;
use crate::modules::reports::Reports;
use crate::state::AppState;

pub struct ReportsPage {
    crud: CrudPage<Reports>,
}

impl Deref for ReportsPage {
    type Target = CrudPage<Reports>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl ReportsPage {
    pub fn new(state: &AppState) -> Self {
        Self {
            crud: CrudPage::new(state),
        }
    }

    /// Fills the generate form and submits it.
    pub async fn generate(&self, request: GenerateReportRequest) -> Result<Report, MutationError> {
        self.crud.open_create();
        self.crud.update_form(|form| *form = request);
        self.crud.submit().await
    }

    pub fn download_url(&self, report: &Report) -> Option<String> {
        report
            .file
            .as_deref()
            .and_then(|file| self.crud.app().client.document_url(file))
    }
}
