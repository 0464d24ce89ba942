use aula_cache::{QueryKey, keys};
use aula_models::{GenerateReportRequest, Report};
use serde_json::Value;

use crate::modules::crud::Resource;

/// Generated reports. Creating one asks the server to build the file.
pub struct Reports;

impl Resource for Reports {
    type Item = Report;
    type Form = GenerateReportRequest;
    type Stats = Value;

    const PATH: &'static str = "/reports";
    const KEY: &'static str = keys::reports::ROOT;
    const LABEL: &'static str = "Report";

    fn id(item: &Report) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Report) -> GenerateReportRequest {
        GenerateReportRequest {
            title: item.title.clone(),
            kind: item.kind,
            ..GenerateReportRequest::default()
        }
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::report_generated()
    }
}
