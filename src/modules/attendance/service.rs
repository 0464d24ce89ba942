use aula_cache::{QueryKey, keys};
use aula_core::ClientError;
use aula_models::{AttendanceForm, AttendanceRecord, AttendanceStats, BulkAttendanceRequest};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Attendance;

impl Resource for Attendance {
    type Item = AttendanceRecord;
    type Form = AttendanceForm;
    type Stats = AttendanceStats;

    const PATH: &'static str = "/attendance";
    const KEY: &'static str = keys::attendance::ROOT;
    const LABEL: &'static str = "Attendance";

    fn id(item: &AttendanceRecord) -> String {
        item.id.to_string()
    }

    fn form_for(item: &AttendanceRecord) -> AttendanceForm {
        AttendanceForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::attendance_write()
    }

    fn stats_key() -> Option<QueryKey> {
        Some(keys::attendance::stats())
    }
}

pub struct AttendanceService;

impl AttendanceService {
    /// Records a whole course for one day in a single request.
    #[instrument(skip(client, request), fields(course = %request.course, date = %request.date, entries = request.entries.len()))]
    pub async fn record_bulk(
        client: &HttpClient,
        request: &BulkAttendanceRequest,
    ) -> Result<Value, ClientError> {
        request.validate()?;
        client.post("/attendance/bulk", request).await
    }
}
