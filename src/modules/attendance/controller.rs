use std::ops::Deref;

use aula_cache::{Mutation, MutationError, keys};
use aula_models::{AttendanceStats, BulkAttendanceRequest, CourseId};
use chrono::NaiveDate;
use serde_json::Value;

use crate::modules::attendance::{Attendance, AttendanceService};
use crate::modules::crud::{CrudPage, ListFilters, StatCard};
use crate::notifications::ToastRequest;
use crate::state::AppState;

pub struct AttendancePage {
    crud: CrudPage<Attendance>,
    bulk: Mutation<BulkAttendanceRequest, Value>,
}

impl Deref for AttendancePage {
    type Target = CrudPage<Attendance>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl AttendancePage {
    /// Opens the page on `date`.
    pub fn new(state: &AppState, date: NaiveDate) -> Self {
        let client = state.client.clone();
        let ok = state.toaster.clone();
        let failed = state.toaster.clone();
        let bulk = Mutation::new(state.cache.clone(), move |request: BulkAttendanceRequest| {
            let client = client.clone();
            async move { AttendanceService::record_bulk(&client, &request).await }
        })
        .invalidates_all(keys::invalidate::attendance_write())
        .on_success(move |_| {
            ok.toast(ToastRequest::success(
                "Attendance saved",
                "The attendance sheet was recorded",
            ));
        })
        .on_error(move |error| {
            failed.toast(ToastRequest::error("Error", error.message()));
        });

        let filters = ListFilters::default().with_filter("date", date.to_string());
        Self {
            crud: CrudPage::with_filters(state, filters),
            bulk,
        }
    }

    pub fn select_date(&self, date: NaiveDate) {
        self.crud.set_filter("date", date.to_string());
    }

    pub fn select_course(&self, course: Option<CourseId>) {
        let value = course.map_or(Value::Null, |c| Value::from(c.into_inner()));
        self.crud.set_filter("course", value);
    }

    pub async fn record_bulk(&self, request: BulkAttendanceRequest) -> Result<Value, MutationError> {
        self.bulk.mutate(request).await
    }
}

pub fn stat_cards(stats: &AttendanceStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Present", stats.present),
        StatCard::new("Absent", stats.absent),
        StatCard::new("Late", stats.late),
        StatCard::new("Justified", stats.justified),
        StatCard::new("Attendance rate", stats.attendance_rate_label()),
    ]
}
