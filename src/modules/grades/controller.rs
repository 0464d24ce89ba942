use std::ops::Deref;

use aula_cache::{QueryHandle, QueryOptions, keys};
use aula_core::stats::format_percentage;
use aula_models::{CourseAverage, CourseId, GradeStats, StudentId};
use serde_json::{Value, json};

use crate::modules::crud::{CrudPage, StatCard};
use crate::modules::grades::{GradeService, Grades};
use crate::state::AppState;

/// Grades list filtered by course and student, with course averages.
pub struct GradesPage {
    crud: CrudPage<Grades>,
    averages: QueryHandle<Vec<CourseAverage>>,
}

impl Deref for GradesPage {
    type Target = CrudPage<Grades>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

impl GradesPage {
    pub fn new(state: &AppState) -> Self {
        let averages = state.cache.subscribe(
            keys::grades::averages(json!({})),
            GradeService::averages_fetcher(state.client.clone()),
            QueryOptions::default(),
        );
        Self {
            crud: CrudPage::new(state),
            averages,
        }
    }

    /// Narrows the list and the averages to one course, or clears it.
    pub fn filter_by_course(&self, course: Option<CourseId>) {
        let value = course.map_or(Value::Null, |c| Value::from(c.into_inner()));
        self.crud.set_filter("course", value.clone());
        self.averages
            .set_key(keys::grades::averages(json!({ "course": value })));
    }

    pub fn filter_by_student(&self, student: Option<StudentId>) {
        let value = student.map_or(Value::Null, |s| Value::from(s.into_inner()));
        self.crud.set_filter("student", value);
    }

    pub fn averages(&self) -> Vec<CourseAverage> {
        self.averages.data().unwrap_or_default()
    }

    pub fn averages_handle(&self) -> &QueryHandle<Vec<CourseAverage>> {
        &self.averages
    }
}

pub fn stat_cards(stats: &GradeStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Grades recorded", stats.total),
        StatCard::new("Average", format!("{:.1}", stats.average)),
        StatCard::new("Passed", stats.passed),
        StatCard::new("Failed", stats.failed),
        StatCard::new("Pass rate", format_percentage(stats.pass_rate())),
    ]
}
