use aula_core::stats::{format_percentage, percentage};
use aula_models::TeacherStats;

use crate::modules::crud::{CrudPage, StatCard};
use crate::modules::teachers::Teachers;

pub type TeachersPage = CrudPage<Teachers>;

pub fn stat_cards(stats: &TeacherStats) -> Vec<StatCard> {
    let assigned = percentage(stats.with_courses as f64, stats.total as f64);
    vec![
        StatCard::new("Total teachers", stats.total),
        StatCard::new("Active", stats.active),
        StatCard::new("With courses", stats.with_courses),
        StatCard::new("Assigned", format_percentage(assigned)),
    ]
}
