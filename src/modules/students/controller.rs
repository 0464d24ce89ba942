use aula_core::stats::format_percentage;
use aula_models::StudentStats;

use crate::modules::crud::{CrudPage, StatCard};
use crate::modules::students::Students;

pub type StudentsPage = CrudPage<Students>;

pub fn stat_cards(stats: &StudentStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Total students", stats.total),
        StatCard::new("Active", stats.active),
        StatCard::new("Inactive", stats.inactive),
        StatCard::new("New this month", stats.new_this_month),
        StatCard::new("Active rate", format_percentage(stats.active_rate())),
    ]
}
