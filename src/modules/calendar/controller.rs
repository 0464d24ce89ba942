use std::ops::Deref;

use aula_cache::{QueryHandle, QueryOptions, keys};
use aula_models::{Event, MonthRange};
use chrono::NaiveDate;

use crate::modules::calendar::service::range_params;
use crate::modules::calendar::{CalendarService, Events};
use crate::modules::crud::{CrudPage, ListFilters};
use crate::state::AppState;

/// Month view of the school calendar.
pub struct CalendarPage {
    crud: CrudPage<Events>,
}

impl Deref for CalendarPage {
    type Target = CrudPage<Events>;

    fn deref(&self) -> &Self::Target {
        &self.crud
    }
}

fn month_filters(range: &MonthRange) -> ListFilters {
    ListFilters::default()
        .with_limit(100)
        .with_filter("from", range.from.to_string())
        .with_filter("to", range.to.to_string())
}

impl CalendarPage {
    pub fn new(state: &AppState, month: MonthRange) -> Self {
        Self {
            crud: CrudPage::with_filters(state, month_filters(&month)),
        }
    }

    /// Shows another month. Returns `false` for an invalid month.
    pub fn show_month(&self, year: i32, month: u32) -> bool {
        let Some(range) = MonthRange::of(year, month) else {
            return false;
        };
        self.crud.set_filter("from", range.from.to_string());
        self.crud.set_filter("to", range.to.to_string());
        true
    }

    /// Events starting on `day`, in start order.
    pub fn events_on(&self, day: NaiveDate) -> Vec<Event> {
        let mut events: Vec<Event> = self
            .crud
            .items()
            .into_iter()
            .filter(|e| e.start.date_naive() == day)
            .collect();
        events.sort_by_key(|e| e.start);
        events
    }
}

/// Public events for one month; works without a session.
pub struct PublicCalendar {
    events: QueryHandle<Vec<Event>>,
}

impl PublicCalendar {
    pub fn new(state: &AppState, month: MonthRange) -> Self {
        let events = state.cache.subscribe(
            keys::events::public(range_params(&month)),
            CalendarService::public_fetcher(state.client.clone()),
            QueryOptions::default(),
        );
        Self { events }
    }

    pub fn handle(&self) -> &QueryHandle<Vec<Event>> {
        &self.events
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.data().unwrap_or_default()
    }
}
