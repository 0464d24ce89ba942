use aula_cache::{QueryFn, QueryKey, keys};
use aula_core::ClientError;
use aula_models::{Event, EventForm, MonthRange};
use serde_json::{Value, json};
use tracing::instrument;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

pub struct Events;

impl Resource for Events {
    type Item = Event;
    type Form = EventForm;
    type Stats = Value;

    const PATH: &'static str = "/events";
    const KEY: &'static str = keys::events::ROOT;
    const LABEL: &'static str = "Event";

    fn id(item: &Event) -> String {
        item.id.to_string()
    }

    fn form_for(item: &Event) -> EventForm {
        EventForm::from(item)
    }

    fn invalidates() -> Vec<QueryKey> {
        keys::invalidate::event_write()
    }
}

pub fn range_params(range: &MonthRange) -> Value {
    json!({ "from": range.from.to_string(), "to": range.to.to_string() })
}

pub struct CalendarService;

impl CalendarService {
    /// Events visible without signing in.
    #[instrument(skip(client))]
    pub async fn public_events(
        client: &HttpClient,
        params: &Value,
    ) -> Result<Vec<Event>, ClientError> {
        client.get("/events/public", params).await
    }

    pub fn public_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |key: QueryKey| {
            let client = client.clone();
            async move {
                let params = key.params::<Value>().unwrap_or(Value::Null);
                Self::public_events(&client, &params).await
            }
        })
    }
}
