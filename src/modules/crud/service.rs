use std::marker::PhantomData;

use aula_cache::{QueryFn, QueryKey};
use aula_core::{ClientError, Paginated};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::client::HttpClient;
use crate::modules::crud::Resource;

/// REST calls for a [`Resource`] collection.
pub struct CrudService<R>(PhantomData<R>);

impl<R: Resource> CrudService<R> {
    #[instrument(skip(client, params), fields(resource = R::KEY))]
    pub async fn list(
        client: &HttpClient,
        params: &Value,
    ) -> Result<Paginated<R::Item>, ClientError> {
        client.get_page(R::PATH, params).await
    }

    #[instrument(skip(client), fields(resource = R::KEY))]
    pub async fn stats(client: &HttpClient) -> Result<R::Stats, ClientError> {
        client.get(&R::stats_path(), &Value::Null).await
    }

    /// Validates, then creates.
    #[instrument(skip(client, form), fields(resource = R::KEY))]
    pub async fn create(client: &HttpClient, form: &R::Form) -> Result<R::Item, ClientError> {
        form.validate()?;
        client.post(R::PATH, form).await
    }

    #[instrument(skip(client, form), fields(resource = R::KEY))]
    pub async fn update(
        client: &HttpClient,
        id: &str,
        form: &R::Form,
    ) -> Result<R::Item, ClientError> {
        form.validate()?;
        client.put(&format!("{}/{id}", R::PATH), form).await
    }

    #[instrument(skip(client), fields(resource = R::KEY))]
    pub async fn delete(client: &HttpClient, id: &str) -> Result<(), ClientError> {
        client.delete(&format!("{}/{id}", R::PATH)).await
    }

    /// Fetcher for list keys: the last key segment is the params object.
    pub fn list_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |key: QueryKey| {
            let client = client.clone();
            async move {
                let params = key.params::<Value>().unwrap_or(Value::Null);
                Self::list(&client, &params).await
            }
        })
    }

    pub fn stats_fetcher(client: HttpClient) -> QueryFn {
        QueryFn::new(move |_: QueryKey| {
            let client = client.clone();
            async move { Self::stats(&client).await }
        })
    }
}
