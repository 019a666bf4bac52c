//! Table access over the REST service.

use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use super::{expect_success, read_json, SupabaseClient};
use crate::backend::{EventStore, ProfileStore};
use crate::error::StoreError;
use crate::models::{Event, Profile, EVENTS_TABLE, PROFILES_TABLE};

const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const RETURN_REPRESENTATION: &str = "return=representation";
const RETURN_MINIMAL: &str = "return=minimal";

/// A query against one table, built up before it is sent.
///
/// ```ignore
/// let events: Vec<Event> = client
///     .from("events")
///     .select("*")
///     .order("date", true)
///     .fetch()
///     .await?;
/// ```
#[derive(Debug)]
pub struct TableQuery<'a> {
    client: &'a SupabaseClient,
    table: String,
    params: Vec<(String, String)>,
    bearer: Option<String>,
}

impl SupabaseClient {
    /// Start a query on `table`.
    pub fn from(&self, table: &str) -> TableQuery<'_> {
        TableQuery {
            client: self,
            table: table.to_string(),
            params: Vec::new(),
            bearer: None,
        }
    }
}

impl<'a> TableQuery<'a> {
    pub fn select(mut self, columns: &str) -> Self {
        self.params.push(("select".into(), columns.into()));
        self
    }

    /// Keep rows whose `column` equals `value`.
    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.params.push((column.into(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.params
            .push(("order".into(), format!("{column}.{direction}")));
        self
    }

    /// Send the query as the user owning `access_token` instead of with the project key.
    pub fn auth(mut self, access_token: &str) -> Self {
        self.bearer = Some(access_token.to_string());
        self
    }

    /// Query-string parameters accumulated so far.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    fn request(&self, method: Method) -> reqwest::RequestBuilder {
        let url = self.client.rest_url(&self.table);
        match self.bearer.as_deref() {
            Some(token) => self.client.request_as(method, url, token),
            None => self.client.request(method, url),
        }
        .query(&self.params)
    }

    /// All matching rows.
    pub async fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>, StoreError> {
        let response = self.request(Method::GET).send().await?;
        read_json(response).await
    }

    /// Exactly one matching row; the service answers with an error otherwise.
    pub async fn single<T: DeserializeOwned>(self) -> Result<T, StoreError> {
        let response = self
            .request(Method::GET)
            .header(ACCEPT, HeaderValue::from_static(SINGLE_OBJECT))
            .send()
            .await?;
        read_json(response).await
    }

    /// Insert `rows` and return them as stored.
    pub async fn insert<T, B>(self, rows: &B) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(rows)
            .send()
            .await?;
        read_json(response).await
    }

    /// Insert `rows` without reading them back.
    pub async fn insert_minimal<B>(self, rows: &B) -> Result<(), StoreError>
    where
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::POST)
            .header("Prefer", RETURN_MINIMAL)
            .json(rows)
            .send()
            .await?;
        expect_success(response).await
    }

    /// Apply `changes` to every matching row and return the updated rows.
    pub async fn update<T, B>(self, changes: &B) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let response = self
            .request(Method::PATCH)
            .header("Prefer", RETURN_REPRESENTATION)
            .json(changes)
            .send()
            .await?;
        read_json(response).await
    }

    pub async fn delete(self) -> Result<(), StoreError> {
        let response = self.request(Method::DELETE).send().await?;
        expect_success(response).await
    }
}

impl EventStore for SupabaseClient {
    async fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        self.from(EVENTS_TABLE)
            .select("*")
            .order("date", true)
            .fetch()
            .await
    }

    async fn get_event(&self, id: &str) -> Result<Event, StoreError> {
        self.from(EVENTS_TABLE).select("*").eq("id", id).single().await
    }

    async fn create_event(&self, row: Value) -> Result<Option<Event>, StoreError> {
        let rows: Vec<Event> = self
            .from(EVENTS_TABLE)
            .select("*")
            .insert(&json!([row]))
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_event(&self, id: &str, changes: Value) -> Result<Option<Event>, StoreError> {
        let rows: Vec<Event> = self
            .from(EVENTS_TABLE)
            .eq("id", id)
            .select("*")
            .update(&changes)
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn delete_event(&self, id: &str) -> Result<(), StoreError> {
        self.from(EVENTS_TABLE).eq("id", id).delete().await
    }
}

impl ProfileStore for SupabaseClient {
    async fn insert_profile(
        &self,
        profile: &Profile,
        access_token: Option<&str>,
    ) -> Result<(), StoreError> {
        let query = self.from(PROFILES_TABLE);
        let query = match access_token {
            Some(token) => query.auth(token),
            None => query,
        };
        query.insert_minimal(std::slice::from_ref(profile)).await
    }
}
