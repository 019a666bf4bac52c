//! # Supabase client: HTTP access to the hosted backend
//!
//! [`SupabaseClient`] is a thin wrapper around a pooled [`reqwest::Client`]
//! pointed at one Supabase project. It talks to two services of that project:
//!
//! - **REST** (`/rest/v1/{table}`, PostgREST): table reads and writes, built
//!   through [`TableQuery`] with the same vocabulary as the JavaScript client
//!   (`select`, `eq`, `order`, `single`, `insert`, `update`, `delete`). See
//!   [`rest`].
//! - **Auth** (`/auth/v1`, GoTrue): signup, password sign-in, token refresh,
//!   user lookup and sign-out. See [`auth`].
//!
//! Every request carries the project key in the `apikey` header. Requests made
//! on behalf of a signed-in user carry the user's access token as bearer; all
//! other requests use the project key as bearer.
//!
//! Error responses are turned into [`StoreError::Api`] with the provider's
//! message; nothing is retried.

mod auth;
mod rest;

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::SupabaseSettings;
use crate::error::StoreError;

pub use rest::TableQuery;

/// Client for one Supabase project.
#[derive(Clone, Debug)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    key: String,
}

impl SupabaseClient {
    pub fn new(settings: &SupabaseSettings) -> Result<Self, StoreError> {
        if settings.key.trim().is_empty() {
            return Err(StoreError::Config("supabase.key is not set".to_string()));
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.url.trim_end_matches('/').to_string(),
            key: settings.key.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.base_url, path)
    }

    /// A request authorised with the project key.
    fn request(&self, method: Method, url: String) -> RequestBuilder {
        self.request_as(method, url, &self.key)
    }

    /// A request authorised with `bearer`, usually a user's access token.
    fn request_as(&self, method: Method, url: String, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.key)
            .bearer_auth(bearer)
    }
}

/// Decode a successful JSON response, or turn an error status into [`StoreError::Api`].
async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        tracing::debug!("Supabase request failed with {}", status);
        return Err(StoreError::from_response(status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
}

/// Check the status of a response whose body is not needed.
async fn expect_success(response: Response) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    tracing::debug!("Supabase request failed with {}", status);
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::from_response(status.as_u16(), &body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(url: &str, key: &str) -> SupabaseSettings {
        SupabaseSettings {
            url: url.to_string(),
            key: key.to_string(),
            timeout: 5,
        }
    }

    #[test]
    fn test_urls() {
        let client = SupabaseClient::new(&settings("https://ments.supabase.co/", "anon")).unwrap();
        assert_eq!(client.base_url(), "https://ments.supabase.co");
        assert_eq!(
            client.rest_url("events"),
            "https://ments.supabase.co/rest/v1/events"
        );
        assert_eq!(
            client.auth_url("signup"),
            "https://ments.supabase.co/auth/v1/signup"
        );
    }

    #[test]
    fn test_missing_key_is_rejected() {
        let error = SupabaseClient::new(&settings("https://ments.supabase.co", " ")).unwrap_err();
        assert!(matches!(error, StoreError::Config(_)));
    }

    #[test]
    fn test_requests_carry_the_project_key() {
        let client = SupabaseClient::new(&settings("https://ments.supabase.co", "anon")).unwrap();

        let request = client
            .request(Method::GET, client.rest_url("events"))
            .build()
            .unwrap();
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer anon");

        let request = client
            .request_as(Method::GET, client.auth_url("user"), "user-token")
            .build()
            .unwrap();
        assert_eq!(request.headers()["apikey"], "anon");
        assert_eq!(request.headers()["authorization"], "Bearer user-token");
    }
}
