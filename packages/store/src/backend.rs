//! # Store traits: the seam between handlers and the hosted backend
//!
//! Every operation this site performs against the external service goes through
//! one of three traits. [`crate::SupabaseClient`] implements all of them over
//! HTTP; [`crate::MemoryStore`] implements them in memory for tests and local
//! development.
//!
//! | Trait | Operations |
//! |-------|-----------|
//! | [`EventStore`] | list (ordered by date), read, create, update, delete rows of the `events` table |
//! | [`ProfileStore`] | insert a row into the `profiles` table |
//! | [`AuthService`] | sign up, password sign-in, token refresh, user lookup, sign out |
//!
//! Methods return `impl Future + Send` so axum handlers that are generic over a
//! store stay `Send`.

use std::future::Future;

use serde_json::Value;

use crate::error::StoreError;
use crate::models::{AuthSession, AuthUser, Credentials, Event, Profile, SignUp};

/// Operations on the `events` table.
pub trait EventStore {
    /// All rows ordered by `date`, ascending.
    fn list_events(&self) -> impl Future<Output = Result<Vec<Event>, StoreError>> + Send;

    /// Exactly one row; an error when there is none.
    fn get_event(&self, id: &str) -> impl Future<Output = Result<Event, StoreError>> + Send;

    /// Insert `row` as given and return the stored row, if the backend returned one.
    fn create_event(
        &self,
        row: Value,
    ) -> impl Future<Output = Result<Option<Event>, StoreError>> + Send;

    /// Apply `changes` to the row with `id` and return the updated row, if any matched.
    fn update_event(
        &self,
        id: &str,
        changes: Value,
    ) -> impl Future<Output = Result<Option<Event>, StoreError>> + Send;

    fn delete_event(&self, id: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Operations on the `profiles` table.
pub trait ProfileStore {
    /// Insert `profile` on behalf of the user owning `access_token`, or with
    /// the project key when there is no user session yet.
    fn insert_profile(
        &self,
        profile: &Profile,
        access_token: Option<&str>,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Operations on the hosted auth service.
pub trait AuthService {
    fn sign_up(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<SignUp, StoreError>> + Send;

    fn sign_in(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<AuthSession, StoreError>> + Send;

    /// Exchange a refresh token for a new session.
    fn refresh_session(
        &self,
        refresh_token: &str,
    ) -> impl Future<Output = Result<AuthSession, StoreError>> + Send;

    /// The user owning `access_token`.
    fn get_user(
        &self,
        access_token: &str,
    ) -> impl Future<Output = Result<AuthUser, StoreError>> + Send;

    /// Revoke the session behind `access_token`.
    fn sign_out(&self, access_token: &str) -> impl Future<Output = Result<(), StoreError>> + Send;
}
