//! # Domain models mirrored from the external store
//!
//! The schema of every entity here is owned by the hosted backend, not by this
//! workspace. These types only mirror what the backend returns so rows can be
//! passed through handlers and rendered by pages. All of them are
//! `Serialize + Deserialize` so they can cross the server/client boundary via
//! Dioxus server functions.
//!
//! ## Types
//!
//! | Struct | Represents |
//! |--------|-----------|
//! | [`Event`] | A row of the `events` table. Only `id` and `date` are known; every other column is kept in [`Event::fields`] so the row round-trips verbatim. |
//! | [`EventId`] | The primary key of an event, integer or text depending on the table definition. |
//! | [`Profile`] | A row of the `profiles` table, written once right after signup. |
//! | [`Credentials`] | Email + password pair sent to the auth service. |
//! | [`AuthUser`] | A user as reported by the auth service. |
//! | [`AuthSession`] | Tokens issued by the auth service together with their user. |
//! | [`SignUp`] | Result of a signup: the user and, when no email confirmation is required, a session. |

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Table holding the events listed on the site.
pub const EVENTS_TABLE: &str = "events";
/// Table holding the profile written after signup.
pub const PROFILES_TABLE: &str = "profiles";

/// Primary key of an event row.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    Text(String),
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(id) => write!(f, "{id}"),
            EventId::Text(id) => f.write_str(id),
        }
    }
}

/// A row of the `events` table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    /// Date column the list endpoint orders by (ISO 8601 text).
    #[serde(default)]
    pub date: Option<String>,
    /// Every other column, untouched.
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Event {
    fn text(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(Value::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.text("title").or_else(|| self.text("name"))
    }

    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    pub fn location(&self) -> Option<&str> {
        self.text("location")
    }
}

/// A row of the `profiles` table. `id` mirrors the auth user id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
}

/// Email + password pair for signup and password sign-in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// User record owned by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub email_confirmed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl AuthUser {
    pub fn is_confirmed(&self) -> bool {
        self.email_confirmed_at.is_some()
    }
}

/// Tokens issued by the auth service.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    pub user: AuthUser,
}

/// Outcome of a signup call.
#[derive(Clone, Debug, PartialEq)]
pub struct SignUp {
    pub user: AuthUser,
    /// Absent when the provider requires the email address to be confirmed first.
    pub session: Option<AuthSession>,
}

/// Raw signup payload: a full session when the account is confirmed
/// immediately, the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SignUpResponse {
    Session(AuthSession),
    User(AuthUser),
}

impl From<SignUpResponse> for SignUp {
    fn from(response: SignUpResponse) -> Self {
        match response {
            SignUpResponse::Session(session) => SignUp {
                user: session.user.clone(),
                session: Some(session),
            },
            SignUpResponse::User(user) => SignUp {
                user,
                session: None,
            },
        }
    }
}
