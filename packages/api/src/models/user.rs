//! # User projections sent to the pages
//!
//! The auth service owns the full user record ([`store::AuthUser`]). Pages only
//! need to know who is signed in, so server functions hand them a [`UserInfo`]:
//! a client-safe subset that is `Serialize + Deserialize + PartialEq` and can
//! cross the server/client boundary via Dioxus server functions.
//!
//! [`SignupOutcome`] is what the signup server function returns: the new user
//! and whether the provider already opened a session (it does not when the email
//! address has to be confirmed first).

use serde::{Deserialize, Serialize};
use store::AuthUser;

/// User information safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    /// Whether the email address has been confirmed.
    pub confirmed: bool,
}

impl From<&AuthUser> for UserInfo {
    fn from(user: &AuthUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone().unwrap_or_default(),
            confirmed: user.is_confirmed(),
        }
    }
}

/// Result of a successful signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SignupOutcome {
    pub user: UserInfo,
    /// The provider issued a session, so the user is signed in already.
    pub signed_in: bool,
}
