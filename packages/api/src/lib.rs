//! # API crate: server side of the ments site
//!
//! This crate holds everything that runs on the server: the `/api/events` REST
//! router and the Dioxus server functions the pages call. All persistence and
//! authentication is forwarded to the hosted backend through the [`store`]
//! crate; nothing here keeps state of its own beyond the session cookie.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | none | Signup orchestration, session token handling and user resolution |
//! | [`backend`] | `server` | Process-wide [`store::SupabaseClient`] (lazy `OnceCell` singleton) |
//! | [`error`] | `server` | [`error::ApiError`], the JSON error response of the REST router |
//! | [`events`] | `server` | `GET/POST /api/events`, `GET/PUT/DELETE /api/events/{id}` |
//! | [`models`] | none | [`UserInfo`] and [`SignupOutcome`], the client-safe types |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub.
//!
//! - **Authentication**: `get_current_user`, `sign_up`, `login_password`, `logout`
//! - **Events**: `list_events`

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
pub mod backend;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod events;
pub mod models;

pub use auth::signup::{SignupError, SignupForm, SIGNUP_SUCCESS_MESSAGE};
pub use models::{SignupOutcome, UserInfo};
pub use store::Event;

/// Get the user behind the current session, refreshing an expired access token once.
#[cfg(feature = "server")]
#[get("/api/auth/me", session: tower_sessions::Session)]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    use crate::auth::session::Resolution;

    let client = backend::get_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let tokens = auth::session::load_tokens(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let resolution = auth::session::resolve_user(client, &tokens)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    match resolution {
        Resolution::Anonymous => Ok(None),
        Resolution::SignedIn(user) => Ok(Some(UserInfo::from(&user))),
        Resolution::Refreshed(auth_session) => {
            auth::session::store_tokens(&session, &auth_session)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
            Ok(Some(UserInfo::from(&auth_session.user)))
        }
        Resolution::Expired => {
            session
                .flush()
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
            Ok(None)
        }
    }
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/me")]
pub async fn get_current_user() -> Result<Option<UserInfo>, ServerFnError> {
    Ok(None)
}

/// Create an account, then write its profile row.
///
/// The two writes are not atomic: when the profile write fails the account
/// stays in place, its session is kept and the error says so.
#[cfg(feature = "server")]
#[post("/api/auth/signup", session: tower_sessions::Session)]
pub async fn sign_up(form: SignupForm) -> Result<SignupOutcome, ServerFnError> {
    let client = backend::get_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let signup = match auth::signup::register_account(client, client, &form).await {
        Ok(signup) => signup,
        Err(e) => {
            if let Some(auth_session) = e.session() {
                auth::session::store_tokens(&session, auth_session)
                    .await
                    .map_err(|e| ServerFnError::new(e.to_string()))?;
            }
            return Err(ServerFnError::new(e.to_string()));
        }
    };

    let signed_in = match &signup.session {
        Some(auth_session) => {
            auth::session::store_tokens(&session, auth_session)
                .await
                .map_err(|e| ServerFnError::new(e.to_string()))?;
            true
        }
        None => false,
    };

    Ok(SignupOutcome {
        user: UserInfo::from(&signup.user),
        signed_in,
    })
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signup")]
pub async fn sign_up(form: SignupForm) -> Result<SignupOutcome, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Log in with email and password.
#[cfg(feature = "server")]
#[post("/api/auth/login-password", session: tower_sessions::Session)]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    use store::AuthService;

    let client = backend::get_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    let auth_session = client
        .sign_in(&auth::signup::credentials(&email, &password))
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    auth::session::store_tokens(&session, &auth_session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(UserInfo::from(&auth_session.user))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/login-password")]
pub async fn login_password(email: String, password: String) -> Result<UserInfo, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Revoke the provider session and clear the local one.
#[cfg(feature = "server")]
#[post("/api/auth/logout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    use store::AuthService;

    let tokens = auth::session::load_tokens(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    if let Some(access_token) = tokens.access_token.as_deref() {
        let client = backend::get_client()
            .await
            .map_err(|e| ServerFnError::new(e.to_string()))?;
        // The local session is cleared either way.
        if let Err(e) = client.sign_out(access_token).await {
            tracing::warn!("Provider sign-out failed: {}", e);
        }
    }

    session
        .flush()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(())
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/logout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}

/// Events ordered by date, for the events page.
#[cfg(feature = "server")]
#[get("/api/site/events")]
pub async fn list_events() -> Result<Vec<Event>, ServerFnError> {
    use store::EventStore;

    let client = backend::get_client()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    client
        .list_events()
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/site/events")]
pub async fn list_events() -> Result<Vec<Event>, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}
