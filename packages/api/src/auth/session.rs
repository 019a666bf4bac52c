//! Session tokens and user resolution.
//!
//! The session cookie only carries the provider's token pair. The user behind
//! it is looked up on every request; an expired access token is refreshed once
//! before the session is given up.

use serde::{Deserialize, Serialize};
use store::{AuthService, AuthSession, AuthUser, StoreError};

/// Key for storing the access token in session.
pub const SESSION_ACCESS_TOKEN_KEY: &str = "access_token";
/// Key for storing the refresh token in session.
pub const SESSION_REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Token pair stored in the session store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SessionTokens {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl From<&AuthSession> for SessionTokens {
    fn from(session: &AuthSession) -> Self {
        Self {
            access_token: Some(session.access_token.clone()),
            refresh_token: Some(session.refresh_token.clone()),
        }
    }
}

/// Who is behind a set of session tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// No tokens in the session.
    Anonymous,
    SignedIn(AuthUser),
    /// The access token had expired; these new tokens must be stored.
    Refreshed(AuthSession),
    /// The tokens are no longer valid and the session should be cleared.
    Expired,
}

/// Resolve the user for `tokens`, refreshing at most once.
pub async fn resolve_user<A: AuthService>(
    auth: &A,
    tokens: &SessionTokens,
) -> Result<Resolution, StoreError> {
    let Some(access_token) = tokens.access_token.as_deref() else {
        return Ok(Resolution::Anonymous);
    };

    match auth.get_user(access_token).await {
        Ok(user) => Ok(Resolution::SignedIn(user)),
        Err(e) if e.is_unauthorized() => {
            let Some(refresh_token) = tokens.refresh_token.as_deref() else {
                return Ok(Resolution::Expired);
            };
            match auth.refresh_session(refresh_token).await {
                Ok(session) => Ok(Resolution::Refreshed(session)),
                Err(e) => {
                    tracing::debug!("Session refresh failed: {}", e);
                    Ok(Resolution::Expired)
                }
            }
        }
        Err(e) => Err(e),
    }
}

/// Read the token pair from the session.
#[cfg(feature = "server")]
pub async fn load_tokens(
    session: &tower_sessions::Session,
) -> Result<SessionTokens, tower_sessions::session::Error> {
    Ok(SessionTokens {
        access_token: session.get(SESSION_ACCESS_TOKEN_KEY).await?,
        refresh_token: session.get(SESSION_REFRESH_TOKEN_KEY).await?,
    })
}

/// Replace the token pair in the session with the one in `auth_session`.
#[cfg(feature = "server")]
pub async fn store_tokens(
    session: &tower_sessions::Session,
    auth_session: &AuthSession,
) -> Result<(), tower_sessions::session::Error> {
    session
        .insert(SESSION_ACCESS_TOKEN_KEY, &auth_session.access_token)
        .await?;
    session
        .insert(SESSION_REFRESH_TOKEN_KEY, &auth_session.refresh_token)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{Credentials, MemoryStore, Operation, StoreCall};

    async fn signed_in(store: &MemoryStore) -> AuthSession {
        let credentials = Credentials {
            email: "grace@ments.app".into(),
            password: "cobol-59".into(),
        };
        store.sign_up(&credentials).await.unwrap();
        store.sign_in(&credentials).await.unwrap()
    }

    #[tokio::test]
    async fn test_no_tokens_is_anonymous() {
        let store = MemoryStore::new();

        let resolution = resolve_user(&store, &SessionTokens::default()).await.unwrap();

        assert_eq!(resolution, Resolution::Anonymous);
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_valid_token_resolves_user() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;

        let resolution = resolve_user(&store, &SessionTokens::from(&session))
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::SignedIn(session.user.clone()));
    }

    #[tokio::test]
    async fn test_expired_token_is_refreshed_once() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;
        store.expire_access_token(&session.access_token);

        let resolution = resolve_user(&store, &SessionTokens::from(&session))
            .await
            .unwrap();

        let Resolution::Refreshed(refreshed) = resolution else {
            panic!("expected a refreshed session, got {resolution:?}");
        };
        assert_eq!(refreshed.user.id, session.user.id);
        assert_ne!(refreshed.access_token, session.access_token);
        let refreshes = store
            .calls()
            .iter()
            .filter(|c| c.operation() == Operation::RefreshSession)
            .count();
        assert_eq!(refreshes, 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_expires_session() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;
        store.expire_access_token(&session.access_token);
        // Refresh tokens are single use.
        store.refresh_session(&session.refresh_token).await.unwrap();

        let resolution = resolve_user(&store, &SessionTokens::from(&session))
            .await
            .unwrap();

        assert_eq!(resolution, Resolution::Expired);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_expires_session() {
        let store = MemoryStore::new();
        let tokens = SessionTokens {
            access_token: Some("access-unknown".into()),
            refresh_token: None,
        };

        let resolution = resolve_user(&store, &tokens).await.unwrap();

        assert_eq!(resolution, Resolution::Expired);
        assert_eq!(store.calls(), [StoreCall::GetUser("access-unknown".into())]);
    }

    #[tokio::test]
    async fn test_provider_outage_is_an_error() {
        let store = MemoryStore::new();
        let session = signed_in(&store).await;
        store.fail(Operation::GetUser, "upstream unavailable");

        let error = resolve_user(&store, &SessionTokens::from(&session))
            .await
            .unwrap_err();

        assert_eq!(error.to_string(), "upstream unavailable");
    }
}
