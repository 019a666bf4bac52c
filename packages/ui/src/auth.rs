//! Authentication context and hooks for the UI.

use std::time::Duration;

use api::UserInfo;
use dioxus::prelude::*;

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<UserInfo>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }
}

impl AuthState {
    pub fn signed_in(user: UserInfo) -> Self {
        Self {
            user: Some(user),
            loading: false,
        }
    }

    pub fn signed_out() -> Self {
        Self {
            user: None,
            loading: false,
        }
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Full page navigation. Does nothing outside the browser.
pub fn go_to(href: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(href);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::debug!("Navigation to {} skipped outside the browser", href);
}

/// Wait on the platform's timer.
pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the current user on mount
    let _ = use_resource(move || async move {
        match api::get_current_user().await {
            Ok(user) => auth_state.set(AuthState {
                user,
                loading: false,
            }),
            Err(e) => {
                tracing::warn!("Failed to load current user: {}", e);
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    // Pick up sessions that expired or changed elsewhere (every 30s)
    use_effect(move || {
        spawn(async move {
            loop {
                sleep(Duration::from_secs(30)).await;

                // Don't check while initial load is still in progress
                if auth_state().loading {
                    continue;
                }
                // Keep the last known state when the server is unreachable.
                if let Ok(user) = api::get_current_user().await {
                    if auth_state().user != user {
                        auth_state.set(AuthState {
                            user,
                            loading: false,
                        });
                    }
                }
            }
        });
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// End the session on the server, reset the auth state and return home.
pub(crate) async fn sign_out(mut auth_state: Signal<AuthState>) {
    if let Err(e) = api::logout().await {
        tracing::error!("Logout failed: {}", e);
    }
    auth_state.set(AuthState::signed_out());
    go_to("/");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_starts_loading() {
        let state = AuthState::default();
        assert!(state.loading);
        assert!(state.user.is_none());
    }

    #[test]
    fn test_signed_in_state() {
        let user = UserInfo {
            id: "u-1".into(),
            email: "ada@ments.app".into(),
            confirmed: true,
        };
        let state = AuthState::signed_in(user.clone());
        assert!(!state.loading);
        assert_eq!(state.user, Some(user));
        assert_eq!(AuthState::signed_out().user, None);
    }
}
