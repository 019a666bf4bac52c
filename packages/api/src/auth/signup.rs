//! Signup: create the account, then write the profile row.

use serde::{Deserialize, Serialize};
use store::{AuthService, AuthSession, Credentials, Profile, ProfileStore, SignUp, StoreError};
use thiserror::Error;

/// Shown once an account has been created.
pub const SIGNUP_SUCCESS_MESSAGE: &str =
    "Signup successful! Please check your email to confirm your account.";

/// Fields of the signup page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignupForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Error)]
pub enum SignupError {
    #[error("Passwords do not match.")]
    PasswordMismatch,

    #[error("{0}")]
    Auth(StoreError),

    /// The account exists but its profile row could not be written.
    #[error("Signup succeeded, but saving profile failed: {error}")]
    Profile {
        signup: Box<SignUp>,
        error: StoreError,
    },
}

impl SignupError {
    /// Session issued before the failure, which still signs the user in.
    pub fn session(&self) -> Option<&AuthSession> {
        match self {
            SignupError::Profile { signup, .. } => signup.session.as_ref(),
            _ => None,
        }
    }
}

/// Email and password exactly as typed; the auth service owns any normalisation.
pub fn credentials(email: &str, password: &str) -> Credentials {
    Credentials {
        email: email.to_string(),
        password: password.to_string(),
    }
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SignupError> {
        if self.password != self.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }
        Ok(())
    }

    pub fn credentials(&self) -> Credentials {
        credentials(&self.email, &self.password)
    }

    fn profile(&self, user_id: &str) -> Profile {
        Profile {
            id: user_id.to_string(),
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }
}

/// Register a new account and its profile.
///
/// Nothing is sent when the passwords differ. The profile is written with the
/// new user's access token when signup opened a session. The two writes are
/// independent: a failed profile write leaves the account and its session in place.
pub async fn register_account<A, P>(
    auth: &A,
    profiles: &P,
    form: &SignupForm,
) -> Result<SignUp, SignupError>
where
    A: AuthService,
    P: ProfileStore,
{
    form.validate()?;

    let signup = auth
        .sign_up(&form.credentials())
        .await
        .map_err(SignupError::Auth)?;

    let access_token = signup.session.as_ref().map(|s| s.access_token.as_str());
    if let Err(error) = profiles
        .insert_profile(&form.profile(&signup.user.id), access_token)
        .await
    {
        tracing::warn!("Profile write failed for user {}: {}", signup.user.id, error);
        return Err(SignupError::Profile {
            signup: Box::new(signup),
            error,
        });
    }

    tracing::info!("Registered user {}", signup.user.id);
    Ok(signup)
}
