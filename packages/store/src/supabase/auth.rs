//! Account operations over the auth service.

use reqwest::Method;
use serde::Serialize;

use super::{expect_success, read_json, SupabaseClient};
use crate::backend::AuthService;
use crate::error::StoreError;
use crate::models::{AuthSession, AuthUser, Credentials, SignUp, SignUpResponse};

#[derive(Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

impl AuthService for SupabaseClient {
    async fn sign_up(&self, credentials: &Credentials) -> Result<SignUp, StoreError> {
        let response = self
            .request(Method::POST, self.auth_url("signup"))
            .json(credentials)
            .send()
            .await?;
        let signup: SignUpResponse = read_json(response).await?;
        Ok(signup.into())
    }

    async fn sign_in(&self, credentials: &Credentials) -> Result<AuthSession, StoreError> {
        let response = self
            .request(Method::POST, self.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(credentials)
            .send()
            .await?;
        read_json(response).await
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<AuthSession, StoreError> {
        let response = self
            .request(Method::POST, self.auth_url("token"))
            .query(&[("grant_type", "refresh_token")])
            .json(&RefreshRequest { refresh_token })
            .send()
            .await?;
        read_json(response).await
    }

    async fn get_user(&self, access_token: &str) -> Result<AuthUser, StoreError> {
        let response = self
            .request_as(Method::GET, self.auth_url("user"), access_token)
            .send()
            .await?;
        read_json(response).await
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), StoreError> {
        let response = self
            .request_as(Method::POST, self.auth_url("logout"), access_token)
            .send()
            .await?;
        expect_success(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SupabaseSettings;

    #[test]
    fn test_password_grant_request() {
        let client = SupabaseClient::new(&SupabaseSettings {
            url: "https://ments.supabase.co".into(),
            key: "anon".into(),
            timeout: 5,
        })
        .unwrap();

        let credentials = Credentials {
            email: "ada@ments.app".into(),
            password: "hunter22".into(),
        };
        let request = client
            .request(Method::POST, client.auth_url("token"))
            .query(&[("grant_type", "password")])
            .json(&credentials)
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://ments.supabase.co/auth/v1/token?grant_type=password"
        );
        let body: serde_json::Value =
            serde_json::from_slice(request.body().unwrap().as_bytes().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"email": "ada@ments.app", "password": "hunter22"})
        );
    }
}
