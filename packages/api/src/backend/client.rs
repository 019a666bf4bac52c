//! Shared settings and client using the OnceCell pattern.

use store::{Settings, StoreError, SupabaseClient};
use tokio::sync::OnceCell;

static SETTINGS: OnceCell<Settings> = OnceCell::const_new();
static CLIENT: OnceCell<SupabaseClient> = OnceCell::const_new();

/// Get or load the settings, once per process.
pub async fn get_settings() -> Result<&'static Settings, StoreError> {
    SETTINGS
        .get_or_try_init(|| async { Ok(Settings::new()?) })
        .await
}

/// Get or initialize the Supabase client from [`get_settings`].
pub async fn get_client() -> Result<&'static SupabaseClient, StoreError> {
    CLIENT
        .get_or_try_init(|| async {
            let settings = get_settings().await?;
            tracing::info!("Connecting to Supabase at {}", settings.supabase.url);
            SupabaseClient::new(&settings.supabase)
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settings_are_loaded_once() {
        let first = get_settings().await.unwrap();
        let second = get_settings().await.unwrap();
        assert!(std::ptr::eq(first, second));
    }
}
