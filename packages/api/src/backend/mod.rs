//! # Backend module: process-wide Supabase client
//!
//! Every server function reaches the hosted backend through one shared
//! [`SupabaseClient`]. It is a **lazy singleton** backed by a
//! [`tokio::sync::OnceCell`]: the first call to [`get_client`] builds the
//! client from [`get_settings`] and caches it. The settings (dotenv,
//! `config.toml`, then environment variables) are loaded once and shared with
//! the server start-up. A failed initialisation is not cached, so the next call
//! tries again.

mod client;

pub use client::{get_client, get_settings};
