//! # Store crate: models and clients for the hosted backend
//!
//! Everything the site persists lives in an external Supabase project. This
//! crate mirrors its entities ([`models`]), defines the operations the site
//! needs as traits ([`backend`]), and provides two implementations:
//!
//! | Implementation | Feature | Use |
//! |----------------|---------|-----|
//! | [`SupabaseClient`] | `remote` (default) | Production: REST and auth calls over HTTP. |
//! | [`MemoryStore`] | none | Tests and local development, with a call journal and failure injection. |

pub mod backend;
pub mod error;
pub mod models;

mod memory;
pub use memory::{MemoryStore, Operation, StoreCall};

#[cfg(feature = "remote")]
pub mod config;
#[cfg(feature = "remote")]
mod supabase;

#[cfg(feature = "remote")]
pub use config::{SessionSettings, Settings, SupabaseSettings};
#[cfg(feature = "remote")]
pub use supabase::{SupabaseClient, TableQuery};

pub use backend::{AuthService, EventStore, ProfileStore};
pub use error::StoreError;
pub use models::{
    AuthSession, AuthUser, Credentials, Event, EventId, Profile, SignUp, EVENTS_TABLE,
    PROFILES_TABLE,
};
