//! This crate contains all shared UI for the workspace.

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{go_to, sleep, use_auth, AuthProvider, AuthState};

pub mod navbar;
pub use navbar::{NavMenu, Navbar};

mod hero;
pub use hero::Hero;

pub mod careers;

mod event_card;
pub use event_card::{event_date_label, EventCard};
