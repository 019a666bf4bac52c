use dioxus::prelude::*;
use ui::Navbar;

use crate::Route;

/// Navbar above every page.
#[component]
pub fn SiteLayout() -> Element {
    rsx! {
        Navbar {}
        main {
            class: "page",
            Outlet::<Route> {}
        }
    }
}
