//! Careers page, for signed-in users only.

use dioxus::prelude::*;
use ui::careers::{BenefitsSection, CareerHero, LocationSection, OpeningsSection, ValuesSection};
use ui::use_auth;

use crate::Route;

#[component]
pub fn Careers() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth();
        if !state.loading && state.user.is_none() {
            nav.replace(Route::Login {});
        }
    });

    let state = auth();
    if state.loading || state.user.is_none() {
        return rsx! {};
    }

    rsx! {
        div {
            class: "careers",
            CareerHero {}
            ValuesSection {}
            BenefitsSection {}
            LocationSection {}
            OpeningsSection {}
        }
    }
}
