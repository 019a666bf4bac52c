use dioxus::prelude::*;

use crate::auth::use_auth;
use crate::navbar::waitlist_link;

/// Landing section with the brand and the waitlist call to action.
#[component]
pub fn Hero() -> Element {
    let auth = use_auth();
    let waitlist = waitlist_link(auth().user.is_some());
    let (target, rel) = if waitlist.external {
        (Some("_blank"), Some("noopener noreferrer"))
    } else {
        (None, None)
    };

    rsx! {
        section {
            class: "hero",
            h1 { class: "hero-title", "ments" }
            p {
                class: "hero-tagline",
                "Where founders, builders and early believers meet."
            }
            a {
                class: "hero-cta",
                href: waitlist.href,
                target,
                rel,
                "{waitlist.label}"
            }
        }
    }
}
