use dioxus::prelude::*;
use ui::EventCard;

/// Upcoming and past events, oldest first.
#[component]
pub fn Events() -> Element {
    let events = use_resource(|| async move { api::list_events().await });

    rsx! {
        section {
            class: "events",
            h1 { "Events" }
            match &*events.read() {
                None => rsx! {
                    p { class: "events-status", "Loading events..." }
                },
                Some(Err(e)) => rsx! {
                    p { class: "form-error", "Could not load events: {e}" }
                },
                Some(Ok(list)) if list.is_empty() => rsx! {
                    p { class: "events-status", "No events yet. Check back soon." }
                },
                Some(Ok(list)) => rsx! {
                    div {
                        class: "events-list",
                        for event in list.iter().cloned() {
                            EventCard { key: "{event.id}", event }
                        }
                    }
                },
            }
        }
    }
}
