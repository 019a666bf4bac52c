use api::Event;
use dioxus::prelude::*;

/// Text shown for an event's date column.
pub fn event_date_label(date: Option<&str>) -> String {
    match date {
        Some(date) if !date.trim().is_empty() => date.to_string(),
        _ => "Date to be announced".to_string(),
    }
}

/// One row of the events table.
#[component]
pub fn EventCard(event: Event) -> Element {
    let title = event.title().unwrap_or("Untitled event").to_string();
    let date = event_date_label(event.date.as_deref());

    rsx! {
        article {
            class: "event-card",
            h2 { class: "event-title", "{title}" }
            p { class: "event-date", "{date}" }
            if let Some(location) = event.location() {
                p { class: "event-location", "{location}" }
            }
            if let Some(description) = event.description() {
                p { class: "event-description", "{description}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Event {
        serde_json::from_value(json!({
            "id": 7,
            "name": "Founder breakfast",
            "date": "2025-08-15",
            "location": "Bengaluru",
        }))
        .unwrap()
    }

    fn card() -> Element {
        rsx! { EventCard { event: sample() } }
    }

    #[test]
    fn test_date_label() {
        assert_eq!(event_date_label(Some("2025-08-15")), "2025-08-15");
        assert_eq!(event_date_label(Some("  ")), "Date to be announced");
        assert_eq!(event_date_label(None), "Date to be announced");
    }

    #[test]
    fn test_card_shows_event_columns() {
        let mut dom = VirtualDom::new(card);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        assert!(html.contains("Founder breakfast"));
        assert!(html.contains("2025-08-15"));
        assert!(html.contains("Bengaluru"));
        assert!(!html.contains("event-description"));
    }
}
