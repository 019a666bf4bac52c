//! Sections of the careers page.

use dioxus::prelude::*;

/// A titled paragraph in one of the card grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight {
    pub title: &'static str,
    pub body: &'static str,
}

pub const VALUES: &[Highlight] = &[
    Highlight {
        title: "Build in public",
        body: "We ship early, share what we learn and let the community shape the product.",
    },
    Highlight {
        title: "Founders first",
        body: "Every decision starts with the people trying to get an idea off the ground.",
    },
    Highlight {
        title: "Own the outcome",
        body: "Small team, wide scope. You carry your work from the first sketch to production.",
    },
];

pub const BENEFITS: &[Highlight] = &[
    Highlight {
        title: "Flexible hours",
        body: "Work when you do your best work; we meet for a few shared hours a day.",
    },
    Highlight {
        title: "Learning budget",
        body: "Books, courses and conference tickets are on us.",
    },
    Highlight {
        title: "Early equity",
        body: "Everyone who joins now shares in what we build together.",
    },
];

/// An open role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub title: &'static str,
    pub team: &'static str,
    pub kind: &'static str,
}

pub const OPENINGS: &[Opening] = &[
    Opening {
        title: "Full-stack Engineer",
        team: "Engineering",
        kind: "Full-time",
    },
    Opening {
        title: "Community Manager",
        team: "Growth",
        kind: "Full-time",
    },
    Opening {
        title: "Product Design Intern",
        team: "Design",
        kind: "Internship",
    },
];

pub const APPLY_EMAIL: &str = "careers@ments.app";

#[component]
pub fn CareerHero() -> Element {
    rsx! {
        section {
            class: "careers-hero",
            h1 { "Build ments with us" }
            p { "We are a small team helping founders find their first believers." }
        }
    }
}

#[component]
fn HighlightGrid(heading: String, items: Vec<Highlight>) -> Element {
    rsx! {
        section {
            class: "careers-section",
            h2 { "{heading}" }
            div {
                class: "careers-grid",
                for item in items {
                    div {
                        key: "{item.title}",
                        class: "careers-card",
                        h3 { "{item.title}" }
                        p { "{item.body}" }
                    }
                }
            }
        }
    }
}

#[component]
pub fn ValuesSection() -> Element {
    rsx! {
        HighlightGrid { heading: "Our values", items: VALUES.to_vec() }
    }
}

#[component]
pub fn BenefitsSection() -> Element {
    rsx! {
        HighlightGrid { heading: "Benefits", items: BENEFITS.to_vec() }
    }
}

#[component]
pub fn LocationSection() -> Element {
    rsx! {
        section {
            class: "careers-section",
            h2 { "Where we work" }
            p { "Remote-first across India, with a shared space in Bengaluru for the days we build together." }
        }
    }
}

#[component]
pub fn OpeningsSection() -> Element {
    rsx! {
        section {
            class: "careers-section",
            h2 { "Open roles" }
            ul {
                class: "careers-openings",
                for opening in OPENINGS {
                    li {
                        key: "{opening.title}",
                        span { class: "opening-title", "{opening.title}" }
                        span { class: "opening-meta", "{opening.team} · {opening.kind}" }
                        a {
                            class: "opening-apply",
                            href: "mailto:{APPLY_EMAIL}",
                            "Apply"
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn openings() -> Element {
        rsx! { OpeningsSection {} }
    }

    #[test]
    fn test_openings_link_to_apply_email() {
        let mut dom = VirtualDom::new(openings);
        dom.rebuild_in_place();
        let html = dioxus_ssr::render(&dom);

        for opening in OPENINGS {
            assert!(html.contains(opening.title));
        }
        assert!(html.contains("mailto:careers@ments.app"));
    }
}
