//! # Site navigation
//!
//! The link set depends only on whether someone is signed in. [`nav_links`],
//! [`session_links`] and [`waitlist_link`] compute it; [`NavMenu`] renders it
//! with the desktop row and the mobile dropdown, and [`Navbar`] wires the menu
//! to the auth context.

use api::UserInfo;
use dioxus::prelude::*;

use crate::auth::{sign_out, use_auth};
use crate::icons::{FaBars, FaXmark};
use crate::Icon;

const NAVBAR_CSS: Asset = asset!("/assets/navbar.css");

pub const BLOG_URL: &str = "https://blog.ments.app";
pub const WAITLIST_URL: &str = "https://ments.ezzyforms.in/forms/6841e534f06f98d51b4f";
pub const LOGIN_PATH: &str = "/login";

/// An entry of the main navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    /// Only reachable when signed in; otherwise the link points at the login page.
    pub protected: bool,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Blogs",
        href: BLOG_URL,
        protected: true,
    },
    NavItem {
        label: "Careers",
        href: "/careers",
        protected: false,
    },
    NavItem {
        label: "Events",
        href: "/events",
        protected: false,
    },
];

/// A resolved link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    /// Open in a new tab with `rel="noopener noreferrer"`.
    pub external: bool,
}

impl NavItem {
    pub fn resolve(&self, signed_in: bool) -> NavLink {
        if self.protected && !signed_in {
            return NavLink {
                label: self.label,
                href: LOGIN_PATH,
                external: false,
            };
        }
        NavLink {
            label: self.label,
            href: self.href,
            external: self.protected,
        }
    }
}

pub fn nav_links(signed_in: bool) -> Vec<NavLink> {
    NAV_ITEMS.iter().map(|item| item.resolve(signed_in)).collect()
}

/// Links of the session area. Signed-in users get a logout button instead.
pub fn session_links(signed_in: bool) -> Vec<NavLink> {
    if signed_in {
        return Vec::new();
    }
    vec![
        NavLink {
            label: "Login",
            href: LOGIN_PATH,
            external: false,
        },
        NavLink {
            label: "Sign Up",
            href: "/signup",
            external: false,
        },
    ]
}

pub fn waitlist_link(signed_in: bool) -> NavLink {
    NavItem {
        label: "Join Waitlist",
        href: WAITLIST_URL,
        protected: true,
    }
    .resolve(signed_in)
}

#[component]
fn MenuLink(link: NavLink, class: String, on_select: Option<EventHandler<()>>) -> Element {
    let (target, rel) = if link.external {
        (Some("_blank"), Some("noopener noreferrer"))
    } else {
        (None, None)
    };

    rsx! {
        a {
            class: "{class}",
            href: link.href,
            target,
            rel,
            onclick: move |_| {
                if let Some(handler) = on_select {
                    handler.call(());
                }
            },
            "{link.label}"
        }
    }
}

/// Navigation bar contents for the given user.
#[component]
pub fn NavMenu(user: Option<UserInfo>, on_logout: EventHandler<()>) -> Element {
    let mut open = use_signal(|| false);
    let signed_in = user.is_some();
    let links = nav_links(signed_in);
    let session = session_links(signed_in);
    let waitlist = waitlist_link(signed_in);

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-bar",
                a { class: "navbar-brand", href: "/", "ments" }

                div {
                    class: "navbar-links",
                    for link in links.iter().cloned() {
                        MenuLink { key: "{link.label}", link, class: "navbar-link" }
                    }
                    for link in session.iter().cloned() {
                        MenuLink { key: "{link.label}", link, class: "navbar-link" }
                    }
                    if signed_in {
                        button {
                            class: "navbar-link navbar-logout",
                            onclick: move |_| on_logout.call(()),
                            "Logout"
                        }
                    }
                }

                MenuLink { link: waitlist.clone(), class: "navbar-waitlist" }

                button {
                    class: "navbar-toggle",
                    aria_label: "Toggle navigation",
                    onclick: move |_| open.toggle(),
                    if open() {
                        Icon { icon: FaXmark, width: 24, height: 24 }
                    } else {
                        Icon { icon: FaBars, width: 24, height: 24 }
                    }
                }
            }

            if open() {
                ul {
                    class: "navbar-dropdown",
                    for link in links.iter().chain(session.iter()).cloned() {
                        li {
                            key: "{link.label}",
                            MenuLink {
                                link,
                                class: "navbar-dropdown-link",
                                on_select: move |_| open.set(false),
                            }
                        }
                    }
                    if signed_in {
                        li {
                            button {
                                class: "navbar-dropdown-link navbar-logout",
                                onclick: move |_| {
                                    open.set(false);
                                    on_logout.call(());
                                },
                                "Logout"
                            }
                        }
                    }
                    li {
                        MenuLink {
                            link: waitlist,
                            class: "navbar-waitlist navbar-waitlist--block",
                            on_select: move |_| open.set(false),
                        }
                    }
                }
            }
        }
    }
}

/// Site navigation bound to the auth context.
#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        NavMenu {
            user: auth().user,
            on_logout: move |_| {
                spawn(sign_out(auth));
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserInfo {
        UserInfo {
            id: "u-1".into(),
            email: "ada@ments.app".into(),
            confirmed: true,
        }
    }

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    fn signed_out_menu() -> Element {
        rsx! { NavMenu { user: None, on_logout: |_| {} } }
    }

    fn signed_in_menu() -> Element {
        rsx! { NavMenu { user: Some(user()), on_logout: |_| {} } }
    }

    #[test]
    fn test_protected_links_point_to_login_when_signed_out() {
        let links = nav_links(false);
        assert_eq!(
            links[0],
            NavLink {
                label: "Blogs",
                href: "/login",
                external: false
            }
        );
        assert_eq!(links[1].href, "/careers");
        assert_eq!(links[2].href, "/events");
        assert_eq!(waitlist_link(false).href, "/login");
    }

    #[test]
    fn test_protected_links_open_externally_when_signed_in() {
        let links = nav_links(true);
        assert_eq!(
            links[0],
            NavLink {
                label: "Blogs",
                href: BLOG_URL,
                external: true
            }
        );
        assert!(!links[1].external);
        assert_eq!(waitlist_link(true).href, WAITLIST_URL);
        assert!(waitlist_link(true).external);
    }

    #[test]
    fn test_session_links() {
        let labels: Vec<_> = session_links(false).iter().map(|l| l.label).collect();
        assert_eq!(labels, ["Login", "Sign Up"]);
        assert!(session_links(true).is_empty());
    }

    #[test]
    fn test_signed_out_menu_renders_login_and_signup() {
        let html = render(signed_out_menu);
        assert!(html.contains("Login"));
        assert!(html.contains("Sign Up"));
        assert!(html.contains("href=\"/signup\""));
        assert!(!html.contains("Logout"));
        assert!(!html.contains(BLOG_URL));
        assert!(!html.contains(WAITLIST_URL));
    }

    #[test]
    fn test_signed_in_menu_renders_logout_and_external_links() {
        let html = render(signed_in_menu);
        assert!(html.contains("Logout"));
        assert!(!html.contains("Sign Up"));
        assert!(html.contains(BLOG_URL));
        assert!(html.contains(WAITLIST_URL));
        assert!(html.contains("noopener noreferrer"));
    }

    #[test]
    fn test_dropdown_starts_closed() {
        let html = render(signed_out_menu);
        assert!(!html.contains("navbar-dropdown"));
    }
}
