mod layout;
pub use layout::SiteLayout;

mod home;
pub use home::Home;

mod careers;
pub use careers::Careers;

mod events;
pub use events::Events;

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;
