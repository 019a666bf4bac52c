//! Account creation and session handling.

pub mod session;
pub mod signup;
