//! Request middleware and session plumbing.

pub mod auth;
pub mod flash;
pub mod session;

pub use auth::{CurrentIdentity, clear_identity, set_identity};
pub use flash::{flash, take_flashes};
pub use session::create_session_layer;
