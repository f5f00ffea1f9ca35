//! Login console client
//!
//! Handles the console read loop and per-conversation session state.

pub mod handler;
pub mod session;

pub use handler::handle_client;
pub use session::ClientSession;
