mod board;
mod session;
mod state;
mod timeline;

pub use session::DraftSession;
pub use state::{DraftSnapshot, DraftStatus, DEFAULT_SLOT_CAPACITY};
