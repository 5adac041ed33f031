//! API request handlers

mod channels;
mod events;
mod health;
mod scans;

pub use channels::*;
pub use events::*;
pub use health::*;
pub use scans::*;
