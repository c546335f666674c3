// In crates/engine/src/lib.rs

pub mod error;
pub mod handler;
pub mod types;

pub use error::{Error, Result};
pub use handler::AlertHandler;
pub use types::{HandlerSettings, Outcome};
