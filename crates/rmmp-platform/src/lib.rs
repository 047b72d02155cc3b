pub use error::{Error, Result};

pub mod command;
pub mod dir;
mod error;
pub mod os;
