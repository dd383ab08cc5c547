pub mod error;

pub use error::{ClipstatError, Result};
