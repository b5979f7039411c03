#[macro_use]
extern crate lazy_static;

pub mod error;
pub mod settings;
pub mod utils;

pub use error::{ApiError, QuadError, QuadResult};
