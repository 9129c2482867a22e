pub mod auth;
pub mod cache;
pub mod db;
pub mod draft;
pub mod error;
pub mod logging;
pub mod seed;
pub mod session;

pub use error::{Error, Result};
