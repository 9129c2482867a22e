//! HTTP surface for liftlog. The binary and the integration tests build the same
//! router from here.

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
