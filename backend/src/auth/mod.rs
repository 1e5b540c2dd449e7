//! Authentication module for the account lifecycle.
//!
//! This module provides registration, email confirmation, confirmation
//! resending and login, together with the HTTP routes and bearer-token
//! middleware that expose them.

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod result;
pub mod routes;
pub mod service;
pub mod traits;
