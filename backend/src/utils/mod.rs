//! Collection of general utility functions and collaborator implementations.
//!
//! This module serves as a home for small, reusable helpers that do not fit
//! into other specific domain modules: token signing, password hashing,
//! confirmation code generation and the clock.

pub mod clock;
pub mod confirmation_code;
pub mod jwt;
pub mod password;
