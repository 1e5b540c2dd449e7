//! Module for side-effecting services used by the auth core.
//!
//! This module holds the SMTP mailer that delivers confirmation codes and the
//! dispatcher that decides whether a send is awaited or detached.

pub mod email_service;
pub mod notification_dispatcher;
