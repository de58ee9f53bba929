//! Portal session layer
//!
//! Persisted auth token, user record and translation dictionary for the
//! dealer portal, kept in sync with the portal backend.

pub mod api;
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod helpers;
pub mod i18n;
pub mod panels;
pub mod session;
pub mod storage;
pub mod ui;

pub use error::{PortalError, PortalResult};
