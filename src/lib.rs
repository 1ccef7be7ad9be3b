//! # Cache Nuker
//!
//! Selectively nuke stored browsing data, either for a whole browser
//! profile or for the site that is currently open.
//!
//! - **Category Registry**: eleven clearable data categories, from the HTTP
//!   cache to browsing history
//! - **Scopes**: clear everything since the beginning of time, or only what
//!   one origin has stored
//! - **Sequential Dispatch**: one category at a time; a failure is recorded
//!   and the run carries on
//! - **Pluggable Backends**: a dry-run backend and an on-disk Chromium
//!   profile backend behind one async trait

pub mod backend;
pub mod categories;
pub mod cli;
pub mod common;
pub mod dispatch;
pub mod origin;
pub mod session;
