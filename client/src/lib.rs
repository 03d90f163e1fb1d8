//! Hostel complaint tracker client library.
//!
//! Talks to the complaint backend over REST and models the dashboard,
//! detail, and create-complaint pages independently of any front end.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;
