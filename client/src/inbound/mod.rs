//! Inbound adapters that turn user input into page interactions.
//!
//! The terminal front end lives under [`cli`]; it plays the role of the
//! browser shell by implementing the navigation and alert ports.

pub mod cli;
