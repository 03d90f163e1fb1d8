//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed complaint and user API contracts.
//! - **attachment_file**: reads attachment files from disk.
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no page logic.

pub mod attachment_file;
pub mod http;
