//! Reqwest-backed adapters for the complaint tracker REST API.
//!
//! `ApiClient` owns transport concerns (base URL, encoding, status mapping).
//! `HttpComplaintApi` and `HttpUserApi` implement the domain ports on top of
//! it and decode responses through transport DTOs.

mod api_client;
mod complaints;
mod dto;
mod users;

pub use api_client::ApiClient;
pub use complaints::HttpComplaintApi;
pub use users::HttpUserApi;
