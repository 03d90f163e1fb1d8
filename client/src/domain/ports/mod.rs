//! Domain ports.
//!
//! Driven ports (`ComplaintApi`, `UserApi`) are implemented by the HTTP
//! adapters in `outbound`. `Navigator` and `Alerter` are implemented by
//! whichever front end hosts the page states.

mod complaint_api;
mod shell;
mod user_api;

pub use complaint_api::ComplaintApi;
pub use shell::{Alerter, Navigator};
pub use user_api::UserApi;

#[cfg(test)]
pub use complaint_api::MockComplaintApi;
#[cfg(test)]
pub use shell::{MockAlerter, MockNavigator};
#[cfg(test)]
pub use user_api::MockUserApi;
