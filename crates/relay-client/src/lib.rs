//! Threat Response module registry client
//!
//! Blocking HTTP implementation of [`relay_core::ModuleRegistry`] over the
//! Threat Response integration API (`/iroh/iroh-int/module-instance`).

pub mod client;
pub mod credentials;
pub mod error;

pub use client::{Region, ThreatResponseClient};
pub use credentials::Credentials;
pub use error::{ClientError, ClientResult};
