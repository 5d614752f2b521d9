//! REST access to the pest-control backend
//!
//! Requests are described as [`ApiRequest`] values, carried by a
//! [`Transport`] (reqwest in production) and answered with the backend's
//! `{success, data, message}` envelope. [`AdminService`] groups the typed
//! operations per resource.

pub mod client;
pub mod constants;
pub mod envelope;
pub mod logging;
pub mod services;
pub mod transport;

pub use client::HttpTransport;
pub use envelope::ApiResponse;
pub use logging::{ApiLogger, LoggingConfig};
pub use services::{
    AdminService, AssignmentQuery, BulkOperation, ChemicalQuery, ClientQuery, EmailRequest,
    ReportFilters, UserQuery,
};
pub use transport::{ApiRequest, Method, Transport};
