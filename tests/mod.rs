/// Integration tests for pco-admin
///
/// Tests are organized into logical groupings:
/// - support: in-memory transport that records requests
/// - services: request shapes and response normalization
/// - console: page controller workflows
mod console;
mod services;
mod support;
