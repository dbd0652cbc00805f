//! Shared helpers for chart-server integration tests.

mod server;

pub use server::TestServer;
