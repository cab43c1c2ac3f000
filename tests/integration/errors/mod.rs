//! Failure mapping integration tests

mod network_test;
mod status_test;
