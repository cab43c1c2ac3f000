//! Authentication integration tests

mod artifact_test;
