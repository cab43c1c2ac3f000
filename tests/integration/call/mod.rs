//! SOAP call integration tests
