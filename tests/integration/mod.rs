//! Integration tests

pub mod operation_tests;
