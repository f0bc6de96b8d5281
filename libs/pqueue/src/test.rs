//! Reusable conformance suite and stress harness for [`crate::SharedQueue`]
//! implementations. Public so downstream binaries can drive the harness.

pub mod suite;
