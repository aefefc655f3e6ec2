//! Domain types and pure logic shared by the db and api crates.
//!
//! Nothing in here touches the database or the network; everything is
//! unit-testable in isolation.

pub mod access;
pub mod duedate;
pub mod error;
pub mod status;
pub mod types;
pub mod validate;
