//! Authentication primitives.
//!
//! - [`jwt`] -- validation of the identity provider's HS256 bearer
//!   tokens, plus a token mint used by dev tooling and tests.

pub mod jwt;
