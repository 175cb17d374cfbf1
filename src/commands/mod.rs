//! # CLI Command Implementations
//!
//! Each command lives in its own file with an `Args` struct derived with
//! `clap` and an `execute` function that calls into the `schema_vendor`
//! library.

pub mod vendor;
