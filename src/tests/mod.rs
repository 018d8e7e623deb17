//! # Integration tests that require a look inside the crate.
//!
//! Convention for function names:
//!
//! * `fn domain()`
//! * `fn create_managers()`
//! * `fn solve_until_within_tolerance()`
