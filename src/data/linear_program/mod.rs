//! # Linear constraints on squared variables
//!
//! Variables with their domains, and the cuts that relate a variable to its square.
pub mod cut;
pub mod elements;
pub mod variable;
