//! # Storing of variables and cuts in memory
//!
//! This module provides the data structures used to describe approximated variables and the cuts
//! on their squares. Algorithms may introduce their specific data structures in
//! `algorithm::my_algorithm`.

pub mod linear_program;
pub mod number_types;
