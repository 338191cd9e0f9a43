//! Implementation of the chess environment, its rules and specifics.

pub mod board;
pub mod core;
