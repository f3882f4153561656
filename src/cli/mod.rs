//! Report builders and runners behind the `cinedex` binary.

pub mod movies;
pub mod people;
pub mod ratings;
