//! Domain layer - pure data types, no I/O

pub mod access;
