//! Organum CLI library.
//!
//! This crate provides the command implementations behind the `organum`
//! binary: single ranks and mixtures from flags, whole organ documents, and
//! note lookups.

pub mod commands;
