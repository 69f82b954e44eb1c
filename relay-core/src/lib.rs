//! Relay Core
//!
//! Core types for the Relay task polling system.
//!
//! This crate contains:
//! - Domain types: the task record, its reported outcome, and the generic
//!   API response envelope
//! - Parameter rendering: the normalization rules for turning task request
//!   values into query-string text

pub mod domain;
pub mod params;
