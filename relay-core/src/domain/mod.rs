//! Core domain types
//!
//! This module contains the domain structures shared between the API client
//! and the runner. They mirror the wire format of the scheduling API.

pub mod envelope;
pub mod task;
