//! Caching utilities for the edge page function.
//!
//! This module provides a single-slot value cache with TTL support.

pub mod timed_value;

pub use timed_value::TimedValue;
