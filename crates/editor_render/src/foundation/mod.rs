//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Math types
//! - Packed colors for vertex data
//! - Logging utilities

pub mod color;
pub mod logging;
pub mod math;
