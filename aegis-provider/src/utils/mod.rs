//! Utility modules.

/// ISO 8601 helpers for the canonical record's timestamps.
pub mod datetime;

/// Log sanitization utilities to prevent sensitive data exposure.
pub mod log_sanitizer;
