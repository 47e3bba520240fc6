//! # Rate Limiting Feature
//!
//! Prevents spam with a per-user limit on slash commands per minute.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod limiter;

pub use limiter::RateLimiter;
