// src/lib.rs

//! showwatch Library
//!
//! Checks a cinema page for a showtimes marker once per invocation and pushes
//! an ntfy notification when showtimes appear, or a throttled reminder while
//! they are still missing.

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
