//! Shared test harness
//!
//! Each test binary pulls in the modules it needs; the rest show up
//! as dead code to that binary.

#![allow(dead_code)]

pub mod config;
pub mod mock_google;
pub mod mock_pollinations;
pub mod server;
