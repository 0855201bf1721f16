//! pplx-chat - Perplexity AI from the terminal or a local browser page.
//!
//! Features:
//! - One-shot CLI exchange that prints the raw API response
//! - Local web GUI that proxies browser chat requests
//! - Shared request building for both front ends

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod gui;
pub mod http;
pub mod perplexity;
