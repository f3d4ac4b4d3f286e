// src/lib.rs
// Library interface for ct-subfinder
pub mod cli;
pub mod config;
pub mod ct_search;
pub mod error;
pub mod filter;
pub mod output;
pub mod progress;
pub mod stats;
pub mod subdomains;
pub mod types;
