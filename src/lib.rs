//! An interactive shell over object storage
//!
//! Buckets and key prefixes are presented as directories that can be
//! navigated with `cd` and listed with `ls`.

pub mod cmd;
pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod memory;
pub mod parse;
pub mod repl;
pub mod resolve;
pub mod storage;
