// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

#[cfg(feature = "cli")]
pub mod cli;
pub mod canon;
pub mod config;
pub mod core;
pub mod document;
pub mod error;
pub mod model;
pub mod osis;
pub mod specs;

pub mod file;
pub mod progress;
pub mod runner;
pub mod scrape;
