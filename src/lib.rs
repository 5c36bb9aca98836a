pub mod cli;
pub mod config;
pub mod demo;
pub mod error;
pub mod findings;
pub mod git;
pub mod interactive;
pub mod narrator;
pub mod preflight;
pub mod process;
pub mod report;
pub mod templates;
