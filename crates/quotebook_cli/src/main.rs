//! CLI smoke entry point.
//!
//! # Responsibility
//! - Boot the full registry against an optional database file.
//! - Print deterministic facts for quick local sanity checks.

use quotebook_core::{CoreConfig, LogAnalytics, Registry, UseCase};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match std::env::args().nth(1) {
        Some(path) => CoreConfig::with_database_file(path),
        None => CoreConfig::in_memory(),
    };

    let registry = match Registry::init(config, Arc::new(LogAnalytics)).await {
        Ok(registry) => registry,
        Err(err) => {
            eprintln!("quotebook init failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("quotebook_core version={}", quotebook_core::core_version());
    match registry.list_projects().execute(()) {
        Ok(projects) => {
            println!("projects={}", projects.len());
            ExitCode::SUCCESS
        }
        Err(failure) => {
            eprintln!("list projects failed: {failure}");
            ExitCode::FAILURE
        }
    }
}
