//! CLI module - Command-line interface for Cinefind
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;
pub mod render;

use clap::{Parser, Subcommand};

/// Cinefind - Movie discovery
/// Search TMDB and keep track of what people search for
#[derive(Parser)]
#[command(name = "cinefind")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP API server
    #[command(alias = "daemon")]
    Serve,

    /// List popular movies
    #[command(alias = "d")]
    Discover,

    /// Search for movies and record the search in trending
    #[command(alias = "s")]
    Search {
        /// Search query
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show the most searched movies
    #[command(alias = "t")]
    Trending {
        /// Number of entries to show
        #[arg(long, short)]
        limit: Option<u64>,
    },

    /// Interactive search: every input line replaces the search term
    #[command(alias = "i")]
    Interactive,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
