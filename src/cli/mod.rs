pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gazette")]
#[command(about = "A terminal client for the Mascode news platform", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List articles from the feed
    Posts {
        /// Page to fetch
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        /// Keep fetching until the feed is exhausted
        #[arg(long)]
        all: bool,
    },
    /// Show one article by slug
    Post {
        /// Slug of the article
        slug: String,
    },
    /// List articles in a category
    Category {
        /// Slug of the category
        slug: String,

        /// Filter titles and intros locally
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Search articles
    Search {
        /// Search terms
        query: String,
    },
    /// Show the featured (carousel) articles
    Featured,
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Upload a new profile photo
    SetPhoto {
        /// Path to the image file
        path: std::path::PathBuf,
    },
    /// Launch the TUI
    Tui,
}
