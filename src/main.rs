use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gazette::app::AppContext;
use gazette::cli::{commands, Cli, Commands};
use gazette::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Posts { page, all } => {
            commands::list_posts(&ctx, page, all).await?;
        }
        Commands::Post { slug } => {
            commands::show_post(&ctx, &slug).await?;
        }
        Commands::Category { slug, filter } => {
            commands::list_category(&ctx, &slug, filter.as_deref()).await?;
        }
        Commands::Search { query } => {
            commands::search_posts(&ctx, &query).await?;
        }
        Commands::Featured => {
            commands::list_featured(&ctx).await?;
        }
        Commands::Login { email, password } => {
            commands::login(&ctx, &email, &password).await?;
        }
        Commands::Register {
            name,
            email,
            password,
        } => {
            commands::register(&ctx, &name, &email, &password).await?;
        }
        Commands::Logout => {
            commands::logout(&ctx).await?;
        }
        Commands::Whoami => {
            commands::whoami(&ctx).await?;
        }
        Commands::SetPhoto { path } => {
            commands::set_photo(&ctx, &path).await?;
        }
        Commands::Tui => {
            gazette::tui::run(Arc::new(ctx)).await?;
        }
    }

    Ok(())
}
