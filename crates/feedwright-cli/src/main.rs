use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use feedwright_core::AppConfig;
use feedwright_scraper::extract::limit::parse_limit;
use feedwright_scraper::{routes, Runner};

#[derive(Debug, Parser)]
#[command(name = "feedwright")]
#[command(about = "Build normalized feeds from sites that publish none")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List every built-in route.
    Routes,
    /// Run one route and print the feed as JSON.
    Fetch {
        /// Route id, e.g. `telegramorg/blog`.
        route: String,
        /// Maximum number of items; read like a `limit` query parameter.
        #[arg(long)]
        limit: Option<String>,
        /// Serve the route from another origin, such as a mirror.
        #[arg(long)]
        base_url: Option<String>,
    },
    /// Show which routes cover a public page URL.
    Radar { url: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = feedwright_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Routes => print_routes(),
        Commands::Fetch {
            route,
            limit,
            base_url,
        } => fetch(&config, &route, limit.as_deref(), base_url.as_deref()).await?,
        Commands::Radar { url } => print_radar(&url),
    }

    Ok(())
}

fn print_routes() {
    for route in routes::ROUTES {
        let lang = routes::namespace(route.namespace).map_or("", |ns| ns.lang);
        println!("{}\t{}\t{}\t{lang}", route.id(), route.name, route.url);
    }
}

fn print_radar(url: &str) {
    let matches = feedwright_scraper::match_url(url);
    if matches.is_empty() {
        println!("no route covers {url}");
        return;
    }
    for m in matches {
        println!("{}\t{}", m.route.id(), m.source);
    }
}

async fn fetch(
    config: &AppConfig,
    route_id: &str,
    limit: Option<&str>,
    base_url: Option<&str>,
) -> anyhow::Result<()> {
    let route = routes::find(route_id).with_context(|| format!("unknown route '{route_id}'"))?;

    let mut runner = Runner::from_config(config)?;
    if let Some(path) = &config.sites_path {
        let sites = feedwright_core::load_sites(path)?;
        runner.apply_overrides(&sites)?;
    }

    let limit = parse_limit(limit);
    tracing::debug!(route = %route.id(), limit, base_url, "fetching route");
    let feed = match base_url {
        Some(base) => runner.run_at(route, base, limit).await?,
        None => runner.run(route, limit).await?,
    };
    println!("{}", serde_json::to_string_pretty(&feed)?);
    Ok(())
}

#[cfg(test)]
mod tests;
