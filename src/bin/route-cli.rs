use std::path::PathBuf;

use clap::{Parser, Subcommand};
use route_core::config::{load_config, RouteTableWatcher};
use route_core::observability::init_logging;
use route_core::routing::{QueryValue, RouteParams, RouteQuery, RouteRef, RouterCore, SharedRouter};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect a route table: resolve URLs and build hrefs", long_about = None)]
struct Cli {
    /// Route table configuration file
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    /// Log level, overrides the configured one (RUST_LOG wins over both)
    #[arg(short, long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a URL into a location
    Resolve { url: String },
    /// Build an href for a named route
    Href {
        name: String,
        /// Path parameter, as key=value
        #[arg(short, long = "param", value_parser = parse_pair)]
        params: Vec<(String, String)>,
        /// Query value, as key=value (typed like a parsed URL)
        #[arg(short, long = "query", value_parser = parse_pair)]
        query: Vec<(String, String)>,
        #[arg(long)]
        hash: Option<String>,
    },
    /// List the route table
    Routes,
    /// Reload the route table whenever the config file changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    init_logging(&level)?;

    let router = config.into_router()?;

    match cli.command {
        Commands::Resolve { url } => {
            let location = router.resolve_location(&url);
            println!("{}", serde_json::to_string_pretty(&location)?);
        }
        Commands::Href {
            name,
            params,
            query,
            hash,
        } => {
            let route_ref = RouteRef {
                name,
                params: (!params.is_empty()).then(|| params.into_iter().collect::<RouteParams>()),
                query: (!query.is_empty()).then(|| {
                    query
                        .into_iter()
                        .map(|(k, v)| {
                            let value = QueryValue::coerce(&v);
                            (k, value)
                        })
                        .collect::<RouteQuery>()
                }),
                hash,
            };
            println!("{}", router.build_href(&route_ref)?);
        }
        Commands::Routes => print_routes(&router),
        Commands::Watch => watch(&cli.config, router).await?,
    }

    Ok(())
}

async fn watch(path: &std::path::Path, router: RouterCore) -> Result<(), Box<dyn std::error::Error>> {
    let shared = SharedRouter::new(router);
    let (watcher, mut updates) = RouteTableWatcher::new(path);
    let _watcher = watcher.run()?;

    print_routes(&shared.load());
    loop {
        tokio::select! {
            Some(router) = updates.recv() => {
                shared.replace(router);
                print_routes(&shared.load());
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    tracing::info!("Watcher stopped");
    Ok(())
}

fn print_routes(router: &RouterCore) {
    for (route, pattern) in router.compiled() {
        println!(
            "{:<20} {:<40} [{}]",
            route.name,
            pattern.template(),
            pattern.param_names().join(", ")
        );
    }
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got {:?}", raw))
}
