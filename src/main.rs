//! Named routes server and CLI.
//!
//! # Architecture Overview
//!
//! ```text
//!   routes.toml
//!       │
//!       ▼
//!  ┌──────────┐    ┌─────────────┐    ┌──────────────────────────────┐
//!  │  config  │───▶│  RouteTree  │───▶│ http: one router per scope   │
//!  │ load +   │    │ registries  │    │  nested at mount prefixes,   │
//!  │ validate │    │ + mounts    │    │  each installing a resolver  │
//!  └──────────┘    └─────────────┘    └──────────────────────────────┘
//!                         │
//!                         ▼
//!               CLI: routes / lookup / render
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use named_routes::config::ObservabilityConfig;
use named_routes::lifecycle::{prepare, Shutdown};
use named_routes::observability::init_logging;
use named_routes::{HttpServer, ParamSet, RequestContext};

#[derive(Parser)]
#[command(name = "named-routes")]
#[command(version, about = "Named route registry, resolver and inspection server", long_about = None)]
struct Cli {
    /// Path to the TOML route configuration.
    #[arg(short, long, default_value = "routes.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve every scope over HTTP
    Serve,
    /// Print a scope's own routes
    Routes {
        scope: String,
    },
    /// Print the mount-composed entry for a name
    Lookup {
        scope: String,
        name: String,
    },
    /// Render a name to a path as seen from inside a scope
    Render {
        scope: String,
        name: String,
        /// Parameters as key=value
        #[arg(value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got `{}`", raw))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logging comes up before the config so load errors are reported; the
    // configured format only applies to `serve`.
    let prepared = match cli.command {
        Commands::Serve => {
            let prepared = prepare(&cli.config);
            let observability = prepared
                .as_ref()
                .map(|p| p.config.observability.clone())
                .unwrap_or_default();
            init_logging(&observability);
            prepared?
        }
        _ => {
            init_logging(&ObservabilityConfig {
                log_level: "warn".to_string(),
                ..Default::default()
            });
            prepare(&cli.config)?
        }
    };

    let find = |label: &str| {
        prepared
            .tree
            .find(label)
            .ok_or_else(|| format!("unknown scope `{}`", label))
    };

    match cli.command {
        Commands::Serve => {
            tracing::info!("named-routes v{} starting", named_routes::VERSION);

            let listener = TcpListener::bind(&prepared.config.listener.bind_address).await?;
            let shutdown = Shutdown::new();
            let server = HttpServer::new(prepared.config.clone(), prepared.tree.clone(), prepared.root);
            server.run(listener, shutdown.subscribe()).await?;

            tracing::info!("Shutdown complete");
        }
        Commands::Routes { ref scope } => {
            let id = find(scope)?;
            let routes = prepared.tree.scope(id).routes();
            println!("{}", serde_json::to_string_pretty(routes)?);
        }
        Commands::Lookup { ref scope, ref name } => {
            let id = find(scope)?;
            let entry = prepared.tree.lookup(id, name)?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        Commands::Render { ref scope, ref name, ref params } => {
            let id = find(scope)?;
            let params: ParamSet = params.iter().cloned().collect();
            let ctx = RequestContext::for_scope(prepared.tree.clone(), id, params);
            println!("{}", ctx.resolve(name, None)?);
        }
    }

    Ok(())
}
