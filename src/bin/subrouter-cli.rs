use std::path::PathBuf;

use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use clap::{Parser, Subcommand};
use subrouter::config::load_config;
use subrouter::routing::link::subdomain_url;
use subrouter::{IntlSubrouter, RewriteDecision, RouteRequest};
use url::Url;

#[derive(Parser)]
#[command(name = "subrouter-cli")]
#[command(about = "Inspect subrouter configurations and routing decisions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file and list its routes
    Check {
        config: PathBuf,
    },
    /// Show what the router does with a request
    Resolve {
        config: PathBuf,

        #[arg(long)]
        host: String,

        #[arg(long, default_value = "/")]
        path: String,

        #[arg(long)]
        accept_language: Option<String>,

        /// Raw Cookie header
        #[arg(long)]
        cookie: Option<String>,

        #[arg(long)]
        json: bool,
    },
    /// Build a link to another subdomain
    Link {
        /// URL of the current page
        current: String,

        /// Target subdomain; omit for the base domain
        #[arg(long)]
        subdomain: Option<String>,

        #[arg(long, default_value = "/")]
        href: String,

        /// Base domain override
        #[arg(long)]
        base_domain: Option<String>,

        /// Read the base domain from this configuration
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load_config(&config)?;
            let router = IntlSubrouter::from_config(&config)?;

            println!("OK: {} route(s)", router.table().len());
            for route in router.table().routes() {
                println!("  {:<16} -> {}", route.label(), route.path_prefix);
            }
            match router.locales() {
                Some(locales) => println!(
                    "Locales: {} (default {}, prefix {:?})",
                    locales.locales().join(", "),
                    locales.default_locale(),
                    config.i18n.locale_prefix
                ),
                None => println!("Locales: disabled"),
            }
            println!("Base domain policy: {:?}", config.routing.base_domain_policy);
        }
        Commands::Resolve {
            config,
            host,
            path,
            accept_language,
            cookie,
            json,
        } => {
            let config = load_config(&config)?;
            let router = IntlSubrouter::from_config(&config)?;

            let (path, query) = match path.split_once('?') {
                Some((path, query)) => (path.to_string(), Some(query.to_string())),
                None => (path, None),
            };
            let mut request = RouteRequest::new(host, path);
            if let Some(query) = query {
                request = request.with_query(query);
            }
            if let Some(value) = &accept_language {
                request = request.with_header(ACCEPT_LANGUAGE, value);
            }
            if let Some(value) = &cookie {
                request = request.with_header(COOKIE, value);
            }

            let decision = router.handle(&request).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                print_decision(&decision);
            }
        }
        Commands::Link {
            current,
            subdomain,
            href,
            base_domain,
            config,
        } => {
            let base_domain = match (base_domain, config) {
                (Some(base), _) => Some(base),
                (None, Some(path)) => load_config(&path)?.routing.base_domain,
                (None, None) => None,
            };
            let current = Url::parse(&current)?;
            let url = subdomain_url(&current, subdomain.as_deref(), &href, base_domain.as_deref())?;
            println!("{url}");
        }
    }

    Ok(())
}

fn print_decision(decision: &RewriteDecision) {
    match decision {
        RewriteDecision::PassThrough => println!("pass through"),
        RewriteDecision::Rewrite { path, locale } => match locale {
            Some(locale) => println!("rewrite -> {path} (locale {locale})"),
            None => println!("rewrite -> {path}"),
        },
        RewriteDecision::Redirect { location } => println!("redirect -> {location}"),
    }
}
