use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;
use url::Url;

use resource_router::config::{build_table, load_config};
use resource_router::http::MatchResponse;
use resource_router::routing::Params;

#[derive(Parser)]
#[command(name = "router-cli")]
#[command(about = "Inspect and exercise resource router tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a config file and build its route table
    Check { config: PathBuf },
    /// Resolve a method and URI (path or absolute URL) against a config file
    Match {
        config: PathBuf,
        method: String,
        uri: String,
    },
    /// Rebuild the URI of a named route from key=value parameters
    Rewrite {
        config: PathBuf,
        name: String,
        params: Vec<String>,
        /// Fail if a required placeholder has no value
        #[arg(long)]
        strict: bool,
    },
    /// List the routes served by a running instance
    Routes {
        #[arg(short, long, default_value = "http://localhost:8081")]
        url: String,
        #[arg(short, long)]
        key: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { config } => {
            let config = load_config(&config)?;
            let table = build_table(&config)?;
            println!("ok: {} routes under {}", table.len(), table.base_path());
        }
        Commands::Match { config, method, uri } => {
            let config = load_config(&config)?;
            let table = build_table(&config)?;
            let target = request_target(&uri)?;
            match table.match_route(&method, &target) {
                Some(matched) => {
                    let body = MatchResponse::new(&matched, &method, &target);
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                None => {
                    eprintln!("no route for {} {}", method, target);
                    std::process::exit(1);
                }
            }
        }
        Commands::Rewrite {
            config,
            name,
            params,
            strict,
        } => {
            let config = load_config(&config)?;
            let table = build_table(&config)?;
            let params = parse_params(&params)?;
            let uri = if strict {
                table.rewrite_strict(&name, &params)?
            } else {
                table.rewrite(&name, &params)?
            };
            println!("{uri}");
        }
        Commands::Routes { url, key } => {
            let mut headers = HeaderMap::new();
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", key))?,
            );
            let res = reqwest::Client::new()
                .get(format!("{}/admin/routes", url.trim_end_matches('/')))
                .headers(headers)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

/// Accept either a bare path or an absolute URL and return path plus query.
fn request_target(uri: &str) -> Result<String, url::ParseError> {
    if uri.starts_with('/') {
        return Ok(uri.to_string());
    }
    let url = Url::parse(uri)?;
    Ok(match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    })
}

fn parse_params(pairs: &[String]) -> Result<Params, String> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .ok_or_else(|| format!("expected key=value, got '{pair}'"))
        })
        .collect()
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: Admin API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
