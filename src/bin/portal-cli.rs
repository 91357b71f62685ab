use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde_json::Value;

use ctf_portal::config::{load_or_default, PLACEHOLDER_API_KEY};
use ctf_portal::lifecycle::bootstrap_database;

#[derive(Parser)]
#[command(name = "portal-cli")]
#[command(about = "Management CLI for the CTF portal", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[arg(short, long, env = "PORTAL_API_KEY", default_value = PLACEHOLDER_API_KEY)]
    key: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check portal status
    Status,
    /// List the route table
    Routes,
    /// Resolve a path to its route
    Resolve { path: String },
    /// Look up a route by name
    Lookup { name: String },
    /// Run the database bootstrap locally using MYSQL_* variables
    CheckDb {
        /// Config file supplying the [database] section.
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (endpoint, params) = match cli.command {
        Commands::Status => ("status", vec![]),
        Commands::Routes => ("routes", vec![]),
        Commands::Resolve { path } => ("resolve", vec![("path", path)]),
        Commands::Lookup { name } => ("resolve", vec![("name", name)]),
        Commands::CheckDb { config } => return check_db(config).await,
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", cli.key))?,
    );

    let res = reqwest::Client::new()
        .get(format!("{}/_portal/{}", cli.url.trim_end_matches('/'), endpoint))
        .query(&params)
        .headers(headers)
        .send()
        .await?;
    print_response(res).await
}

async fn check_db(config: Option<PathBuf>) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_or_default(config.as_deref())?;
    let result = bootstrap_database(
        &config.database,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await;

    Ok(match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    })
}

async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: portal API returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(ExitCode::FAILURE);
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(ExitCode::SUCCESS)
}
