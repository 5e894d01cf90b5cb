//! Happiness Dashboard CLI
//!
//! Command-line interface for the dashboard:
//! - List countries and change the selection on a running server
//! - Print the three panels as text
//! - Inspect a spreadsheet offline
//! - Generate a config file

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use happiness_dashboard::api::dto::DatasetSummaryResponse;
use happiness_dashboard::config::{generate_default_config, LoggingConfig};
use happiness_dashboard::dashboard::{render_country, LatestYearPolicy, RenderOptions};
use happiness_dashboard::data::SpreadsheetLoader;
use happiness_dashboard::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "happiness-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Global Happiness Index dashboard client")]
#[command(long_about = "Query a running happiness dashboard, or inspect a survey spreadsheet offline.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Dashboard server URL
    #[arg(long, default_value = "http://localhost:8501", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List selectable countries
    Countries,

    /// Change the dashboard's selected country
    Select {
        /// Country name, exactly as listed by `countries`
        country: String,
    },

    /// Print the dashboard panels
    Show {
        /// Render this country instead of the current selection
        #[arg(short, long)]
        country: Option<String>,
    },

    /// Show server status
    Status,

    /// Load a spreadsheet locally and summarize it
    Inspect {
        /// Path to .xlsx, .xls, .ods or .csv file
        path: PathBuf,
        /// Worksheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,
        /// Also render the panels for this country
        #[arg(short, long)]
        country: Option<String>,
        /// Fall back to the country's own latest year for the breakdown
        #[arg(long)]
        country_latest: bool,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logging::init(&LoggingConfig {
        level: "warn".to_string(),
        ..Default::default()
    })?;

    let client = reqwest::Client::new();

    match cli.command {
        Commands::Countries => {
            let data = get_json(&client, &format!("{}/api/v1/countries", cli.api_url)).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let selected = data["selected"].as_str().unwrap_or_default();
                for name in data["countries"].as_array().into_iter().flatten() {
                    let name = name.as_str().unwrap_or_default();
                    let marker = if name == selected { "*" } else { " " };
                    println!("{} {}", marker, name);
                }
            }
        }

        Commands::Select { country } => {
            let response = client
                .put(format!("{}/api/v1/selection", cli.api_url))
                .json(&serde_json::json!({ "country": country }))
                .send()
                .await
                .context("Failed to reach dashboard server")?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                bail!("Selection failed ({}): {}", status, text);
            }
            println!("Selected {}", country);
        }

        Commands::Show { country } => {
            let mut url = format!("{}/api/v1/dashboard", cli.api_url);
            if let Some(country) = &country {
                url = reqwest::Url::parse_with_params(&url, &[("country", country)])?.to_string();
            }
            let data = get_json(&client, &url).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                print_dashboard(&data);
            }
        }

        Commands::Status => {
            let health = get_json(&client, &format!("{}/health", cli.api_url)).await?;

            println!("Happiness dashboard v{}", env!("CARGO_PKG_VERSION"));
            println!();
            println!(
                "Server status: {}",
                health["status"].as_str().unwrap_or("unknown")
            );
            println!(
                "Dataset: {}",
                health["dataset"].as_str().unwrap_or("unknown")
            );
            if let Some(rows) = health["rows"].as_u64() {
                println!("  Rows: {}", rows);
            }
            if let Some(error) = health["error"].as_str() {
                println!("  Error: {}", error);
            }
            if let Some(uptime) = health["uptime_seconds"].as_u64() {
                println!();
                println!("Uptime: {}", format_duration(uptime));
            }
        }

        Commands::Inspect {
            path,
            sheet,
            country,
            country_latest,
        } => {
            let table = SpreadsheetLoader::new(&path)
                .with_sheet(sheet)
                .load()
                .with_context(|| format!("Failed to load {}", path.display()))?;

            let summary = DatasetSummaryResponse::from(&table);
            let view = match &country {
                Some(country) => {
                    let options = RenderOptions {
                        latest_year_policy: if country_latest {
                            LatestYearPolicy::CountryLatest
                        } else {
                            LatestYearPolicy::Global
                        },
                        ..Default::default()
                    };
                    Some(serde_json::to_value(render_country(&table, country, &options)?)?)
                }
                None => None,
            };

            if cli.format == "json" {
                let output = serde_json::json!({ "dataset": summary, "dashboard": view });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_summary(&summary);
                if let Some(view) = view {
                    println!();
                    print_dashboard(&view);
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, config)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Config written to {:?}", path);
                }
                None => print!("{}", config),
            }
        }
    }

    Ok(())
}

async fn get_json(client: &reqwest::Client, url: &str) -> anyhow::Result<serde_json::Value> {
    let response = client
        .get(url)
        .send()
        .await
        .context("Failed to reach dashboard server")?;

    if !response.status().is_success() {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        bail!("Request failed ({}): {}", status, text);
    }

    Ok(response.json().await?)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn format_value(value: &serde_json::Value) -> String {
    value
        .as_f64()
        .map(|v| format!("{:.3}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_summary(summary: &DatasetSummaryResponse) {
    println!("File:      {}", summary.path);
    println!("Rows:      {}", summary.rows);
    println!("Countries: {}", summary.countries);
    println!("Years:     {} - {}", summary.first_year, summary.latest_year);
    println!("Columns:");
    for column in &summary.columns {
        println!("  {}", column);
    }
}

fn print_dashboard(data: &serde_json::Value) {
    println!("{}", data["title"].as_str().unwrap_or_default());
    println!();

    // Time series
    let panel = &data["time_series"];
    println!("{}", panel["subheader"].as_str().unwrap_or_default());
    let trace = &panel["figure"]["data"][0];
    let years = trace["x"].as_array().cloned().unwrap_or_default();
    let scores = trace["y"].as_array().cloned().unwrap_or_default();
    if years.is_empty() {
        println!("  No data");
    }
    for (year, score) in years.iter().zip(scores.iter()) {
        println!("  {:<6} | {}", year, format_value(score));
    }
    println!();

    // Indicator breakdown
    let panel = &data["indicators"];
    println!("{}", panel["subheader"].as_str().unwrap_or_default());
    let trace = &panel["figure"]["data"][0];
    let labels = trace["theta"].as_array().cloned().unwrap_or_default();
    let values = trace["r"].as_array().cloned().unwrap_or_default();
    for (label, value) in labels.iter().zip(values.iter()) {
        println!(
            "  {:<30} | {}",
            label.as_str().unwrap_or_default(),
            format_value(value)
        );
    }
    println!();

    // World map
    let panel = &data["world_map"];
    println!("{}", panel["subheader"].as_str().unwrap_or_default());
    let trace = &panel["figure"]["data"][0];
    let mut regions: Vec<(String, f64)> = trace["locations"]
        .as_array()
        .into_iter()
        .flatten()
        .zip(trace["z"].as_array().into_iter().flatten())
        .filter_map(|(name, z)| Some((name.as_str()?.to_string(), z.as_f64()?)))
        .collect();
    regions.sort_by(|a, b| b.1.total_cmp(&a.1));
    println!("  {} countries", regions.len());
    for (name, score) in regions.iter().take(10) {
        println!("  {:<30} | {:.3}", name, score);
    }
}
