//! epidash CLI
//!
//! Command-line client for a running epidash server:
//! - List countries
//! - Show a country summary
//! - List detected waves
//! - Export a country's rows
//! - Generate a config file

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "epidash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Query a running epidash COVID-19 dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8501", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List every location in the dataset
    Countries,

    /// World and country totals with the case-fatality ratio
    Summary {
        /// Location name, e.g. "United Kingdom"
        country: String,
    },

    /// Detected waves of daily new cases
    Peaks {
        /// Location name
        country: String,
    },

    /// Export a country's rows as CSV
    Export {
        /// Location name
        country: String,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Countries => {
            let data = get_json(&client, &format!("{}/api/v1/countries", cli.api_url)).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let countries = data["countries"].as_array().cloned().unwrap_or_default();
                for country in &countries {
                    println!("{}", country.as_str().unwrap_or("-"));
                }
                println!();
                println!("{} locations", countries.len());
            }
        }

        Commands::Summary { country } => {
            let url = format!(
                "{}/api/v1/summary?country={}",
                cli.api_url,
                urlencoding::encode(&country)
            );
            let data = get_json(&client, &url).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                println!("Global COVID-19 Summary");
                print_metrics(&data["world"]);
                println!();
                println!(
                    "{} (as of {})",
                    data["country"].as_str().unwrap_or(&country),
                    data["latest_date"].as_str().unwrap_or("unknown date")
                );
                print_metrics(&data["metrics"]);
                if let Some(flag) = data["flag_url"].as_str() {
                    println!();
                    println!("Flag: {}", flag);
                }
            }
        }

        Commands::Peaks { country } => {
            let url = format!(
                "{}/api/v1/peaks?country={}",
                cli.api_url,
                urlencoding::encode(&country)
            );
            let data = get_json(&client, &url).await?;

            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&data)?);
            } else {
                let peaks = data["peaks"].as_array().cloned().unwrap_or_default();
                if peaks.is_empty() {
                    println!(
                        "No peaks at or above {} new cases",
                        data["threshold"].as_f64().unwrap_or(0.0)
                    );
                } else {
                    println!("{:<12} {:>12}", "Date", "New cases");
                    println!("{}", "-".repeat(25));
                    for peak in peaks {
                        println!(
                            "{:<12} {:>12.0}",
                            peak["date"].as_str().unwrap_or("-"),
                            peak["new_cases"].as_f64().unwrap_or(0.0)
                        );
                    }
                }
            }
        }

        Commands::Export { country, output } => {
            let url = format!(
                "{}/api/v1/export?country={}",
                cli.api_url,
                urlencoding::encode(&country)
            );
            let response = client.get(&url).send().await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                eprintln!("Export failed ({}): {}", status, text);
                std::process::exit(1);
            }

            let data = response.text().await?;

            match output {
                Some(path) => {
                    std::fs::write(&path, &data)?;
                    println!("Exported to {:?}", path);
                }
                None => {
                    print!("{}", data);
                }
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("epidash v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!(
                        "Dataset: {}",
                        health["dataset"].as_str().unwrap_or("unknown")
                    );
                    if let Some(rows) = health["rows"].as_u64() {
                        println!("  Rows: {}", rows);
                    }

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!();
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to epidash at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the server is running:");
                    eprintln!("  cargo run --bin epidash");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = epidash::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// GET a JSON body, exiting with the server's error message on failure
async fn get_json(
    client: &reqwest::Client,
    url: &str,
) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    let body: serde_json::Value = response.json().await?;

    if !status.is_success() {
        eprintln!(
            "Request failed ({}): {}",
            status,
            body["error"]["message"].as_str().unwrap_or("unknown error")
        );
        std::process::exit(1);
    }

    Ok(body)
}

fn print_metrics(metrics: &serde_json::Value) {
    let Some(metrics) = metrics.as_array() else {
        println!("  No data");
        return;
    };

    for metric in metrics {
        println!(
            "  {:<28} {:>15}",
            metric["label"].as_str().unwrap_or("-"),
            metric["display"].as_str().unwrap_or("-")
        );
        if let Some(note) = metric["note"].as_str() {
            println!("  ({})", note);
        }
    }
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
