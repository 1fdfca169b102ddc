use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "random-cli")]
#[command(about = "Operator CLI for the random number service", long_about = None)]
struct Cli {
    /// Admin listener base URL
    #[arg(short, long, default_value = "http://localhost:9000")]
    admin_url: String,

    /// Public listener base URL
    #[arg(short, long, default_value = "http://localhost:80")]
    public_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show service name, version and host
    About,
    /// Check the readiness probe
    Ready,
    /// Check the liveness probe
    Live,
    /// Dump Prometheus metrics
    Metrics,
    /// Draw values from the public endpoint
    Next {
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        min: i64,
        #[arg(long, default_value_t = 100, allow_hyphen_values = true)]
        max: i64,
        #[arg(long, default_value_t = 1)]
        num: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::About => {
            let res = client.get(format!("{}/about", cli.admin_url)).send().await?;
            print_response(res).await?;
        }
        Commands::Ready => {
            let res = client.get(format!("{}/ready", cli.admin_url)).send().await?;
            print_response(res).await?;
        }
        Commands::Live => {
            let res = client.get(format!("{}/live", cli.admin_url)).send().await?;
            print_response(res).await?;
        }
        Commands::Metrics => {
            let res = client.get(format!("{}/metrics", cli.admin_url)).send().await?;
            println!("{}", res.text().await?);
        }
        Commands::Next { min, max, num } => {
            let res = client
                .get(format!("{}/random", cli.public_url))
                .query(&[("min", min), ("max", max), ("num", num)])
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let json: Value = res.json().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("{}", serde_json::to_string_pretty(&json)?);
        std::process::exit(1);
    }

    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
