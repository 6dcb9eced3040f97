use std::io::Write;

use clap::Parser;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Fetch a URL through a running api-relay", long_about = None)]
struct Cli {
    /// Base URL of the relay.
    #[arg(short, long, default_value = "http://localhost:8080")]
    relay: String,

    /// Target URL to fetch.
    target: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    let res = client
        .get(&cli.relay)
        .query(&[("url", cli.target.as_str())])
        .send()
        .await?;

    let status = res.status();
    let body = res.bytes().await?;

    if !status.is_success() {
        eprintln!("Error: relay returned status {}", status);
        eprintln!("Response: {}", String::from_utf8_lossy(&body));
        std::process::exit(1);
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(&body)?;
    stdout.flush()?;
    Ok(())
}
