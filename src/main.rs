use clap::Parser;
use county_temp_map::cli::{run, Cli};
use county_temp_map::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
