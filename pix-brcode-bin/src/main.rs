use clap::Parser;
use pix_brcode_bin::{Cli, run};

fn setup_log() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::{EnvFilter, fmt};
    if tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .try_init()
        .is_err()
    {}
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_log();

    let cli = Cli::parse();
    let output = run(cli)?;
    println!("{output}");
    Ok(())
}
