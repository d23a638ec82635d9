use clap::Parser;
use sitedesk_cli::{Cli, commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    sitedesk_observability::init(cli.global.log_format);

    let output = commands::run(&cli)?;
    println!("{output}");
    Ok(())
}
