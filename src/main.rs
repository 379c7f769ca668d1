use anyhow::{Context as AnyhowContext, Result};
use clap::Parser;
use testable_id::cli;
use testable_id::logging::{self, Verbosity};

fn main() -> Result<()> {
    let args = cli::Args::parse();
    logging::init(Verbosity::from_flags(args.verbose, args.quiet));
    args.validate().context("Invalid arguments")?;

    let output = cli::run(&args)?;
    if !args.quiet {
        println!("{output}");
    }

    Ok(())
}
