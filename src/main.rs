use clap::Parser;
use colored::Colorize;
use std::process;
use verbump::cli::{Cli, Commands};
use verbump::utils::VERBOSE_ENV;
use verbump::workflow;

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        unsafe {
            std::env::set_var(VERBOSE_ENV, "1");
        }
    }

    let result = match cli.command {
        Commands::Read { json } => workflow::execute_read(&cli.path, &cli.file, json),
        Commands::Set { version, dry_run } => {
            workflow::execute_set(&cli.path, &cli.file, &version, dry_run)
        }
        Commands::Bump {
            level,
            pre_id,
            dry_run,
            commit,
            tag,
        } => workflow::execute_bump(
            &cli.path,
            &cli.file,
            level.into(),
            &pre_id,
            dry_run,
            commit,
            tag,
        ),
        Commands::Configure {
            name,
            description,
            keep_docs,
            dry_run,
        } => workflow::execute_configure(
            &cli.path,
            &cli.file,
            &name,
            &description,
            keep_docs,
            dry_run,
        ),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        process::exit(1);
    }
}
