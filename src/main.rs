//! `confpatch` command-line entry point.
use anyhow::Result;
use clap::Parser;

use confpatch::commands::edit::EditMode;
use confpatch::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);
    let log = logging::Logger::new();

    match args.command {
        cli::Command::Check(opts) => commands::check::run(&opts, &log),
        cli::Command::Show(opts) => commands::show::run(&opts),
        cli::Command::Get(opts) => commands::get::run(&opts),
        cli::Command::Set(opts) => commands::edit::run(EditMode::Set, &opts, &args.global, &log),
        cli::Command::Add(opts) => commands::edit::run(EditMode::Add, &opts, &args.global, &log),
        cli::Command::Apply(opts) => commands::apply::run(&opts, &args.global, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
