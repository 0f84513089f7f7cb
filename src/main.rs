use anyhow::Result;
use clap::Parser;

use file_line::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    match &args.command {
        cli::Command::Apply(opts) => commands::apply::run(&args.global, opts, &log),
        cli::Command::Check(opts) => commands::check::run(opts, &log),
        cli::Command::Ensure(opts) => commands::ensure::run(&args.global, opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
