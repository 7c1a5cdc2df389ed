use clap::Parser;

use paddock::adapter::inbound::cli::command::Cli;
use paddock::adapter::inbound::cli::output::{self, OutputConfig};
use paddock::adapter::inbound::cli::run;

fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    output::configure(OutputConfig::new(
        cli.json,
        cli.quiet,
        cli.verbose,
        output::color_enabled(cli.color),
    ));

    if let Err(e) = run(&cli) {
        tracing::error!(error = %e, "command failed");
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
