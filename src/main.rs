use clap::Parser;
use fincurator::adapters::tracing_diagnostics::init_tracing;
use fincurator::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
