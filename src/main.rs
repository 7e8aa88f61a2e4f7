use clap::Parser;
use riskscope::cli::{run, Cli};

fn main() -> std::process::ExitCode {
    riskscope::init_tracing();
    run(Cli::parse())
}
