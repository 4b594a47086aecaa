use clap::Parser;
use dirmerge::cli::{self, Cli};
use dirmerge::output::OutputFormatter;

fn main() {
    let options = Cli::parse().into_options();

    if let Err(e) = cli::run(options) {
        OutputFormatter::error(&e.to_string());
        std::process::exit(1);
    }
}
