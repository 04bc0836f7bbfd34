use anyhow::Result;
use blendopt::{CLIArguments, dataset_main, logging, solve_main};
use clap::Parser;

fn main() -> Result<()> {
    logging::init();
    let args = CLIArguments::parse();

    match args {
        CLIArguments::Solve(args) => solve_main(args),
        CLIArguments::Dataset(args) => dataset_main(args),
    }
}
