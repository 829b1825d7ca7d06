use clap::Parser;
use log::info;

use crate::cli::{Cli, Command};

mod cli;
mod cmc;
mod eer;
mod progress;

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = match &args.command {
        Command::Eer(eer_args) => eer::run(eer_args),
        Command::Cmc(cmc_args) => cmc::run(cmc_args),
    };

    match result {
        Ok(report) => info!("report written to {}", report.display()),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}
