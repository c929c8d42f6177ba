mod app;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod output;
mod source;
mod utils;

use clap::Parser;

use cli::Cli;
use config::Config;
use utils::init_logging;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = Config::load(cli.config.as_deref());
    let cli = cli.with_config(&config);

    if let Err(e) = app::run(&cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
