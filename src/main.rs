// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use rearchive::cli::{self, Config};

fn main() {
    let config = Config::parse();
    env_logger::Builder::new()
        .filter_level(config.verbosity().log_level_filter())
        .init();
    if let Err(error) = cli::run(config) {
        cli::die(1, &error.to_string());
    }
}
