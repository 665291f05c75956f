use std::process::ExitCode;

use human_panic::setup_panic;
use log::error;

use json2js::cli::{get_log_file, get_matches, get_verbosity, render_pairs, run};
use json2js::prelude::init_logger;

fn main() -> ExitCode {
    setup_panic!();

    let matches = get_matches();
    if let Err(e) = init_logger(get_verbosity(&matches), get_log_file(&matches).as_deref()) {
        eprintln!("Failed to initialise logging: {e}");
        return ExitCode::FAILURE;
    }

    // Diagnostics have already been logged as warnings while planning
    match run(&matches) {
        Ok(conversion) => {
            for line in render_pairs(&conversion) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
