use std::io::{self, Write};
use std::process::ExitCode;

use county_report::app;
use county_report::config::{Config, USAGE};

fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{err}");
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let code = match app::run(&config, &mut out) {
        Ok(status) => status.exit_code(),
        Err(err) => {
            log::error!("{err:#}");
            // Best effort: stdout itself may be what failed.
            let _ = writeln!(out, "Error: {err:#}");
            ExitCode::FAILURE
        }
    };
    let _ = out.flush();
    code
}
