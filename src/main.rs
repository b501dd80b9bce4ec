use std::process::ExitCode;

use stitchwork::ui::output;

fn main() -> ExitCode {
    match stitchwork::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
