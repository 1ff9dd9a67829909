use std::process::ExitCode;

use chess_referee::terminal;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let color = std::env::var_os("NO_COLOR").is_none();

    match terminal::run_interactive_terminal(color) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("session aborted: {e}");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
