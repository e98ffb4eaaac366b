// main.rs

use calcshell::config::Config;
use calcshell::{logging, repl};

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    logging::init_logging(&config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let code = if args.is_empty() {
        repl::start_repl(&config)?
    } else {
        repl::run_once(&args, &config)
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
