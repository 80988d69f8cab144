use putty_sessions::{cli, logging};

fn main() {
    // Process CLI arguments first (before logging init for cleaner output)
    let options = cli::process_cli();
    logging::init(options.log_level);

    log::info!("Export PuTTY sessions from registry");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = putty_sessions::run(&options, &mut out) {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
