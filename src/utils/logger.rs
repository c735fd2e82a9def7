use colored::Colorize;
use env_logger::Builder;
use log::Level;
use std::io::Write;

pub fn setup_logging(verbose: bool) {
    use log::LevelFilter;

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    Builder::from_default_env()
        .filter_level(LevelFilter::Warn) // Default: only warnings from dependencies
        .filter_module(env!("CARGO_PKG_NAME"), level) // Our crate: use requested level
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            let line = match record.level() {
                Level::Warn => format!(
                    "[{timestamp} {}] {}",
                    "WARN".yellow(),
                    record.args()
                ),
                Level::Error => format!(
                    "[{timestamp} {}] {}",
                    "ERROR".red(),
                    record.args()
                ),
                _ => format!("[{timestamp}] {}", record.args()),
            };
            writeln!(buf, "{line}")
        })
        .init();
}
