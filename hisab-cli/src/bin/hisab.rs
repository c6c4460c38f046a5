use anyhow::Result;
use hisab_cli::{BaseCli, HisabCli};
use hisab_core::Hisab;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("hisab: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Log filter comes from `HISAB_LOG` (e.g. `HISAB_LOG=hisab_core=debug`), default `warn`.
fn init_logging() {
    let filter = EnvFilter::try_from_env("HISAB_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    let cli = BaseCli::new();
    let hisab = Hisab::new()?;
    let hisab_cli = HisabCli::new(cli, hisab);
    hisab_cli.run()
}
