mod hisab_cli;

pub use hisab_cli::HisabCli;
