use clap::{ArgGroup, Parser};

use crate::render::ColorMode;

/// hisab: doodh ka hisab, bol ke ya likh ke
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("form").args(["date", "shift", "amount"]).multiple(true)),
    group(ArgGroup::new("solo").args(["path", "listen", "month", "entries"]).conflicts_with_all(["form", "text"])),
)]
pub struct BaseCli {
    /// Prints the store root directory
    #[arg(long, short)]
    pub path: bool,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// Overwrite an existing entry for the same date and shift without asking.
    #[arg(long, short)]
    pub yes: bool,

    /// Interactive capture: each line you type is one utterance.
    /// A blank line counts as "no speech", `q` quits.
    #[arg(long, short)]
    pub listen: bool,
    /// Monthly report with total (e.g., `hisab --month`, `hisab --month 2025-05`,
    /// `hisab --month "last month"`). Defaults to this month.
    #[arg(long, short, num_args(0..=1), default_missing_value = "this month")]
    pub month: Option<String>,
    /// Lists all entries, most recent first.
    #[arg(long, short)]
    pub entries: bool,

    /// Manual entry date, as YYYY-MM-DD.
    #[arg(long)]
    pub date: Option<String>,
    /// Manual entry shift: morning/evening or subah/shaam.
    #[arg(long)]
    pub shift: Option<String>,
    /// Manual entry amount (e.g., `126.56`).
    #[arg(long)]
    pub amount: Option<String>,

    /// Free text utterance (e.g., `hisab 26 may ki shaam ko 126 point 56 ka doodh`).
    #[arg(conflicts_with = "form")]
    pub text: Vec<String>,
}

impl BaseCli {
    pub fn new() -> Self {
        BaseCli::parse()
    }

    pub fn use_color(&self) -> bool {
        self.color.use_color()
    }

    pub fn has_form(&self) -> bool {
        self.date.is_some() || self.shift.is_some() || self.amount.is_some()
    }
}
