mod cli_modes;
mod common;
mod render;

pub use cli_modes::HisabCli;
pub use common::{BaseCli, CliModeResult};
pub use render::{ColorMode, RenderOptions, Renderer};
