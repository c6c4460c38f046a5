pub mod aggregate;
pub mod capture;
pub mod config;
mod hisab;
pub mod keywords;
pub mod record;
pub mod store;
pub mod utterance;

#[cfg(test)]
mod tests;

pub use config::Config;
pub use hisab::Hisab;
