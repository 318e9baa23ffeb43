//! src/main.rs
//!
//! Entrypoint delegating to `app::run()`. The optional first argument is a
//! TOML settings file.

mod app;
mod panels;
mod ui;

use std::path::PathBuf;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    app::run(config_path)
}
