use anyhow::Context;

use crate::config::LoadedConfig;

pub struct Config;

impl Config {
    pub fn execute(loaded: &LoadedConfig) -> anyhow::Result<()> {
        match &loaded.path {
            Some(path) => println!("# Config file: {}", path.display()),
            None => println!("# Config file: none (built-in defaults)"),
        }

        let defaults = loaded.config.defaults();
        let rendered = toml::to_string(&defaults).context("Failed to render options")?;
        println!("[options]");
        print!("{rendered}");

        Ok(())
    }
}
