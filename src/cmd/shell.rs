//! Interactive shell commands: `henhouse shell` and `henhouse open`.

use anyhow::{Result, bail};

use henhouse::config::Config;
use henhouse::router::Route;
use henhouse::shell::Shell;

pub async fn cmd_shell(config: &Config) -> Result<()> {
    run_at(config, Route::Root).await
}

pub async fn cmd_open(config: &Config, path: &str) -> Result<()> {
    let route: Route = path.parse()?;
    run_at(config, route).await
}

async fn run_at(config: &Config, route: Route) -> Result<()> {
    if !super::interactive(false) {
        bail!("The interactive shell needs a terminal. Use 'henhouse batches' or 'henhouse history' instead.");
    }
    let api = super::client(config)?;
    Shell::new(&api).run(route).await
}
