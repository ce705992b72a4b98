//! CLI command implementations.
//!
//! Each submodule owns one or more related `Commands` variants:
//!
//! | Module    | Commands handled                 |
//! |-----------|----------------------------------|
//! | `batches` | `Batches`, `Show`, `Update`      |
//! | `add`     | `Add`                            |
//! | `history` | `History`                        |
//! | `shell`   | `Open`, `Shell`                  |
//! | `config`  | `Config`                         |

pub mod add;
pub mod batches;
pub mod config;
pub mod history;
pub mod shell;

pub use add::{AddInput, cmd_add};
pub use batches::{UpdateInput, cmd_batches, cmd_show, cmd_update};
pub use config::cmd_config;
pub use history::cmd_history;
pub use shell::{cmd_open, cmd_shell};

use anyhow::Result;
use henhouse::api::HttpClient;
use henhouse::config::Config;

/// API client for the resolved base URL.
pub fn client(config: &Config) -> Result<HttpClient> {
    Ok(HttpClient::new(&config.api_url)?)
}

/// Prompts only make sense when a person is at the keyboard.
pub fn interactive(yes: bool) -> bool {
    !yes && console::Term::stdout().is_term()
}
