//! Subcommand implementations. Each prints to stdout; logs go to stderr.

mod inspect;
mod preview;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use bizboost_config::{ThemeEngineConfig, ThemeEngineConfigSource};

pub use inspect::{classify, resolve, templates};
pub use preview::{PreviewArgs, preview};
pub use session::{SessionAction, session};

/// Resolved configuration, with `--session-file` taking precedence over
/// every other source.
pub fn load_config(
    session_file: Option<PathBuf>,
) -> Result<(ThemeEngineConfig, ThemeEngineConfigSource)> {
    let (mut config, source) = ThemeEngineConfig::load()?;
    if let Some(path) = session_file {
        config.session_file = path;
    }
    Ok((config, source))
}

pub fn show_config(
    config: &ThemeEngineConfig,
    source: &ThemeEngineConfigSource,
) -> Result<()> {
    println!("source: {source}");
    println!("session_key: {}", config.session_key);
    println!("session_file: {}", config.session_file.display());
    println!(
        "api_base_url: {}",
        config.api_base_url.as_deref().unwrap_or("(offline)")
    );
    println!(
        "api_token: {}",
        if config.api_token.is_some() { "set" } else { "unset" }
    );
    if let Some(user_id) = config.user_id {
        println!("user_id: {user_id}");
    }
    match config.request_timeout() {
        Some(timeout) => {
            println!("request_timeout: {}", humantime::format_duration(timeout))
        }
        None => println!("request_timeout: none"),
    }
    Ok(())
}
