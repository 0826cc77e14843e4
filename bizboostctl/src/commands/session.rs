use std::sync::Arc;

use anyhow::Result;
use bizboost_config::ThemeEngineConfig;
use bizboost_core::infra::FileSessionStorage;
use bizboost_core::reconcile::SessionCache;
use bizboost_model::{SessionSnapshot, TemplateId};
use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum SessionAction {
    /// Print the stored blob as JSON
    Show,
    /// Remove the blob
    Clear,
    /// Write a blob the way site setup does, replacing any existing one
    Seed {
        #[arg(long)]
        company: String,
        #[arg(long)]
        domain: String,
        #[arg(long)]
        logo: Option<String>,
        #[arg(long)]
        template: Option<TemplateId>,
    },
}

pub fn session_cache(config: &ThemeEngineConfig) -> SessionCache {
    SessionCache::new(
        Arc::new(FileSessionStorage::new(&config.session_file)),
        config.session_key.clone(),
    )
}

pub fn session(
    config: &ThemeEngineConfig,
    action: SessionAction,
) -> Result<()> {
    let cache = session_cache(config);
    match action {
        SessionAction::Show => match cache.read() {
            Some(snapshot) => {
                println!("{}", serde_json::to_string_pretty(&snapshot)?)
            }
            None => println!("no session data under {:?}", cache.key()),
        },
        SessionAction::Clear => {
            cache.clear()?;
            tracing::info!(key = cache.key(), "session data cleared");
        }
        SessionAction::Seed {
            company,
            domain,
            logo,
            template,
        } => {
            let snapshot = SessionSnapshot {
                company_name: Some(company),
                domain_name: Some(domain),
                logo,
                template: template.map(|t| t.as_str().to_string()),
                ..SessionSnapshot::default()
            };
            cache.write(&snapshot)?;
            tracing::info!(
                key = cache.key(),
                path = %config.session_file.display(),
                "session data written"
            );
        }
    }
    Ok(())
}
