use std::sync::Arc;

use anyhow::Result;
use bizboost_config::ThemeEngineConfig;
use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_core::infra::{
    FileSessionStorage, MemoryConfigStore, RestConfigStore,
};
use bizboost_core::reconcile::{
    ControllerOptions, LoadApplied, SessionCache, ThemeController,
    WriteOutcome,
};
use bizboost_core::{ThemeView, classify};
use bizboost_model::{PersistedConfig, TemplateId};
use clap::Args;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct PreviewArgs {
    /// Route path to mount, e.g. /tradecraft/services
    pub path: String,
    /// Primary color to apply after loading
    #[arg(long)]
    pub primary: Option<String>,
    /// Secondary color to apply after loading
    #[arg(long)]
    pub secondary: Option<String>,
    /// Undo the last change made by this invocation
    #[arg(long)]
    pub undo: bool,
    /// Keep remote records in memory, seeded from the session blob
    #[arg(long)]
    pub offline: bool,
    /// Print the theme as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
struct PreviewReport {
    theme: ThemeView,
    #[serde(skip_serializing_if = "Option::is_none")]
    load: Option<&'static str>,
    writes: Vec<WriteReport>,
}

#[derive(Debug, Serialize)]
struct WriteReport {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<WriteOutcome> for WriteReport {
    fn from(outcome: WriteOutcome) -> Self {
        match outcome {
            WriteOutcome::Persisted(notice) => Self {
                status: "persisted",
                message: Some(format!(
                    "{}: {}",
                    notice.title(),
                    notice.description()
                )),
            },
            WriteOutcome::Skipped(reason) => Self {
                status: "skipped",
                message: Some(format!("{reason:?}")),
            },
            WriteOutcome::Superseded => Self {
                status: "superseded",
                message: None,
            },
            WriteOutcome::Failed(err) => Self {
                status: "failed",
                message: Some(err.to_string()),
            },
        }
    }
}

pub async fn preview(
    config: &ThemeEngineConfig,
    args: PreviewArgs,
) -> Result<()> {
    let storage = Arc::new(FileSessionStorage::new(&config.session_file));
    let remote = remote_store(config, &storage, &args)?;
    let options = ControllerOptions {
        session_key: config.session_key.clone(),
        request_timeout: config.request_timeout(),
    };

    let (mut controller, load) =
        ThemeController::create(&args.path, options, storage, remote);

    let load = match load {
        Some(load) => Some(match controller.settle(load).await {
            LoadApplied::Remote(_) => "remote",
            LoadApplied::Defaults(_) => "defaults",
            LoadApplied::Stale => "stale",
        }),
        None => None,
    };

    let mut pending = Vec::new();
    if let Some(color) = &args.primary {
        pending.push(controller.set_primary_color(color));
    }
    if let Some(color) = &args.secondary {
        pending.push(controller.set_secondary_color(color));
    }
    if args.undo {
        match controller.undo_last_change() {
            Some(write) => pending.push(write),
            None => tracing::warn!("nothing to undo"),
        }
    }

    let mut writes = Vec::with_capacity(pending.len());
    for write in pending {
        writes.push(WriteReport::from(write.commit().await));
    }

    let report = PreviewReport {
        theme: controller.view(),
        load,
        writes,
    };
    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn remote_store(
    config: &ThemeEngineConfig,
    storage: &Arc<FileSessionStorage>,
    args: &PreviewArgs,
) -> Result<Arc<dyn RemoteConfigStore>> {
    if !args.offline
        && let Some(url) = config.api_url()?
    {
        let mut store = RestConfigStore::new(url.as_str())?;
        if let Some(token) = &config.api_token {
            store = store.with_token(token.clone());
        }
        if let Some(user_id) = config.user_id {
            store = store.with_user_id(user_id);
        }
        return Ok(Arc::new(store));
    }

    let store = MemoryConfigStore::new();
    let cache = SessionCache::new(storage.clone(), config.session_key.clone());
    if let Some(template) = classify(&args.path)
        && let Some(record) = offline_record(&cache, template)
    {
        tracing::debug!(%template, "seeded offline store from session data");
        store.insert(record);
    }
    Ok(Arc::new(store))
}

/// The record site setup would have created, rebuilt from the session blob.
fn offline_record(
    cache: &SessionCache,
    template: TemplateId,
) -> Option<PersistedConfig> {
    let snapshot = cache.read()?;
    if let Some(stored) = snapshot.template.as_deref()
        && stored != template.as_str()
    {
        return None;
    }
    let mut record = PersistedConfig::new(
        template,
        snapshot.company_name.clone().unwrap_or_default(),
        snapshot.domain_name.clone().unwrap_or_default(),
    );
    record.logo = snapshot.logo.clone();
    record.color_scheme = snapshot.color_scheme.clone();
    record.secondary_color_scheme = snapshot.secondary_color_scheme.clone();
    Some(record)
}

fn print_report(report: &PreviewReport) {
    let theme = &report.theme;
    let template = if theme.template.is_empty() {
        "none"
    } else {
        theme.template
    };
    println!("template: {template}");
    if let Some(load) = report.load {
        println!("loaded: {load}");
    }
    println!("primary: {}", theme.colors.primary);
    println!("secondary: {}", theme.colors.secondary);
    println!("mode: {:?}", theme.mode);
    println!("can_undo: {}", theme.can_undo);
    println!(
        "classes: {} {} {}",
        theme.classes.bg, theme.classes.text, theme.classes.secondary_bg
    );
    for write in &report.writes {
        match &write.message {
            Some(message) => println!("write: {} ({message})", write.status),
            None => println!("write: {}", write.status),
        }
    }
}
