use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_contracts::session::SessionStorage;
use bizboost_core::infra::{MemoryConfigStore, MemorySessionStorage};
use bizboost_core::reconcile::{
    ControllerOptions, LoadApplied, PendingLoad, PersistNotice, SkipReason,
    ThemeController, WriteOutcome,
};
use bizboost_core::{ColorClasses, ThemeError, ThemeMode};
use bizboost_model::{
    ColorPair, ColorToken, PersistedConfig, SESSION_KEY, SessionSnapshot,
    TemplateId,
};

fn record(template: TemplateId) -> PersistedConfig {
    PersistedConfig::new(template, "Hammer & Sons", "hammer.example")
        .with_logo("https://cdn.example/hammer.svg")
}

fn tradecraft_record() -> PersistedConfig {
    record(TemplateId::Tradecraft)
}

fn pair(primary: ColorToken, secondary: ColorToken) -> ColorPair {
    ColorPair::new(primary, secondary)
}

fn session_for(
    template: &str,
    primary: Option<&str>,
    secondary: Option<&str>,
) -> MemorySessionStorage {
    let snapshot = SessionSnapshot {
        company_name: Some("Hammer & Sons".into()),
        domain_name: Some("hammer.example".into()),
        color_scheme: primary.map(str::to_string),
        secondary_color_scheme: secondary.map(str::to_string),
        template: Some(template.into()),
        ..SessionSnapshot::default()
    };
    MemorySessionStorage::with_snapshot(SESSION_KEY, &snapshot)
        .expect("encode snapshot")
}

fn session_with(
    primary: Option<&str>,
    secondary: Option<&str>,
) -> MemorySessionStorage {
    session_for("tradecraft", primary, secondary)
}

fn mount(
    path: &str,
    session: &MemorySessionStorage,
    remote: &MemoryConfigStore,
) -> (ThemeController, Option<PendingLoad>) {
    ThemeController::create(
        path,
        ControllerOptions::default(),
        Arc::new(session.clone()),
        Arc::new(remote.clone()),
    )
}

#[tokio::test]
async fn fresh_visit_without_any_stored_colors_uses_template_defaults() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::new();
    let (mut controller, load) = mount("/tradecraft", &session, &remote);

    assert_eq!(
        controller.colors(),
        pair(ColorToken::Blue, ColorToken::Orange)
    );
    let applied = controller.settle(load.expect("template route loads")).await;
    assert_eq!(
        applied,
        LoadApplied::Defaults(pair(ColorToken::Blue, ColorToken::Orange))
    );
    assert_eq!(controller.store().mode(), ThemeMode::Default);
}

#[tokio::test]
async fn session_colors_render_before_the_remote_load_resolves() {
    let session = session_with(Some("red"), None);
    let remote = MemoryConfigStore::new();
    let (controller, load) = mount("/tradecraft/services", &session, &remote);

    assert!(load.is_some());
    assert_eq!(remote.load_calls(), 0);
    assert_eq!(controller.colors().primary, ColorToken::Red);
    assert_eq!(controller.colors().secondary, ColorToken::Orange);
    assert_eq!(controller.store().mode(), ThemeMode::Overridden);
}

#[tokio::test]
async fn session_data_of_another_template_is_not_applied() {
    let session = session_for("tradecraft", Some("red"), Some("teal"));
    let remote = MemoryConfigStore::new();

    let (controller, _load) = mount("/retail", &session, &remote);
    assert_eq!(controller.colors(), TemplateId::Retail.default_colors());
    assert_eq!(controller.store().mode(), ThemeMode::Default);

    let (controller, _load) = mount("/tradecraft", &session, &remote);
    assert_eq!(controller.colors(), pair(ColorToken::Red, ColorToken::Teal));
}

#[tokio::test]
async fn untagged_session_data_applies_to_any_template() {
    let raw = r#"{"companyName":"Hammer & Sons","colorScheme":"green"}"#;
    let session = MemorySessionStorage::new();
    session.set_item(SESSION_KEY, raw).expect("seed");
    let remote = MemoryConfigStore::new();

    let (controller, _load) = mount("/expert", &session, &remote);
    assert_eq!(controller.colors().primary, ColorToken::Green);
}

#[tokio::test]
async fn remote_colors_supersede_session_colors_once_loaded() {
    let session = session_with(Some("red"), Some("pink"));
    let remote = MemoryConfigStore::with_records([tradecraft_record()
        .with_colors(pair(ColorToken::Teal, ColorToken::Amber))]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);
    assert_eq!(controller.colors().primary, ColorToken::Red);

    let applied = controller.settle(load.expect("load")).await;

    let teal_amber = pair(ColorToken::Teal, ColorToken::Amber);
    assert_eq!(applied, LoadApplied::Remote(teal_amber));
    assert_eq!(controller.colors(), teal_amber);
    let mirrored = session.snapshot(SESSION_KEY).expect("snapshot kept");
    assert_eq!(mirrored.color_scheme.as_deref(), Some("teal"));
    assert_eq!(mirrored.secondary_color_scheme.as_deref(), Some("amber"));
    assert_eq!(mirrored.company_name.as_deref(), Some("Hammer & Sons"));
}

#[tokio::test]
async fn remote_record_without_colors_resets_to_defaults() {
    let session = session_with(Some("red"), None);
    let remote = MemoryConfigStore::with_records([tradecraft_record()]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);

    let applied = controller.settle(load.expect("load")).await;

    assert_eq!(
        applied,
        LoadApplied::Remote(TemplateId::Tradecraft.default_colors())
    );
    assert_eq!(controller.store().mode(), ThemeMode::Default);
}

#[tokio::test]
async fn failed_remote_load_falls_back_to_defaults_and_clears_history() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::new();
    remote.set_fail_loads(true);
    let (mut controller, load) = mount("/retail", &session, &remote);

    let applied = controller.settle(load.expect("load")).await;

    assert_eq!(
        applied,
        LoadApplied::Defaults(TemplateId::Retail.default_colors())
    );
    assert!(!controller.store().can_undo());
}

#[tokio::test]
async fn user_edit_wins_over_a_load_still_in_flight() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([tradecraft_record()
        .with_colors(pair(ColorToken::Teal, ColorToken::Amber))]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);
    let in_flight = load.expect("load").fetch();

    let _write = controller.set_primary_color("purple");
    let outcome = in_flight.await;
    assert!(outcome.is_success());

    assert_eq!(controller.complete_load(outcome), LoadApplied::Stale);
    assert_eq!(controller.colors().primary, ColorToken::Purple);
    assert!(controller.store().can_undo());
}

#[tokio::test]
async fn load_for_a_template_left_behind_is_discarded() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([
        tradecraft_record().with_colors(pair(ColorToken::Red, ColorToken::Red))
    ]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);
    let stale = load.expect("load").fetch().await;

    let next = controller.on_route_changed("/expert/about");
    assert!(next.is_some());

    assert_eq!(controller.complete_load(stale), LoadApplied::Stale);
    assert_eq!(controller.template_type(), Some(TemplateId::Expert));
    assert_eq!(controller.colors(), TemplateId::Expert.default_colors());
}

#[tokio::test]
async fn color_write_preserves_sibling_fields_of_the_remote_record() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([tradecraft_record()]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);
    controller.settle(load.expect("load")).await;

    let outcome = controller.set_primary_color("green").commit().await;

    assert_eq!(outcome.notice(), Some(PersistNotice::PrimaryUpdated));
    let stored = remote.get(TemplateId::Tradecraft).expect("record kept");
    assert_eq!(stored.company_name, "Hammer & Sons");
    assert_eq!(stored.domain_name, "hammer.example");
    assert_eq!(
        stored.logo.as_deref(),
        Some("https://cdn.example/hammer.svg")
    );
    assert_eq!(stored.color_scheme.as_deref(), Some("green"));
    assert_eq!(stored.secondary_color_scheme.as_deref(), Some("orange"));
}

#[tokio::test]
async fn failed_save_keeps_the_in_memory_change() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([tradecraft_record()]);
    remote.set_fail_saves(true);
    let (mut controller, _load) = mount("/tradecraft", &session, &remote);

    let outcome = controller.set_secondary_color("indigo").commit().await;

    assert!(matches!(outcome, WriteOutcome::Failed(_)));
    assert_eq!(controller.colors().secondary, ColorToken::Indigo);
    assert!(remote.saved().is_empty());
}

#[tokio::test]
async fn writes_without_a_record_or_template_are_skipped() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::new();

    let (mut controller, _load) = mount("/service", &session, &remote);
    let outcome = controller.set_primary_color("red").commit().await;
    assert!(matches!(outcome, WriteOutcome::Skipped(SkipReason::NoRecord)));

    let (mut unscoped, load) = mount("/dashboard", &session, &remote);
    assert!(load.is_none());
    let outcome = unscoped.set_primary_color("red").commit().await;
    assert!(matches!(
        outcome,
        WriteOutcome::Skipped(SkipReason::NoTemplate)
    ));
    assert!(remote.saved().is_empty());
}

#[tokio::test]
async fn an_older_write_yields_to_a_newer_one() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([tradecraft_record()]);
    let (mut controller, _load) = mount("/tradecraft", &session, &remote);

    let first = controller.set_primary_color("red");
    let second = controller.set_primary_color("green");
    assert!(first.is_superseded());

    assert!(matches!(first.commit().await, WriteOutcome::Superseded));
    assert!(second.commit().await.is_persisted());
    assert_eq!(remote.saved().len(), 1);
    assert_eq!(
        remote
            .get(TemplateId::Tradecraft)
            .and_then(|c| c.color_scheme),
        Some("green".to_string())
    );
}

#[tokio::test]
async fn writes_to_different_templates_do_not_supersede_each_other() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::with_records([
        record(TemplateId::Tradecraft),
        record(TemplateId::Retail),
    ]);
    let (mut controller, _load) = mount("/tradecraft", &session, &remote);

    let tradecraft = controller.set_primary_color("red");
    let _load = controller.on_route_changed("/retail");
    let retail = controller.set_primary_color("green");
    assert!(!tradecraft.is_superseded());

    assert_eq!(
        tradecraft.commit().await.notice(),
        Some(PersistNotice::PrimaryUpdated)
    );
    assert!(retail.commit().await.is_persisted());

    let stored = |template| {
        remote.get(template).and_then(|config| config.color_scheme)
    };
    assert_eq!(stored(TemplateId::Tradecraft).as_deref(), Some("red"));
    assert_eq!(stored(TemplateId::Retail).as_deref(), Some("green"));
}

#[tokio::test]
async fn undo_restores_and_persists_the_previous_colors() {
    let session = session_with(None, None);
    let remote = MemoryConfigStore::with_records([tradecraft_record()]);
    let (mut controller, load) = mount("/tradecraft", &session, &remote);
    controller.settle(load.expect("load")).await;

    let _ = controller.set_primary_color("red");
    let _ = controller.set_primary_color("green");
    let undo = controller.undo_last_change().expect("something to undo");
    assert_eq!(undo.notice(), PersistNotice::ColorsRestored);
    assert_eq!(
        controller.colors(),
        pair(ColorToken::Red, ColorToken::Orange)
    );

    assert!(undo.commit().await.is_persisted());
    let stored = remote.get(TemplateId::Tradecraft).expect("record");
    assert_eq!(stored.color_scheme.as_deref(), Some("red"));
    assert_eq!(stored.secondary_color_scheme.as_deref(), Some("orange"));

    let snapshot = session.snapshot(SESSION_KEY).expect("snapshot");
    assert_eq!(snapshot.color_scheme.as_deref(), Some("red"));
    assert_eq!(snapshot.secondary_color_scheme.as_deref(), Some("orange"));

    assert!(controller.undo_last_change().is_none());
}

#[tokio::test]
async fn mutations_merge_into_the_session_blob_but_never_create_it() {
    let raw = concat!(
        r#"{"companyName":"Hammer & Sons","services":["roofing"],"#,
        r#""colorScheme":"blue"}"#
    );
    let session = MemorySessionStorage::new();
    session.set_item(SESSION_KEY, raw).expect("seed");
    let remote = MemoryConfigStore::new();
    let (mut controller, _load) = mount("/tradecraft", &session, &remote);

    let _ = controller.set_secondary_color("teal");
    let snapshot = session.snapshot(SESSION_KEY).expect("snapshot");
    assert_eq!(snapshot.color_scheme.as_deref(), Some("blue"));
    assert_eq!(snapshot.secondary_color_scheme.as_deref(), Some("teal"));
    assert_eq!(snapshot.extra["services"], serde_json::json!(["roofing"]));

    let empty = MemorySessionStorage::new();
    let (mut controller, _load) = mount("/tradecraft", &empty, &remote);
    let _ = controller.set_primary_color("red");
    assert_eq!(empty.snapshot(SESSION_KEY), None);
}

#[tokio::test]
async fn route_change_to_another_template_discards_previous_state() {
    let session = MemorySessionStorage::new();
    let remote = MemoryConfigStore::new();
    let (mut controller, _load) = mount("/tradecraft", &session, &remote);
    let _ = controller.set_primary_color("red");
    let generation = controller.generation();

    assert!(controller.on_route_changed("/tradecraft/contact").is_none());
    assert_eq!(controller.colors().primary, ColorToken::Red);
    assert_eq!(controller.generation(), generation);

    let load = controller.on_route_changed("/retail");
    assert_eq!(load.map(|l| l.template()), Some(TemplateId::Retail));
    assert_eq!(controller.colors(), TemplateId::Retail.default_colors());
    assert!(!controller.store().can_undo());
    assert_eq!(controller.store().mode(), ThemeMode::Default);

    assert!(controller.on_route_changed("/").is_none());
    assert_eq!(controller.template_type(), None);
}

#[tokio::test]
async fn clean_slate_classes_ignore_stored_colors() {
    let session = session_for("cleanslate", Some("red"), Some("pink"));
    let remote = MemoryConfigStore::with_records([record(
        TemplateId::CleanSlate,
    )
    .with_colors(pair(ColorToken::Teal, ColorToken::Amber))]);
    let (mut controller, load) = mount("/cleanslate", &session, &remote);

    assert_eq!(controller.colors().primary, ColorToken::Red);
    assert_eq!(controller.color_classes(), ColorClasses::clean_slate());
    controller.settle(load.expect("load")).await;
    assert_eq!(controller.colors().primary, ColorToken::Teal);
    assert_eq!(controller.color_classes(), ColorClasses::clean_slate());
    let _ = controller.set_primary_color("indigo");
    assert_eq!(controller.color_classes(), ColorClasses::clean_slate());
}

#[tokio::test]
async fn malformed_session_blob_is_treated_as_absent() {
    let session = MemorySessionStorage::new();
    session.set_item(SESSION_KEY, "{not json").expect("seed");
    let remote = MemoryConfigStore::new();
    let (mut controller, _load) = mount("/expert", &session, &remote);

    assert_eq!(controller.colors(), TemplateId::Expert.default_colors());
    let _ = controller.set_primary_color("red");
    assert_eq!(controller.colors().primary, ColorToken::Red);
}

struct SlowStore;

#[async_trait]
impl RemoteConfigStore for SlowStore {
    async fn load_config(
        &self,
        _template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(None)
    }

    async fn save_config(
        &self,
        _config: &PersistedConfig,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn slow_remote_calls_time_out_into_defaults() {
    let options = ControllerOptions {
        request_timeout: Some(Duration::from_millis(20)),
        ..ControllerOptions::default()
    };
    let (mut controller, load) = ThemeController::create(
        "/service",
        options,
        Arc::new(session_for("service", Some("red"), None)),
        Arc::new(SlowStore),
    );
    assert_eq!(controller.colors().primary, ColorToken::Red);

    let outcome = load.expect("load").fetch().await;
    assert!(!outcome.is_success());
    assert_eq!(
        controller.complete_load(outcome),
        LoadApplied::Defaults(TemplateId::Service.default_colors())
    );

    let write = controller.set_primary_color("green").commit().await;
    assert!(matches!(write, WriteOutcome::Failed(ThemeError::Timeout(_))));
}

/// Memory store whose saves take a while to land.
#[derive(Clone)]
struct LaggingSaves {
    inner: MemoryConfigStore,
    delay: Duration,
}

#[async_trait]
impl RemoteConfigStore for LaggingSaves {
    async fn load_config(
        &self,
        template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>> {
        self.inner.load_config(template).await
    }

    async fn save_config(
        &self,
        config: &PersistedConfig,
    ) -> anyhow::Result<()> {
        tokio::time::sleep(self.delay).await;
        self.inner.save_config(config).await
    }
}

#[tokio::test]
async fn concurrent_commits_land_in_issue_order() {
    let inner = MemoryConfigStore::with_records([tradecraft_record()]);
    let remote = LaggingSaves {
        inner: inner.clone(),
        delay: Duration::from_millis(50),
    };
    let (mut controller, _load) = ThemeController::create(
        "/tradecraft",
        ControllerOptions::default(),
        Arc::new(MemorySessionStorage::new()),
        Arc::new(remote),
    );

    let first = controller.set_primary_color("red");
    let in_flight = tokio::spawn(first.commit());
    // Let the first commit get past its read and into the slow save.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let second = controller.set_primary_color("green");
    assert!(second.commit().await.is_persisted());
    assert!(in_flight.await.expect("join").is_persisted());

    let saved: Vec<_> = inner
        .saved()
        .into_iter()
        .filter_map(|config| config.color_scheme)
        .collect();
    assert_eq!(saved, ["red", "green"]);
    assert_eq!(
        inner
            .get(TemplateId::Tradecraft)
            .and_then(|config| config.color_scheme)
            .as_deref(),
        Some("green")
    );
}
