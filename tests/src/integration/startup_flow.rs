//! # Startup Flow Tests
//!
//! The orchestrator end to end against on-disk configuration:
//! classify, resolve, register, finalize, then request scopes.
//!
//! `run_once` is exercised in `host-runtime`'s own test binary; these tests
//! only call `compose`, which never publishes.

#[cfg(test)]
mod tests {
    use host_config::{ConfigError, StaticHost};
    use host_runtime::capabilities::*;
    use host_runtime::{published, QueryTrackingBehavior, Startup, StartupError, StartupOptions};
    use service_graph::{GraphError, Lifetime};
    use std::fs;
    use std::sync::Arc;
    use tempfile::TempDir;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const BASE: &str = r#"{
        "SavingIdeaSettings": {
            "ConnectionStrings": { "SavingIdeaDataContext": "Server=prod-db;Database=ideas" },
            "QlikSense": { "ServerUrl": "https://qlik.example", "SheetIds": ["overview"] }
        }
    }"#;

    fn workspace(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, contents) in files {
            fs::write(dir.path().join(name), contents).unwrap();
        }
        dir
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[test]
    fn test_full_composition_in_development() {
        let dir = workspace(&[
            ("appsettings.json", BASE),
            (
                "appsettings.dev-box.json",
                r#"{"SavingIdeaSettings": {"QlikSense": {"AppId": "local-app"}}}"#,
            ),
            (
                "appsettings.Development.json",
                r#"{"SavingIdeaSettings": {"ConnectionStrings": {"SavingIdeaDataContext": "Server=localhost"}}}"#,
            ),
        ]);
        let host = StaticHost::new(dir.path())
            .with_host_name("Dev-Box")
            .with_var("APP_ENVIRONMENT", "Development");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let registry = ready.registry();

        assert_eq!(ready.environment().as_str(), "Development");
        assert_eq!(registry.count_by_lifetime(Lifetime::Singleton), 6);
        assert_eq!(registry.count_by_lifetime(Lifetime::Scoped), 1);
        assert_eq!(registry.count_by_lifetime(Lifetime::Transient), 2);

        let options = registry.resolve(PERSISTENCE_OPTIONS).unwrap();
        assert_eq!(options.connection_string(), "Server=localhost");
        assert_eq!(options.query_tracking(), QueryTrackingBehavior::NoTracking);
        assert!(options.sensitive_data_logging());

        let qlik = registry.resolve(QLIK_SENSE_SERVICES).unwrap();
        assert!(qlik.is_configured());
        assert_eq!(
            qlik.sheet_url("overview").as_deref(),
            Some("https://qlik.example/sense/app/local-app/sheet/overview/state/analysis")
        );

        assert!(published().is_none());
    }

    #[test]
    fn test_request_scope_unit_of_work() {
        let dir = workspace(&[("appsettings.json", BASE)]);
        let ready = Startup::new(StaticHost::new(dir.path()), StartupOptions::default())
            .compose()
            .unwrap();

        let scope = ready.registry().create_scope();
        let ideas = scope.resolve(SAVING_IDEA_REPOSITORY).unwrap();
        let audit = scope.resolve(AUDIT_REPOSITORY).unwrap();

        ideas.add_idea("Reuse packaging");
        audit.record("svc-import", "create");

        let context = scope.resolve(DATA_CONTEXT).unwrap();
        assert_eq!(context.pending_changes().len(), 2);
        assert_eq!(context.save_changes(), 2);
        assert!(!context.options().sensitive_data_logging());
    }

    #[test]
    fn test_ready_host_is_shareable() {
        let dir = workspace(&[("appsettings.json", BASE)]);
        let ready = Startup::new(StaticHost::new(dir.path()), StartupOptions::default())
            .compose()
            .unwrap();
        let copy = ready.clone();

        assert!(Arc::ptr_eq(ready.registry(), copy.registry()));
        assert!(Arc::ptr_eq(ready.configuration(), copy.configuration()));
        assert!(std::ptr::eq(
            ready.registry().configuration(),
            ready.configuration().as_ref()
        ));
    }

    // =============================================================================
    // ABORTED STARTUP
    // =============================================================================

    #[test]
    fn test_missing_connection_string_aborts_with_key_path() {
        let dir = workspace(&[("appsettings.json", r#"{"SavingIdeaSettings": {"ConnectionStrings": {}}}"#)]);
        let err = Startup::new(StaticHost::new(dir.path()), StartupOptions::default())
            .compose()
            .unwrap_err();

        match err {
            StartupError::Configuration(ConfigError::MissingRequiredValue { path }) => {
                assert_eq!(path, "SavingIdeaSettings:ConnectionStrings:SavingIdeaDataContext")
            }
            other => panic!("expected missing value, got {other:?}"),
        }
    }

    #[test]
    fn test_connection_string_from_environment_variable() {
        let dir = workspace(&[]);
        let host = StaticHost::new(dir.path()).with_var(
            "SavingIdeaSettings__ConnectionStrings__SavingIdeaDataContext",
            "Server=from-env",
        );

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let options = ready.registry().resolve(PERSISTENCE_OPTIONS).unwrap();
        assert_eq!(options.connection_string(), "Server=from-env");
    }

    #[test]
    fn test_malformed_environment_file_aborts() {
        let dir = workspace(&[
            ("appsettings.json", BASE),
            ("appsettings.Staging.json", "{\n  \"Db\": [1, 2,\n}"),
        ]);
        let host = StaticHost::new(dir.path()).with_var("APP_ENVIRONMENT", "Staging");

        let err = Startup::new(host, StartupOptions::default()).compose().unwrap_err();
        match err {
            StartupError::Configuration(ConfigError::Parse { source_name, line, .. }) => {
                assert!(source_name.ends_with("appsettings.Staging.json"));
                assert!(line >= 2);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_sensitive_flag_aborts_in_finalize() {
        let dir = workspace(&[
            ("appsettings.json", BASE),
            ("appsettings.Production.json", r#"{"Logging": {"Sensitive": 3}}"#),
        ]);

        let err = Startup::new(StaticHost::new(dir.path()), StartupOptions::default())
            .compose()
            .unwrap_err();
        assert!(matches!(
            err,
            StartupError::Composition(GraphError::Configuration(ConfigError::InvalidValue { .. }))
        ));
    }
}
