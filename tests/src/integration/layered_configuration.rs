//! # Layered Configuration Tests
//!
//! Classifier, resolver and feature gate as the host sees them:
//!
//! 1. **Classification**: override variable or the `Production` default
//! 2. **Precedence**: base < host file < environment file < variables
//! 3. **Gate independence**: file values never change the gate

#[cfg(test)]
mod tests {
    use host_config::{
        is_development, ConfigurationResolver, EnvironmentClassifier, EnvironmentLabel, SourceLayout,
        SourceStatus, StaticHost,
    };
    use host_runtime::capabilities::PERSISTENCE_OPTIONS;
    use host_runtime::{Startup, StartupOptions};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const SETTINGS: &str = r#"{
        "SavingIdeaSettings": {
            "ConnectionStrings": { "SavingIdeaDataContext": "Server=base" }
        },
        "Db": { "Timeout": 30, "Pooling": true }
    }"#;

    fn write(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(name), contents).unwrap();
    }

    fn workspace() -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "appsettings.json", SETTINGS);
        dir
    }

    // =============================================================================
    // CLASSIFICATION
    // =============================================================================

    #[test]
    fn test_unset_override_is_production() {
        let label = EnvironmentClassifier::default().classify(&StaticHost::new("."));
        assert_eq!(label.as_str(), "Production");
        assert!(!is_development(&label));
    }

    #[test]
    fn test_staging_is_kept_verbatim() {
        let host = StaticHost::new(".").with_var("APP_ENVIRONMENT", "Staging");
        assert_eq!(EnvironmentClassifier::default().classify(&host).as_str(), "Staging");

        let host = StaticHost::new(".").with_var("APP_ENVIRONMENT", "staging");
        assert_eq!(EnvironmentClassifier::default().classify(&host).as_str(), "staging");
    }

    #[test]
    fn test_blank_override_is_production() {
        let host = StaticHost::new(".").with_var("APP_ENVIRONMENT", "   ");
        assert_eq!(EnvironmentClassifier::default().classify(&host).as_str(), "Production");
    }

    #[test]
    fn test_host_name_is_not_the_label() {
        let host = StaticHost::new(".").with_host_name("Development");
        assert_eq!(EnvironmentClassifier::default().classify(&host).as_str(), "Production");
    }

    // =============================================================================
    // PRECEDENCE THROUGH THE ORCHESTRATOR
    // =============================================================================

    #[test]
    fn test_timeout_scenario_resolves_to_ninety() {
        let dir = workspace();
        write(dir.path(), "appsettings.Production.json", r#"{"Db": {"Timeout": 60}}"#);
        let host = StaticHost::new(dir.path()).with_var("Db__Timeout", "90");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();

        assert_eq!(ready.configuration().get_i64("Db:Timeout").unwrap(), Some(90));
        assert_eq!(ready.configuration().get_bool("Db:Pooling").unwrap(), Some(true));
    }

    #[test]
    fn test_host_and_environment_files_layer_in_order() {
        let dir = workspace();
        write(
            dir.path(),
            "appsettings.build-01.json",
            r#"{"Db": {"Timeout": 45, "Host": "build-db"}}"#,
        );
        write(dir.path(), "appsettings.Staging.json", r#"{"Db": {"Timeout": 50}}"#);
        let host = StaticHost::new(dir.path())
            .with_host_name("BUILD-01")
            .with_var("APP_ENVIRONMENT", "Staging");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let config = ready.configuration();

        assert_eq!(config.get_i64("Db:Timeout").unwrap(), Some(50));
        assert_eq!(config.get_string("Db:Host").as_deref(), Some("build-db"));

        let statuses: Vec<SourceStatus> = config.sources().iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            vec![
                SourceStatus::Loaded,
                SourceStatus::Loaded,
                SourceStatus::Loaded,
                SourceStatus::Loaded
            ]
        );
    }

    #[test]
    fn test_missing_optional_layers_are_reported_skipped() {
        let dir = workspace();
        let host = StaticHost::new(dir.path()).with_host_name("lonely");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let skipped = ready
            .configuration()
            .sources()
            .iter()
            .filter(|s| s.status == SourceStatus::Skipped)
            .count();

        // host file and environment file
        assert_eq!(skipped, 2);
        assert_eq!(ready.configuration().get_i64("Db:Timeout").unwrap(), Some(30));
    }

    #[test]
    fn test_custom_layout_stem_and_prefix() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "ideas.json", SETTINGS);
        let host = StaticHost::new(dir.path())
            .with_var("IDEAS_Db__Timeout", "75")
            .with_var("Db__Timeout", "5");
        let options = StartupOptions {
            layout: Some(
                SourceLayout::new(dir.path())
                    .with_file_stem("ideas")
                    .with_environment_prefix("IDEAS_"),
            ),
            ..StartupOptions::default()
        };

        let ready = Startup::new(host, options).compose().unwrap();
        assert_eq!(ready.configuration().get_i64("Db:Timeout").unwrap(), Some(75));
    }

    #[test]
    fn test_scalar_variable_keeps_nested_connection_string() {
        let dir = workspace();
        write(dir.path(), "appsettings.Production.json", r#"{"Db": null}"#);
        let host = StaticHost::new(dir.path()).with_var("SavingIdeaSettings", "x");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let config = ready.configuration();

        assert_eq!(config.get_string("SavingIdeaSettings").as_deref(), Some("x"));
        assert_eq!(config.get_string("Db"), None);
        assert_eq!(config.get_i64("Db:Timeout").unwrap(), Some(30));

        let options = ready.registry().resolve(PERSISTENCE_OPTIONS).unwrap();
        assert_eq!(options.connection_string(), "Server=base");
    }

    #[test]
    fn test_resolver_is_deterministic_across_runs() {
        let dir = workspace();
        write(dir.path(), "appsettings.Production.json", r#"{"Zeta": 1, "alpha": {"b": 2, "A": 1}}"#);
        let host = StaticHost::new(dir.path())
            .with_var("Zeta", "3")
            .with_var("Mid__Value", "x");
        let layout = SourceLayout::new(dir.path());
        let label = EnvironmentLabel::default();

        let first = ConfigurationResolver::standard(&layout, &host, &label)
            .resolve()
            .unwrap()
            .to_canonical_json();
        let second = ConfigurationResolver::standard(&layout, &host, &label)
            .resolve()
            .unwrap()
            .to_canonical_json();

        assert_eq!(first, second);
    }

    // =============================================================================
    // GATE INDEPENDENCE
    // =============================================================================

    #[test]
    fn test_sensitive_file_flag_does_not_change_gate() {
        let dir = workspace();
        write(dir.path(), "appsettings.Production.json", r#"{"Logging": {"Sensitive": true}}"#);

        let ready = Startup::new(StaticHost::new(dir.path()), StartupOptions::default())
            .compose()
            .unwrap();

        assert!(!is_development(ready.environment()));
        assert!(!ready.switches().sensitive_data_logging);
        assert_eq!(ready.configuration().get_bool("Logging:Sensitive").unwrap(), Some(true));

        let options = ready.registry().resolve(PERSISTENCE_OPTIONS).unwrap();
        assert!(options.sensitive_data_logging());
    }

    #[test]
    fn test_development_enables_sensitive_logging_without_flag() {
        let dir = workspace();
        let host = StaticHost::new(dir.path()).with_var("APP_ENVIRONMENT", "development");

        let ready = Startup::new(host, StartupOptions::default()).compose().unwrap();
        let options = ready.registry().resolve(PERSISTENCE_OPTIONS).unwrap();

        assert!(is_development(ready.environment()));
        assert!(options.sensitive_data_logging());
    }
}
