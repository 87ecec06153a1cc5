//! # Composition Graph Tests
//!
//! The graph as the host uses it: typed capabilities from `host-runtime`,
//! explicit overrides, validation failures and concurrent request scopes.

#[cfg(test)]
mod tests {
    use host_config::{ConfigSection, EnvironmentLabel, FeatureSwitches, ResolvedConfiguration};
    use host_runtime::capabilities::*;
    use host_runtime::persistence::SavingIdeaDataContext;
    use host_runtime::ports::SavingIdeaRepository;
    use host_runtime::settings::{ConnectionStrings, QlikSenseSettings, SavingIdeaSettings};
    use host_runtime::wiring::register_all;
    use service_graph::{Capability, CompositionGraph, GraphError, Lifetime, ServiceRegistry};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn settings() -> SavingIdeaSettings {
        SavingIdeaSettings {
            connection_strings: ConnectionStrings {
                saving_idea_data_context: "Server=db".to_string(),
            },
            qlik_sense: QlikSenseSettings::default(),
        }
    }

    fn host_graph() -> CompositionGraph {
        let configuration = ResolvedConfiguration::new(
            ConfigSection::from_json("test", serde_json::json!({})).unwrap(),
            vec![],
        );
        let mut graph = CompositionGraph::new(Arc::new(configuration));
        let switches = FeatureSwitches::for_environment(&EnvironmentLabel::default());
        register_all(&mut graph, settings(), switches).unwrap();
        graph
    }

    struct CountingRepository {
        context: Arc<SavingIdeaDataContext>,
    }

    impl SavingIdeaRepository for CountingRepository {
        fn data_context(&self) -> &Arc<SavingIdeaDataContext> {
            &self.context
        }

        fn add_idea(&self, _title: &str) -> usize {
            0
        }
    }

    // =============================================================================
    // LIFETIMES
    // =============================================================================

    #[test]
    fn test_singleton_resolved_twice_is_identical() {
        let registry = host_graph().finalize().unwrap();

        let first = registry.resolve(QLIK_SENSE_SERVICES).unwrap();
        let second = registry.resolve(QLIK_SENSE_SERVICES).unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let settings = registry.resolve(SAVING_IDEA_SETTINGS).unwrap();
        assert_eq!(*settings, self::settings());
    }

    #[test]
    fn test_transient_resolved_twice_is_distinct() {
        let registry = host_graph().finalize().unwrap();
        let scope = registry.create_scope();

        let first = scope.resolve(SAVING_IDEA_REPOSITORY).unwrap();
        let second = scope.resolve(SAVING_IDEA_REPOSITORY).unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.data_context().id(), second.data_context().id());
    }

    #[test]
    fn test_scoped_context_per_scope_across_threads() {
        let registry: Arc<ServiceRegistry> = Arc::new(host_graph().finalize().unwrap());

        let ids: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let registry = registry.clone();
                    s.spawn(move || {
                        let scope = registry.create_scope();
                        let ideas = scope.resolve(SAVING_IDEA_REPOSITORY).unwrap();
                        let audit = scope.resolve(AUDIT_REPOSITORY).unwrap();
                        assert!(Arc::ptr_eq(ideas.data_context(), audit.data_context()));
                        ideas.data_context().id()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_shared_scope_builds_context_once() {
        let registry = host_graph().finalize().unwrap();
        let scope = registry.create_scope();

        let ids: Vec<_> = thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| scope.resolve(DATA_CONTEXT).unwrap().id()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(scope.len(), 1);
    }

    // =============================================================================
    // OVERRIDES AND VALIDATION
    // =============================================================================

    #[test]
    fn test_duplicate_host_capability_rejected() {
        let mut graph = host_graph();
        let err = graph
            .add_singleton(TEXT_ENCODINGS, &[], |_| {
                Err(GraphError::Construction {
                    capability: TEXT_ENCODINGS.id(),
                    message: "unreachable".to_string(),
                })
            })
            .unwrap_err();

        assert!(matches!(err, GraphError::DuplicateRegistration { capability } if capability == TEXT_ENCODINGS.id()));
    }

    #[test]
    fn test_replace_swaps_repository_implementation() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = built.clone();

        let mut graph = host_graph();
        graph
            .replace(
                SAVING_IDEA_REPOSITORY,
                Lifetime::Transient,
                &[DATA_CONTEXT.id()],
                move |resolver| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    let repository: Arc<dyn SavingIdeaRepository> = Arc::new(CountingRepository {
                        context: resolver.get(DATA_CONTEXT)?,
                    });
                    Ok(repository)
                },
            )
            .unwrap();
        let registry = graph.finalize().unwrap();

        let scope = registry.create_scope();
        let repository = scope.resolve(SAVING_IDEA_REPOSITORY).unwrap();
        assert_eq!(repository.add_idea("ignored"), 0);
        assert_eq!(built.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_mutual_dependency_is_a_cycle_error() {
        const A: Capability<String> = Capability::new("a");
        const B: Capability<String> = Capability::new("b");

        let mut graph = host_graph();
        graph
            .add_singleton(A, &[B.id()], |r| Ok(Arc::new(format!("a({})", r.get(B)?))))
            .unwrap();
        graph
            .add_singleton(B, &[A.id()], |r| Ok(Arc::new(format!("b({})", r.get(A)?))))
            .unwrap();

        match graph.finalize() {
            Err(GraphError::CycleDetected { cycle }) => {
                assert_eq!(cycle.first(), cycle.last());
                assert!(cycle.contains(&A.id()) && cycle.contains(&B.id()));
            }
            other => panic!("expected cycle, got {other:?}"),
        }
    }

    #[test]
    fn test_singleton_capturing_data_context_rejected() {
        const REPORT: Capability<String> = Capability::new("nightly-report");

        let mut graph = host_graph();
        graph
            .add_singleton(REPORT, &[SAVING_IDEA_REPOSITORY.id()], |_| Ok(Arc::new("report".to_string())))
            .unwrap();

        match graph.finalize() {
            Err(GraphError::LifetimeMismatch {
                capability,
                dependency,
            }) => {
                assert_eq!(capability, REPORT.id());
                assert_eq!(dependency, DATA_CONTEXT.id());
            }
            other => panic!("expected lifetime mismatch, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_dependency_names_both_ends() {
        const EXPORT: Capability<String> = Capability::new("idea-export");
        const MAILER: Capability<String> = Capability::new("mailer");

        let mut graph = host_graph();
        graph
            .add_transient(EXPORT, &[MAILER.id(), TEXT_ENCODINGS.id()], |_| Ok(Arc::new(String::new())))
            .unwrap();

        let err = graph.finalize().unwrap_err();
        assert!(matches!(
            err,
            GraphError::MissingDependency { capability, dependency }
                if capability == EXPORT.id() && dependency == MAILER.id()
        ));
    }

    #[test]
    fn test_graph_edges_are_enumerable() {
        let registry = host_graph().finalize().unwrap();
        let edges = registry.edges();

        assert!(edges.contains(&(QLIK_SENSE_SERVICES.id(), QLIK_SENSE_APP_DATA.id())));
        assert!(edges.contains(&(AUDIT_REPOSITORY.id(), DATA_CONTEXT.id())));
        assert_eq!(registry.dependencies_of(TEXT_ENCODINGS.id()), Some(&[][..]));
    }
}
