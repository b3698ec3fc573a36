//! Tests for the solve loop, restart policy and parameter validation

#[cfg(test)]
mod tests {
    use edgetile::AlgorithmError;
    use edgetile::algorithm::executor::{CollapseExecutor, RestartPolicy};
    use edgetile::algorithm::propagation::find_conflict;
    use edgetile::algorithm::solver::StepResult;
    use edgetile::io::configuration::{DEFAULT_MAX_ATTEMPTS, MAX_GRID_DIMENSION};
    use edgetile::spatial::TileCatalog;
    use edgetile::spatial::tiles::BaseTile;
    use std::sync::Arc;

    fn catalog(tiles: &[(&str, [&str; 4])]) -> Arc<TileCatalog> {
        let base: Vec<BaseTile> = tiles
            .iter()
            .map(|(name, edges)| BaseTile::new(*name, format!("{name}.png"), edges.map(String::from)))
            .collect();
        Arc::new(TileCatalog::from_base_tiles(&base).expect("valid catalog"))
    }

    fn unsolvable() -> Arc<TileCatalog> {
        catalog(&[("ab", ["AB"; 4]), ("cd", ["CD"; 4])])
    }

    // Tests a limit of zero means retry forever and other limits are kept
    // Verified by mapping zero to a single attempt
    #[test]
    fn test_policy_from_limit() {
        assert_eq!(RestartPolicy::from_limit(0), RestartPolicy::unbounded());
        assert_eq!(RestartPolicy::from_limit(3), RestartPolicy::bounded(3));
        assert_eq!(
            RestartPolicy::default().max_attempts,
            Some(DEFAULT_MAX_ATTEMPTS)
        );
    }

    // Tests bounded policies allow attempts up to and including the limit
    // Verified by using a strict comparison against the limit
    #[test]
    fn test_policy_allows() {
        let policy = RestartPolicy::bounded(2);
        assert!(policy.allows(1));
        assert!(policy.allows(2));
        assert!(!policy.allows(3));
        assert!(RestartPolicy::unbounded().allows(usize::MAX));
    }

    // Tests invalid grid sizes and attempt limits are rejected up front
    // Verified by removing the dimension checks
    #[test]
    fn test_new_rejects_invalid_parameters() {
        let tiles = catalog(&[("plain", ["A"; 4])]);

        for (width, height) in [(0, 3), (3, 0), (MAX_GRID_DIMENSION + 1, 1)] {
            let result =
                CollapseExecutor::new(Arc::clone(&tiles), width, height, RestartPolicy::default(), 1);
            assert!(matches!(
                result,
                Err(AlgorithmError::InvalidParameter { .. })
            ));
        }

        let result = CollapseExecutor::new(tiles, 2, 2, RestartPolicy::bounded(0), 1);
        assert!(matches!(
            result,
            Err(AlgorithmError::InvalidParameter {
                parameter: "max_attempts",
                ..
            })
        ));
    }

    // Tests a solvable grid completes without restarts
    // Verified by returning before the grid is complete
    #[test]
    fn test_run_completes() {
        let tiles = catalog(&[("plain", ["A"; 4])]);
        let mut executor =
            CollapseExecutor::new(tiles, 2, 2, RestartPolicy::default(), 42).expect("executor");

        let restarts = executor.run().expect("solvable");

        assert_eq!(restarts, 0);
        assert!(executor.is_complete());
        assert_eq!(executor.attempt(), 1);
        assert_eq!(executor.steps(), 5);
        for (_, cell) in executor.grid().cells() {
            assert_eq!(cell.resolved(), Some(0));
        }
    }

    // Tests exhausting the attempt limit reports the unsolvable configuration
    // Verified by restarting without consulting the policy
    #[test]
    fn test_bounded_attempts_exhausted() {
        let mut executor =
            CollapseExecutor::new(unsolvable(), 2, 1, RestartPolicy::bounded(3), 7).expect("executor");

        let result = executor.run();

        assert!(matches!(
            result,
            Err(AlgorithmError::UnsolvableConfiguration {
                attempts: 3,
                dimensions: (2, 1),
            })
        ));
        assert_eq!(executor.restarts(), 2);
    }

    // Tests a contradiction replaces the grid with a fresh one
    // Verified by keeping the failed grid after a restart
    #[test]
    fn test_restart_starts_fresh_grid() {
        let mut executor =
            CollapseExecutor::new(unsolvable(), 2, 1, RestartPolicy::bounded(5), 3).expect("executor");

        let first = executor.step().expect("collapse");
        assert!(matches!(first, StepResult::Collapsed { .. }));

        let second = executor.step().expect("restart allowed");
        assert!(second.is_contradiction());
        assert_eq!(executor.attempt(), 2);
        assert_eq!(executor.grid().resolved_count(), 0);
        assert_eq!(executor.grid().cell([0, 0]).entropy(), 2);
    }

    // Tests identical seeds reproduce the same grid
    // Verified by seeding each executor differently
    #[test]
    fn test_seeded_runs_reproducible() {
        let tiles = catalog(&[("red", ["A"; 4]), ("blue", ["A"; 4]), ("green", ["A"; 4])]);
        let solve = |seed| {
            let mut executor =
                CollapseExecutor::new(Arc::clone(&tiles), 6, 5, RestartPolicy::default(), seed)
                    .expect("executor");
            executor.run().expect("solvable");
            executor
                .grid()
                .cells()
                .map(|(_, cell)| cell.resolved())
                .collect::<Vec<_>>()
        };

        assert_eq!(solve(9), solve(9));
    }

    // Tests every step is reported to the observer and the result has no conflicts
    // Verified by skipping the callback on the final step
    #[test]
    fn test_run_with_reports_steps() {
        let tiles = catalog(&[("red", ["A"; 4]), ("blue", ["A"; 4])]);
        let mut executor =
            CollapseExecutor::new(tiles, 3, 3, RestartPolicy::default(), 2).expect("executor");
        let mut reported = 0;
        let mut last_resolved = 0;

        executor
            .run_with(|state, _| {
                reported += 1;
                last_resolved = state.grid().resolved_count();
            })
            .expect("solvable");

        assert_eq!(reported, executor.steps());
        assert_eq!(last_resolved, 9);
        assert_eq!(find_conflict(executor.grid(), executor.catalog()), None);
    }

    // Tests visualization records placements and restarts when enabled
    // Verified by recording only placements
    #[test]
    fn test_visualization_records_restarts() {
        let mut executor =
            CollapseExecutor::new(unsolvable(), 2, 1, RestartPolicy::bounded(2), 4).expect("executor");
        executor.enable_visualization();

        assert!(executor.run().is_err());

        let capture = executor.visualization.as_ref().expect("enabled");
        assert_eq!(capture.restart_count(), 1);
        assert_eq!(capture.event_count(), 3);
    }
}
