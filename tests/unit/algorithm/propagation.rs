//! Tests for neighbour pressure, candidate elimination and conflict detection

#[cfg(test)]
mod tests {
    use edgetile::algorithm::propagation::{
        constrain_from_neighbors, find_conflict, neighbor_pressure,
    };
    use edgetile::spatial::edges::Side;
    use edgetile::spatial::tiles::BaseTile;
    use edgetile::spatial::{ConstraintGrid, TileCatalog};

    fn tile(name: &str, edges: [&str; 4]) -> BaseTile {
        BaseTile::new(name, format!("{name}.png"), edges.map(String::from))
    }

    // Tile 0 exposes "AAB" on its right; only tile 1 mirrors it on its left
    fn seam_catalog() -> TileCatalog {
        TileCatalog::from_base_tiles(&[
            tile("source", ["A", "AAB", "A", "A"]),
            tile("mirror", ["A", "A", "A", "BAA"]),
            tile("copy", ["A", "A", "A", "AAB"]),
        ])
        .expect("valid catalog")
    }

    // Tests a resolved left neighbour removes every candidate whose left edge does not mirror it
    // Verified by comparing edges without reversing
    #[test]
    fn test_constrain_eliminates_mismatches() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 1, &catalog);
        grid.resolve([0, 0], 0);

        let outcome = constrain_from_neighbors(&mut grid, &catalog, [0, 1]);

        assert_eq!(outcome.eliminated, 2);
        assert_eq!(grid.cell([0, 1]).possible_tiles().to_vec(), vec![1]);
    }

    // Tests off-grid directions add pressure without eliminating anything
    // Verified by skipping off-grid directions in the pressure count
    #[test]
    fn test_constrain_off_grid_pressure() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 1, &catalog);
        grid.resolve([0, 0], 0);

        let outcome = constrain_from_neighbors(&mut grid, &catalog, [0, 1]);
        assert_eq!(outcome.pressure, 4);

        let mut fresh = ConstraintGrid::new(3, 3, &catalog);
        let center = constrain_from_neighbors(&mut fresh, &catalog, [1, 1]);
        assert_eq!(center.pressure, 0);
        assert_eq!(center.eliminated, 0);
        assert_eq!(fresh.cell([1, 1]).entropy(), catalog.len());
    }

    // Tests undecided neighbours leave the cell untouched
    // Verified by constraining against every candidate of undecided neighbours
    #[test]
    fn test_constrain_ignores_undecided_neighbours() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 1, &catalog);

        let outcome = constrain_from_neighbors(&mut grid, &catalog, [0, 1]);

        assert_eq!(outcome.eliminated, 0);
        assert_eq!(outcome.pressure, 3);
        assert_eq!(grid.cell([0, 1]).entropy(), 3);
    }

    // Tests repeated narrowing never grows the possibility set
    // Verified by resetting the cell to all tiles before constraining
    #[test]
    fn test_constrain_monotonic() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 1, &catalog);
        grid.resolve([0, 0], 0);

        constrain_from_neighbors(&mut grid, &catalog, [0, 1]);
        let after_first = grid.cell([0, 1]).possible_tiles().clone();
        let second = constrain_from_neighbors(&mut grid, &catalog, [0, 1]);

        assert_eq!(second.eliminated, 0);
        assert_eq!(grid.cell([0, 1]).possible_tiles(), &after_first);
    }

    // Tests read-only pressure matches grid boundaries and decided cells
    // Verified by counting undecided neighbours as pressure
    #[test]
    fn test_neighbor_pressure() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(3, 3, &catalog);

        assert_eq!(neighbor_pressure(&grid, [1, 1]), 0);
        assert_eq!(neighbor_pressure(&grid, [0, 0]), 2);
        assert_eq!(neighbor_pressure(&grid, [0, 1]), 1);

        grid.resolve([0, 1], 0);
        grid.resolve([1, 0], 0);
        assert_eq!(neighbor_pressure(&grid, [1, 1]), 2);
    }

    // Tests narrowing reports the same pressure as the read-only count
    // Verified by counting only decided neighbours while narrowing
    #[test]
    fn test_constrain_pressure_matches_read_only_count() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(3, 2, &catalog);
        grid.resolve([0, 0], 0);

        for position in grid.positions() {
            if grid.cell(position).is_resolved() {
                continue;
            }
            let expected = neighbor_pressure(&grid, position);
            let outcome = constrain_from_neighbors(&mut grid, &catalog, position);
            assert_eq!(outcome.pressure, expected, "pressure at {position:?}");
        }
    }

    // Tests mismatched decided neighbours are reported with the facing side
    // Verified by checking only the bottom neighbour
    #[test]
    fn test_find_conflict() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 1, &catalog);
        grid.resolve([0, 0], 0);
        grid.resolve([0, 1], 2);

        assert_eq!(find_conflict(&grid, &catalog), Some(([0, 0], Side::Right)));
    }

    // Tests matching neighbours and undecided cells produce no conflict
    // Verified by treating undecided cells as mismatches
    #[test]
    fn test_find_conflict_none() {
        let catalog = seam_catalog();
        let mut grid = ConstraintGrid::new(2, 2, &catalog);
        assert_eq!(find_conflict(&grid, &catalog), None);

        grid.resolve([0, 0], 0);
        grid.resolve([0, 1], 1);
        assert_eq!(find_conflict(&grid, &catalog), None);
    }
}
