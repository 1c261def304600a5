//! Conway transition rules and termination classification.
//!
//! Every function here is pure: grids go in by reference and new grids come
//! out, so a driver can compare the previous and next generation directly.

use crate::grid::Grid;
use life_core::{Classification, Direction, Position, StepReport};
use tracing::{debug, trace};

/// Live neighbors of `pos` in its Moore neighborhood, in `[0, 8]`.
///
/// The grid is bounded: neighbors that would fall off an edge are not
/// counted, and nothing wraps around.
pub fn count_neighbors(grid: &Grid, pos: Position) -> u8 {
    Direction::all()
        .iter()
        .filter_map(|dir| {
            let (d_row, d_col) = dir.to_delta();
            pos.offset(d_row, d_col, grid.size())
        })
        .filter(|&neighbor| grid.is_alive(neighbor))
        .count() as u8
}

/// Next state of a single cell given its current state and live neighbor count.
pub fn next_state(alive: bool, neighbors: u8) -> bool {
    match (alive, neighbors) {
        (true, 2) | (true, 3) => true, // Survival
        (false, 3) => true,            // Birth
        _ => false,                    // Under/overpopulation, or stays dead
    }
}

/// Compute the next generation.
///
/// Neighbors are always counted against `grid`, never against the grid being
/// built, so evaluation order cannot affect the result. `grid` is untouched.
pub fn step(grid: &Grid) -> Grid {
    let cells = grid
        .iter()
        .map(|(pos, alive)| next_state(alive, count_neighbors(grid, pos)))
        .collect();
    Grid::from_parts(grid.size(), cells)
}

/// Classify the transition from `previous` to `next`.
///
/// Extinction is checked first, so an all-dead grid is `Extinct` even when it
/// also equals `previous`.
pub fn classify(previous: &Grid, next: &Grid) -> Classification {
    if next.is_extinct() {
        Classification::Extinct
    } else if previous == next {
        Classification::Stable
    } else {
        Classification::Ongoing
    }
}

/// Step once, classify, and gather births/deaths for the new grid, which
/// becomes generation `generation`.
pub fn advance(grid: &Grid, generation: u64) -> (Grid, StepReport) {
    let next = step(grid);
    let classification = classify(grid, &next);

    let mut births = 0;
    let mut deaths = 0;
    for ((_, before), (_, after)) in grid.iter().zip(next.iter()) {
        match (before, after) {
            (false, true) => births += 1,
            (true, false) => deaths += 1,
            _ => {}
        }
    }

    let report = StepReport {
        generation,
        classification,
        population: next.population(),
        births,
        deaths,
    };

    trace!("\n{}", next);
    debug!(
        generation,
        population = report.population,
        births,
        deaths,
        classification = %classification,
        "Generation computed"
    );

    (next, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(size: usize, alive: &[(usize, usize)]) -> Grid {
        Grid::with_alive(size, alive).unwrap()
    }

    #[test]
    fn test_neighbors_do_not_wrap() {
        let g = grid(3, &[(0, 0)]);
        assert_eq!(count_neighbors(&g, Position::new(0, 0)), 0);
        assert_eq!(count_neighbors(&g, Position::new(1, 1)), 1);
        assert_eq!(count_neighbors(&g, Position::new(2, 2)), 0);
        assert_eq!(count_neighbors(&g, Position::new(0, 2)), 0);
    }

    #[test]
    fn test_neighbors_full_grid() {
        let g = Grid::from_rows(vec![vec![true; 3]; 3]).unwrap();
        assert_eq!(count_neighbors(&g, Position::new(1, 1)), 8);
        assert_eq!(count_neighbors(&g, Position::new(0, 0)), 3);
        assert_eq!(count_neighbors(&g, Position::new(0, 1)), 5);
    }

    #[test]
    fn test_next_state_table() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {}", n);
            assert_eq!(next_state(false, n), n == 3, "dead with {}", n);
        }
    }

    #[test]
    fn test_birth() {
        let g = grid(3, &[(0, 1), (1, 0), (1, 2)]);
        assert_eq!(count_neighbors(&g, Position::new(1, 1)), 3);
        let next = step(&g);
        assert!(next.is_alive(Position::new(1, 1)));
    }

    #[test]
    fn test_death_by_isolation() {
        for size in [3, 4, 10] {
            let g = grid(size, &[(1, 1)]);
            let next = step(&g);
            assert!(next.is_extinct());
            assert_eq!(classify(&g, &next), Classification::Extinct);
        }
    }

    #[test]
    fn test_block_is_stable() {
        let g = grid(4, &[(1, 1), (1, 2), (2, 1), (2, 2)]);
        let next = step(&g);
        assert_eq!(next, g);
        assert_eq!(classify(&g, &next), Classification::Stable);
    }

    #[test]
    fn test_blinker_oscillates() {
        let horizontal = grid(5, &[(2, 1), (2, 2), (2, 3)]);
        let vertical = grid(5, &[(1, 2), (2, 2), (3, 2)]);

        let first = step(&horizontal);
        assert_eq!(first, vertical);
        assert_eq!(classify(&horizontal, &first), Classification::Ongoing);

        let second = step(&first);
        assert_eq!(second, horizontal);
        assert_eq!(classify(&first, &second), Classification::Ongoing);
    }

    #[test]
    fn test_extinct_takes_precedence_over_stable() {
        let empty = Grid::empty(4).unwrap();
        let next = step(&empty);
        assert_eq!(next, empty);
        assert_eq!(classify(&empty, &next), Classification::Extinct);
    }

    #[test]
    fn test_step_does_not_mutate_input() {
        let g = grid(5, &[(2, 1), (2, 2), (2, 3), (0, 0)]);
        let snapshot = g.clone();
        let _ = step(&g);
        assert_eq!(g, snapshot);
    }

    #[test]
    fn test_edge_blinker_is_clipped() {
        // A blinker along the top edge loses its off-grid arm.
        let g = grid(5, &[(0, 1), (0, 2), (0, 3)]);
        let next = step(&g);
        assert_eq!(next, grid(5, &[(0, 2), (1, 2)]));
    }

    #[test]
    fn test_advance_reports_counts() {
        let horizontal = grid(5, &[(2, 1), (2, 2), (2, 3)]);
        let (next, report) = advance(&horizontal, 1);
        assert_eq!(next, step(&horizontal));
        assert_eq!(report.generation, 1);
        assert_eq!(report.population, 3);
        assert_eq!(report.births, 2);
        assert_eq!(report.deaths, 2);
        assert_eq!(report.classification, Classification::Ongoing);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_grid() -> impl Strategy<Value = Grid> {
        (1usize..=12).prop_flat_map(|size| {
            prop::collection::vec(prop::collection::vec(any::<bool>(), size), size)
                .prop_map(|rows| Grid::from_rows(rows).unwrap())
        })
    }

    proptest! {
        #[test]
        fn step_is_deterministic(g in arb_grid()) {
            prop_assert_eq!(step(&g), step(&g));
        }

        #[test]
        fn step_leaves_input_unchanged(g in arb_grid()) {
            let before = g.clone();
            let next = step(&g);
            prop_assert_eq!(&g, &before);
            prop_assert_eq!(next.size(), g.size());
        }

        #[test]
        fn neighbor_count_is_bounded(g in arb_grid(), row in 0usize..12, col in 0usize..12) {
            let size = g.size();
            let pos = Position::new(row % size, col % size);
            let n = count_neighbors(&g, pos);
            prop_assert!(n <= 8);
            prop_assert!(usize::from(n) <= g.population());
        }

        #[test]
        fn classification_matches_grids(g in arb_grid()) {
            let next = step(&g);
            let expected = if next.is_extinct() {
                Classification::Extinct
            } else if next == g {
                Classification::Stable
            } else {
                Classification::Ongoing
            };
            prop_assert_eq!(classify(&g, &next), expected);
        }
    }
}
