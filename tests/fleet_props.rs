use proptest::prelude::*;
use rand::{rngs::SmallRng, SeedableRng};
use seabattle::{composition_of, expected_composition, Coord, EngineConfig, Fleet, GameError};

fn random_cells(seed: u64) -> Vec<Vec<Coord>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    Fleet::random(&mut rng).unwrap().to_cells()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Accepted fleets are ten ships, on the board, with no shared cell.
    #[test]
    fn accepted_fleets_are_well_formed(seed in any::<u64>()) {
        let cells = random_cells(seed);
        let fleet = Fleet::validate(&cells, &EngineConfig::default()).unwrap();
        prop_assert_eq!(fleet.ships().len(), 10);
        let total: usize = fleet.ships().iter().map(|s| s.len()).sum();
        prop_assert_eq!(fleet.ship_map().count_ones(), total);
        prop_assert!(cells.iter().flatten().all(Coord::is_on_board));
    }

    /// Dropping or duplicating any ship changes the histogram and is
    /// rejected on composition.
    #[test]
    fn composition_mismatch_is_rejected(seed in any::<u64>(), idx in 0..10usize, duplicate in any::<bool>()) {
        let mut cells = random_cells(seed);
        if duplicate {
            let copy = cells[idx].clone();
            cells.push(copy);
        } else {
            cells.remove(idx);
        }
        prop_assert_ne!(composition_of(&cells), expected_composition());
        let rejected = matches!(
            Fleet::validate(&cells, &EngineConfig::default()),
            Err(GameError::InvalidFleetComposition { .. })
        );
        prop_assert!(rejected);
    }

    /// Moving one cell onto another ship is always caught as an overlap.
    #[test]
    fn overlap_is_rejected(seed in any::<u64>(), from in 0..10usize, onto in 0..10usize) {
        prop_assume!(from != onto);
        let mut cells = random_cells(seed);
        let stolen = cells[onto][0];
        let last = cells[from].len() - 1;
        cells[from][last] = stolen;
        let rejected = matches!(
            Fleet::validate(&cells, &EngineConfig { allow_bent_ships: true }),
            Err(GameError::OverlapError { .. })
        );
        prop_assert!(rejected);
    }
}
