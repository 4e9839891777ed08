//! Random starting layout generation for the world crate.

use std::collections::HashSet;

use cat_chase_core::{CellCoord, Grid};
use rand::{seq::SliceRandom, Rng};

/// Uniform samples drawn per entity before falling back to a free-cell scan.
pub(crate) const PLACEMENT_ATTEMPTS: u32 = 64;

/// Distinct starting cells for every entity of a game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    /// Starting cell of the cat.
    pub(crate) cat: CellCoord,
    /// Starting cells of the mice, in id order.
    pub(crate) mice: Vec<CellCoord>,
    /// Fixed cells of the houses, in id order.
    pub(crate) houses: Vec<CellCoord>,
}

/// Places the cat, then the mice, then the houses on pairwise distinct cells.
///
/// Returns `None` only when the grid runs out of free cells, which a validated
/// configuration rules out.
pub(crate) fn generate_layout<R>(
    rng: &mut R,
    grid: Grid,
    mice: u32,
    houses: u32,
) -> Option<Layout>
where
    R: Rng + ?Sized,
{
    let mut occupied = HashSet::new();

    let cat = claim_cell(rng, grid, &mut occupied)?;
    let mice = (0..mice)
        .map(|_| claim_cell(rng, grid, &mut occupied))
        .collect::<Option<Vec<_>>>()?;
    let houses = (0..houses)
        .map(|_| claim_cell(rng, grid, &mut occupied))
        .collect::<Option<Vec<_>>>()?;

    Some(Layout { cat, mice, houses })
}

fn claim_cell<R>(
    rng: &mut R,
    grid: Grid,
    occupied: &mut HashSet<CellCoord>,
) -> Option<CellCoord>
where
    R: Rng + ?Sized,
{
    if grid.capacity() == 0 {
        return None;
    }

    for _ in 0..PLACEMENT_ATTEMPTS {
        let cell = CellCoord::new(
            rng.gen_range(0..grid.columns()),
            rng.gen_range(0..grid.rows()),
        );
        if occupied.insert(cell) {
            return Some(cell);
        }
    }

    let free: Vec<CellCoord> = grid
        .cells()
        .filter(|cell| !occupied.contains(cell))
        .collect();
    let cell = *free.choose(rng)?;
    let _ = occupied.insert(cell);
    log::debug!("placement fell back to a free-cell scan after {PLACEMENT_ATTEMPTS} samples");
    Some(cell)
}
