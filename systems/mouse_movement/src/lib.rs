#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy movement system that steers every active mouse toward the nearest
//! vacant house.
//!
//! The heuristic ignores obstacles and never backtracks: on a mice turn each
//! eligible mouse moves one unit along every axis that differs from its goal.

use cat_chase_core::{CellCoord, Command, Event, HouseView, MouseView};

/// Pure system that reacts to cat moves and emits mouse step commands.
#[derive(Debug, Default)]
pub struct MouseMovement {
    vacancies: Vec<CellCoord>,
}

impl MouseMovement {
    /// Creates a movement system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and immutable views to emit step commands.
    ///
    /// Commands are only produced when the events contain a cat move that
    /// opened a mice turn. Mice that are resolved or share the cat's cell stay
    /// put, and no mouse moves once every house is occupied.
    pub fn handle(
        &mut self,
        events: &[Event],
        cat: CellCoord,
        mouse_view: &MouseView,
        house_view: &HouseView,
        out: &mut Vec<Command>,
    ) {
        let mice_turn = events
            .iter()
            .any(|event| matches!(event, Event::CatMoved { mice_turn: true, .. }));
        if !mice_turn {
            return;
        }

        self.vacancies.clear();
        self.vacancies
            .extend(house_view.vacant().map(|house| house.cell));
        if self.vacancies.is_empty() {
            log::debug!("no vacant houses; mice hold position");
            return;
        }

        for mouse in mouse_view.iter() {
            if !mouse.state.is_active() || mouse.cell == cat {
                continue;
            }

            let Some(goal) = nearest_vacancy(mouse.cell, &self.vacancies) else {
                continue;
            };

            let next = mouse.cell.step_toward(goal);
            if next == mouse.cell {
                continue;
            }

            out.push(Command::StepMouse {
                mouse: mouse.id,
                to: next,
            });
        }
    }
}

/// Selects the vacancy with the smallest Manhattan distance from `from`.
///
/// Ties resolve to the earliest vacancy in the provided order.
#[must_use]
pub fn nearest_vacancy(from: CellCoord, vacancies: &[CellCoord]) -> Option<CellCoord> {
    vacancies
        .iter()
        .copied()
        .min_by_key(|cell| from.manhattan_distance(*cell))
}
