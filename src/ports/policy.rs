//! Policy port - abstraction for direction selection

use rand::rngs::StdRng;

use crate::{
    learning::ValueTable,
    types::{Cell, Direction},
};

/// Policy trait for choosing the direction to request next.
///
/// The value table is read-only here; any stochastic choice (tie-breaking,
/// exploration) must draw from the `rng` argument, the simulation's single
/// sequential stream, so seeded runs stay reproducible.
///
/// # Examples
///
/// ```
/// use gridmc::{Cell, Direction, ValueTable, ports::Policy};
/// use rand::rngs::StdRng;
///
/// /// Always walks right, whatever the table says.
/// struct RightWalker;
///
/// impl Policy for RightWalker {
///     fn select_direction(
///         &mut self,
///         _values: &ValueTable,
///         _position: Cell,
///         _rng: &mut StdRng,
///     ) -> Direction {
///         Direction::Right
///     }
///
///     fn name(&self) -> &str {
///         "right-walker"
///     }
/// }
/// ```
pub trait Policy {
    /// Choose a direction for the agent at `position`.
    fn select_direction(
        &mut self,
        values: &ValueTable,
        position: Cell,
        rng: &mut StdRng,
    ) -> Direction;

    /// Human-readable policy name for reports.
    fn name(&self) -> &str;
}
