//! Heuristics estimate the remaining cost between two states.
//!
//! They are plain associated functions so searches can be specialised on them
//! at compile time. Concrete heuristics live next to their problems (see
//! [`crate::problems::grid::Manhattan`]).

use std::fmt::Debug;

use crate::cost::Cost;
use crate::space::State;

pub trait Heuristic<St, C>: Debug
where
    St: State,
    C: Cost,
{
    /// Estimated cost from `from` to `to`. Must never be negative.
    fn h(from: &St, to: &St) -> C;
}

/// Knows nothing and estimates zero.
///
/// Turns A* into uniform-cost search.
#[derive(Copy, Clone, Debug, Default)]
pub struct Blind;

impl<St, C> Heuristic<St, C> for Blind
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn h(_from: &St, _to: &St) -> C {
        C::zero()
    }
}
