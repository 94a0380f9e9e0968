use derive_more::Add;
use derive_more::AddAssign;
use derive_more::Display;
use derive_more::Sub;
use num_traits::One;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A floating point cost with a total order.
///
/// Grid steps cost `1.0`, but heuristics like the straight-line distance are
/// not integral, so ranks need to live in the same float domain. Infinity is
/// the saturated value.
#[derive(
    Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash, Add, Sub, AddAssign,
)]
#[display("{_0}")]
pub struct FloatCost(OrderedFloat<f64>);

impl FloatCost {
    #[inline(always)]
    pub fn new(f: f64) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn value(&self) -> f64 {
        self.0.into_inner()
    }

    pub fn infinity() -> Self {
        Self::new(f64::INFINITY)
    }
}

impl From<f64> for FloatCost {
    fn from(f: f64) -> Self {
        Self::new(f)
    }
}

// Required by `One`.
impl std::ops::Mul for FloatCost {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl SaturatingAdd for FloatCost {
    /// Floats saturate at infinity on their own.
    #[inline(always)]
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl Zero for FloatCost {
    fn zero() -> Self {
        Self::new(0.0)
    }
    fn is_zero(&self) -> bool {
        self.value() == 0.0
    }
}

impl One for FloatCost {
    fn one() -> Self {
        Self::new(1.0)
    }
}

impl UpperBounded for FloatCost {
    fn max_value() -> Self {
        Self::infinity()
    }
}

impl Cost for FloatCost {}
