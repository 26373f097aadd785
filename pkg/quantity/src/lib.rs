//! Fixed-point resource quantities.
//!
//! A [`Quantity`] stores an exact count of nano-units (10^-9 of a core for CPU,
//! 10^-9 of a byte for memory) so that summing thousands of `100m` or `64Mi`
//! values never drifts. The dimension is a type parameter: a CPU quantity
//! cannot be added to a memory quantity.
//!
//! Parsing is delegated to `kube_quantity`; the parsed value is converted to
//! nano-units once, and all arithmetic after that is integer arithmetic.

mod format;
mod parse;

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

pub use parse::ParseQuantityError;

/// Nano-units per whole unit.
pub const NANOS_PER_UNIT: i128 = 1_000_000_000;

/// A unit dimension of a [`Quantity`].
pub trait Dimension:
    fmt::Debug + Clone + Copy + Default + PartialEq + Eq + Send + Sync + 'static
{
    /// Render a nano-unit count in this dimension's canonical short form.
    fn format(nanos: i128) -> String;
}

/// CPU cores. Rendered in decimal SI (`250m`, `2`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cpu;

/// Memory bytes. Rendered in binary SI when exact (`128Mi`), decimal SI otherwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Memory;

impl Dimension for Cpu {
    fn format(nanos: i128) -> String {
        format::decimal(nanos)
    }
}

impl Dimension for Memory {
    fn format(nanos: i128) -> String {
        format::binary_or_decimal(nanos)
    }
}

/// An exact resource quantity in dimension `D`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quantity<D: Dimension> {
    nanos: i128,
    _dimension: PhantomData<D>,
}

impl<D: Dimension> Quantity<D> {
    pub const fn zero() -> Self {
        Self::from_nanos(0)
    }

    pub const fn from_nanos(nanos: i128) -> Self {
        Self {
            nanos,
            _dimension: PhantomData,
        }
    }

    /// Parse a Kubernetes quantity string (`100m`, `1.5`, `64Mi`, `1e3`).
    pub fn parse(s: &str) -> Result<Self, ParseQuantityError> {
        parse::parse_nanos(s).map(Self::from_nanos)
    }

    pub const fn nanos(&self) -> i128 {
        self.nanos
    }

    pub const fn is_zero(&self) -> bool {
        self.nanos == 0
    }

    pub const fn is_negative(&self) -> bool {
        self.nanos < 0
    }

    /// Sum two quantities, or `None` if the result does not fit.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.nanos.checked_add(other.nanos).map(Self::from_nanos)
    }
}

impl Quantity<Cpu> {
    pub const fn from_millicores(millis: i64) -> Self {
        Self::from_nanos(millis as i128 * 1_000_000)
    }
}

impl Quantity<Memory> {
    pub const fn from_bytes(bytes: i64) -> Self {
        Self::from_nanos(bytes as i128 * NANOS_PER_UNIT)
    }
}

impl<D: Dimension> fmt::Display for Quantity<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&D::format(self.nanos))
    }
}

impl<D: Dimension> FromStr for Quantity<D> {
    type Err = ParseQuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
