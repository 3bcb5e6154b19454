use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use fxhash::FxHashMap;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};

/// Opaque identifier for a person who may owe money.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A currency amount with exact decimal precision.
///
/// Amounts stay unrounded through accumulation and scaling; quantization to
/// cents happens only during reconciliation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Converts a float as emitted by the upstream extraction service.
    /// NaN and non-finite values collapse to zero instead of poisoning sums.
    pub fn from_f64_lossy(value: f64) -> Self {
        Decimal::from_f64(value).map(Self).unwrap_or(Self::ZERO)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn to_cents(self) -> Option<i64> {
        (self.0 * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn round_to_cents(self, strategy: RoundingStrategy) -> Self {
        Self(self.0.round_dp_with_strategy(2, strategy))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cents = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(2);
        write!(f, "{cents}")
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self(iter.map(|money| money.0).sum())
    }
}

pub type MemberShares = FxHashMap<MemberId, Money>;

/// How a single chargeable item is divided among members.
#[derive(Clone, Debug, PartialEq)]
pub enum SharingAssignment {
    /// Shared evenly across an explicit member set.
    Equal { shared_by: Vec<MemberId> },
    /// Shared across an explicit subset, each member weighted equally.
    Custom { shared_by: Vec<MemberId> },
    /// The item represents fungible units assigned per member (fractional
    /// units allowed). `fallback` is the item's configured member set, used
    /// for an equal split when no units are assigned at all.
    Quantity {
        assignments: Vec<(MemberId, Decimal)>,
        fallback: Vec<MemberId>,
    },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChargeableItem {
    pub name: String,
    pub price: Money,
    pub sharing: SharingAssignment,
}

/// An additive charge (tax, service fee) split across an explicit member set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Surcharge {
    pub amount: Money,
    pub shared_by: Vec<MemberId>,
}

impl Surcharge {
    pub fn new(amount: Money, shared_by: Vec<MemberId>) -> Self {
        Self { amount, shared_by }
    }

    pub fn none() -> Self {
        Self::default()
    }
}

/// One bill ready for allocation. `target_total` is the authoritative amount
/// the final per-member shares must sum to, already net of any discount.
#[derive(Clone, Debug, PartialEq)]
pub struct Bill {
    pub items: Vec<ChargeableItem>,
    pub tax: Surcharge,
    pub other_charges: Surcharge,
    pub target_total: Money,
}

/// Un-normalized per-member dollar exposure plus the member ordering the
/// downstream stages use for deterministic tie-breaks.
#[derive(Clone, Debug, PartialEq)]
pub struct GrossShares {
    pub shares: MemberShares,
    pub order: Vec<MemberId>,
    pub total: Money,
}
