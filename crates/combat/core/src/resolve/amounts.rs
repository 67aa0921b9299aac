//! Typed damage amounts.

use strum::{EnumCount, IntoEnumIterator};

use crate::catalog::DamageType;

/// Products are snapped to this grid before rounding so float noise
/// (`0.1 × 3 = 0.30000000000000004`) never moves a result by a whole point.
const SNAP: f64 = 1e6;

fn snap(value: f64) -> f64 {
    (value * SNAP).round() / SNAP
}

/// Floors a non-negative amount to an integer. Negative and NaN read as 0.
pub(crate) fn floor_amount(value: f64) -> u32 {
    let snapped = snap(value);
    if snapped.is_nan() || snapped <= 0.0 {
        return 0;
    }
    snapped.floor().min(f64::from(u32::MAX)) as u32
}

/// Ceils a non-negative amount to an integer. Negative and NaN read as 0.
pub(crate) fn ceil_amount(value: f64) -> u32 {
    let snapped = snap(value);
    if snapped.is_nan() || snapped <= 0.0 {
        return 0;
    }
    snapped.ceil().min(f64::from(u32::MAX)) as u32
}

/// Working amounts per damage type during resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TypedAmounts([f64; DamageType::COUNT]);

impl TypedAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, damage_type: DamageType) -> f64 {
        self.0[damage_type.index()]
    }

    pub fn add(&mut self, damage_type: DamageType, amount: f64) {
        let slot = &mut self.0[damage_type.index()];
        *slot = (*slot + amount).max(0.0);
    }

    pub fn take(&mut self, damage_type: DamageType, amount: f64) -> f64 {
        let slot = &mut self.0[damage_type.index()];
        let taken = amount.clamp(0.0, *slot);
        *slot -= taken;
        taken
    }

    pub fn scale(&mut self, damage_type: DamageType, factor: f64) {
        let slot = &mut self.0[damage_type.index()];
        *slot = (*slot * factor).max(0.0);
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Floors every bucket.
    pub fn finalize(&self) -> DamageBundle {
        let mut bundle = DamageBundle::default();
        for damage_type in DamageType::iter() {
            bundle.0[damage_type.index()] = floor_amount(self.get(damage_type));
        }
        bundle
    }
}

/// Final integer damage per type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageBundle([u32; DamageType::COUNT]);

impl DamageBundle {
    pub fn single(damage_type: DamageType, amount: u32) -> Self {
        let mut bundle = Self::default();
        bundle.0[damage_type.index()] = amount;
        bundle
    }

    pub fn get(&self, damage_type: DamageType) -> u32 {
        self.0[damage_type.index()]
    }

    pub fn total(&self) -> u32 {
        self.0.iter().fold(0u32, |acc, v| acc.saturating_add(*v))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Non-zero buckets in damage type order.
    pub fn iter(&self) -> impl Iterator<Item = (DamageType, u32)> + '_ {
        DamageType::iter()
            .map(|t| (t, self.get(t)))
            .filter(|(_, amount)| *amount > 0)
    }
}
