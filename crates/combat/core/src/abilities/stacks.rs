//! Agitate / Tolerance / Potential buildup counters.

use crate::catalog::{CounterDelta, StackKind};

/// One buildup counter.
///
/// Flat deltas move `value`; increased deltas move `increased`. Reads go
/// through [`potency`](Self::potency), so an increase applied now also
/// scales flat stacks gained later. Neither part drops below zero and
/// nothing decays on its own.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackCounter {
    pub value: u32,
    pub increased: f64,
}

impl StackCounter {
    pub fn adjust(&mut self, delta: CounterDelta) {
        self.value = self.value.saturating_add_signed(delta.flat);
        self.increased = (self.increased + delta.increased).max(0.0);
    }

    /// `value × (1 + increased)`.
    pub fn potency(&self) -> f64 {
        f64::from(self.value) * (1.0 + self.increased)
    }

    /// Returns the potency and resets the counter.
    pub fn consume(&mut self) -> f64 {
        let potency = self.potency();
        *self = Self::default();
        potency
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StackCounters {
    pub agitate: StackCounter,
    pub tolerance: StackCounter,
    pub potential: StackCounter,
}

impl StackCounters {
    pub fn get(&self, kind: StackKind) -> &StackCounter {
        match kind {
            StackKind::Agitate => &self.agitate,
            StackKind::Tolerance => &self.tolerance,
            StackKind::Potential => &self.potential,
        }
    }

    pub fn get_mut(&mut self, kind: StackKind) -> &mut StackCounter {
        match kind {
            StackKind::Agitate => &mut self.agitate,
            StackKind::Tolerance => &mut self.tolerance,
            StackKind::Potential => &mut self.potential,
        }
    }

    pub fn adjust(&mut self, kind: StackKind, delta: CounterDelta) {
        if !delta.is_zero() {
            self.get_mut(kind).adjust(delta);
        }
    }

    pub fn potency(&self, kind: StackKind) -> f64 {
        self.get(kind).potency()
    }

    pub fn consume(&mut self, kind: StackKind) -> f64 {
        self.get_mut(kind).consume()
    }
}
