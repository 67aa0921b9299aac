//! Modifier stack following the layered application order:
//! Flat → Increased → More → Clamp.
//!
//! Cards, embossings and derived bonuses all reduce to these three shapes
//! before they touch a number, so damage and guard share one calculation.

/// A single modifier applied to a running amount.
///
/// - **Flat**: added to the base before anything multiplies
/// - **Increased**: fractions summed, then applied once as `× (1 + Σ)`
/// - **More**: factors applied one after another in insertion order
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Modifier {
    Flat(f64),
    /// Fraction, `0.2` is +20%.
    Increased(f64),
    /// Factor, `1.5` is ×1.5 and `0.8` is ×0.8.
    More(f64),
}

/// Ordered collection of modifiers.
///
/// # Example
/// ```
/// # use combat_core::resolve::ModifierStack;
/// let total = ModifierStack::new()
///     .flat(15.0)
///     .flat(2.0)
///     .increased(0.35)
///     .apply(8.0);
/// assert_eq!(total.floor(), 33.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ModifierStack {
    modifiers: Vec<Modifier>,
}

impl ModifierStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, modifier: Modifier) {
        self.modifiers.push(modifier);
    }

    pub fn extend(&mut self, modifiers: impl IntoIterator<Item = Modifier>) {
        self.modifiers.extend(modifiers);
    }

    pub fn flat(mut self, value: f64) -> Self {
        self.add(Modifier::Flat(value));
        self
    }

    pub fn increased(mut self, fraction: f64) -> Self {
        self.add(Modifier::Increased(fraction));
        self
    }

    pub fn more(mut self, factor: f64) -> Self {
        self.add(Modifier::More(factor));
        self
    }

    pub fn flat_sum(&self) -> f64 {
        self.modifiers
            .iter()
            .filter_map(|m| match m {
                Modifier::Flat(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    pub fn increased_sum(&self) -> f64 {
        self.modifiers
            .iter()
            .filter_map(|m| match m {
                Modifier::Increased(v) => Some(*v),
                _ => None,
            })
            .sum()
    }

    /// Applies every modifier to `base` and clamps the result at zero.
    ///
    /// ```text
    /// result = max(0, (base + Σflat) × max(0, 1 + Σincreased) × Πmore)
    /// ```
    pub fn apply(&self, base: f64) -> f64 {
        let after_flat = base + self.flat_sum();
        let after_increased = after_flat * (1.0 + self.increased_sum()).max(0.0);

        let after_more = self
            .modifiers
            .iter()
            .filter_map(|m| match m {
                Modifier::More(factor) => Some(factor.max(0.0)),
                _ => None,
            })
            .fold(after_increased, |acc, factor| acc * factor);

        after_more.max(0.0)
    }

    /// Adds each flat layer to `base` in order, clamping the running total
    /// at zero after every layer, then applies this stack to the result.
    ///
    /// A layer that drives the total negative cannot cancel a later layer.
    pub fn apply_layered(&self, base: f64, layers: &[ModifierStack]) -> f64 {
        let floor = layers
            .iter()
            .fold(base.max(0.0), |total, layer| layer.apply(total));
        self.apply(floor)
    }

    pub fn is_empty(&self) -> bool {
        self.modifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.modifiers.len()
    }
}
