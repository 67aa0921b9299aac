//! Seeded randomness for chance-based modifiers.
//!
//! Critical strikes, duplication and ailment application all draw from a
//! single [`CombatRng`] owned by the combat session. Given the same seed and
//! the same sequence of calls, resolution produces identical results.

/// Stateful random source consumed by the resolver and trigger engine.
pub trait CombatRng {
    /// Next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Uniform value in `[0, 1)`.
    fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / (f64::from(u32::MAX) + 1.0)
    }

    /// Returns true with probability `chance`.
    ///
    /// Chances at or below 0 never succeed and chances at or above 1 always
    /// do; neither consumes a draw.
    fn roll(&mut self, chance: f64) -> bool {
        if chance.is_nan() || chance <= 0.0 {
            return false;
        }
        if chance >= 1.0 {
            return true;
        }
        self.next_f64() < chance
    }
}

impl<R: CombatRng + ?Sized> CombatRng for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }
}

/// PCG-XSH-RR generator: 64-bit state, 32-bit output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seeds from session components, see [`compute_seed`].
    pub fn for_session(session_seed: u64, encounter: u64, combatant: u32) -> Self {
        Self::new(compute_seed(session_seed, encounter, combatant, 0))
    }

    pub fn state(&self) -> u64 {
        self.state
    }

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::step(self.state);
        Self::output(self.state)
    }
}

/// Mixes seed components into a single well-distributed seed.
///
/// Use a distinct `context` when one encounter needs several independent
/// streams.
pub fn compute_seed(session_seed: u64, encounter: u64, combatant: u32, context: u32) -> u64 {
    let mut hash = session_seed;
    hash ^= encounter.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(combatant).wrapping_mul(0x517cc1b727220a95);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}
