use crate::config::CombatConfig;
use crate::env::CombatRng;

/// Everything a resolution needs besides the card and the combatants.
pub struct ResolveContext<'a> {
    pub config: &'a CombatConfig,
    pub rng: &'a mut dyn CombatRng,
    /// Cards that continued a combo earlier this turn.
    pub combo_count: u32,
}

impl<'a> ResolveContext<'a> {
    pub fn new(config: &'a CombatConfig, rng: &'a mut dyn CombatRng) -> Self {
        Self {
            config,
            rng,
            combo_count: 0,
        }
    }

    pub fn with_combo_count(mut self, combo_count: u32) -> Self {
        self.combo_count = combo_count;
        self
    }
}
