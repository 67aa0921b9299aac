/// Combat configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Attribute points per step of attribute-scaling embossings.
    /// A strength-scaling embossing contributes `floor(strength / breakpoint) × value`.
    pub attribute_breakpoint: u32,

    /// How many nested `on_damage_taken` evaluations an ability's own damage
    /// may start on the same combatant. Depth 0 is the original hit.
    pub max_trigger_depth: u32,

    /// Multiplier used by critical-strike embossings without a secondary value.
    pub default_crit_multiplier: f64,

    /// HP fraction at or below which desperation embossings apply when they
    /// carry no secondary value.
    pub desperation_threshold: f64,

    /// Defender HP fraction at or below which execute embossings apply when
    /// they carry no secondary value.
    pub execute_threshold: f64,

    /// Magnitude of an ailment inflicted by an ailment embossing without a
    /// secondary value.
    pub default_ailment_magnitude: u32,
}

impl CombatConfig {
    // ===== compile-time constants used as type parameters =====
    /// Hard ceiling on embossing slots of any card.
    pub const MAX_EMBOSSING_SLOTS: usize = 6;
    /// Abilities a single combatant may carry.
    pub const MAX_ABILITIES: usize = 12;
    /// Distinct status kinds tracked on one combatant.
    pub const MAX_STATUS_EFFECTS: usize = 16;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ATTRIBUTE_BREAKPOINT: u32 = 50;
    pub const DEFAULT_MAX_TRIGGER_DEPTH: u32 = 1;
    pub const DEFAULT_CRIT_MULTIPLIER: f64 = 1.5;
    pub const DEFAULT_DESPERATION_THRESHOLD: f64 = 0.5;
    pub const DEFAULT_EXECUTE_THRESHOLD: f64 = 0.25;
    pub const DEFAULT_AILMENT_MAGNITUDE: u32 = 1;

    pub fn new() -> Self {
        Self {
            attribute_breakpoint: Self::DEFAULT_ATTRIBUTE_BREAKPOINT,
            max_trigger_depth: Self::DEFAULT_MAX_TRIGGER_DEPTH,
            default_crit_multiplier: Self::DEFAULT_CRIT_MULTIPLIER,
            desperation_threshold: Self::DEFAULT_DESPERATION_THRESHOLD,
            execute_threshold: Self::DEFAULT_EXECUTE_THRESHOLD,
            default_ailment_magnitude: Self::DEFAULT_AILMENT_MAGNITUDE,
        }
    }

    pub fn with_max_trigger_depth(mut self, depth: u32) -> Self {
        self.max_trigger_depth = depth;
        self
    }

    pub fn with_attribute_breakpoint(mut self, breakpoint: u32) -> Self {
        self.attribute_breakpoint = breakpoint.max(1);
        self
    }

    /// Number of whole breakpoints reached by an attribute value.
    pub fn breakpoints(&self, attribute: f64) -> f64 {
        let step = self.attribute_breakpoint.max(1) as f64;
        (attribute.max(0.0) / step).floor()
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
