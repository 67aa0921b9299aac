//! Mutable per-combatant combat state.
//!
//! The turn loop owns every [`CombatantState`] and lends it `&mut` to the
//! resolver and trigger engine for the duration of one call.

use std::sync::Arc;

use arrayvec::ArrayVec;

use crate::abilities::{AbilityError, StackCounters};
use crate::catalog::{AbilityDefinition, AbilityId, AttributeKind, CardDefinition, DamageType};
use crate::catalog::{TriggerKind, WeaponClass, WeaponType};
use crate::config::CombatConfig;
use crate::env::{CombatantTemplate, ModifierCatalog, StatProvider};
use crate::error::CombatError;
use crate::status::StatusLedger;

/// Runtime state of one ability on one combatant.
#[derive(Clone, Debug, PartialEq)]
pub struct AbilitySlot {
    pub definition: Arc<AbilityDefinition>,
    pub cooldown_remaining: u32,
    /// Set when a phase gate fires; cleared once HP climbs back above the
    /// threshold.
    pub phase_fired: bool,
}

impl AbilitySlot {
    pub fn new(definition: Arc<AbilityDefinition>) -> Self {
        Self {
            cooldown_remaining: definition.initial_cooldown,
            definition,
            phase_fired: false,
        }
    }

    pub fn id(&self) -> &AbilityId {
        &self.definition.id
    }

    pub fn trigger(&self) -> TriggerKind {
        self.definition.trigger
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0
    }
}

/// Cards played this turn, for combo scaling.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComboTracker {
    last: Option<Arc<CardDefinition>>,
    count: u32,
    cards_played: u32,
}

impl ComboTracker {
    /// Combo count the card would produce if played now.
    pub fn peek(&self, card: &CardDefinition) -> u32 {
        match &self.last {
            Some(previous) if card.continues_combo_from(previous) => self.count + 1,
            _ => 0,
        }
    }

    /// Records a played card. Returns whether it continued the combo.
    pub fn record(&mut self, card: &Arc<CardDefinition>) -> bool {
        self.count = self.peek(card);
        self.last = Some(Arc::clone(card));
        self.cards_played += 1;
        self.count > 0
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn cards_played(&self) -> u32 {
        self.cards_played
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// How one damage event split between guard and HP.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageTaken {
    pub absorbed: u32,
    pub hp_lost: u32,
}

/// A combatant in an encounter.
///
/// A freshly built state is on its first turn with abilities at their
/// initial cooldowns.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatantState {
    pub hp: u32,
    pub max_hp: u32,
    pub energy: u32,
    pub max_energy: u32,
    pub guard: u32,
    pub turn: u32,
    pub statuses: StatusLedger,
    pub stacks: StackCounters,
    pub combo: ComboTracker,
    /// Set once `OnDeath` abilities have been processed.
    pub death_handled: bool,
    abilities: ArrayVec<AbilitySlot, { CombatConfig::MAX_ABILITIES }>,
}

impl CombatantState {
    pub fn new(max_hp: u32, max_energy: u32) -> Self {
        Self {
            hp: max_hp,
            max_hp,
            energy: max_energy,
            max_energy,
            guard: 0,
            turn: 1,
            statuses: StatusLedger::new(),
            stacks: StackCounters::default(),
            combo: ComboTracker::default(),
            death_handled: false,
            abilities: ArrayVec::new(),
        }
    }

    /// Builds a full-health state from a template, resolving its abilities.
    pub fn from_template(
        template: &CombatantTemplate,
        catalog: &(impl ModifierCatalog + ?Sized),
    ) -> Result<Self, CombatError> {
        let mut state = Self::new(template.max_hp, template.max_energy);
        for id in &template.abilities {
            state.add_ability(catalog.require_ability(id)?)?;
        }
        Ok(state)
    }

    pub fn add_ability(&mut self, definition: Arc<AbilityDefinition>) -> Result<(), AbilityError> {
        self.abilities
            .try_push(AbilitySlot::new(definition))
            .map_err(|_| AbilityError::SlotsFull {
                capacity: CombatConfig::MAX_ABILITIES,
            })
    }

    pub fn with_ability(mut self, definition: AbilityDefinition) -> Result<Self, AbilityError> {
        self.add_ability(Arc::new(definition))?;
        Ok(self)
    }

    pub fn abilities(&self) -> &[AbilitySlot] {
        &self.abilities
    }

    pub(crate) fn abilities_mut(&mut self) -> &mut [AbilitySlot] {
        &mut self.abilities
    }

    pub fn ability(&self, id: &AbilityId) -> Option<&AbilitySlot> {
        self.abilities.iter().find(|slot| slot.id() == id)
    }

    pub(crate) fn ability_index(&self, id: &AbilityId) -> Option<usize> {
        self.abilities.iter().position(|slot| slot.id() == id)
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn hp_fraction(&self) -> f64 {
        if self.max_hp == 0 {
            return 0.0;
        }
        f64::from(self.hp) / f64::from(self.max_hp)
    }

    /// Guard absorbs first, the rest comes off HP.
    pub fn take_damage(&mut self, amount: u32) -> DamageTaken {
        let absorbed = amount.min(self.guard);
        self.guard -= absorbed;
        self.take_unguarded(amount - absorbed, absorbed)
    }

    /// Damage that ignores guard, such as damage over time.
    pub fn take_unguarded_damage(&mut self, amount: u32) -> DamageTaken {
        self.take_unguarded(amount, 0)
    }

    fn take_unguarded(&mut self, amount: u32, absorbed: u32) -> DamageTaken {
        let hp_lost = amount.min(self.hp);
        self.hp -= hp_lost;
        DamageTaken { absorbed, hp_lost }
    }

    /// Restores HP up to the maximum. Returns the amount actually healed.
    pub fn restore_hp(&mut self, amount: u32) -> u32 {
        let healed = amount.min(self.max_hp.saturating_sub(self.hp));
        self.hp += healed;
        healed
    }

    pub fn restore_energy(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_energy.saturating_sub(self.energy));
        self.energy += restored;
        restored
    }

    pub fn spend_energy(&mut self, amount: u32) {
        self.energy = self.energy.saturating_sub(amount);
    }

    pub fn gain_guard(&mut self, amount: u32) {
        self.guard = self.guard.saturating_add(amount);
    }

    /// Stat view combining fixed stats with this state's live HP and energy.
    pub fn live<'a>(&'a self, base: &'a dyn StatProvider) -> LiveStats<'a> {
        LiveStats { state: self, base }
    }
}

/// [`StatProvider`] reading HP and energy from a [`CombatantState`] and
/// everything else from the combatant's fixed stats.
pub struct LiveStats<'a> {
    state: &'a CombatantState,
    base: &'a dyn StatProvider,
}

impl StatProvider for LiveStats<'_> {
    fn attribute(&self, kind: AttributeKind) -> u32 {
        self.base.attribute(kind)
    }

    fn weapon_scaling(&self, class: WeaponClass) -> f64 {
        self.base.weapon_scaling(class)
    }

    fn resistance(&self, damage_type: DamageType) -> f64 {
        self.base.resistance(damage_type)
    }

    fn energy(&self) -> u32 {
        self.state.energy
    }

    fn max_hp(&self) -> u32 {
        self.state.max_hp
    }

    fn current_hp(&self) -> u32 {
        self.state.hp
    }

    fn equipped_weapon(&self) -> Option<WeaponType> {
        self.base.equipped_weapon()
    }
}
