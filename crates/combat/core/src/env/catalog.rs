//! Modifier catalog oracle.
//!
//! Provides read-only lookups of card, embossing and ability definitions.
//! The resolver never reaches for a global database; callers pass a catalog
//! into the operations that need one.

use std::collections::BTreeMap;
use std::sync::Arc;

use super::error::OracleError;
use crate::catalog::{
    AbilityDefinition, AbilityId, CardDefinition, CardId, EmbossingDefinition, EmbossingId,
    ModifierId,
};

/// Oracle providing immutable catalog definitions.
pub trait ModifierCatalog: Send + Sync {
    fn card(&self, id: &CardId) -> Option<Arc<CardDefinition>>;

    fn embossing(&self, id: &EmbossingId) -> Option<Arc<EmbossingDefinition>>;

    fn ability(&self, id: &AbilityId) -> Option<Arc<AbilityDefinition>>;

    /// Returns the card definition or `UnknownModifierId`.
    fn require_card(&self, id: &CardId) -> Result<Arc<CardDefinition>, OracleError> {
        self.card(id)
            .ok_or_else(|| OracleError::UnknownModifierId(ModifierId::Card(id.clone())))
    }

    /// Returns the embossing definition or `UnknownModifierId`.
    fn require_embossing(&self, id: &EmbossingId) -> Result<Arc<EmbossingDefinition>, OracleError> {
        self.embossing(id)
            .ok_or_else(|| OracleError::UnknownModifierId(ModifierId::Embossing(id.clone())))
    }

    /// Returns the ability definition or `UnknownModifierId`.
    fn require_ability(&self, id: &AbilityId) -> Result<Arc<AbilityDefinition>, OracleError> {
        self.ability(id)
            .ok_or_else(|| OracleError::UnknownModifierId(ModifierId::Ability(id.clone())))
    }
}

/// In-memory catalog keyed by id.
#[derive(Clone, Debug, Default)]
pub struct CatalogSnapshot {
    cards: BTreeMap<CardId, Arc<CardDefinition>>,
    embossings: BTreeMap<EmbossingId, Arc<EmbossingDefinition>>,
    abilities: BTreeMap<AbilityId, Arc<AbilityDefinition>>,
}

impl CatalogSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from definition lists.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::DuplicateModifierId` if two definitions of the
    /// same kind share an id.
    pub fn from_definitions(
        cards: impl IntoIterator<Item = CardDefinition>,
        embossings: impl IntoIterator<Item = EmbossingDefinition>,
        abilities: impl IntoIterator<Item = AbilityDefinition>,
    ) -> Result<Self, OracleError> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert_card(card)?;
        }
        for embossing in embossings {
            catalog.insert_embossing(embossing)?;
        }
        for ability in abilities {
            catalog.insert_ability(ability)?;
        }
        Ok(catalog)
    }

    pub fn insert_card(&mut self, card: CardDefinition) -> Result<(), OracleError> {
        if self.cards.contains_key(&card.id) {
            return Err(OracleError::DuplicateModifierId(ModifierId::Card(card.id)));
        }
        self.cards.insert(card.id.clone(), Arc::new(card));
        Ok(())
    }

    pub fn insert_embossing(&mut self, embossing: EmbossingDefinition) -> Result<(), OracleError> {
        if self.embossings.contains_key(&embossing.id) {
            return Err(OracleError::DuplicateModifierId(ModifierId::Embossing(
                embossing.id,
            )));
        }
        self.embossings
            .insert(embossing.id.clone(), Arc::new(embossing));
        Ok(())
    }

    pub fn insert_ability(&mut self, ability: AbilityDefinition) -> Result<(), OracleError> {
        if self.abilities.contains_key(&ability.id) {
            return Err(OracleError::DuplicateModifierId(ModifierId::Ability(
                ability.id,
            )));
        }
        self.abilities.insert(ability.id.clone(), Arc::new(ability));
        Ok(())
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.keys()
    }

    pub fn embossing_ids(&self) -> impl Iterator<Item = &EmbossingId> {
        self.embossings.keys()
    }

    pub fn ability_ids(&self) -> impl Iterator<Item = &AbilityId> {
        self.abilities.keys()
    }

    /// (cards, embossings, abilities)
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.cards.len(), self.embossings.len(), self.abilities.len())
    }
}

impl ModifierCatalog for CatalogSnapshot {
    fn card(&self, id: &CardId) -> Option<Arc<CardDefinition>> {
        self.cards.get(id).cloned()
    }

    fn embossing(&self, id: &EmbossingId) -> Option<Arc<EmbossingDefinition>> {
        self.embossings.get(id).cloned()
    }

    fn ability(&self, id: &AbilityId) -> Option<Arc<AbilityDefinition>> {
        self.abilities.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DamageType, EmbossingCategory, EmbossingKind, TriggerKind};

    fn sample() -> CatalogSnapshot {
        CatalogSnapshot::from_definitions(
            [CardDefinition::attack(
                "strike",
                "Strike",
                6,
                1,
                DamageType::Physical,
            )],
            [EmbossingDefinition::new(
                "whetstone",
                EmbossingCategory::Damage,
                EmbossingKind::FlatDamage,
                2.0,
            )],
            [AbilityDefinition::new("roar", TriggerKind::OnTurnStart)],
        )
        .expect("sample catalog is valid")
    }

    #[test]
    fn lookups_hit_loaded_definitions() {
        let catalog = sample();
        assert_eq!(catalog.counts(), (1, 1, 1));
        assert!(catalog.require_card(&CardId::new("strike")).is_ok());
        assert!(catalog.require_embossing(&EmbossingId::new("whetstone")).is_ok());
        assert!(catalog.require_ability(&AbilityId::new("roar")).is_ok());
    }

    #[test]
    fn misses_report_unknown_modifier_id() {
        let catalog = sample();
        let err = catalog.require_card(&CardId::new("nope")).unwrap_err();
        assert_eq!(
            err,
            OracleError::UnknownModifierId(ModifierId::Card(CardId::new("nope")))
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let mut catalog = sample();
        let err = catalog
            .insert_ability(AbilityDefinition::new("roar", TriggerKind::OnDeath))
            .unwrap_err();
        assert!(matches!(err, OracleError::DuplicateModifierId(_)));
    }
}
