//! Card instances - a definition plus its attached embossings.
//!
//! Instances share their definitions through `Arc`; attaching an embossing
//! never copies definition data. Embossings are attached and detached only
//! between resolutions; resolution borrows the instance immutably.

use std::sync::Arc;

use arrayvec::ArrayVec;

use super::card::{CardDefinition, Requirements};
use super::embossing::EmbossingDefinition;
use super::ids::{CardId, EmbossingId};
use crate::config::CombatConfig;
use crate::env::ModifierCatalog;
use crate::error::{CombatError, ErrorSeverity, GameError};

/// Errors raised while editing a card instance.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CardError {
    /// Attaching would exceed the card's embossing slot capacity.
    #[error("card {card} has {capacity} embossing slots, all in use")]
    InvalidEmbossingSlot { card: CardId, capacity: u8 },

    /// Detach index does not refer to an attached embossing.
    #[error("card {card} has no embossing at slot {index}")]
    EmptySlot { card: CardId, index: usize },
}

impl GameError for CardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CardError::InvalidEmbossingSlot { .. } => "CARD_INVALID_EMBOSSING_SLOT",
            CardError::EmptySlot { .. } => "CARD_EMPTY_SLOT",
        }
    }
}

/// Serializable form of a card instance: ids only.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardInstanceSpec {
    pub card: CardId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub embossings: Vec<EmbossingId>,
}

/// A card in a deck or hand.
#[derive(Clone, Debug)]
pub struct CardInstance {
    definition: Arc<CardDefinition>,
    embossings: ArrayVec<Arc<EmbossingDefinition>, { CombatConfig::MAX_EMBOSSING_SLOTS }>,
}

impl CardInstance {
    pub fn new(definition: Arc<CardDefinition>) -> Self {
        Self {
            definition,
            embossings: ArrayVec::new(),
        }
    }

    /// Builds an instance from ids, resolving every id through the catalog.
    ///
    /// # Errors
    ///
    /// `UnknownModifierId` for any catalog miss, `InvalidEmbossingSlot` when
    /// `spec` lists more embossings than the card holds.
    pub fn from_spec(
        spec: &CardInstanceSpec,
        catalog: &(impl ModifierCatalog + ?Sized),
    ) -> Result<Self, CombatError> {
        let mut instance = Self::new(catalog.require_card(&spec.card)?);
        for id in &spec.embossings {
            instance.attach(catalog.require_embossing(id)?)?;
        }
        Ok(instance)
    }

    /// Converts back to the id-only form.
    pub fn to_spec(&self) -> CardInstanceSpec {
        CardInstanceSpec {
            card: self.definition.id.clone(),
            embossings: self.embossings.iter().map(|e| e.id.clone()).collect(),
        }
    }

    pub fn definition(&self) -> &CardDefinition {
        &self.definition
    }

    pub fn shared_definition(&self) -> &Arc<CardDefinition> {
        &self.definition
    }

    /// Attached embossings in attachment order.
    pub fn embossings(&self) -> &[Arc<EmbossingDefinition>] {
        &self.embossings
    }

    /// Usable slot count: the card's capacity, bounded by the global ceiling.
    pub fn capacity(&self) -> usize {
        usize::from(self.definition.embossing_slots).min(CombatConfig::MAX_EMBOSSING_SLOTS)
    }

    pub fn free_slots(&self) -> usize {
        self.capacity().saturating_sub(self.embossings.len())
    }

    /// Attaches an embossing at the end of the list.
    ///
    /// # Errors
    ///
    /// Returns `CardError::InvalidEmbossingSlot` when all slots are used; the
    /// instance is left unchanged.
    pub fn attach(&mut self, embossing: Arc<EmbossingDefinition>) -> Result<(), CardError> {
        if self.free_slots() == 0 {
            return Err(CardError::InvalidEmbossingSlot {
                card: self.definition.id.clone(),
                capacity: self.definition.embossing_slots,
            });
        }
        self.embossings.push(embossing);
        Ok(())
    }

    /// Detaches the embossing at `index`, shifting later ones down.
    pub fn detach(&mut self, index: usize) -> Result<Arc<EmbossingDefinition>, CardError> {
        if index >= self.embossings.len() {
            return Err(CardError::EmptySlot {
                card: self.definition.id.clone(),
                index,
            });
        }
        Ok(self.embossings.remove(index))
    }

    /// Card requirements merged with every attached embossing's requirements.
    pub fn requirements(&self) -> Requirements {
        self.embossings
            .iter()
            .fold(self.definition.requirements, |acc, e| {
                acc.strictest(&e.requirements)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{DamageType, EmbossingCategory, EmbossingKind};

    fn flat(id: &str) -> Arc<EmbossingDefinition> {
        Arc::new(EmbossingDefinition::new(
            id,
            EmbossingCategory::Damage,
            EmbossingKind::FlatDamage,
            2.0,
        ))
    }

    fn strike(slots: u8) -> CardInstance {
        CardInstance::new(Arc::new(
            CardDefinition::attack("strike", "Strike", 6, 1, DamageType::Physical).with_slots(slots),
        ))
    }

    #[test]
    fn attach_within_capacity() {
        let mut card = strike(2);
        card.attach(flat("a")).unwrap();
        card.attach(flat("b")).unwrap();
        assert_eq!(card.embossings().len(), 2);
        assert_eq!(card.free_slots(), 0);
    }

    #[test]
    fn attach_beyond_capacity_leaves_instance_unchanged() {
        let mut card = strike(1);
        card.attach(flat("a")).unwrap();
        let before = card.to_spec();

        let err = card.attach(flat("b")).unwrap_err();
        assert_eq!(
            err,
            CardError::InvalidEmbossingSlot {
                card: CardId::new("strike"),
                capacity: 1
            }
        );
        assert_eq!(card.to_spec(), before);
    }

    #[test]
    fn zero_slot_card_rejects_any_embossing() {
        let mut card = strike(0);
        assert!(card.attach(flat("a")).is_err());
        assert!(card.embossings().is_empty());
    }

    #[test]
    fn capacity_is_bounded_by_global_ceiling() {
        let card = strike(200);
        assert_eq!(card.capacity(), CombatConfig::MAX_EMBOSSING_SLOTS);
    }

    #[test]
    fn detach_preserves_order_of_remaining() {
        let mut card = strike(3);
        card.attach(flat("a")).unwrap();
        card.attach(flat("b")).unwrap();
        card.attach(flat("c")).unwrap();

        let removed = card.detach(1).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        let ids: Vec<_> = card.embossings().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert!(matches!(card.detach(5), Err(CardError::EmptySlot { index: 5, .. })));
    }

    #[test]
    fn requirements_include_embossings() {
        let mut card = strike(1);
        let heavy = EmbossingDefinition::new(
            "heavy",
            EmbossingCategory::Damage,
            EmbossingKind::FlatDamage,
            4.0,
        )
        .with_requirements(Requirements {
            strength: 25,
            ..Requirements::NONE
        });
        card.attach(Arc::new(heavy)).unwrap();
        assert_eq!(card.requirements().strength, 25);
    }
}
