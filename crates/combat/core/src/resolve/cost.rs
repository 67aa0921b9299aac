//! Mana cost resolution.

use super::amounts::ceil_amount;
use crate::catalog::CardInstance;

/// Effective mana cost of a card with its embossings.
///
/// `ceil(mana_cost × (1 + Σ multiplier))`, never below zero. Depends only on
/// the instance, not on who plays it.
pub fn effective_cost(card: &CardInstance) -> u32 {
    let multiplier: f64 = card
        .embossings()
        .iter()
        .map(|e| e.mana_cost_multiplier)
        .sum();
    ceil_amount(f64::from(card.definition().mana_cost) * (1.0 + multiplier))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::catalog::{
        CardDefinition, DamageType, EmbossingCategory, EmbossingDefinition, EmbossingKind,
    };

    fn card(cost: u32, multipliers: &[f64]) -> CardInstance {
        let mut instance = CardInstance::new(Arc::new(
            CardDefinition::attack("bolt", "Bolt", 5, cost, DamageType::Lightning).with_slots(6),
        ));
        for (i, m) in multipliers.iter().enumerate() {
            let embossing = EmbossingDefinition::new(
                format!("e{i}").as_str(),
                EmbossingCategory::Damage,
                EmbossingKind::MoreDamage,
                0.1,
            )
            .with_cost_multiplier(*m);
            instance.attach(Arc::new(embossing)).unwrap();
        }
        instance
    }

    #[test]
    fn no_embossings_cost_base() {
        assert_eq!(effective_cost(&card(3, &[])), 3);
    }

    #[test]
    fn multipliers_add_then_round_up() {
        // 3 × 1.3 = 3.9
        assert_eq!(effective_cost(&card(3, &[0.1, 0.2])), 4);
        // 10 × 1.3 is exactly 13 despite float noise
        assert_eq!(effective_cost(&card(10, &[0.1, 0.1, 0.1])), 13);
    }

    #[test]
    fn negative_multipliers_floor_at_zero() {
        assert_eq!(effective_cost(&card(4, &[-0.5])), 2);
        assert_eq!(effective_cost(&card(4, &[-1.5])), 0);
    }
}
