//! Catalog identifiers.
//!
//! Definitions are keyed by the stable string ids used in content files
//! (`"cleave"`, `"ember_brand"`). Ids are cheap to compare and never carry
//! definition data themselves.

use core::fmt;

macro_rules! catalog_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(pub String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "({})"), self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

catalog_id!(
    /// Identifies a [`CardDefinition`](super::CardDefinition).
    CardId,
    "card"
);
catalog_id!(
    /// Identifies an [`EmbossingDefinition`](super::EmbossingDefinition).
    EmbossingId,
    "embossing"
);
catalog_id!(
    /// Identifies an [`AbilityDefinition`](super::AbilityDefinition).
    AbilityId,
    "ability"
);

/// Any catalog id, used when reporting lookup misses.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModifierId {
    Card(CardId),
    Embossing(EmbossingId),
    Ability(AbilityId),
}

impl fmt::Display for ModifierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierId::Card(id) => id.fmt(f),
            ModifierId::Embossing(id) => id.fmt(f),
            ModifierId::Ability(id) => id.fmt(f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_with_kind_prefix() {
        assert_eq!(CardId::new("cleave").to_string(), "card(cleave)");
        assert_eq!(
            ModifierId::Embossing(EmbossingId::from("ember_brand")).to_string(),
            "embossing(ember_brand)"
        );
    }
}
