//! Damage elements

use serde::{Deserialize, Serialize};
use strum::{Display, EnumCount, EnumIter, IntoEnumIterator};

use crate::actor::ConditionKind;

/// The element an attack is branded with.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    EnumCount,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
#[repr(u8)]
pub enum Element {
    /// Plain physical damage
    #[default]
    None = 0,
    Air = 1,
    Earth = 2,
    Fire = 3,
    Water = 4,
    Acid = 5,
    Cold = 6,
    Lightning = 7,
    Poison = 8,
    Dark = 9,
    Light = 10,
    Spirit = 11,
}

impl Element {
    /// Every element a resistance can exist for.
    pub fn resistible() -> impl Iterator<Item = Element> {
        Element::iter().filter(|element| *element != Element::None)
    }

    pub const fn is_none(&self) -> bool {
        matches!(self, Element::None)
    }

    /// Lingering condition a hit of this element leaves on its victim.
    pub const fn side_effect(&self) -> Option<ConditionKind> {
        match self {
            Element::Cold => Some(ConditionKind::Cold),
            Element::Poison => Some(ConditionKind::Poison),
            Element::Light => Some(ConditionKind::Dazzle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resistible_excludes_none() {
        assert_eq!(Element::resistible().count(), Element::COUNT - 1);
        assert!(Element::resistible().all(|e| !e.is_none()));
    }

    #[test]
    fn test_names() {
        assert_eq!(Element::Lightning.to_string(), "lightning");
        let parsed: Element = serde_json::from_str("\"fire\"").unwrap();
        assert_eq!(parsed, Element::Fire);
    }

    #[test]
    fn test_side_effects() {
        assert_eq!(Element::Poison.side_effect(), Some(ConditionKind::Poison));
        assert_eq!(Element::Fire.side_effect(), None);
        assert_eq!(Element::None.side_effect(), None);
    }
}
