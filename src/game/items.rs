//! Loot item vocabulary and table resolution

use std::str::FromStr;

use tracing::error;

/// Item types loot tables may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    StoneSword,
    IronSword,
    DiamondSword,
    Bow,
    Arrow,
    Apple,
    Bread,
    CookedBeef,
    GoldenApple,
    EnderPearl,
    Snowball,
    IronIngot,
    Diamond,
    FishingRod,
}

/// An identifier outside the item vocabulary
#[derive(Debug, thiserror::Error)]
#[error("unknown item identifier: {0}")]
pub struct UnknownItem(pub String);

impl FromStr for ItemKind {
    type Err = UnknownItem;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "STONE_SWORD" => Ok(Self::StoneSword),
            "IRON_SWORD" => Ok(Self::IronSword),
            "DIAMOND_SWORD" => Ok(Self::DiamondSword),
            "BOW" => Ok(Self::Bow),
            "ARROW" => Ok(Self::Arrow),
            "APPLE" => Ok(Self::Apple),
            "BREAD" => Ok(Self::Bread),
            "COOKED_BEEF" => Ok(Self::CookedBeef),
            "GOLDEN_APPLE" => Ok(Self::GoldenApple),
            "ENDER_PEARL" => Ok(Self::EnderPearl),
            "SNOWBALL" => Ok(Self::Snowball),
            "IRON_INGOT" => Ok(Self::IronIngot),
            "DIAMOND" => Ok(Self::Diamond),
            "FISHING_ROD" => Ok(Self::FishingRod),
            _ => Err(UnknownItem(raw.to_string())),
        }
    }
}

/// A resolved loot entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub kind: ItemKind,
    pub count: u32,
}

/// Which loot table an entry belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LootTier {
    Normal,
    Rare,
}

impl LootTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Rare => "rare",
        }
    }

    /// Arrows come in bundles rather than single items
    fn arrow_stack(self) -> u32 {
        match self {
            Self::Normal => 5,
            Self::Rare => 15,
        }
    }
}

/// Resolve configured identifiers into stacks.
///
/// Unknown identifiers are reported and skipped; the table keeps whatever
/// resolved.
pub fn resolve_table(game: &str, entries: &[String], tier: LootTier) -> Vec<ItemStack> {
    entries
        .iter()
        .filter_map(|raw| match raw.parse::<ItemKind>() {
            Ok(kind) => {
                let count = if kind == ItemKind::Arrow {
                    tier.arrow_stack()
                } else {
                    1
                };
                Some(ItemStack { kind, count })
            }
            Err(err) => {
                error!(game = %game, table = tier.label(), %err, "Tried to load item that doesn't exist");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arrows_expand_per_tier() {
        let normal = resolve_table("classic", &names(&["ARROW"]), LootTier::Normal);
        let rare = resolve_table("classic", &names(&["ARROW"]), LootTier::Rare);

        assert_eq!(normal, vec![ItemStack { kind: ItemKind::Arrow, count: 5 }]);
        assert_eq!(rare, vec![ItemStack { kind: ItemKind::Arrow, count: 15 }]);
    }

    #[test]
    fn other_items_resolve_to_single_stacks() {
        let table = resolve_table("classic", &names(&["BREAD", "DIAMOND_SWORD"]), LootTier::Normal);
        assert_eq!(
            table,
            vec![
                ItemStack { kind: ItemKind::Bread, count: 1 },
                ItemStack { kind: ItemKind::DiamondSword, count: 1 },
            ]
        );
    }

    #[test]
    fn unknown_identifiers_are_skipped_not_fatal() {
        let table = resolve_table(
            "classic",
            &names(&["BREAD", "LIGHTSABER", "ARROW"]),
            LootTier::Rare,
        );
        assert_eq!(table.len(), 2);
        assert_eq!(table[0].kind, ItemKind::Bread);
        assert_eq!(table[1].kind, ItemKind::Arrow);
    }
}
