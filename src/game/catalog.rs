//! Static table of obtainable cosmetics.

use uuid::Uuid;

use crate::game::types::{InventoryItem, ItemKind, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub base_id: &'static str,
    pub name: &'static str,
    pub rarity: Rarity,
    pub kind: ItemKind,
    pub description: &'static str,
}

impl CatalogEntry {
    const fn skin(
        base_id: &'static str,
        name: &'static str,
        rarity: Rarity,
        description: &'static str,
    ) -> Self {
        Self {
            base_id,
            name,
            rarity,
            kind: ItemKind::Skin,
            description,
        }
    }

    /// A fresh held copy with its own instance id.
    pub fn instantiate(&self) -> InventoryItem {
        InventoryItem {
            base_id: self.base_id.to_string(),
            instance_id: Uuid::new_v4(),
            name: self.name.to_string(),
            rarity: self.rarity,
            description: self.description.to_string(),
            kind: self.kind,
        }
    }
}

pub const REWARD_CATALOG: [CatalogEntry; 25] = [
    CatalogEntry::skin("skin-rusty", "Rusty Iron", Rarity::Common, "A matte, reddish-brown iron finish."),
    CatalogEntry::skin("skin-stone", "Old Stone", Rarity::Common, "Weathered grey stone texture."),
    CatalogEntry::skin("skin-wood", "Faded Wood", Rarity::Common, "Beige, worn wooden look."),
    CatalogEntry::skin("skin-copper", "Dull Copper", Rarity::Common, "Non-reflective dark orange."),
    CatalogEntry::skin("skin-dustblue", "Dusty Blue", Rarity::Common, "Desaturated blue matte."),
    CatalogEntry::skin("skin-olive", "Drab Olive", Rarity::Common, "Dark, dirty green."),
    CatalogEntry::skin("skin-slate", "Slate Grey", Rarity::Common, "Flat dark grey."),
    CatalogEntry::skin("skin-clay", "Baked Clay", Rarity::Common, "Earthen brown tone."),
    CatalogEntry::skin("skin-zinc", "Rough Zinc", Rarity::Common, "White-grey industrial metal."),
    CatalogEntry::skin("skin-charcoal", "Charcoal", Rarity::Common, "Almost black, matte finish."),
    CatalogEntry::skin("skin-emerald", "Polished Emerald", Rarity::Uncommon, "Deep, saturated green with sharp edges."),
    CatalogEntry::skin("skin-ruby", "Cut Ruby", Rarity::Uncommon, "Rich red with a gem-like finish."),
    CatalogEntry::skin("skin-sapphire", "Deep Sapphire", Rarity::Uncommon, "Clear, heavy blue."),
    CatalogEntry::skin("skin-goldmatte", "Solid Gold", Rarity::Uncommon, "Saturated yellow-gold, no glow."),
    CatalogEntry::skin("skin-amethyst", "Royal Amethyst", Rarity::Uncommon, "Strong purple contrast."),
    CatalogEntry::skin("skin-cyber", "Cyber Neon", Rarity::Rare, "Pulsing electric cyan."),
    CatalogEntry::skin("skin-toxic", "Toxic Glow", Rarity::Rare, "Radioactive green pulse."),
    CatalogEntry::skin("skin-magma", "Magma Core", Rarity::Rare, "Glowing orange heat."),
    CatalogEntry::skin("skin-arcane", "Arcane Flux", Rarity::Rare, "Mystic violet energy."),
    CatalogEntry::skin("skin-holy", "Holy Light", Rarity::Rare, "Blinding white-yellow glow."),
    CatalogEntry::skin("skin-inferno", "Inferno", Rarity::Legendary, "Animated flames and rising sparks."),
    CatalogEntry::skin("skin-glitch", "Void Glitch", Rarity::Legendary, "Unstable reality distortion."),
    CatalogEntry::skin("skin-thunder", "Thunderstorm", Rarity::Legendary, "Cracking green lightning."),
    CatalogEntry::skin("skin-blades", "Blade Guardian", Rarity::Mythic, "Orbiting spirit swords."),
    CatalogEntry::skin("skin-wings", "Seraphim Wings", Rarity::Mythic, "Majestic, animated wings of light."),
];

/// Entry used when a rarity bucket turns out to be empty.
pub fn default_entry() -> &'static CatalogEntry {
    &REWARD_CATALOG[0]
}

pub fn entries_of(rarity: Rarity) -> Vec<&'static CatalogEntry> {
    REWARD_CATALOG.iter().filter(|e| e.rarity == rarity).collect()
}

pub fn lookup(base_id: &str) -> Option<&'static CatalogEntry> {
    REWARD_CATALOG.iter().find(|e| e.base_id == base_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_expected_distribution() {
        assert_eq!(entries_of(Rarity::Common).len(), 10);
        assert_eq!(entries_of(Rarity::Uncommon).len(), 5);
        assert_eq!(entries_of(Rarity::Rare).len(), 5);
        assert_eq!(entries_of(Rarity::Legendary).len(), 3);
        assert_eq!(entries_of(Rarity::Mythic).len(), 2);
        assert!(entries_of(Rarity::Elite).is_empty());
    }

    #[test]
    fn base_ids_are_unique() {
        let ids: HashSet<_> = REWARD_CATALOG.iter().map(|e| e.base_id).collect();
        assert_eq!(ids.len(), REWARD_CATALOG.len());
    }

    #[test]
    fn prefix_sharing_ids_stay_distinct() {
        let copy = lookup("skin-rusty").unwrap().instantiate();
        assert!(copy.shares_base("skin-rusty"));
        assert!(!copy.shares_base("skin-rust"));
    }

    #[test]
    fn instantiated_copies_get_distinct_instances() {
        let a = default_entry().instantiate();
        let b = default_entry().instantiate();
        assert_eq!(a.base_id, b.base_id);
        assert_ne!(a.instance_id, b.instance_id);
    }
}
