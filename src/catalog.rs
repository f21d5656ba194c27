//! Static catalog: upgrade, producer, and one-time item definitions.
//!
//! Effects are plain data descriptors interpreted by the recompute pass in
//! [`crate::state`], so the whole catalog can be inspected and tested without
//! running any game code.

/// Cost growth applied after every upgrade purchase: `floor(cost * GROWTH_RATE)`.
pub const GROWTH_RATE: f64 = 1.32;

/// One modifier contributed by a purchased item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    /// Multiply the click multiplier.
    ClickMultiplier(f64),
    /// Multiply the production multiplier.
    ProductionMultiplier(f64),
    /// Scale every producer's tick interval (0.5 = twice as fast).
    IntervalScale(f64),
}

/// What one level of an upgrade changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpgradeDelta {
    /// Add to the base click yield.
    ClickYield(u64),
    /// Add one unit to the given producer.
    ProducerUnit(&'static str),
}

/// A repeatable upgrade. The live cost/level pair is persisted per save.
pub struct UpgradeDef {
    pub id: &'static str,
    pub display_name: &'static str,
    pub base_cost: u64,
    pub delta: UpgradeDelta,
}

/// A kind of automatic producer.
pub struct ProducerDef {
    pub id: &'static str,
    pub display_name: &'static str,
    /// Tick interval before any item effects, in milliseconds.
    pub base_interval_ms: u32,
}

/// A one-time shop item. Unlocks once lifetime production reaches the
/// threshold; its effects are applied by the multiplier recompute pass.
pub struct ItemDef {
    pub id: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub price: u64,
    pub unlock_threshold: u64,
    pub effects: &'static [Effect],
}

pub const UPGRADES: &[UpgradeDef] = &[
    UpgradeDef {
        id: "clickBoost",
        display_name: "クリック強化",
        base_cost: 50,
        delta: UpgradeDelta::ClickYield(1),
    },
    UpgradeDef {
        id: "autoProducer",
        display_name: "オートプロデューサー",
        base_cost: 100,
        delta: UpgradeDelta::ProducerUnit("autoProducer"),
    },
];

pub const PRODUCERS: &[ProducerDef] = &[ProducerDef {
    id: "autoProducer",
    display_name: "オートプロデューサー",
    base_interval_ms: 1_000,
}];

pub const ITEMS: &[ItemDef] = &[
    ItemDef {
        id: "goldenClicks",
        display_name: "Golden Clicks",
        description: "クリック収入 2倍",
        price: 7_800,
        unlock_threshold: 1_000,
        effects: &[Effect::ClickMultiplier(2.0)],
    },
    ItemDef {
        id: "goldenProducer",
        display_name: "Golden Producer",
        description: "自動生産 2倍",
        price: 11_450,
        unlock_threshold: 1_000,
        effects: &[Effect::ProductionMultiplier(2.0)],
    },
    ItemDef {
        id: "diamondClicks",
        display_name: "Diamond Clicks",
        description: "クリック収入 5倍",
        price: 52_300,
        unlock_threshold: 50_000,
        effects: &[Effect::ClickMultiplier(5.0)],
    },
    ItemDef {
        id: "diamondProducer",
        display_name: "Diamond Producer",
        description: "自動生産 5倍",
        price: 63_500,
        unlock_threshold: 50_000,
        effects: &[Effect::ProductionMultiplier(5.0)],
    },
    ItemDef {
        id: "comboClicks",
        display_name: "Combo Clicks",
        description: "クリック 3倍、さらに自動生産 2倍",
        price: 354_300,
        unlock_threshold: 200_000,
        effects: &[
            Effect::ClickMultiplier(3.0),
            Effect::ProductionMultiplier(2.0),
        ],
    },
    ItemDef {
        id: "lightningProducer",
        display_name: "Lightning Producer",
        description: "生産間隔が半分になる",
        price: 512_700,
        unlock_threshold: 300_000,
        effects: &[Effect::IntervalScale(0.5)],
    },
];

/// Look up an upgrade definition by id.
pub fn upgrade(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADES.iter().find(|d| d.id == id)
}

/// Look up an item definition by id.
pub fn item(id: &str) -> Option<&'static ItemDef> {
    ITEMS.iter().find(|d| d.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn ids_are_unique() {
        let mut seen = BTreeSet::new();
        for id in UPGRADES
            .iter()
            .map(|d| d.id)
            .chain(PRODUCERS.iter().map(|d| d.id))
            .chain(ITEMS.iter().map(|d| d.id))
        {
            assert!(seen.insert(id), "duplicate catalog id: {id}");
        }
    }

    #[test]
    fn lookups_find_defined_entries() {
        assert_eq!(upgrade("clickBoost").map(|d| d.base_cost), Some(50));
        assert_eq!(item("goldenClicks").map(|d| d.price), Some(7_800));
        assert!(upgrade("warpDrive").is_none());
        assert!(item("clickBoost").is_none());
    }

    #[test]
    fn upgrade_producer_targets_exist() {
        for def in UPGRADES {
            if let UpgradeDelta::ProducerUnit(pid) = def.delta {
                assert!(
                    PRODUCERS.iter().any(|d| d.id == pid),
                    "{} targets unknown producer {pid}",
                    def.id
                );
            }
        }
    }

    #[test]
    fn items_have_positive_prices_and_effects() {
        for def in ITEMS {
            assert!(def.price > 0);
            assert!(!def.effects.is_empty(), "{} has no effects", def.id);
        }
    }

    #[test]
    fn effect_factors_keep_multipliers_at_least_one() {
        // Multiplier effects must never shrink a multiplier below baseline;
        // interval scaling must stay positive.
        for def in ITEMS {
            for effect in def.effects {
                match *effect {
                    Effect::ClickMultiplier(f) | Effect::ProductionMultiplier(f) => {
                        assert!(f >= 1.0)
                    }
                    Effect::IntervalScale(f) => assert!(f > 0.0),
                }
            }
        }
    }
}
