/// Reward draws: spend currency, roll rarities against a rate table, and
/// convert duplicates into XP.
///
/// The whole batch resolves synchronously; any reveal delay is cosmetic and
/// lives in [`crate::game::reveal`].
use std::collections::HashSet;

use crate::game::catalog::{default_entry, entries_of};
use crate::game::errors::GameError;
use crate::game::history::LedgerContext;
use crate::game::notify::Notifier;
use crate::game::progression::{grant_xp, LevelUpSummary};
use crate::game::rng::RandomSource;
use crate::game::types::{InventoryItem, Player, Rarity};

pub const GOLD_PER_DRAW: u64 = 100;
pub const ESSENCE_PER_DRAW: u32 = 1;
pub const DUPLICATE_XP: u64 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawCurrency {
    Gold,
    Essence,
}

impl DrawCurrency {
    pub fn rates(&self) -> &'static RateTable {
        match self {
            DrawCurrency::Gold => &GOLD_RATES,
            DrawCurrency::Essence => &ESSENCE_RATES,
        }
    }
}

/// Cumulative probability ladder. A roll maps to the first rung whose
/// upper bound it does not exceed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTable {
    rungs: &'static [(f64, Rarity)],
}

pub static GOLD_RATES: RateTable = RateTable {
    rungs: &[
        (0.60, Rarity::Common),
        (0.85, Rarity::Uncommon),
        (0.95, Rarity::Rare),
        (0.99, Rarity::Legendary),
        (1.00, Rarity::Mythic),
    ],
};

pub static ESSENCE_RATES: RateTable = RateTable {
    rungs: &[
        (0.50, Rarity::Uncommon),
        (0.85, Rarity::Rare),
        (0.98, Rarity::Legendary),
        (1.00, Rarity::Mythic),
    ],
};

impl RateTable {
    pub fn resolve(&self, roll: f64) -> Rarity {
        self.rungs
            .iter()
            .find(|(upper, _)| roll <= *upper)
            .or_else(|| self.rungs.last())
            .map(|(_, rarity)| *rarity)
            .unwrap_or(Rarity::Common)
    }

    /// Probability of each rarity on this table.
    pub fn odds(&self) -> Vec<(Rarity, f64)> {
        let mut lower = 0.0;
        self.rungs
            .iter()
            .map(|(upper, rarity)| {
                let p = upper - lower;
                lower = *upper;
                (*rarity, p)
            })
            .collect()
    }
}

/// Result of one draw batch.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawOutcome {
    /// Newly added (non-duplicate) items, in draw order
    pub items: Vec<InventoryItem>,
    pub duplicates: u32,
    pub duplicate_xp: u64,
    pub level_up: LevelUpSummary,
}

impl DrawOutcome {
    pub fn total_drawn(&self) -> usize {
        self.items.len() + self.duplicates as usize
    }
}

/// Debit the batch cost, or reject without touching the player.
fn charge(
    player: &mut Player,
    count: u32,
    currency: DrawCurrency,
    notifier: &mut dyn Notifier,
) -> Result<(), GameError> {
    match currency {
        DrawCurrency::Gold => {
            let cost = u64::from(count) * GOLD_PER_DRAW;
            if player.gold < cost {
                notifier.post("Not enough Gold!");
                return Err(GameError::InsufficientFunds {
                    currency: "gold",
                    needed: cost,
                    available: player.gold,
                });
            }
            player.gold -= cost;
        }
        DrawCurrency::Essence => {
            let cost = count.saturating_mul(ESSENCE_PER_DRAW);
            if player.essence_stones < cost {
                notifier.post("Not enough Essence Stones!");
                return Err(GameError::InsufficientFunds {
                    currency: "essence stones",
                    needed: u64::from(cost),
                    available: u64::from(player.essence_stones),
                });
            }
            player.essence_stones -= cost;
        }
    }
    Ok(())
}

/// Draw `count` items paid with `currency`.
///
/// A base item already held, or already produced earlier in this batch, is
/// a duplicate: it is not added and is worth [`DUPLICATE_XP`], granted as a
/// single XP grant once the batch is done.
pub fn draw(
    player: &mut Player,
    inventory: &mut Vec<InventoryItem>,
    count: u32,
    currency: DrawCurrency,
    rng: &mut dyn RandomSource,
    ctx: &LedgerContext,
    notifier: &mut dyn Notifier,
) -> Result<DrawOutcome, GameError> {
    draw_from(
        currency.rates(),
        player,
        inventory,
        count,
        currency,
        rng,
        ctx,
        notifier,
    )
}

/// [`draw`] against an explicit rate table. A rarity with no catalog
/// entries yields [`default_entry`].
#[allow(clippy::too_many_arguments)]
fn draw_from(
    rates: &RateTable,
    player: &mut Player,
    inventory: &mut Vec<InventoryItem>,
    count: u32,
    currency: DrawCurrency,
    rng: &mut dyn RandomSource,
    ctx: &LedgerContext,
    notifier: &mut dyn Notifier,
) -> Result<DrawOutcome, GameError> {
    if count == 0 {
        notifier.post("Select at least one draw.");
        return Err(GameError::InvalidDrawCount);
    }
    charge(player, count, currency, notifier)?;

    let mut owned: HashSet<String> = inventory.iter().map(|i| i.base_id.clone()).collect();
    let mut items = Vec::new();
    let mut duplicates = 0u32;

    for _ in 0..count {
        let rarity = rates.resolve(rng.next_unit());
        let pool = entries_of(rarity);
        let entry = if pool.is_empty() {
            log::warn!("no catalog entries for {}, using default", rarity);
            default_entry()
        } else {
            pool[rng.pick_index(pool.len())]
        };

        if owned.contains(entry.base_id) {
            duplicates += 1;
        } else {
            owned.insert(entry.base_id.to_string());
            items.push(entry.instantiate());
        }
    }

    inventory.extend(items.iter().cloned());

    let duplicate_xp = u64::from(duplicates) * DUPLICATE_XP;
    let mut level_up = LevelUpSummary::default();
    if duplicates > 0 {
        level_up = grant_xp(player, duplicate_xp, ctx, notifier);
        notifier.post(&format!(
            "Converted {} duplicates to {} XP",
            duplicates, duplicate_xp
        ));
    }

    log::debug!(
        "draw x{} ({:?}): {} new, {} duplicates",
        count,
        currency,
        items.len(),
        duplicates
    );

    Ok(DrawOutcome {
        items,
        duplicates,
        duplicate_xp,
        level_up,
    })
}
