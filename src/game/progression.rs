//! Level curve, rank thresholds and the XP grant cascade.

use crate::game::history::{record_event, LedgerContext};
use crate::game::notify::Notifier;
use crate::game::types::{Player, Rank, StatKind};

/// Stat points awarded per level gained
pub const STAT_POINTS_PER_LEVEL: u32 = 3;
/// Every level divisible by this grants an essence stone
pub const ESSENCE_MILESTONE: u32 = 5;

/// XP needed to advance from `level` to `level + 1`: `floor(100 * L^1.5 + 25 * L)`.
pub fn xp_required(level: u32) -> u64 {
    let l = f64::from(level);
    // L^1.5 as L * sqrt(L) keeps perfect squares exact
    (100.0 * l * l.sqrt() + 25.0 * l).floor() as u64
}

/// Rank tier for a level; each threshold is inclusive.
pub fn rank_for(level: u32) -> Rank {
    match level {
        100.. => Rank::S,
        71..=99 => Rank::A,
        46..=70 => Rank::B,
        26..=45 => Rank::C,
        11..=25 => Rank::D,
        _ => Rank::E,
    }
}

/// What a single XP grant changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelUpSummary {
    pub levels_gained: u32,
    pub essence_gained: u32,
    pub stat_points_gained: u32,
}

impl LevelUpSummary {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

/// Add `amount` XP, resolve every level crossed and stamp today's history.
///
/// Posts one level-up message for the whole grant and one bonus message per
/// essence milestone crossed.
pub fn grant_xp(
    player: &mut Player,
    amount: u64,
    ctx: &LedgerContext,
    notifier: &mut dyn Notifier,
) -> LevelUpSummary {
    record_event(&mut player.history, ctx, amount, false);

    let mut summary = LevelUpSummary::default();
    player.xp = player.xp.saturating_add(amount);

    // xp_to_next_level is always positive, so each pass strictly shrinks xp
    while player.xp >= player.xp_to_next_level {
        player.xp -= player.xp_to_next_level;
        player.level += 1;
        player.stat_points_available += STAT_POINTS_PER_LEVEL;
        player.xp_to_next_level = xp_required(player.level);
        player.rank = rank_for(player.level);

        summary.levels_gained += 1;
        summary.stat_points_gained += STAT_POINTS_PER_LEVEL;

        if player.level % ESSENCE_MILESTONE == 0 {
            player.essence_stones += 1;
            summary.essence_gained += 1;
            notifier.post("BONUS: Acquired 1 Essence Stone.");
        }
    }

    if summary.leveled_up() {
        log::debug!(
            "granted {} xp: +{} levels, now level {} rank {}",
            amount,
            summary.levels_gained,
            player.level,
            player.rank
        );
        notifier.post(&format!("LEVEL UP! You are now Level {}", player.level));
    }

    summary
}

/// Spend one stat point on `stat`. Returns false (and does nothing) when no
/// points are available.
pub fn invest_stat(player: &mut Player, stat: StatKind) -> bool {
    if player.stat_points_available == 0 {
        return false;
    }
    *player.stats.get_mut(stat) += 1;
    player.stat_points_available -= 1;
    true
}
