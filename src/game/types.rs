use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::game::progression::{rank_for, xp_required};

pub const PLAYER_SCHEMA_VERSION: u8 = 1;
pub const QUEST_SCHEMA_VERSION: u8 = 1;
pub const INVENTORY_SCHEMA_VERSION: u8 = 1;
pub const EXERCISE_SCHEMA_VERSION: u8 = 1;
pub const PLAN_SCHEMA_VERSION: u8 = 1;

/// Coarse tier derived from level. Ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        f.write_str(label)
    }
}

/// The five investable attributes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Strength,
    Agility,
    Vitality,
    Intelligence,
    Perception,
}

impl StatKind {
    pub const ALL: [StatKind; 5] = [
        StatKind::Strength,
        StatKind::Agility,
        StatKind::Vitality,
        StatKind::Intelligence,
        StatKind::Perception,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Strength => "strength",
            StatKind::Agility => "agility",
            StatKind::Vitality => "vitality",
            StatKind::Intelligence => "intelligence",
            StatKind::Perception => "perception",
        }
    }
}

impl FromStr for StatKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "str" | "strength" => Ok(StatKind::Strength),
            "agi" | "agility" => Ok(StatKind::Agility),
            "vit" | "vitality" => Ok(StatKind::Vitality),
            "int" | "intelligence" => Ok(StatKind::Intelligence),
            "per" | "perception" => Ok(StatKind::Perception),
            other => Err(format!("unknown stat '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Stats {
    pub strength: u32,
    pub agility: u32,
    pub vitality: u32,
    pub intelligence: u32,
    pub perception: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            strength: 10,
            agility: 10,
            vitality: 10,
            intelligence: 10,
            perception: 10,
        }
    }
}

impl Stats {
    pub fn get(&self, kind: StatKind) -> u32 {
        match kind {
            StatKind::Strength => self.strength,
            StatKind::Agility => self.agility,
            StatKind::Vitality => self.vitality,
            StatKind::Intelligence => self.intelligence,
            StatKind::Perception => self.perception,
        }
    }

    pub fn get_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Strength => &mut self.strength,
            StatKind::Agility => &mut self.agility,
            StatKind::Vitality => &mut self.vitality,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Perception => &mut self.perception,
        }
    }
}

/// Aggregate of one calendar day's activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub xp_gained: u64,
    pub quests_completed: u32,
    /// Live quest count at the time of the last event recorded for this day
    pub total_quests_available: u32,
}

// ============================================================================
// Quests
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum QuestKind {
    Daily,
    Normal,
    Urgent,
    Hidden,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Quest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub xp_reward: u64,
    pub gold_reward: u64,
    pub completed: bool,
    pub kind: QuestKind,
    #[serde(default)]
    pub penalty: bool,
}

impl Quest {
    pub fn new(id: &str, title: &str, description: &str, kind: QuestKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            xp_reward: 0,
            gold_reward: 0,
            completed: false,
            kind,
            penalty: false,
        }
    }

    pub fn with_rewards(mut self, xp: u64, gold: u64) -> Self {
        self.xp_reward = xp;
        self.gold_reward = gold;
        self
    }

    pub fn with_penalty(mut self) -> Self {
        self.penalty = true;
        self
    }
}

// ============================================================================
// Cosmetic rewards
// ============================================================================

/// Rarity tiers. `Elite` is reserved and never produced by a draw.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Elite,
    Legendary,
    Mythic,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Elite => "Elite",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Skin,
    Buff,
    Item,
}

/// A held copy of a catalog entry.
///
/// `base_id` is the stable catalog key used for duplicate detection;
/// `instance_id` distinguishes physical copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    pub base_id: String,
    pub instance_id: Uuid,
    pub name: String,
    pub rarity: Rarity,
    pub description: String,
    pub kind: ItemKind,
}

impl InventoryItem {
    pub fn shares_base(&self, base_id: &str) -> bool {
        self.base_id == base_id
    }
}

// ============================================================================
// Training
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    /// Flavor name shown inside a session
    pub dungeon_name: String,
    pub muscle_target: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkoutPlan {
    pub id: String,
    pub name: String,
    pub exercise_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggedSet {
    pub id: Uuid,
    /// Captured at log time, not a live reference
    pub exercise_name: String,
    pub reps: u32,
    pub weight: f64,
    pub completed: bool,
}

impl LoggedSet {
    pub fn volume(&self) -> f64 {
        self.weight * f64::from(self.reps)
    }
}

/// A committed training session. `xp_earned` is fixed at creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DungeonLog {
    pub id: Uuid,
    pub recorded_at: DateTime<Utc>,
    pub plan_name: String,
    pub sets: Vec<LoggedSet>,
    pub total_volume: f64,
    pub xp_earned: u64,
}

// ============================================================================
// Player
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub username: String,
    pub avatar: String,
    pub rank: Rank,
    pub level: u32,
    pub xp: u64,
    pub xp_to_next_level: u64,
    pub gold: u64,
    pub essence_stones: u32,
    pub stats: Stats,
    pub stat_points_available: u32,
    /// Instance id of the equipped inventory item
    #[serde(default)]
    pub equipped_item_id: Option<Uuid>,
    /// Sorted by date, one entry per day
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    /// Newest first
    #[serde(default)]
    pub dungeon_logs: Vec<DungeonLog>,
    pub last_login_date: NaiveDate,
    pub schema_version: u8,
}

impl Player {
    pub const STARTING_ESSENCE: u32 = 3;

    pub fn new(username: &str, today: NaiveDate) -> Self {
        Self {
            username: username.to_string(),
            avatar: "default".to_string(),
            rank: rank_for(1),
            level: 1,
            xp: 0,
            xp_to_next_level: xp_required(1),
            gold: 0,
            essence_stones: Self::STARTING_ESSENCE,
            stats: Stats::default(),
            stat_points_available: 0,
            equipped_item_id: None,
            history: Vec::new(),
            dungeon_logs: Vec::new(),
            last_login_date: today,
            schema_version: PLAYER_SCHEMA_VERSION,
        }
    }

    pub fn find_log(&self, log_id: Uuid) -> Option<&DungeonLog> {
        self.dungeon_logs.iter().find(|log| log.id == log_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_player_starts_at_level_one() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let player = Player::new("Jin", today);
        assert_eq!(player.level, 1);
        assert_eq!(player.xp, 0);
        assert_eq!(player.xp_to_next_level, 125);
        assert_eq!(player.rank, Rank::E);
        assert_eq!(player.essence_stones, 3);
        assert_eq!(player.stats.get(StatKind::Perception), 10);
        assert_eq!(player.last_login_date, today);
    }

    #[test]
    fn stat_kind_parses_short_and_long_names() {
        assert_eq!("STR".parse::<StatKind>().unwrap(), StatKind::Strength);
        assert_eq!("perception".parse::<StatKind>().unwrap(), StatKind::Perception);
        assert!("luck".parse::<StatKind>().is_err());
    }

    #[test]
    fn ranks_are_ordered() {
        assert!(Rank::E < Rank::D);
        assert!(Rank::A < Rank::S);
    }
}
