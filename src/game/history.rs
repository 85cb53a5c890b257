//! Per-day activity ledger and the dashboard summaries built on it.

use chrono::{Duration, NaiveDate};

use crate::game::types::HistoryEntry;

/// Denominator used for a day whose recorded quest count is zero.
const FALLBACK_QUESTS_PER_DAY: u32 = 5;

/// Where and how an event is stamped into the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerContext {
    pub today: NaiveDate,
    /// Live quest count, written into the day's entry on every event
    pub active_quests: u32,
}

impl LedgerContext {
    pub fn new(today: NaiveDate, active_quests: usize) -> Self {
        Self {
            today,
            active_quests: u32::try_from(active_quests).unwrap_or(u32::MAX),
        }
    }
}

/// Add an event to today's entry, creating it if absent.
///
/// Entries stay sorted by date and unique per date.
pub fn record_event(
    history: &mut Vec<HistoryEntry>,
    ctx: &LedgerContext,
    xp_gained: u64,
    quest_completed: bool,
) {
    let quests = u32::from(quest_completed);
    match history.binary_search_by_key(&ctx.today, |h| h.date) {
        Ok(idx) => {
            let entry = &mut history[idx];
            entry.xp_gained = entry.xp_gained.saturating_add(xp_gained);
            entry.quests_completed = entry.quests_completed.saturating_add(quests);
            entry.total_quests_available = ctx.active_quests;
        }
        Err(idx) => history.insert(
            idx,
            HistoryEntry {
                date: ctx.today,
                xp_gained,
                quests_completed: quests,
                total_quests_available: ctx.active_quests,
            },
        ),
    }
}

pub fn entry_for(history: &[HistoryEntry], date: NaiveDate) -> Option<&HistoryEntry> {
    history
        .binary_search_by_key(&date, |h| h.date)
        .ok()
        .map(|idx| &history[idx])
}

/// Has anything been recorded for `date` yet?
pub fn has_recorded(history: &[HistoryEntry], date: NaiveDate) -> bool {
    entry_for(history, date).is_some()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PeriodSummary {
    pub total_xp: u64,
    pub quests_completed: u32,
    /// Whole percent, rounded to nearest
    pub completion_rate: u32,
}

/// Totals over entries dated within the last `days` days (inclusive of the cutoff).
pub fn summarize(history: &[HistoryEntry], today: NaiveDate, days: i64) -> PeriodSummary {
    let cutoff = today - Duration::days(days);
    let mut total_xp = 0u64;
    let mut done = 0u32;
    let mut possible = 0u32;
    for entry in history.iter().filter(|h| h.date >= cutoff) {
        total_xp = total_xp.saturating_add(entry.xp_gained);
        done = done.saturating_add(entry.quests_completed);
        let available = if entry.total_quests_available == 0 {
            FALLBACK_QUESTS_PER_DAY
        } else {
            entry.total_quests_available
        };
        possible = possible.saturating_add(available);
    }

    let completion_rate = if possible > 0 {
        (f64::from(done) / f64::from(possible) * 100.0).round() as u32
    } else {
        0
    };

    PeriodSummary {
        total_xp,
        quests_completed: done,
        completion_rate,
    }
}

/// XP per day over the trailing window ending today, oldest first, zero-filled.
pub fn daily_xp_series(history: &[HistoryEntry], today: NaiveDate, days: u32) -> Vec<(NaiveDate, u64)> {
    (0..i64::from(days))
        .rev()
        .map(|back| {
            let date = today - Duration::days(back);
            let xp = entry_for(history, date).map(|h| h.xp_gained).unwrap_or(0);
            (date, xp)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn same_day_events_update_one_entry() {
        let mut history = Vec::new();
        let ctx = LedgerContext::new(day(3), 3);
        record_event(&mut history, &ctx, 20, false);
        record_event(&mut history, &LedgerContext::new(day(3), 4), 0, true);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].xp_gained, 20);
        assert_eq!(history[0].quests_completed, 1);
        assert_eq!(history[0].total_quests_available, 4);
        assert!(has_recorded(&history, day(3)));
        assert!(!has_recorded(&history, day(4)));
    }

    #[test]
    fn entries_stay_sorted_by_date() {
        let mut history = Vec::new();
        record_event(&mut history, &LedgerContext::new(day(9), 3), 5, false);
        record_event(&mut history, &LedgerContext::new(day(2), 3), 5, false);
        record_event(&mut history, &LedgerContext::new(day(5), 3), 5, false);
        let dates: Vec<_> = history.iter().map(|h| h.date).collect();
        assert_eq!(dates, vec![day(2), day(5), day(9)]);
    }

    #[test]
    fn summary_uses_fallback_denominator() {
        let history = vec![
            HistoryEntry {
                date: day(10),
                xp_gained: 100,
                quests_completed: 2,
                total_quests_available: 4,
            },
            HistoryEntry {
                date: day(11),
                xp_gained: 50,
                quests_completed: 1,
                total_quests_available: 0,
            },
            HistoryEntry {
                date: day(1),
                xp_gained: 999,
                quests_completed: 9,
                total_quests_available: 9,
            },
        ];
        let week = summarize(&history, day(12), 7);
        assert_eq!(week.total_xp, 150);
        assert_eq!(week.quests_completed, 3);
        // 3 of (4 + 5)
        assert_eq!(week.completion_rate, 33);
    }

    #[test]
    fn empty_history_has_zero_rate() {
        assert_eq!(summarize(&[], day(1), 30), PeriodSummary::default());
    }

    #[test]
    fn series_is_zero_filled() {
        let mut history = Vec::new();
        record_event(&mut history, &LedgerContext::new(day(6), 3), 40, false);
        let series = daily_xp_series(&history, day(7), 3);
        assert_eq!(series, vec![(day(5), 0), (day(6), 40), (day(7), 0)]);
    }
}
