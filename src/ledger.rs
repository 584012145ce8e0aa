// ABOUTME: In-memory nutrition ledger holding logged food entries and the daily calorie goal
// ABOUTME: Validates input at the boundary and derives totals, meal groups and progress on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition ledger
//!
//! Entries are kept in insertion order. No aggregate is cached: totals,
//! per-meal subtotals and progress are recomputed from the sequence on every
//! read so they can never go stale.
//!
//! Rejected input (blank name, zero calories, zero goal) returns an
//! `InvalidInput` error and leaves the ledger untouched. Callers in the UI
//! treat that as a silent no-op.

use serde::Serialize;
use tracing::debug;

use crate::constants::defaults;
use crate::errors::{AppError, AppResult};
use crate::models::{FoodEntry, FoodEntryId, MealType};

/// Ordered food log plus the daily goal
#[derive(Debug, Clone)]
pub struct NutritionLedger {
    entries: Vec<FoodEntry>,
    daily_goal: u32,
    next_id: u64,
}

/// Entries of one meal category with their subtotal
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MealGroup<'a> {
    /// Meal category
    pub meal: MealType,
    /// Entries in insertion order
    pub entries: Vec<&'a FoodEntry>,
    /// Sum of the entries' calories
    pub subtotal: u64,
}

/// Progress of the day against the goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailySummary {
    /// Calories consumed
    pub total: u64,
    /// Daily goal
    pub goal: u32,
    /// Calories left before reaching the goal, never negative
    pub remaining: u64,
    /// Share of the goal consumed, capped at 100
    pub percent: f64,
}

impl DailySummary {
    /// Whether consumption exceeded the goal
    #[must_use]
    pub fn is_over_goal(&self) -> bool {
        self.total > u64::from(self.goal)
    }
}

impl Default for NutritionLedger {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            daily_goal: defaults::DAILY_GOAL_KCAL,
            next_id: 1,
        }
    }
}

impl NutritionLedger {
    /// Create an empty ledger with the given goal
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if `daily_goal` is zero.
    pub fn new(daily_goal: u32) -> AppResult<Self> {
        let mut ledger = Self::default();
        ledger.set_goal(i64::from(daily_goal))?;
        Ok(ledger)
    }

    /// Log a new entry at the end of the sequence
    ///
    /// The name is stored trimmed. Calories are taken as a signed value so
    /// that zero and negative input from the user is rejected here rather
    /// than silently wrapped by the caller.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the name is blank or calories are not in
    /// `1..=u32::MAX`; the ledger is unchanged.
    pub fn add_entry(
        &mut self,
        name: &str,
        calories: i64,
        meal: MealType,
    ) -> AppResult<FoodEntryId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("food name must not be blank"));
        }
        let calories = u32::try_from(calories)
            .ok()
            .filter(|kcal| *kcal > 0)
            .ok_or_else(|| {
                AppError::invalid_input(format!("calories must be positive, got {calories}"))
            })?;

        let id = FoodEntryId::new(self.next_id);
        self.next_id += 1;
        self.entries.push(FoodEntry {
            id,
            name: name.to_owned(),
            calories,
            meal,
        });
        debug!(entry.id = %id, entry.meal = %meal, entry.calories = calories, "Food entry added");
        Ok(id)
    }

    /// Remove the entry with `id`
    ///
    /// Returns the removed entry, or `None` when no entry matched (not an error).
    pub fn remove_entry(&mut self, id: FoodEntryId) -> Option<FoodEntry> {
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        let removed = self.entries.remove(position);
        debug!(entry.id = %id, "Food entry removed");
        Some(removed)
    }

    /// Change the daily goal
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for zero or negative values and
    /// `ValueOutOfRange` for values that do not fit a `u32`; the previous
    /// goal is retained.
    pub fn set_goal(&mut self, value: i64) -> AppResult<u32> {
        if value <= 0 {
            return Err(AppError::invalid_input(format!(
                "daily goal must be positive, got {value}"
            )));
        }
        let goal = u32::try_from(value)
            .map_err(|_| AppError::out_of_range(format!("daily goal {value} is too large")))?;
        self.daily_goal = goal;
        debug!(goal, "Daily goal updated");
        Ok(goal)
    }

    /// Current daily goal
    #[must_use]
    pub const fn daily_goal(&self) -> u32 {
        self.daily_goal
    }

    /// All entries in insertion order
    #[must_use]
    pub fn entries(&self) -> &[FoodEntry] {
        &self.entries
    }

    /// Number of logged entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been logged
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of calories across all entries
    ///
    /// Summed as `u64`, so the total stays exact for any number of entries
    /// of up to `u32::MAX` each.
    #[must_use]
    pub fn total_calories(&self) -> u64 {
        sum_calories(self.entries.iter())
    }

    /// Entries grouped by meal in display order; empty categories are omitted
    #[must_use]
    pub fn grouped_by_meal(&self) -> Vec<MealGroup<'_>> {
        group_by_meal(&self.entries)
    }

    /// Progress against the goal
    #[must_use]
    pub fn summary(&self) -> DailySummary {
        let total = self.total_calories();
        let goal = self.daily_goal;
        let percent = (total as f64 / f64::from(goal) * 100.0).min(100.0);
        DailySummary {
            total,
            goal,
            remaining: u64::from(goal).saturating_sub(total),
            percent,
        }
    }
}

/// Group arbitrary entries by meal in [`MealType::DISPLAY_ORDER`]
///
/// Shared by the ledger and the prompt builder so both agree on ordering.
#[must_use]
pub fn group_by_meal(entries: &[FoodEntry]) -> Vec<MealGroup<'_>> {
    MealType::DISPLAY_ORDER
        .iter()
        .filter_map(|meal| {
            let items: Vec<&FoodEntry> = entries.iter().filter(|e| e.meal == *meal).collect();
            if items.is_empty() {
                return None;
            }
            Some(MealGroup {
                meal: *meal,
                subtotal: sum_calories(items.iter().copied()),
                entries: items,
            })
        })
        .collect()
}

fn sum_calories<'a>(entries: impl Iterator<Item = &'a FoodEntry>) -> u64 {
    entries.map(|entry| u64::from(entry.calories)).sum()
}
