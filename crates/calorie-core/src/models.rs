// ABOUTME: Food logging models for the in-memory nutrition ledger
// ABOUTME: FoodEntry, FoodEntryId, and the fixed four-way MealType enumeration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Meal category an entry is logged under
///
/// The set is closed: adding a category means updating [`MealType::DISPLAY_ORDER`]
/// and every label table in the same change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum MealType {
    /// Breakfast meal
    Breakfast,
    /// Lunch meal
    Lunch,
    /// Dinner meal
    Dinner,
    /// Snacks and anything else
    Other,
}

impl MealType {
    /// Fixed order used for grouping, listing and prompt construction
    pub const DISPLAY_ORDER: [Self; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Other];

    /// Parse a meal category from user text
    ///
    /// Accepts the English and Spanish names. Returns `None` for anything else
    /// so callers can reject the input instead of guessing.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" | "desayuno" => Some(Self::Breakfast),
            "lunch" | "almuerzo" => Some(Self::Lunch),
            "dinner" | "cena" => Some(Self::Dinner),
            "other" | "otros" | "snack" => Some(Self::Other),
            _ => None,
        }
    }

    /// Canonical lowercase identifier
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Breakfast => "breakfast",
            Self::Lunch => "lunch",
            Self::Dinner => "dinner",
            Self::Other => "other",
        }
    }
}

impl Display for MealType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Session-unique identifier of a logged entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct FoodEntryId(u64);

impl FoodEntryId {
    /// Wrap a raw identifier
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw numeric value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl Display for FoodEntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A single logged food item
///
/// Immutable once created. Validation (non-blank name, positive calories)
/// happens at the ledger boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Unique identifier within the session
    pub id: FoodEntryId,
    /// Food name, trimmed
    pub name: String,
    /// Energy in kcal, always positive
    pub calories: u32,
    /// Meal category
    pub meal: MealType,
}
