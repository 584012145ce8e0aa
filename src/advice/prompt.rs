// ABOUTME: Advice request builder turning a ledger snapshot into a natural-language prompt
// ABOUTME: Templates are loaded at compile time and request three sections with exact headings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Advice Prompts
//!
//! The heading lines requested here are a contract with the renderer: the
//! model is asked to answer under exactly these `### ` headings, and the
//! renderer classifies lines by that marker.

use crate::config::AdviceLanguage;
use crate::ledger::group_by_meal;
use crate::models::{FoodEntry, MealType};

/// English advice template
pub const ADVICE_PROMPT_EN: &str = include_str!("templates/advice_en.md");

/// Spanish advice template
pub const ADVICE_PROMPT_ES: &str = include_str!("templates/advice_es.md");

/// Exact English section headings requested from the model
pub const SECTION_HEADINGS_EN: [&str; 3] = [
    "### Quick Analysis",
    "### Optimization Tips",
    "### Meal Suggestion",
];

/// Exact Spanish section headings requested from the model
pub const SECTION_HEADINGS_ES: [&str; 3] = [
    "### Análisis Rápido",
    "### Consejos para Optimizar",
    "### Sugerencia de Comida",
];

/// Template for `language`
#[must_use]
pub const fn template(language: AdviceLanguage) -> &'static str {
    match language {
        AdviceLanguage::English => ADVICE_PROMPT_EN,
        AdviceLanguage::Spanish => ADVICE_PROMPT_ES,
    }
}

/// Section headings the template for `language` asks for
#[must_use]
pub const fn section_headings(language: AdviceLanguage) -> [&'static str; 3] {
    match language {
        AdviceLanguage::English => SECTION_HEADINGS_EN,
        AdviceLanguage::Spanish => SECTION_HEADINGS_ES,
    }
}

/// Display label of a meal category
#[must_use]
pub const fn meal_label(meal: MealType, language: AdviceLanguage) -> &'static str {
    match (language, meal) {
        (AdviceLanguage::English, MealType::Breakfast) => "Breakfast",
        (AdviceLanguage::English, MealType::Lunch) => "Lunch",
        (AdviceLanguage::English, MealType::Dinner) => "Dinner",
        (AdviceLanguage::English, MealType::Other) => "Other",
        (AdviceLanguage::Spanish, MealType::Breakfast) => "Desayuno",
        (AdviceLanguage::Spanish, MealType::Lunch) => "Almuerzo",
        (AdviceLanguage::Spanish, MealType::Dinner) => "Cena",
        (AdviceLanguage::Spanish, MealType::Other) => "Otros",
    }
}

/// Sentence substituted for the food log when nothing has been logged
#[must_use]
pub const fn empty_log_placeholder(language: AdviceLanguage) -> &'static str {
    match language {
        AdviceLanguage::English => "No food has been logged yet.",
        AdviceLanguage::Spanish => "No se han registrado alimentos todavía.",
    }
}

/// Render the food log section: one block per non-empty meal, blank line between
#[must_use]
pub fn format_food_log(entries: &[FoodEntry], language: AdviceLanguage) -> String {
    let blocks: Vec<String> = group_by_meal(entries)
        .into_iter()
        .map(|group| {
            let mut block = format!("**{}**", meal_label(group.meal, language));
            for entry in group.entries {
                block.push_str(&format!("\n- {} ({} kcal)", entry.name, entry.calories));
            }
            block
        })
        .collect();

    if blocks.is_empty() {
        empty_log_placeholder(language).to_owned()
    } else {
        blocks.join("\n\n")
    }
}

/// Build the advice prompt for a day
///
/// Deterministic and side-effect free. The food log is substituted last so
/// user-entered names are never themselves scanned for placeholders.
#[must_use]
pub fn build_prompt(
    daily_goal: u32,
    total_calories: u64,
    entries: &[FoodEntry],
    language: AdviceLanguage,
) -> String {
    template(language)
        .replace("{daily_goal}", &daily_goal.to_string())
        .replace("{total_calories}", &total_calories.to_string())
        .replace("{food_log}", &format_food_log(entries, language))
}
