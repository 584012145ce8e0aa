// ABOUTME: Integration tests for the advice prompt builder
// ABOUTME: Validates meal ordering, placeholders, embedded totals and the exact section headings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use calorie_advisor::advice::prompt::{
    build_prompt, format_food_log, meal_label, section_headings, SECTION_HEADINGS_EN,
};
use calorie_advisor::config::AdviceLanguage;
use calorie_advisor::ledger::NutritionLedger;
use calorie_advisor::models::MealType;

fn prompt_for(ledger: &NutritionLedger, language: AdviceLanguage) -> String {
    build_prompt(
        ledger.daily_goal(),
        ledger.total_calories(),
        ledger.entries(),
        language,
    )
}

// =============================================================================
// Food log section
// =============================================================================

#[test]
fn test_food_log_groups_in_fixed_meal_order() {
    let mut ledger = NutritionLedger::default();
    ledger.add_entry("Pasta", 700, MealType::Dinner).unwrap();
    ledger.add_entry("Oatmeal", 300, MealType::Breakfast).unwrap();
    ledger.add_entry("Bread", 150, MealType::Dinner).unwrap();

    let log = format_food_log(ledger.entries(), AdviceLanguage::English);
    assert_eq!(
        log,
        "**Breakfast**\n- Oatmeal (300 kcal)\n\n**Dinner**\n- Pasta (700 kcal)\n- Bread (150 kcal)"
    );
}

#[test]
fn test_food_log_placeholder_when_empty() {
    assert_eq!(
        format_food_log(&[], AdviceLanguage::English),
        "No food has been logged yet."
    );
    assert_eq!(
        format_food_log(&[], AdviceLanguage::Spanish),
        "No se han registrado alimentos todavía."
    );
}

#[test]
fn test_food_log_spanish_labels() {
    let ledger = common::breakfast_and_lunch();
    let log = format_food_log(ledger.entries(), AdviceLanguage::Spanish);
    assert_eq!(
        log,
        "**Desayuno**\n- Oatmeal (300 kcal)\n\n**Almuerzo**\n- Salad (450 kcal)"
    );
}

#[test]
fn test_meal_labels() {
    assert_eq!(meal_label(MealType::Other, AdviceLanguage::English), "Other");
    assert_eq!(meal_label(MealType::Other, AdviceLanguage::Spanish), "Otros");
    assert_eq!(meal_label(MealType::Dinner, AdviceLanguage::Spanish), "Cena");
}

// =============================================================================
// Full prompt
// =============================================================================

#[test]
fn test_prompt_embeds_goal_and_total() {
    let prompt = prompt_for(&common::breakfast_and_lunch(), AdviceLanguage::English);
    assert!(prompt.contains("- My daily calorie goal: 2000 kcal"));
    assert!(prompt.contains("- Calories consumed so far: 750 kcal"));
    assert!(prompt
        .contains("**Breakfast**\n- Oatmeal (300 kcal)\n\n**Lunch**\n- Salad (450 kcal)"));
}

#[test]
fn test_prompt_requests_exact_headings() {
    let prompt = prompt_for(&NutritionLedger::default(), AdviceLanguage::English);
    for heading in SECTION_HEADINGS_EN {
        assert!(prompt.lines().any(|line| line == heading), "missing {heading}");
    }
    assert_eq!(
        SECTION_HEADINGS_EN,
        ["### Quick Analysis", "### Optimization Tips", "### Meal Suggestion"]
    );
}

#[test]
fn test_spanish_prompt_requests_spanish_headings() {
    let prompt = prompt_for(&common::breakfast_and_lunch(), AdviceLanguage::Spanish);
    for heading in section_headings(AdviceLanguage::Spanish) {
        assert!(prompt.lines().any(|line| line == heading), "missing {heading}");
    }
    assert!(prompt.contains("Mi meta de calorías diarias: 2000 kcal"));
}

#[test]
fn test_prompt_uses_placeholder_for_empty_day() {
    let prompt = prompt_for(&NutritionLedger::default(), AdviceLanguage::English);
    assert!(prompt.contains("No food has been logged yet."));
    assert!(prompt.contains("so far: 0 kcal"));
}

#[test]
fn test_prompt_is_deterministic() {
    let ledger = common::breakfast_and_lunch();
    assert_eq!(
        prompt_for(&ledger, AdviceLanguage::English),
        prompt_for(&ledger, AdviceLanguage::English)
    );
}

#[test]
fn test_food_names_are_not_treated_as_placeholders() {
    let mut ledger = NutritionLedger::default();
    ledger
        .add_entry("{daily_goal} cake", 400, MealType::Other)
        .unwrap();
    let prompt = prompt_for(&ledger, AdviceLanguage::English);
    assert!(prompt.contains("- {daily_goal} cake (400 kcal)"));
}
