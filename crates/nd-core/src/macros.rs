//! Macro-calorie proportions.

use serde::Serialize;

use crate::error::AggregateError;
use crate::nutrient::NutrientKey;
use crate::totals::NutrientTotals;

const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_CARBS: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;

/// Share of caloric intake attributable to each macronutrient, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MacroProportions {
    pub protein_pct: f64,
    pub carbohydrates_pct: f64,
    pub fat_pct: f64,
}

/// Computes the macro split of a totals record.
///
/// Fails when the calorie total is unavailable or not positive, so callers
/// render a placeholder instead of propagating NaN or infinity. A missing
/// macro amount counts as zero grams; only the denominator guards.
pub fn macro_proportions(totals: &NutrientTotals) -> Result<MacroProportions, AggregateError> {
    let calories = totals.get(NutrientKey::Calories);
    let Some(total_kcal) = calories.filter(|kcal| *kcal > 0.0) else {
        return Err(AggregateError::DivisionUndefined { calories });
    };

    let grams = |key: NutrientKey| totals.get(key).unwrap_or(0.0);

    Ok(MacroProportions {
        protein_pct: grams(NutrientKey::Protein) * KCAL_PER_G_PROTEIN / total_kcal * 100.0,
        carbohydrates_pct: grams(NutrientKey::Carbohydrates) * KCAL_PER_G_CARBS / total_kcal
            * 100.0,
        fat_pct: grams(NutrientKey::Fat) * KCAL_PER_G_FAT / total_kcal * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(values: &[(NutrientKey, f64)]) -> NutrientTotals {
        let mut totals = NutrientTotals::new();
        for &(key, amount) in values {
            totals.insert(key, amount);
        }
        totals
    }

    #[test]
    fn splits_calories_across_macros() {
        // 50g protein + 50g carbs + 20g fat = 200 + 200 + 180 = 580 kcal.
        let totals = totals(&[
            (NutrientKey::Calories, 580.0),
            (NutrientKey::Protein, 50.0),
            (NutrientKey::Carbohydrates, 50.0),
            (NutrientKey::Fat, 20.0),
        ]);

        let split = macro_proportions(&totals).expect("calories are positive");

        assert!((split.protein_pct - 34.48).abs() < 0.01);
        assert!((split.carbohydrates_pct - 34.48).abs() < 0.01);
        assert!((split.fat_pct - 31.03).abs() < 0.01);
        let sum = split.protein_pct + split.carbohydrates_pct + split.fat_pct;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_calories_fail() {
        let totals = totals(&[(NutrientKey::Calories, 0.0), (NutrientKey::Protein, 30.0)]);
        let err = macro_proportions(&totals).unwrap_err();
        assert_eq!(
            err,
            AggregateError::DivisionUndefined {
                calories: Some(0.0)
            }
        );
    }

    #[test]
    fn absent_calories_fail() {
        let totals = totals(&[(NutrientKey::Protein, 30.0)]);
        let err = macro_proportions(&totals).unwrap_err();
        assert_eq!(err, AggregateError::DivisionUndefined { calories: None });
    }

    #[test]
    fn negative_calories_fail() {
        let totals = totals(&[(NutrientKey::Calories, -120.0)]);
        let err = macro_proportions(&totals).unwrap_err();
        assert_eq!(
            err,
            AggregateError::DivisionUndefined {
                calories: Some(-120.0)
            }
        );
    }

    #[test]
    fn missing_macros_count_as_zero_grams() {
        let totals = totals(&[(NutrientKey::Calories, 400.0), (NutrientKey::Fat, 10.0)]);

        let split = macro_proportions(&totals).expect("calories are positive");

        assert!((split.protein_pct - 0.0).abs() < f64::EPSILON);
        assert!((split.carbohydrates_pct - 0.0).abs() < f64::EPSILON);
        assert!((split.fat_pct - 22.5).abs() < 1e-9);
    }
}
