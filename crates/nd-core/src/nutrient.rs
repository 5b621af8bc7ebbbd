//! Nutrient key enum as the single source of truth for tracked nutrients.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AggregateError;

/// The tracked nutrient whitelist.
///
/// Variant order is the presentation order reports use. Anything outside
/// this set is rejected where strings are parsed, so aggregation never sees
/// an unknown key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NutrientKey {
    Calories,
    Protein,
    Carbohydrates,
    Sugar,
    Fat,
    SaturatedFat,
    Cholesterol,
    Fiber,
    Omega3,
}

impl NutrientKey {
    /// Every tracked key, in presentation order.
    pub const ALL: [Self; 9] = [
        Self::Calories,
        Self::Protein,
        Self::Carbohydrates,
        Self::Sugar,
        Self::Fat,
        Self::SaturatedFat,
        Self::Cholesterol,
        Self::Fiber,
        Self::Omega3,
    ];

    /// Canonical identifier used in CLI arguments, config, and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calories => "calories",
            Self::Protein => "protein",
            Self::Carbohydrates => "carbohydrates",
            Self::Sugar => "sugar",
            Self::Fat => "fat",
            Self::SaturatedFat => "saturated_fat",
            Self::Cholesterol => "cholesterol",
            Self::Fiber => "fiber",
            Self::Omega3 => "omega_3",
        }
    }

    /// Column label in the source table export.
    #[must_use]
    pub const fn column_label(self) -> &'static str {
        match self {
            Self::Calories => "Calories (kcal)",
            Self::Protein => "Protein (g)",
            Self::Carbohydrates => "Carbohydrates (g)",
            Self::Sugar => "Sugar (g)",
            Self::Fat => "Fat (g)",
            Self::SaturatedFat => "Saturated Fat (g)",
            Self::Cholesterol => "Cholesterol (mg)",
            Self::Fiber => "Fiber (g)",
            Self::Omega3 => "Omega-3 (mg)",
        }
    }

    /// Short label for report cards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calories => "Calories",
            Self::Protein => "Protein",
            Self::Carbohydrates => "Carbs",
            Self::Sugar => "Sugar",
            Self::Fat => "Fat",
            Self::SaturatedFat => "Saturated Fat",
            Self::Cholesterol => "Cholesterol",
            Self::Fiber => "Fiber",
            Self::Omega3 => "Omega-3",
        }
    }

    /// Measurement unit for recorded amounts.
    #[must_use]
    pub const fn unit(self) -> &'static str {
        match self {
            Self::Calories => "kcal",
            Self::Cholesterol | Self::Omega3 => "mg",
            _ => "g",
        }
    }

    /// Decimal places when rendering amounts. Whole numbers for kcal and
    /// mg, one decimal for grams.
    #[must_use]
    pub const fn precision(self) -> usize {
        match self {
            Self::Calories | Self::Cholesterol | Self::Omega3 => 0,
            _ => 1,
        }
    }

    /// Maps a source column label (e.g. `Protein (g)`) to a key.
    #[must_use]
    pub fn from_column_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|key| key.column_label() == label)
    }
}

impl fmt::Display for NutrientKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NutrientKey {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calories" => Ok(Self::Calories),
            "protein" => Ok(Self::Protein),
            "carbohydrates" | "carbs" => Ok(Self::Carbohydrates),
            "sugar" => Ok(Self::Sugar),
            "fat" => Ok(Self::Fat),
            "saturated_fat" | "saturated-fat" => Ok(Self::SaturatedFat),
            "cholesterol" => Ok(Self::Cholesterol),
            "fiber" => Ok(Self::Fiber),
            "omega_3" | "omega-3" => Ok(Self::Omega3),
            _ => Err(AggregateError::InvalidNutrientKey { key: s.to_string() }),
        }
    }
}

impl Serialize for NutrientKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for NutrientKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for key in NutrientKey::ALL {
            let s = key.to_string();
            let parsed: NutrientKey = s.parse().expect("should parse");
            assert_eq!(parsed, key, "roundtrip failed for {key:?}");
        }
    }

    #[test]
    fn aliases_parse() {
        let carbs: NutrientKey = "carbs".parse().expect("should parse");
        assert_eq!(carbs, NutrientKey::Carbohydrates);

        let saturated: NutrientKey = "saturated-fat".parse().expect("should parse");
        assert_eq!(saturated, NutrientKey::SaturatedFat);

        let omega: NutrientKey = "omega-3".parse().expect("should parse");
        assert_eq!(omega, NutrientKey::Omega3);
    }

    #[test]
    fn unknown_key_errors() {
        let result: Result<NutrientKey, _> = "vitamin-d".parse();
        assert_eq!(
            result.unwrap_err(),
            AggregateError::InvalidNutrientKey {
                key: "vitamin-d".to_string()
            }
        );
    }

    #[test]
    fn column_labels_roundtrip() {
        for key in NutrientKey::ALL {
            let mapped = NutrientKey::from_column_label(key.column_label());
            assert_eq!(mapped, Some(key));
        }
    }

    #[test]
    fn column_label_trims_whitespace() {
        assert_eq!(
            NutrientKey::from_column_label(" Calories (kcal) "),
            Some(NutrientKey::Calories)
        );
    }

    #[test]
    fn unknown_column_label_is_none() {
        assert_eq!(NutrientKey::from_column_label("Photo"), None);
        assert_eq!(NutrientKey::from_column_label("Item Name"), None);
    }

    #[test]
    fn units_and_precision_line_up() {
        assert_eq!(NutrientKey::Calories.unit(), "kcal");
        assert_eq!(NutrientKey::Calories.precision(), 0);
        assert_eq!(NutrientKey::Protein.unit(), "g");
        assert_eq!(NutrientKey::Protein.precision(), 1);
        assert_eq!(NutrientKey::Cholesterol.unit(), "mg");
        assert_eq!(NutrientKey::Cholesterol.precision(), 0);
        assert_eq!(NutrientKey::Omega3.unit(), "mg");
    }

    #[test]
    fn serde_uses_canonical_strings() {
        let json = serde_json::to_string(&NutrientKey::SaturatedFat).unwrap();
        assert_eq!(json, "\"saturated_fat\"");
        let parsed: NutrientKey = serde_json::from_str("\"omega_3\"").unwrap();
        assert_eq!(parsed, NutrientKey::Omega3);
    }

    #[test]
    fn serde_rejects_unknown_keys() {
        let result: Result<NutrientKey, _> = serde_json::from_str("\"caffeine\"");
        assert!(result.is_err());
    }
}
