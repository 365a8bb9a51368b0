//! Trip preferences collected by the planning form

use koreplan_core::{PlanKind, PlanSummary};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const DEFAULT_BUDGET: &str = "3000";
pub const DEFAULT_DURATION: &str = "7";
pub const DEFAULT_STYLE: &str = "Moderate";
pub const DEFAULT_INTEREST: &str = "Cultural";
pub const DEFAULT_FOOD: &str = "Mix of Korean and international cuisine";
pub const DEFAULT_ACCOMMODATION: &str = "Mid-range Hotels";
pub const DEFAULT_SEASON: &str = "Spring";

/// Preferences for one plan request; every field is optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPreferences {
    /// Budget in USD; the form sends either a string or a number
    #[serde(deserialize_with = "string_or_number")]
    pub budget: Option<String>,

    /// Trip length in days
    #[serde(deserialize_with = "string_or_number")]
    pub duration: Option<String>,

    pub travel_style: Option<String>,
    pub interests: Vec<String>,
    pub food_preferences: Option<String>,
    pub accommodation: Option<String>,
    pub season: Option<String>,
}

impl TripPreferences {
    /// Budget as used for `kind`.
    ///
    /// Regular plans keep what was entered (trimmed); the bilingual plan
    /// truncates it to whole dollars. Missing or unusable values become
    /// [`DEFAULT_BUDGET`].
    pub fn budget_for(&self, kind: PlanKind) -> String {
        let entered = self.budget.as_deref().map(str::trim).unwrap_or_default();

        match kind {
            PlanKind::Regular if !entered.is_empty() => entered.to_string(),
            PlanKind::Regular => DEFAULT_BUDGET.to_string(),
            PlanKind::Korean => match entered.parse::<f64>() {
                Ok(amount) if amount.is_finite() => format!("{}", amount.trunc() as i64),
                _ => DEFAULT_BUDGET.to_string(),
            },
        }
    }

    pub fn duration(&self) -> &str {
        or_default(&self.duration, DEFAULT_DURATION)
    }

    pub fn travel_style(&self) -> &str {
        or_default(&self.travel_style, DEFAULT_STYLE)
    }

    pub fn food_preferences(&self) -> &str {
        or_default(&self.food_preferences, DEFAULT_FOOD)
    }

    pub fn accommodation(&self) -> &str {
        or_default(&self.accommodation, DEFAULT_ACCOMMODATION)
    }

    pub fn season(&self) -> &str {
        or_default(&self.season, DEFAULT_SEASON)
    }

    /// Interests as listed in the prompt
    pub fn interests_text(&self) -> String {
        if self.interests.is_empty() {
            DEFAULT_INTEREST.to_string()
        } else {
            self.interests.join(", ")
        }
    }

    /// Key under which the generated plan is cached
    pub fn cache_key(&self, kind: PlanKind) -> String {
        let key = format!(
            "{}_{}_{}_{}_{}_{}_{}",
            self.budget_for(kind),
            self.duration(),
            self.travel_style(),
            self.interests.join(","),
            self.food_preferences(),
            self.accommodation(),
            self.season()
        );

        match kind {
            PlanKind::Regular => key,
            PlanKind::Korean => format!("korean_{}", key),
        }
    }

    /// Summary returned alongside the plan
    pub fn summary(&self, kind: PlanKind) -> PlanSummary {
        PlanSummary {
            budget: self.budget_for(kind),
            duration: self.duration().to_string(),
            style: self.travel_style().to_string(),
            season: self.season().to_string(),
        }
    }
}

fn or_default<'a>(value: &'a Option<String>, default: &'a str) -> &'a str {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v,
        _ => default,
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}
