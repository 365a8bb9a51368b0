//! Trip summary shown next to a plan and in the PDF header

use serde::{Deserialize, Serialize};

/// Summary of the preferences a plan was generated for
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Budget in USD, as entered
    pub budget: String,
    /// Trip length in days
    pub duration: String,
    /// Travel style (`Luxury`, `Moderate`, `Budget`, `Backpacking`)
    pub style: String,
    /// Season or month
    pub season: String,
}

impl PlanSummary {
    pub fn budget_label(&self) -> String {
        format!("${}", self.budget)
    }

    pub fn duration_label(&self) -> String {
        format!("{} gün", self.duration)
    }

    pub fn style_label(&self) -> &str {
        localize_style(&self.style)
    }

    pub fn season_label(&self) -> &str {
        localize_season(&self.season)
    }
}

/// Turkish name of a travel style; unknown styles are shown as given
pub fn localize_style(style: &str) -> &str {
    match style {
        "Luxury" => "Lüks",
        "Moderate" => "Orta Seviye",
        "Budget" => "Ekonomik",
        "Backpacking" => "Sırt Çantalı",
        other => other,
    }
}

/// Turkish name of a season; matches `Spring`, `Early Spring (March)`, ...
pub fn localize_season(season: &str) -> &str {
    if season.contains("Spring") {
        "İlkbahar"
    } else if season.contains("Summer") {
        "Yaz"
    } else if season.contains("Fall") {
        "Sonbahar"
    } else if season.contains("Winter") {
        "Kış"
    } else {
        season
    }
}

/// Caption for the plan creation date
pub fn creation_date_label(date: &str) -> String {
    format!("Plan oluşturulma tarihi: {}", date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(style: &str, season: &str) -> PlanSummary {
        PlanSummary {
            budget: "2500".to_string(),
            duration: "10".to_string(),
            style: style.to_string(),
            season: season.to_string(),
        }
    }

    #[test]
    fn test_labels() {
        let s = summary("Backpacking", "Winter");
        assert_eq!(s.budget_label(), "$2500");
        assert_eq!(s.duration_label(), "10 gün");
        assert_eq!(s.style_label(), "Sırt Çantalı");
        assert_eq!(s.season_label(), "Kış");
    }

    #[test]
    fn test_season_substring_match() {
        assert_eq!(localize_season("Late Fall (November)"), "Sonbahar");
        assert_eq!(localize_season("Nisan"), "Nisan");
    }

    #[test]
    fn test_unknown_style_kept() {
        assert_eq!(localize_style("Family"), "Family");
        assert_eq!(localize_style("Luxury"), "Lüks");
    }

    #[test]
    fn test_creation_date_label() {
        assert_eq!(
            creation_date_label("19.10.2026"),
            "Plan oluşturulma tarihi: 19.10.2026"
        );
    }
}
