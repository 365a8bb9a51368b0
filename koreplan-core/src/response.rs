//! Plan generation response as exchanged with the backend

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::summary::PlanSummary;
use crate::Error;

/// Which plan variant was requested
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanKind {
    /// Day-by-day travel plan
    #[default]
    Regular,
    /// Bilingual plan for immigration/police checks
    Korean,
}

impl PlanKind {
    pub fn as_str(self) -> &'static str {
        match self {
            PlanKind::Regular => "regular",
            PlanKind::Korean => "korean",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" => Ok(PlanKind::Regular),
            "korean" => Ok(PlanKind::Korean),
            other => Err(Error::Other(format!("Unknown plan kind: {}", other))),
        }
    }
}

/// Response body of a plan generation request
///
/// `plan` holds the raw plan text; renderers turn it into HTML.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,

    /// Creation date, `dd.mm.yyyy`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<PlanSummary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PlanResponse {
    /// A successful response
    pub fn success(plan: impl Into<String>, date: impl Into<String>, summary: PlanSummary) -> Self {
        Self {
            success: true,
            plan: Some(plan.into()),
            date: Some(date.into()),
            summary: Some(summary),
            error: None,
        }
    }

    /// A failed response carrying an error message
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Parse a response from JSON
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_success_response() {
        let json = r#"{
            "success": true,
            "plan": "**Kore**",
            "date": "19.10.2026",
            "summary": {"budget": "3000", "duration": "7", "style": "Moderate", "season": "Spring"}
        }"#;
        let response = PlanResponse::from_json(json).unwrap();
        assert!(response.success);
        assert_eq!(response.plan.as_deref(), Some("**Kore**"));
        assert_eq!(response.summary.unwrap().duration, "7");
    }

    #[test]
    fn test_failure_serialization_skips_missing_fields() {
        let json = serde_json::to_string(&PlanResponse::failure("boom")).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"boom"}"#);
    }

    #[test]
    fn test_plan_kind_parse() {
        assert_eq!("Korean".parse::<PlanKind>().unwrap(), PlanKind::Korean);
        assert_eq!("regular".parse::<PlanKind>().unwrap(), PlanKind::Regular);
        assert!("pdf".parse::<PlanKind>().is_err());
        assert_eq!(PlanKind::Korean.to_string(), "korean");
    }
}
