//! Plan prompt templates
//!
//! Templates are embedded at compile time and use `{{VARIABLE}}`
//! placeholders filled from the trip preferences.

use std::collections::HashMap;

use koreplan_core::PlanKind;

use crate::preferences::TripPreferences;

const REGULAR_PROMPT: &str = include_str!("prompts/regular.md");
const KOREAN_PROMPT: &str = include_str!("prompts/korean.md");

const REGULAR_SYSTEM: &str = "Sen Güney Kore turizmi konusunda uzmanlaşmış bir seyahat planlama uzmanısın. Tüm cevaplarını Türkçe olarak vermelisin.";
const KOREAN_SYSTEM: &str = "Sen hem Korece hem Türkçe bilen, Kore göçmenlik prosedürlerini iyi anlayan bir seyahat belgeleri uzmanısın.";

/// Replacement for placeholders nobody filled in
const UNSET: &str = "(belirtilmemiş)";

/// Get the raw prompt template for a plan kind
pub fn get_template(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Regular => REGULAR_PROMPT,
        PlanKind::Korean => KOREAN_PROMPT,
    }
}

/// System message sent before the prompt
pub fn system_prompt(kind: PlanKind) -> &'static str {
    match kind {
        PlanKind::Regular => REGULAR_SYSTEM,
        PlanKind::Korean => KOREAN_SYSTEM,
    }
}

/// Context for rendering a prompt template
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    variables: HashMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    /// Set a variable value (builder pattern)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Fill every trip variable from the preferences, with the budget as
    /// normalized for `kind`
    pub fn from_preferences(prefs: &TripPreferences, kind: PlanKind) -> Self {
        Self::new()
            .with("BUDGET", prefs.budget_for(kind))
            .with("DURATION", prefs.duration())
            .with("STYLE", prefs.travel_style())
            .with("INTERESTS", prefs.interests_text())
            .with("FOOD", prefs.food_preferences())
            .with("ACCOMMODATION", prefs.accommodation())
            .with("SEASON", prefs.season())
    }
}

/// Render the template for `kind` with the given context
pub fn render(kind: PlanKind, context: &PromptContext) -> String {
    render_template(get_template(kind), context)
}

/// Render the prompt for a plan request
pub fn plan_prompt(kind: PlanKind, prefs: &TripPreferences) -> String {
    render(kind, &PromptContext::from_preferences(prefs, kind))
}

/// Fill the template's own `{{NAME}}` placeholders in one pass, so values
/// are never scanned again
fn render_template(template: &str, context: &PromptContext) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        let after = &rest[open + 2..];
        let Some(len) = after.find("}}") else {
            break;
        };

        let name = &after[..len];
        result.push_str(&rest[..open]);
        if is_placeholder(name) {
            let value = context.variables.get(name).map_or(UNSET, String::as_str);
            result.push_str(value);
        } else {
            result.push_str(&rest[open..open + 2 + len + 2]);
        }
        rest = &after[len + 2..];
    }

    result.push_str(rest);
    result
}

fn is_placeholder(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}
