use thiserror::Error;

use crate::models::{TripPlan, TripPreferences};

/// Errors from an optional narrative collaborator; never surfaced by planning
#[derive(Debug, Error)]
pub enum EnrichmentError {
    #[error("Enrichment service unavailable: {0}")]
    Unavailable(String),
}

/// Produces narrative text for a finished structural plan
pub trait NarrativeEnricher: Send + Sync {
    fn narrate(
        &self,
        plan: &TripPlan,
        preferences: &TripPreferences,
    ) -> Result<String, EnrichmentError>;
}

/// Builds a short overview straight from the plan contents
#[derive(Debug, Clone, Default)]
pub struct SummaryEnricher;

impl NarrativeEnricher for SummaryEnricher {
    fn narrate(
        &self,
        plan: &TripPlan,
        preferences: &TripPreferences,
    ) -> Result<String, EnrichmentError> {
        let mut parts = vec![format!("A {}-day trip", plan.duration_days)];

        if let Some(hotel) = &plan.accommodation {
            parts.push(format!("staying at {}", hotel.poi.name));
        }

        let visits = plan
            .daily_plans
            .iter()
            .flat_map(|day| day.activities.iter())
            .filter(|block| block.attraction.is_some())
            .count();
        parts.push(format!("with {} planned visits", visits));

        let mut text = parts.join(" ");
        if !preferences.activities.is_empty() {
            text.push_str(&format!(" for fans of {}", preferences.activities.join(" and ")));
        }
        text.push_str(&format!(", estimated at {:.0} in total.", plan.total_cost));

        Ok(text)
    }
}
