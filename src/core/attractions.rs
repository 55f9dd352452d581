//! Attraction recommendations.

use validator::Validate;

use crate::error::PlanError;
use crate::models::requests::{validate_budget, validate_center, validate_radius};
use crate::models::{ActivitySetting, Attraction, AttractionRequest, Candidate};

use super::filters::{attraction_within_budget, matching_tags, within_radius};
use super::ranking::{rank_candidates, summarize, Recommender};
use super::scoring::{calculate_score, inputs_for, ScoringWeights};

#[derive(Debug, Clone, Default)]
pub struct AttractionScorer {
    weights: ScoringWeights,
}

impl AttractionScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    fn validate(request: &AttractionRequest) -> Result<(), PlanError> {
        request.validate()?;
        validate_center(&request.center)?;
        validate_radius(request.radius_km)?;
        validate_budget("budget_per_ticket", request.budget_per_ticket)
    }

    #[inline]
    fn matches_setting(attraction: &Attraction, setting: ActivitySetting) -> bool {
        match setting {
            ActivitySetting::Any => true,
            ActivitySetting::Indoor => attraction.is_indoor(),
            ActivitySetting::Outdoor => !attraction.is_indoor(),
        }
    }

    fn reasons(attraction: &Attraction, request: &AttractionRequest) -> Vec<String> {
        let mut reasons = Vec::new();

        if !attraction.highlights.is_empty() {
            reasons.push(format!("Highlights: {}", summarize(&attraction.highlights)));
        }

        let matched = matching_tags(&attraction.tags, &request.preferences);
        if !matched.is_empty() {
            reasons.push(format!("Matches your interests: {}", summarize(&matched)));
        }

        if !attraction.recommended_time.best_times.is_empty() {
            reasons.push(format!(
                "Best visited: {}",
                summarize(&attraction.recommended_time.best_times)
            ));
        }

        if attraction.price.amount == 0.0 {
            reasons.push("Free admission".to_string());
        }

        reasons
    }

    fn notes(attraction: &Attraction) -> Vec<String> {
        let mut notes = Vec::new();
        let hours = &attraction.opening_hours;

        if !hours.start.is_empty() && !hours.end.is_empty() {
            notes.push(format!("Open {} to {}", hours.start, hours.end));
        }
        if let Some(hours_note) = hours.notes.as_deref().filter(|n| !n.is_empty()) {
            notes.push(hours_note.to_string());
        }

        if let Some(ticket_note) = attraction.price.notes.as_deref().filter(|n| !n.is_empty()) {
            notes.push(format!("Tickets: {}", ticket_note));
        }

        match attraction.recommended_time.hours {
            0 => {}
            1 => notes.push("Plan about 1 hour".to_string()),
            n => notes.push(format!("Plan about {} hours", n)),
        }

        notes
    }
}

impl Recommender for AttractionScorer {
    type Poi = Attraction;
    type Request = AttractionRequest;

    fn name(&self) -> &str {
        "attraction"
    }

    fn recommend(
        &self,
        request: &AttractionRequest,
        universe: &[Attraction],
    ) -> Result<Vec<Candidate<Attraction>>, PlanError> {
        Self::validate(request)?;

        let candidates: Vec<Candidate<Attraction>> =
            within_radius(universe, &request.center, request.radius_km)
                .filter(|(attraction, _)| Self::matches_setting(attraction, request.setting))
                .filter(|(attraction, _)| {
                    attraction_within_budget(attraction, request.budget_per_ticket)
                })
                .map(|(attraction, distance)| {
                    let inputs = inputs_for(
                        attraction,
                        &attraction.category,
                        &request.preferences,
                        &request.preferences,
                        distance,
                        request.radius_km,
                    );
                    let score = calculate_score(&inputs, &self.weights);

                    let mut candidate = Candidate::new(
                        attraction.clone(),
                        distance,
                        score,
                        attraction.price.amount,
                    );
                    candidate.reasons = Self::reasons(attraction, request);
                    candidate.notes = Self::notes(attraction);
                    candidate
                })
                .collect();

        let considered = candidates.len();
        let ranked = rank_candidates(candidates, request.limit);

        tracing::debug!(
            scorer = self.name(),
            setting = ?request.setting,
            considered,
            returned = ranked.len(),
            "ranked attractions"
        );

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hours, Location, Price, RecommendedTime};

    fn create_attraction(
        id: &str,
        category: &str,
        tags: &[&str],
        ticket: f64,
        lat: f64,
        lon: f64,
    ) -> Attraction {
        Attraction {
            id: id.to_string(),
            name: format!("Attraction {}", id),
            district_id: "west-lake".to_string(),
            description: String::new(),
            location: Location::new(lat, lon),
            category: category.to_string(),
            price: Price {
                amount: ticket,
                currency: Some("CNY".to_string()),
                notes: None,
            },
            rating: 4.7,
            opening_hours: Hours {
                start: "08:00".to_string(),
                end: "17:30".to_string(),
                notes: None,
                break_time: None,
            },
            recommended_time: RecommendedTime {
                hours: 2,
                best_times: vec!["morning".to_string()],
            },
            highlights: vec!["Lakeside pagoda".to_string()],
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn create_request(setting: ActivitySetting) -> AttractionRequest {
        AttractionRequest {
            center: Location::new(30.2587, 120.1315),
            radius_km: 5.0,
            budget_per_ticket: Some(100.0),
            preferences: vec!["natural".to_string(), "cultural".to_string()],
            setting,
            limit: 5,
        }
    }

    fn fixtures() -> Vec<Attraction> {
        vec![
            create_attraction("lake", "natural", &["natural", "scenic"], 0.0, 30.25, 120.14),
            create_attraction("museum", "cultural", &["museum", "cultural"], 0.0, 30.26, 120.13),
            create_attraction("pricey", "cultural", &["cultural"], 150.0, 30.26, 120.13),
        ]
    }

    #[test]
    fn test_setting_filter() {
        let scorer = AttractionScorer::default();

        let outdoor = scorer
            .recommend(&create_request(ActivitySetting::Outdoor), &fixtures())
            .unwrap();
        assert!(outdoor.iter().all(|c| !c.poi.is_indoor()));
        assert_eq!(outdoor[0].poi.id, "lake");

        let indoor = scorer
            .recommend(&create_request(ActivitySetting::Indoor), &fixtures())
            .unwrap();
        assert_eq!(indoor.len(), 1);
        assert_eq!(indoor[0].poi.id, "museum");
    }

    #[test]
    fn test_ticket_budget_respected() {
        let scorer = AttractionScorer::default();
        let ranked = scorer.recommend(&create_request(ActivitySetting::Any), &fixtures()).unwrap();

        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|c| c.cost <= 100.0));
    }

    #[test]
    fn test_explanations() {
        let scorer = AttractionScorer::default();
        let ranked = scorer
            .recommend(&create_request(ActivitySetting::Outdoor), &fixtures())
            .unwrap();
        let candidate = &ranked[0];

        assert!(candidate.reasons.iter().any(|r| r.contains("Lakeside pagoda")));
        assert!(candidate.reasons.iter().any(|r| r.contains("natural")));
        assert!(candidate.reasons.iter().any(|r| r == "Free admission"));
        assert!(candidate.notes.contains(&"Open 08:00 to 17:30".to_string()));
        assert!(candidate.notes.contains(&"Plan about 2 hours".to_string()));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let scorer = AttractionScorer::default();
        let mut request = create_request(ActivitySetting::Any);
        request.radius_km = -1.0;

        assert!(scorer.recommend(&request, &fixtures()).unwrap_err().is_validation());
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let scorer = AttractionScorer::default();
        let request = create_request(ActivitySetting::Any);
        let first = scorer.recommend(&request, &fixtures()).unwrap();
        let second = scorer.recommend(&request, &fixtures()).unwrap();
        assert_eq!(first, second);
    }
}
