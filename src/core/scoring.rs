use crate::models::{PointOfInterest, Tier};

/// Scoring weights
///
/// The absolute values only matter relative to each other; they are
/// exposed through configuration so deployments can tune them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    /// Multiplier for the `(1 - distance / radius)` proximity term
    pub distance: f64,
    /// Bonus when the POI category or cuisine is one the traveler asked for
    pub category_match: f64,
    /// Bonus per matching preference tag, amenity or feature
    pub tag_match: f64,
    pub tier_top: f64,
    pub tier_mid: f64,
    pub tier_other: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            distance: 3.0,
            category_match: 5.0,
            tag_match: 2.0,
            tier_top: 5.0,
            tier_mid: 4.0,
            tier_other: 3.0,
        }
    }
}

/// Per-signal inputs for one candidate
#[derive(Debug, Clone, Copy)]
pub struct ScoreInputs {
    pub distance_km: f64,
    pub radius_km: f64,
    pub category_matched: bool,
    pub tag_matches: usize,
    pub tier: Tier,
}

/// Calculate a candidate score
///
/// Scoring formula:
/// score = (1 - distance / radius) * distance
///       + category_match            # exact category / cuisine hit
///       + tag_match * matching tags # amenities, features, tags
///       + tier bonus                # top / mid / other
pub fn calculate_score(inputs: &ScoreInputs, weights: &ScoringWeights) -> f64 {
    let mut score =
        calculate_distance_score(inputs.distance_km, inputs.radius_km) * weights.distance;

    if inputs.category_matched {
        score += weights.category_match;
    }

    score += inputs.tag_matches as f64 * weights.tag_match;
    score += tier_bonus(inputs.tier, weights);

    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Proximity factor in 0..=1, linear in distance
#[inline]
pub fn calculate_distance_score(distance_km: f64, radius_km: f64) -> f64 {
    if radius_km <= 0.0 || distance_km > radius_km {
        return 0.0;
    }
    (1.0 - distance_km / radius_km).clamp(0.0, 1.0)
}

#[inline]
pub fn tier_bonus(tier: Tier, weights: &ScoringWeights) -> f64 {
    match tier {
        Tier::Top => weights.tier_top,
        Tier::Mid => weights.tier_mid,
        Tier::Other => weights.tier_other,
    }
}

/// Score inputs for a POI whose category is checked against `wanted_categories`
/// and whose tags are checked against `preferences`
pub fn inputs_for<P: PointOfInterest>(
    poi: &P,
    category: &str,
    wanted_categories: &[String],
    preferences: &[String],
    distance_km: f64,
    radius_km: f64,
) -> ScoreInputs {
    ScoreInputs {
        distance_km,
        radius_km,
        category_matched: contains_ignore_case(wanted_categories, category),
        tag_matches: super::filters::matching_tags(poi.tags(), preferences).len(),
        tier: poi.tier(),
    }
}

#[inline]
pub fn contains_ignore_case(haystack: &[String], needle: &str) -> bool {
    !needle.is_empty() && haystack.iter().any(|item| item.eq_ignore_ascii_case(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inputs(
        distance_km: f64,
        category_matched: bool,
        tag_matches: usize,
        tier: Tier,
    ) -> ScoreInputs {
        ScoreInputs {
            distance_km,
            radius_km: 2.0,
            category_matched,
            tag_matches,
            tier,
        }
    }

    #[test]
    fn test_distance_score() {
        // At center = full score
        assert_eq!(calculate_distance_score(0.0, 2.0), 1.0);

        // At the radius = zero score
        assert_eq!(calculate_distance_score(2.0, 2.0), 0.0);

        // Halfway = half score
        assert!((calculate_distance_score(1.0, 2.0) - 0.5).abs() < 1e-12);

        // Outside = zero
        assert_eq!(calculate_distance_score(3.0, 2.0), 0.0);
    }

    #[test]
    fn test_weighted_sum() {
        let weights = ScoringWeights::default();
        // 0.5 * 3 + 5 + 2 * 2 + 4
        let score = calculate_score(&inputs(1.0, true, 2, Tier::Mid), &weights);
        assert!((score - 14.5).abs() < 1e-9, "got {}", score);
    }

    #[test]
    fn test_closer_scores_higher() {
        let weights = ScoringWeights::default();
        let near = calculate_score(&inputs(0.2, false, 0, Tier::Other), &weights);
        let far = calculate_score(&inputs(1.8, false, 0, Tier::Other), &weights);
        assert!(near > far);
    }

    #[test]
    fn test_tier_bonus_mapping() {
        let weights = ScoringWeights::default();
        assert_eq!(tier_bonus(Tier::Top, &weights), 5.0);
        assert_eq!(tier_bonus(Tier::Mid, &weights), 4.0);
        assert_eq!(tier_bonus(Tier::Other, &weights), 3.0);
    }

    #[test]
    fn test_zero_weights_give_zero_score() {
        let weights = ScoringWeights {
            distance: 0.0,
            category_match: 0.0,
            tag_match: 0.0,
            tier_top: 0.0,
            tier_mid: 0.0,
            tier_other: 0.0,
        };
        assert_eq!(calculate_score(&inputs(0.5, true, 3, Tier::Top), &weights), 0.0);
    }

    #[test]
    fn test_category_match_ignores_case() {
        assert!(contains_ignore_case(&["Cultural".to_string()], "cultural"));
        assert!(!contains_ignore_case(&["cultural".to_string()], ""));
    }
}
