use std::cmp::Ordering;

use crate::error::PlanError;
use crate::models::{Candidate, PointOfInterest};

/// Capability shared by the per-domain scorers
///
/// # Pipeline Stages
/// 1. Request validation
/// 2. Budget filter
/// 3. Radius filter
/// 4. Scoring and exclusion of zero scores
/// 5. Ranking with [`rank_candidates`] and truncation
/// 6. Explanation text
pub trait Recommender: Send + Sync {
    type Poi: PointOfInterest;
    type Request;

    /// Returns the name of this scorer (for logging/debugging)
    fn name(&self) -> &str;

    /// Rank `universe` against `request`; an empty result is not an error
    fn recommend(
        &self,
        request: &Self::Request,
        universe: &[Self::Poi],
    ) -> Result<Vec<Candidate<Self::Poi>>, PlanError>;
}

/// Ordering shared by every scorer: score descending, then distance
/// ascending, then id ascending so equal candidates keep a stable order
pub fn compare_candidates<P: PointOfInterest>(a: &Candidate<P>, b: &Candidate<P>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
        .then_with(|| a.poi.id().cmp(b.poi.id()))
}

/// Drop zero-score candidates, sort and cap at `limit`
pub fn rank_candidates<P: PointOfInterest>(
    mut candidates: Vec<Candidate<P>>,
    limit: usize,
) -> Vec<Candidate<P>> {
    candidates.retain(|c| c.score.is_finite() && c.score > 0.0);
    candidates.sort_by(compare_candidates);
    candidates.truncate(limit);
    candidates
}

/// Join up to three items for explanation text
pub(crate) fn summarize(items: &[String]) -> String {
    match items.len() {
        0 => String::new(),
        1..=3 => items.join(", "),
        n => format!("{} and {} more", items[..3].join(", "), n - 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attraction, Location, Price};

    fn candidate(id: &str, score: f64, distance_km: f64) -> Candidate<Attraction> {
        let poi = Attraction {
            id: id.to_string(),
            name: format!("Attraction {}", id),
            district_id: String::new(),
            description: String::new(),
            location: Location::new(30.25, 120.13),
            category: String::new(),
            price: Price {
                amount: 0.0,
                currency: None,
                notes: None,
            },
            rating: 4.0,
            opening_hours: Default::default(),
            recommended_time: Default::default(),
            highlights: vec![],
            tags: vec![],
        };
        Candidate::new(poi, distance_km, score, 0.0)
    }

    #[test]
    fn test_sorted_by_score_then_distance() {
        let ranked = rank_candidates(
            vec![
                candidate("far", 8.0, 1.5),
                candidate("best", 9.0, 1.9),
                candidate("near", 8.0, 0.3),
            ],
            5,
        );

        let ids: Vec<_> = ranked.iter().map(|c| c.poi.id.as_str()).collect();
        assert_eq!(ids, vec!["best", "near", "far"]);
    }

    #[test]
    fn test_zero_scores_excluded() {
        let ranked = rank_candidates(vec![candidate("a", 0.0, 0.1), candidate("b", 1.0, 0.1)], 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].poi.id, "b");
    }

    #[test]
    fn test_respects_limit() {
        let candidates = (0..20).map(|i| candidate(&i.to_string(), i as f64 + 1.0, 0.5)).collect();
        let ranked = rank_candidates(candidates, 5);
        assert_eq!(ranked.len(), 5);
        assert_eq!(ranked[0].score, 20.0);
    }

    #[test]
    fn test_full_ties_fall_back_to_id() {
        let ranked = rank_candidates(vec![candidate("b", 5.0, 1.0), candidate("a", 5.0, 1.0)], 5);
        assert_eq!(ranked[0].poi.id, "a");
    }

    #[test]
    fn test_summarize() {
        let items: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        assert_eq!(summarize(&items[..2]), "a, b");
        assert_eq!(summarize(&items), "a, b, c and 2 more");
    }
}
