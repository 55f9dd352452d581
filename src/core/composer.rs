//! Multi-day itinerary composition.
//!
//! One hotel search for the whole stay, then an independent job per day for
//! weather, dining and activity blocks, then cost, tips and highlights.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use uuid::Uuid;

use crate::config::{HotZone, PlannerSettings, Settings};
use crate::error::PlanError;
use crate::models::{
    ActivityBlock, ActivityKind, ActivitySetting, Attraction, AttractionRequest, BlockPeriod,
    Candidate, DailyPlan, DiningPick, DiningRequest, DiningSlot, Hotel, HotelRequest,
    PointOfInterest, TripPlan, TripRequest, WeatherAdvice,
};
use crate::services::enrichment::NarrativeEnricher;
use crate::services::provider::ProviderError;
use crate::services::store::{DataStore, Snapshot};

use super::attractions::AttractionScorer;
use super::dining::RestaurantScorer;
use super::lodging::HotelScorer;
use super::ranking::Recommender;
use super::weather::{discourages_outdoor, WeatherAdvisor};

const BASELINE_TIPS: &[&str] = &[
    "Book tickets for popular attractions in advance",
    "Pack rain gear just in case",
    "Check the forecast each morning and adjust plans as needed",
    "Keep valuables with you at all times",
];

/// Caller-held flag that stops planning before the next day starts
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct ItineraryComposer {
    store: Arc<DataStore>,
    planner: PlannerSettings,
    hot_zones: Vec<HotZone>,
    hotels: HotelScorer,
    restaurants: RestaurantScorer,
    attractions: AttractionScorer,
    advisor: WeatherAdvisor,
    enricher: Option<Arc<dyn NarrativeEnricher>>,
}

impl ItineraryComposer {
    pub fn new(store: Arc<DataStore>, settings: &Settings) -> Self {
        let weights = settings.scoring_weights();
        Self {
            store,
            planner: settings.planner.clone(),
            hot_zones: settings.hot_zones.clone(),
            hotels: HotelScorer::new(weights),
            restaurants: RestaurantScorer::new(weights),
            attractions: AttractionScorer::new(weights),
            advisor: WeatherAdvisor::new(settings.weather.clone()),
            enricher: None,
        }
    }

    /// Attach an optional narrative collaborator
    pub fn with_enricher(mut self, enricher: Arc<dyn NarrativeEnricher>) -> Self {
        self.enricher = Some(enricher);
        self
    }

    pub fn plan(&self, request: &TripRequest) -> Result<TripPlan, PlanError> {
        self.plan_with_cancel(request, &CancelToken::new())
    }

    /// Plan a trip, stopping with [`PlanError::Cancelled`] once `cancel` is set
    pub fn plan_with_cancel(
        &self,
        request: &TripRequest,
        cancel: &CancelToken,
    ) -> Result<TripPlan, PlanError> {
        request.validate_request()?;

        let days = usize::try_from(request.day_count()).unwrap_or_default();
        tracing::info!(
            start = %request.start_date,
            days,
            party_size = request.party_size,
            "planning trip"
        );

        if cancel.is_cancelled() {
            return Err(PlanError::Cancelled { completed_days: 0 });
        }

        let snapshot = self.store.snapshot();
        if !snapshot.is_loaded() {
            return Err(PlanError::data_unavailable(
                "hotels",
                ProviderError::Missing("hotels".to_string()),
            ));
        }

        let accommodation = self.select_accommodation(request, &snapshot)?;
        if accommodation.is_none() {
            tracing::warn!("no hotel matched the trip request");
        }

        let daily_plans = self.compose_days(request, &snapshot, days, cancel, &|_| {})?;

        let mut plan = self.finalize(request, accommodation, daily_plans);
        self.enrich(&mut plan, request);

        tracing::info!(
            plan_id = %plan.id,
            total_cost = plan.total_cost,
            tips = plan.tips.len(),
            "trip planned"
        );

        Ok(plan)
    }

    fn select_accommodation(
        &self,
        request: &TripRequest,
        snapshot: &Snapshot,
    ) -> Result<Option<Candidate<Hotel>>, PlanError> {
        let hotel_request = HotelRequest {
            center: request.center.clone(),
            radius_km: self.planner.hotel_radius_km,
            budget_per_night: request.budget.hotel_per_night,
            preferences: request.preferences.hotel.clone(),
            guests: request.party_size,
            requirements: request.requirements.clone(),
            limit: 1,
        };

        let ranked = self.hotels.recommend(&hotel_request, &snapshot.hotels)?;
        Ok(ranked.into_iter().next())
    }

    /// One job per day, reassembled in date order; `on_day_done` runs after each finished day
    fn compose_days(
        &self,
        request: &TripRequest,
        snapshot: &Snapshot,
        days: usize,
        cancel: &CancelToken,
        on_day_done: &(dyn Fn(usize) + Sync),
    ) -> Result<Vec<DailyPlan>, PlanError> {
        let outcomes: Vec<Option<DailyPlan>> = (0..days)
            .into_par_iter()
            .map(|index| {
                if cancel.is_cancelled() {
                    return None;
                }
                let date = request.start_date + Duration::days(index as i64);
                let day = self.plan_day(request, snapshot, date, index);
                on_day_done(index);
                Some(day)
            })
            .collect();

        let completed_days = outcomes.iter().filter(|day| day.is_some()).count();
        if completed_days < days {
            tracing::info!(completed_days, days, "planning cancelled");
            return Err(PlanError::Cancelled { completed_days });
        }

        Ok(outcomes.into_iter().flatten().collect())
    }

    fn plan_day(
        &self,
        request: &TripRequest,
        snapshot: &Snapshot,
        date: NaiveDate,
        index: usize,
    ) -> DailyPlan {
        let mut notes = Vec::new();

        let weather = self.advisor.advise_for_date(snapshot, date);
        if weather.is_none() {
            tracing::warn!(%date, "no forecast for day");
            notes.push("No weather forecast is available for this day".to_string());
        }

        let dining = self.pick_dining(request, snapshot, index, &mut notes);
        let activities =
            self.pick_activities(request, snapshot, weather.as_ref(), index, &mut notes);

        DailyPlan {
            date,
            weather,
            activities,
            dining,
            notes,
        }
    }

    fn pick_dining(
        &self,
        request: &TripRequest,
        snapshot: &Snapshot,
        index: usize,
        notes: &mut Vec<String>,
    ) -> Vec<DiningPick> {
        // Food budget is per person per day, split evenly across the two slots
        let slot_budget = request
            .budget
            .food_per_day
            .map(|food| food / DiningSlot::ALL.len() as f64);
        let mut picks: Vec<DiningPick> = Vec::with_capacity(DiningSlot::ALL.len());

        for slot in DiningSlot::ALL {
            let dining_request = DiningRequest {
                center: request.center.clone(),
                radius_km: self.planner.dining_radius_km,
                budget_per_person: slot_budget,
                cuisines: request.preferences.cuisine.clone(),
                preferences: request.requirements.clone(),
                party_size: request.party_size,
                slot,
                limit: self.planner.max_results,
            };

            let ranked = match self.restaurants.recommend(&dining_request, &snapshot.restaurants) {
                Ok(ranked) => ranked,
                Err(e) => {
                    tracing::warn!(slot = slot.label(), error = %e, "dining search failed");
                    Vec::new()
                }
            };

            let taken: Vec<&str> = picks.iter().map(|p| p.restaurant.poi.id.as_str()).collect();
            match rotate_pick(&ranked, index, &taken) {
                Some(restaurant) => picks.push(DiningPick {
                    slot,
                    time: slot.start_time().to_string(),
                    restaurant,
                }),
                None => notes.push(format!("No {} options found within budget", slot.label())),
            }
        }

        picks
    }

    fn pick_activities(
        &self,
        request: &TripRequest,
        snapshot: &Snapshot,
        weather: Option<&WeatherAdvice>,
        index: usize,
        notes: &mut Vec<String>,
    ) -> Vec<ActivityBlock> {
        let indoors = weather.map_or(false, discourages_outdoor);
        let (setting, kind) = if indoors {
            (ActivitySetting::Indoor, ActivityKind::Indoor)
        } else {
            (ActivitySetting::Outdoor, ActivityKind::Outdoor)
        };
        let precautions: &[String] = weather.map(|w| w.precautions.as_slice()).unwrap_or(&[]);

        let daytime = self.rank_attractions(request, setting, &snapshot.attractions);
        let evening_pool: Vec<Attraction> = snapshot
            .attractions
            .iter()
            .filter(|a| a.suits_evening())
            .cloned()
            .collect();
        let evening = self.rank_attractions(request, ActivitySetting::Any, &evening_pool);

        // The activity budget covers the whole day's tickets, not each block
        let mut remaining = request.budget.activity_per_day;
        let mut budget_spent = false;
        let mut taken: Vec<String> = Vec::new();
        let mut blocks = Vec::with_capacity(3);

        // Two daytime blocks per day, so rotate twice as fast through the pool
        let periods = [
            (BlockPeriod::Morning, kind, &daytime, index * 2),
            (BlockPeriod::Afternoon, kind, &daytime, index * 2 + 1),
            (BlockPeriod::Evening, ActivityKind::Leisure, &evening, index),
        ];
        for (period, block_kind, ranked, start) in periods {
            let ids: Vec<&str> = taken.iter().map(String::as_str).collect();
            let pool = affordable(ranked, remaining);
            let pick = rotate_pick(&pool, start, &ids);
            if pick.is_none() && rotate_pick(ranked, start, &ids).is_some() {
                budget_spent = true;
            }
            if let Some(candidate) = &pick {
                taken.push(candidate.poi.id.clone());
                remaining = remaining.map(|left| left - candidate.cost);
            }
            blocks.push(build_block(period, block_kind, pick, precautions));
        }

        if budget_spent {
            notes.push(
                "Daily activity budget reached; remaining blocks left as free time".to_string(),
            );
        }
        if indoors {
            notes.push("Weather favors indoor activities today".to_string());
        }

        blocks
    }

    fn rank_attractions(
        &self,
        request: &TripRequest,
        setting: ActivitySetting,
        universe: &[Attraction],
    ) -> Vec<Candidate<Attraction>> {
        let attraction_request = AttractionRequest {
            center: request.center.clone(),
            radius_km: self.planner.attraction_radius_km,
            budget_per_ticket: request.budget.activity_per_day,
            preferences: request.preferences.activities.clone(),
            setting,
            limit: self.planner.max_results,
        };

        self.attractions
            .recommend(&attraction_request, universe)
            .unwrap_or_else(|e| {
                tracing::warn!(?setting, error = %e, "attraction search failed");
                Vec::new()
            })
    }

    fn finalize(
        &self,
        request: &TripRequest,
        accommodation: Option<Candidate<Hotel>>,
        daily_plans: Vec<DailyPlan>,
    ) -> TripPlan {
        let nights = daily_plans.len();
        let party = f64::from(request.party_size);

        let lodging_cost = accommodation
            .as_ref()
            .map_or(0.0, |hotel| hotel.cost * nights as f64);
        let per_person: f64 = daily_plans.iter().map(DailyPlan::cost_per_person).sum();
        let total_cost = lodging_cost + per_person * party;

        let mut tips: Vec<String> = BASELINE_TIPS.iter().map(|t| t.to_string()).collect();
        for zone in self.hot_zones.iter().filter(|z| z.contains(&request.center)) {
            tips.extend(zone.tips.iter().cloned());
        }
        if let Some(total) = request.budget.total {
            if total_cost > total {
                tips.push(format!(
                    "Estimated cost {:.0} exceeds your total budget of {:.0}; consider fewer paid attractions",
                    total_cost, total
                ));
            }
        }

        let highlights = daily_plans
            .iter()
            .filter_map(|day| {
                let weather = day.weather.as_ref()?;
                (!weather.suitable.is_empty())
                    .then(|| format!("{}: good for {}", day.date, weather.suitable.join(", ")))
            })
            .collect();

        TripPlan {
            id: Uuid::new_v4(),
            duration_days: nights,
            accommodation,
            daily_plans,
            total_cost,
            tips,
            highlights,
            narrative: None,
        }
    }

    fn enrich(&self, plan: &mut TripPlan, request: &TripRequest) {
        let Some(enricher) = &self.enricher else {
            return;
        };

        match enricher.narrate(plan, &request.preferences) {
            Ok(text) => plan.narrative = Some(text),
            Err(e) => tracing::warn!(error = %e, "enrichment failed, keeping structural plan"),
        }
    }
}

/// Candidates whose cost still fits what is left of the day's budget
fn affordable<P: PointOfInterest>(
    ranked: &[Candidate<P>],
    remaining: Option<f64>,
) -> Vec<Candidate<P>> {
    ranked
        .iter()
        .filter(|candidate| remaining.map_or(true, |left| candidate.cost <= left))
        .cloned()
        .collect()
}

/// First candidate at or after `start` (wrapping) whose id is not in `taken`
fn rotate_pick<P: PointOfInterest>(
    ranked: &[Candidate<P>],
    start: usize,
    taken: &[&str],
) -> Option<Candidate<P>> {
    if ranked.is_empty() {
        return None;
    }
    (0..ranked.len())
        .map(|step| &ranked[(start + step) % ranked.len()])
        .find(|candidate| !taken.iter().any(|id| *id == candidate.poi.id()))
        .cloned()
}

fn build_block(
    period: BlockPeriod,
    kind: ActivityKind,
    attraction: Option<Candidate<Attraction>>,
    precautions: &[String],
) -> ActivityBlock {
    let mut notes = Vec::new();
    if attraction.is_none() {
        notes.push("Free time to explore the neighborhood".to_string());
    }
    notes.extend(precautions.iter().cloned());

    ActivityBlock {
        period,
        start_time: period.start_time().to_string(),
        duration_minutes: period.duration_minutes(),
        kind,
        attraction,
        notes,
    }
}
