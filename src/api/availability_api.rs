// ==========================================
// Cheptel - Availability API
// ==========================================
// Responsibility: the dashboard-search side of the engine — ranked lot
// suggestions and per-race stock summaries over the stored lots
// ==========================================

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::api::error::ApiResult;
use crate::domain::types::AgeSpec;
use crate::engine::availability::LotAvailabilityIndex;
use crate::engine::ranker::{LotRanker, LotSuggestion, SuggestionRequest};
use crate::repository::lot_repo::LotRepository;
use std::collections::BTreeMap;

// ==========================================
// RaceAvailability - dashboard summary row
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceAvailability {
    pub race: String,
    pub total_males: u32,
    pub total_females: u32,
    pub lot_count: u32,
}

// ==========================================
// AvailabilityApi
// ==========================================
pub struct AvailabilityApi {
    lot_repo: Arc<LotRepository>,
    ranker: LotRanker,
}

impl AvailabilityApi {
    pub fn new(lot_repo: Arc<LotRepository>) -> Self {
        Self {
            lot_repo,
            ranker: LotRanker::new(),
        }
    }

    /// Ranked suggestions for one race/age/quantity/delivery query.
    ///
    /// An empty list means no active lot offers the race; it is a normal
    /// answer, not an error.
    pub fn suggestions(
        &self,
        species_key: &str,
        race: &str,
        desired_age: AgeSpec,
        quantity: u32,
        delivery_date: Option<NaiveDate>,
        today: NaiveDate,
    ) -> ApiResult<Vec<LotSuggestion>> {
        let lots = self.lot_repo.list_lots(Some(species_key), true)?;
        let index = LotAvailabilityIndex::new(lots);
        let request = SuggestionRequest {
            race: race.to_string(),
            desired_age,
            quantity,
            delivery_date,
        };
        let suggestions = self.ranker.rank(&index, &request, today);
        debug!(
            race,
            candidates = suggestions.len(),
            "availability query answered"
        );
        Ok(suggestions)
    }

    /// Stock summary by race across active lots of one species.
    pub fn race_summary(&self, species_key: &str) -> ApiResult<Vec<RaceAvailability>> {
        let lots = self.lot_repo.list_lots(Some(species_key), true)?;

        let mut by_race: BTreeMap<String, RaceAvailability> = BTreeMap::new();
        for lot in &lots {
            for (race, counts) in &lot.race_allocations {
                if counts.total() == 0 {
                    continue;
                }
                let entry = by_race
                    .entry(race.clone())
                    .or_insert_with(|| RaceAvailability {
                        race: race.clone(),
                        total_males: 0,
                        total_females: 0,
                        lot_count: 0,
                    });
                entry.total_males += counts.males;
                entry.total_females += counts.females;
                entry.lot_count += 1;
            }
        }
        Ok(by_race.into_values().collect())
    }
}
