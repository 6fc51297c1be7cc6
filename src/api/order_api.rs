// ==========================================
// Cheptel - Order API
// ==========================================
// Responsibility: build, validate, price and submit orders
// Rules: (race, sex) pairs are unique inside one order; quantities are
// strictly positive; an unpriceable species flags the order incomplete
// instead of failing it
// ==========================================

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::order::{OrderDraft, OrderPriceBreakdown, OrderRecord, ProductLine, SelectionLine};
use crate::engine::aggregator::OrderPriceAggregator;
use crate::engine::availability::LotAvailabilityIndex;
use crate::engine::collection::CollectionDateReconciler;
use crate::engine::ranker::{LotRanker, SuggestionRequest};
use crate::repository::lot_repo::LotRepository;
use crate::repository::order_repo::OrderRepository;
use crate::repository::pricing_repo::PricingRepository;
use std::collections::BTreeMap;

// ==========================================
// SelectionBinding - how a new line got its lot
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionBinding {
    /// The caller supplied the lot explicitly.
    AlreadyBound,
    /// The best ranked lot was bound automatically.
    AutoBound,
    /// No active lot offers the race; the line was kept unbound and the
    /// caller must surface "no matching lot".
    UnboundNoMatchingLot,
}

// ==========================================
// OrderApi
// ==========================================
pub struct OrderApi {
    lot_repo: Arc<LotRepository>,
    pricing_repo: Arc<PricingRepository>,
    order_repo: Arc<OrderRepository>,
    ranker: LotRanker,
    aggregator: OrderPriceAggregator,
}

impl OrderApi {
    pub fn new(
        lot_repo: Arc<LotRepository>,
        pricing_repo: Arc<PricingRepository>,
        order_repo: Arc<OrderRepository>,
    ) -> Self {
        Self {
            lot_repo,
            pricing_repo,
            order_repo,
            ranker: LotRanker::new(),
            aggregator: OrderPriceAggregator::new(),
        }
    }

    // ==========================================
    // Draft construction
    // ==========================================

    /// Validate and append one selection line.
    ///
    /// When the line has no bound lot, the best ranked candidate for its
    /// race/age/quantity is bound automatically; if none exists the line is
    /// kept unbound and the outcome says so.
    ///
    /// # Errors
    /// - `InvalidQuantity` for a zero quantity
    /// - `DuplicateSelection` when the draft already holds the (race, sex)
    ///   pair
    pub fn add_selection(
        &self,
        draft: &mut OrderDraft,
        mut line: SelectionLine,
        today: NaiveDate,
    ) -> ApiResult<SelectionBinding> {
        if line.quantity == 0 {
            warn!(race = %line.race, "rejected selection with zero quantity");
            return Err(ApiError::InvalidQuantity {
                quantity: line.quantity,
            });
        }
        if let Some(existing) = draft.selections.iter().find(|s| s.conflicts_with(&line)) {
            warn!(race = %existing.race, sex = %existing.sex_preference, "rejected duplicate selection");
            return Err(ApiError::DuplicateSelection {
                race: line.race.clone(),
                sex: line.sex_preference,
            });
        }

        let binding = if line.bound_lot.is_some() {
            SelectionBinding::AlreadyBound
        } else {
            let lots = self
                .lot_repo
                .list_lots(Some(line.species_key.as_str()), true)?;
            let index = LotAvailabilityIndex::new(lots);
            let request = SuggestionRequest {
                race: line.race.clone(),
                desired_age: line.desired_age,
                quantity: line.quantity,
                delivery_date: draft.delivery_date,
            };
            match self.ranker.auto_select(&index, &request, today) {
                Some(best) => {
                    debug!(race = %line.race, lot_id = %best.lot.id, "auto-bound best ranked lot");
                    line.bound_lot = Some(best.lot);
                    SelectionBinding::AutoBound
                }
                None => {
                    warn!(race = %line.race, "no matching lot, selection kept unbound");
                    SelectionBinding::UnboundNoMatchingLot
                }
            }
        };

        draft.selections.push(line);
        Ok(binding)
    }

    /// Append a flat-rate product line.
    pub fn add_product(&self, draft: &mut OrderDraft, product: ProductLine) -> ApiResult<()> {
        if product.quantity == 0 {
            return Err(ApiError::InvalidQuantity {
                quantity: product.quantity,
            });
        }
        if product.unit_price < 0.0 || !product.unit_price.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "invalid unit price: {}",
                product.unit_price
            )));
        }
        draft.products.push(product);
        Ok(())
    }

    // ==========================================
    // Derived views
    // ==========================================

    /// Price the draft against the stored pricing grids.
    pub fn price(&self, draft: &OrderDraft) -> ApiResult<OrderPriceBreakdown> {
        let mut tables = BTreeMap::new();
        for selection in &draft.selections {
            if tables.contains_key(&selection.species_key) {
                continue;
            }
            if let Some(table) = self.pricing_repo.get_table(&selection.species_key)? {
                tables.insert(selection.species_key.clone(), table);
            }
        }
        Ok(self.aggregator.aggregate(draft, &tables))
    }

    /// Latest date satisfying every bound line's desired age, when any.
    pub fn suggested_collection_date(&self, draft: &OrderDraft) -> Option<NaiveDate> {
        CollectionDateReconciler::suggested_collection_date(&draft.selections)
    }

    // ==========================================
    // Submission
    // ==========================================

    /// Freeze the draft into an order record and persist it. The stock
    /// deduction itself belongs to the storage layer of the surrounding
    /// application; this crate only hands the payload back.
    pub fn submit(&self, draft: &OrderDraft) -> ApiResult<OrderRecord> {
        if draft.selections.is_empty() && draft.products.is_empty() {
            return Err(ApiError::InvalidInput("empty order".to_string()));
        }

        let price_breakdown = self.price(draft)?;
        if !price_breakdown.is_complete() {
            warn!(
                species = ?price_breakdown.missing_pricing_species,
                "submitting order with unpriced species"
            );
        }

        let record = OrderRecord {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            delivery_date: draft.delivery_date,
            suggested_collection_date: self.suggested_collection_date(draft),
            selections: draft.selections.clone(),
            products: draft.products.clone(),
            price_breakdown,
        };
        self.order_repo.save_order(&record)?;
        info!(
            order_id = %record.id,
            grand_total = record.price_breakdown.grand_total,
            lines = record.selections.len(),
            "order saved"
        );
        Ok(record)
    }

    // ==========================================
    // Queries
    // ==========================================

    pub fn get_order(&self, id: &str) -> ApiResult<OrderRecord> {
        self.order_repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound(format!("Order (id={id}) does not exist")))
    }

    pub fn list_orders(&self) -> ApiResult<Vec<OrderRecord>> {
        Ok(self.order_repo.list_orders()?)
    }
}
