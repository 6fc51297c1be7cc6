// ==========================================
// Cheptel - Order price aggregation engine
// ==========================================
// Responsibility: turn an order draft into a per-line and total price
// breakdown against the species pricing grids
// Rule: species without usable pricing are reported, never priced at zero
// silently; recomputation over unchanged inputs is byte-identical
// ==========================================

use crate::domain::order::{LinePricing, OrderDraft, OrderPriceBreakdown, ProductPricing};
use crate::domain::pricing::PricingTable;
use crate::engine::age::AgeProjector;
use crate::engine::pricing::PriceResolver;
use std::collections::{BTreeMap, BTreeSet};

/// Round to currency precision (2 decimals).
fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ==========================================
// OrderPriceAggregator
// ==========================================
pub struct OrderPriceAggregator {
    // stateless engine, no injected dependencies
}

impl OrderPriceAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// Price every line of the draft.
    ///
    /// # Rules
    /// - A species with an absent or empty grid goes into
    ///   `missing_pricing_species`; its lines contribute zero but stay in
    ///   the breakdown so the order is visibly incomplete.
    /// - A grid with no entry matching the line's sex category is treated
    ///   the same way.
    /// - The age used for pricing is the bound lot's age at the delivery
    ///   date when both are known, otherwise the raw desired age.
    /// - Product lines are flat rate: unit price × quantity, no age.
    pub fn aggregate(
        &self,
        draft: &OrderDraft,
        tables: &BTreeMap<String, PricingTable>,
    ) -> OrderPriceBreakdown {
        let mut lines = Vec::with_capacity(draft.selections.len());
        let mut missing: BTreeSet<String> = BTreeSet::new();
        let mut grand_total = 0.0_f64;

        for selection in &draft.selections {
            let table = tables
                .get(&selection.species_key)
                .filter(|t| !t.is_empty());

            let unit_price = match table {
                Some(table) => {
                    let age_months = match (&selection.bound_lot, draft.delivery_date) {
                        (Some(lot), Some(delivery)) => {
                            AgeProjector::age_between(lot.reference_date, delivery)
                                .months_equivalent()
                        }
                        // no lot correction possible; price the request as asked
                        _ => selection.desired_age.total_months(),
                    };
                    PriceResolver::price_for(table, age_months, selection.sex_preference)
                }
                None => None,
            };

            let line_total = match unit_price {
                Some(price) => round_currency(price * selection.quantity as f64),
                None => {
                    missing.insert(selection.species_key.clone());
                    0.0
                }
            };
            grand_total += line_total;

            lines.push(LinePricing {
                line: selection.clone(),
                unit_price,
                line_total,
            });
        }

        let mut products = Vec::with_capacity(draft.products.len());
        for product in &draft.products {
            let line_total = round_currency(product.unit_price * product.quantity as f64);
            grand_total += line_total;
            products.push(ProductPricing {
                line: product.clone(),
                line_total,
            });
        }

        OrderPriceBreakdown {
            lines,
            products,
            grand_total: round_currency(grand_total),
            missing_pricing_species: missing,
        }
    }
}
