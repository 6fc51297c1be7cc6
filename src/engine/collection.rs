// ==========================================
// Cheptel - Collection date reconciliation
// ==========================================
// Responsibility: find the single collection date satisfying every selection
// line at once
// Rule: no line with a bound lot means no suggestion; the caller must not
// default to "today"
// ==========================================

use crate::domain::order::SelectionLine;
use crate::engine::age::AgeProjector;
use chrono::NaiveDate;

// ==========================================
// CollectionDateReconciler
// ==========================================
pub struct CollectionDateReconciler;

impl CollectionDateReconciler {
    /// Latest date at which every bound lot has reached its line's desired
    /// age. Lines without a bound lot cannot constrain the date and are
    /// skipped.
    pub fn suggested_collection_date(selections: &[SelectionLine]) -> Option<NaiveDate> {
        selections
            .iter()
            .filter_map(|line| {
                line.bound_lot
                    .as_ref()
                    .map(|lot| AgeProjector::project_date(lot.reference_date, &line.desired_age))
            })
            .max()
    }
}
