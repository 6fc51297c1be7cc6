// ==========================================
// Cheptel - Lot availability index
// ==========================================
// Responsibility: read-only queries over a snapshot of lots
// Rule: never mutates a lot; "remaining after" is an advisory preview, the
// authoritative deduction happens in the storage layer on order commit
// ==========================================

use crate::domain::lot::Lot;

// ==========================================
// LotAvailabilityIndex - snapshot queries
// ==========================================
pub struct LotAvailabilityIndex {
    lots: Vec<Lot>,
}

impl LotAvailabilityIndex {
    /// Build an index over a lot snapshot. The snapshot keeps the insertion
    /// order of the underlying store; callers re-sort as needed.
    pub fn new(lots: Vec<Lot>) -> Self {
        Self { lots }
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    /// Active lots carrying at least one animal of `race`.
    pub fn lots_offering(&self, race: &str) -> Vec<&Lot> {
        self.lots
            .iter()
            .filter(|lot| lot.is_active && lot.total_for_race(race) > 0)
            .collect()
    }

    /// Headcount left in `lot` for `race` after a hypothetical deduction of
    /// `quantity`. Saturates at zero.
    pub fn remaining_after(lot: &Lot, race: &str, quantity: u32) -> u32 {
        lot.total_for_race(race).saturating_sub(quantity)
    }

    /// Whether the lot's quantities are projected rather than confirmed.
    pub fn is_estimated(lot: &Lot) -> bool {
        lot.is_estimated()
    }

    /// Projected headcount of an estimated lot:
    /// `round(egg_count × success_rate / 100)`. None for confirmed lots.
    pub fn estimated_remaining(lot: &Lot) -> Option<u32> {
        if !lot.is_estimated() {
            return None;
        }
        lot.estimation
            .as_ref()
            .map(|info| (info.egg_count as f64 * info.success_rate_percent / 100.0).round() as u32)
    }
}
