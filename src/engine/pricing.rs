// ==========================================
// Cheptel - Price lookup engine
// ==========================================
// Responsibility: nearest-age price resolution against a species grid
// Rule: an empty grid is the caller's problem to report; this module never
// invents a zero price
// ==========================================

use crate::domain::pricing::PricingTable;
use crate::domain::types::SexCategory;

// ==========================================
// PriceResolver - nearest-age matching
// ==========================================
pub struct PriceResolver;

impl PriceResolver {
    /// Price applicable to an age/sex combination.
    ///
    /// # Rules
    /// - Male/Female requests match entries tagged with the same sex or Any.
    /// - Any requests match Any-tagged entries only (sex-specific entries
    ///   are never compared for an "any sex" line).
    /// - Among matching entries the one minimizing |entry.age - age| wins;
    ///   on an exact distance tie the first entry in grid order wins.
    /// - Returns None when the grid is empty or nothing matches.
    pub fn price_for(
        table: &PricingTable,
        age_months: f64,
        preference: SexCategory,
    ) -> Option<f64> {
        let mut best: Option<(f64, f64)> = None; // (distance, price)
        for entry in &table.entries {
            let matches = match preference {
                SexCategory::Any => entry.sex == SexCategory::Any,
                sex => entry.sex == SexCategory::Any || entry.sex == sex,
            };
            if !matches {
                continue;
            }
            let distance = (entry.age_months - age_months).abs();
            // strict < keeps the first-encountered entry on ties
            let better = match best {
                None => true,
                Some((best_distance, _)) => distance < best_distance,
            };
            if better {
                best = Some((distance, entry.price));
            }
        }
        best.map(|(_, price)| price)
    }
}
