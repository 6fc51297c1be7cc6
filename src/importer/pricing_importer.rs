// ==========================================
// Cheptel - Pricing grid importer
// ==========================================
// Responsibility: load species pricing grids from CSV into the pricing
// repository
// Expected columns: species_key, age_months, sex, price
// Row order becomes entry position, so a re-imported grid keeps its
// tie-break behavior
// ==========================================

use crate::domain::pricing::{PricingEntry, PricingTable};
use crate::domain::types::SexCategory;
use crate::importer::error::ImportError;
use crate::repository::pricing_repo::PricingRepository;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;
use tracing::info;

// ==========================================
// PricingGridImporter
// ==========================================
pub struct PricingGridImporter;

/// Outcome of one import run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub species_count: usize,
    pub entry_count: usize,
}

impl PricingGridImporter {
    /// Parse a CSV file into per-species grids, keeping row order.
    ///
    /// # Errors
    /// Per-row typed errors; the import is all-or-nothing, a bad row aborts
    /// the run before anything is written.
    pub fn parse_file(path: &Path) -> Result<Vec<PricingTable>, ImportError> {
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        if let Some(ext) = path.extension() {
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(path)
            .map_err(|e| ImportError::CsvParseError(e.to_string()))?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let headers = reader.headers()?.clone();
        let column = |name: &str| -> Result<usize, ImportError> {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| ImportError::MissingColumn(name.to_string()))
        };
        let species_col = column("species_key")?;
        let age_col = column("age_months")?;
        let sex_col = column("sex")?;
        let price_col = column("price")?;

        // species in first-seen order; entries in row order within a species
        let mut tables: Vec<PricingTable> = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let row = idx + 2; // 1-based, after the header line
            let record = result?;

            let species_key = record.get(species_col).unwrap_or("").trim().to_string();
            if species_key.is_empty() {
                return Err(ImportError::PrimaryKeyMissing(row));
            }

            let parse_number = |col: usize, field: &str| -> Result<f64, ImportError> {
                let raw = record.get(col).unwrap_or("").trim();
                raw.parse::<f64>()
                    .map_err(|e| ImportError::TypeConversionError {
                        row,
                        field: field.to_string(),
                        message: format!("'{raw}': {e}"),
                    })
            };
            let age_months = parse_number(age_col, "age_months")?;
            let price = parse_number(price_col, "price")?;
            if age_months < 0.0 || !age_months.is_finite() {
                return Err(ImportError::ValueRangeError {
                    row,
                    field: "age_months".to_string(),
                    value: age_months,
                });
            }
            if price < 0.0 || !price.is_finite() {
                return Err(ImportError::ValueRangeError {
                    row,
                    field: "price".to_string(),
                    value: price,
                });
            }

            let sex_raw = record.get(sex_col).unwrap_or("").trim();
            let sex = SexCategory::parse(sex_raw).ok_or_else(|| {
                ImportError::UnknownSexCategory {
                    row,
                    value: sex_raw.to_string(),
                }
            })?;

            let entry = PricingEntry::new(age_months, sex, price);
            match tables.iter_mut().find(|t| t.species_key == species_key) {
                Some(table) => table.entries.push(entry),
                None => tables.push(PricingTable::new(species_key, vec![entry])),
            }
        }

        Ok(tables)
    }

    /// Parse and write every grid through the repository.
    pub fn import_file(
        path: &Path,
        repo: &PricingRepository,
    ) -> Result<ImportSummary, ImportError> {
        let tables = Self::parse_file(path)?;
        let mut entry_count = 0;
        for table in &tables {
            entry_count += repo.replace_table(table)?;
        }
        info!(
            file = %path.display(),
            species = tables.len(),
            entries = entry_count,
            "pricing grids imported"
        );
        Ok(ImportSummary {
            species_count: tables.len(),
            entry_count,
        })
    }
}
