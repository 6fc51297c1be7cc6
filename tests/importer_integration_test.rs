// ==========================================
// Pricing grid importer integration tests
// ==========================================
// Test goal: CSV parsing with typed row errors, and import into the
// pricing repository with entry order intact
// ==========================================


use cheptel::domain::types::SexCategory;
use cheptel::engine::PriceResolver;
use cheptel::importer::{ImportError, PricingGridImporter};
use cheptel::repository::PricingRepository;
use std::io::Write;
use tempfile::TempDir;
use test_helpers::create_test_db;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create csv");
    file.write_all(content.as_bytes()).expect("write csv");
    path
}

#[test]
fn test_parse_grids_grouped_by_species_in_row_order() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_csv(
        &dir,
        "grids.csv",
        "species_key,age_months,sex,price\n\
         chicken,1,Femelle,10\n\
         goose,2,Tous,25\n\
         chicken,3,Femelle,20\n\
         chicken,2,Mâle,8\n",
    );

    let tables = PricingGridImporter::parse_file(&path).expect("parse");
    assert_eq!(tables.len(), 2);
    // species keep first-seen order, entries keep row order
    assert_eq!(tables[0].species_key, "chicken");
    assert_eq!(tables[0].entries.len(), 3);
    assert_eq!(tables[0].entries[0].price, 10.0);
    assert_eq!(tables[0].entries[0].sex, SexCategory::Female);
    assert_eq!(tables[0].entries[2].sex, SexCategory::Male);
    assert_eq!(tables[1].species_key, "goose");
    assert_eq!(tables[1].entries[0].sex, SexCategory::Any);
}

#[test]
fn test_parse_rejects_bad_rows_with_typed_errors() {
    let dir = TempDir::new().expect("temp dir");

    let missing_column = write_csv(
        &dir,
        "missing.csv",
        "species_key,age_months,price\nchicken,1,10\n",
    );
    assert!(matches!(
        PricingGridImporter::parse_file(&missing_column),
        Err(ImportError::MissingColumn(col)) if col == "sex"
    ));

    let unknown_sex = write_csv(
        &dir,
        "sex.csv",
        "species_key,age_months,sex,price\nchicken,1,rooster,10\n",
    );
    assert!(matches!(
        PricingGridImporter::parse_file(&unknown_sex),
        Err(ImportError::UnknownSexCategory { row: 2, .. })
    ));

    let negative_price = write_csv(
        &dir,
        "price.csv",
        "species_key,age_months,sex,price\nchicken,1,Femelle,-3\n",
    );
    assert!(matches!(
        PricingGridImporter::parse_file(&negative_price),
        Err(ImportError::ValueRangeError { field, .. }) if field == "price"
    ));

    let empty_species = write_csv(
        &dir,
        "species.csv",
        "species_key,age_months,sex,price\n,1,Femelle,10\n",
    );
    assert!(matches!(
        PricingGridImporter::parse_file(&empty_species),
        Err(ImportError::PrimaryKeyMissing(2))
    ));

    let not_a_number = write_csv(
        &dir,
        "number.csv",
        "species_key,age_months,sex,price\nchicken,abc,Femelle,10\n",
    );
    assert!(matches!(
        PricingGridImporter::parse_file(&not_a_number),
        Err(ImportError::TypeConversionError { field, .. }) if field == "age_months"
    ));

    assert!(matches!(
        PricingGridImporter::parse_file(dir.path().join("absent.csv").as_path()),
        Err(ImportError::FileNotFound(_))
    ));
}

#[test]
fn test_import_file_writes_grids_and_keeps_tie_break() {
    let (_file, db_path) = create_test_db().expect("test db");
    let repo = PricingRepository::new(&db_path).expect("pricing repo");
    let dir = TempDir::new().expect("temp dir");

    // both female entries are 1.0 month from a 2-month request; the CSV row
    // order decides the winner
    let path = write_csv(
        &dir,
        "grids.csv",
        "species_key,age_months,sex,price\n\
         chicken,1,Femelle,10\n\
         chicken,3,Femelle,20\n",
    );

    let summary = PricingGridImporter::import_file(&path, &repo).expect("import");
    assert_eq!(summary.species_count, 1);
    assert_eq!(summary.entry_count, 2);

    let table = repo.get_table("chicken").expect("read").expect("present");
    assert_eq!(
        PriceResolver::price_for(&table, 2.0, SexCategory::Female),
        Some(10.0)
    );
}
