// ==========================================
// Order flow end-to-end tests
// ==========================================
// Test goal: the whole path the order screen takes — seed lots and pricing,
// build a draft through the api with validation, price it, submit it, read
// it back
// ==========================================


#[path = "helpers/test_data_builder.rs"]
mod test_data_builder;

use cheptel::api::{ApiError, AvailabilityApi, OrderApi, SelectionBinding};
use cheptel::domain::order::{OrderDraft, ProductLine, SelectionLine};
use cheptel::domain::types::{AgeSpec, SexCategory};
use cheptel::logging;
use cheptel::repository::{LotRepository, OrderRepository, PricingRepository};
use chrono::NaiveDate;
use std::sync::Arc;
use test_data_builder::{chicken_pricing_table, LotBuilder};
use test_helpers::create_test_db;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

struct TestContext {
    _file: tempfile::NamedTempFile,
    lot_repo: Arc<LotRepository>,
    pricing_repo: Arc<PricingRepository>,
    order_api: OrderApi,
    availability_api: AvailabilityApi,
}

fn setup() -> TestContext {
    logging::init_test();
    let (file, db_path) = create_test_db().expect("test db");
    let lot_repo = Arc::new(LotRepository::new(&db_path).expect("lot repo"));
    let pricing_repo = Arc::new(PricingRepository::new(&db_path).expect("pricing repo"));
    let order_repo = Arc::new(OrderRepository::new(&db_path).expect("order repo"));
    let order_api = OrderApi::new(lot_repo.clone(), pricing_repo.clone(), order_repo);
    let availability_api = AvailabilityApi::new(lot_repo.clone());
    TestContext {
        _file: file,
        lot_repo,
        pricing_repo,
        order_api,
        availability_api,
    }
}

fn seed_lots(ctx: &TestContext) {
    ctx.lot_repo
        .batch_insert_lots(&[
            LotBuilder::new("old")
                .reference_date(date(2024, 1, 1))
                .allocation("Leghorn", 6, 6)
                .build(),
            LotBuilder::new("young")
                .reference_date(date(2024, 3, 1))
                .allocation("Leghorn", 4, 4)
                .allocation("Sussex", 2, 2)
                .build(),
        ])
        .expect("seed lots");
}

fn selection(race: &str, sex: SexCategory, quantity: u32) -> SelectionLine {
    SelectionLine {
        race: race.to_string(),
        species_key: "chicken".to_string(),
        sex_preference: sex,
        quantity,
        desired_age: AgeSpec::new(2, 0),
        bound_lot: None,
    }
}

#[test]
fn test_build_price_and_submit_order() {
    let ctx = setup();
    seed_lots(&ctx);
    ctx.pricing_repo
        .replace_table(&chicken_pricing_table())
        .expect("seed pricing");

    let mut draft = OrderDraft {
        delivery_date: Some(date(2024, 5, 1)),
        ..OrderDraft::new()
    };
    let today = date(2024, 4, 1);

    // auto-binding picks the cohort closest to 2 months at delivery
    let binding = ctx
        .order_api
        .add_selection(&mut draft, selection("Leghorn", SexCategory::Female, 3), today)
        .expect("add selection");
    assert_eq!(binding, SelectionBinding::AutoBound);
    assert_eq!(
        draft.selections[0].bound_lot.as_ref().map(|l| l.id.as_str()),
        Some("young")
    );

    ctx.order_api
        .add_product(
            &mut draft,
            ProductLine {
                label: "Aliment démarrage".to_string(),
                unit_price: 12.5,
                quantity: 2,
            },
        )
        .expect("add product");

    let breakdown = ctx.order_api.price(&draft).expect("price");
    // bound lot is ~2.004 months old at delivery; the Any entry at 2.0
    // months is the nearest match for a female line
    assert_eq!(breakdown.lines[0].unit_price, Some(11.0));
    assert_eq!(breakdown.grand_total, 58.0);
    assert!(breakdown.is_complete());

    // collection date: when the bound lot reaches 2 months
    assert_eq!(
        ctx.order_api.suggested_collection_date(&draft),
        Some(date(2024, 5, 1))
    );

    let record = ctx.order_api.submit(&draft).expect("submit");
    assert_eq!(record.price_breakdown.grand_total, 58.0);

    let reloaded = ctx.order_api.get_order(&record.id).expect("reload");
    assert_eq!(reloaded.price_breakdown.grand_total, 58.0);
    assert_eq!(reloaded.selections.len(), 1);
    assert_eq!(ctx.order_api.list_orders().expect("list").len(), 1);
}

#[test]
fn test_add_selection_validation() {
    let ctx = setup();
    seed_lots(&ctx);

    let mut draft = OrderDraft::new();
    let today = date(2024, 4, 1);

    // zero quantity rejected before any ranking happens
    let err = ctx
        .order_api
        .add_selection(&mut draft, selection("Leghorn", SexCategory::Female, 0), today)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidQuantity { quantity: 0 }));
    assert!(draft.selections.is_empty());

    ctx.order_api
        .add_selection(&mut draft, selection("Leghorn", SexCategory::Female, 2), today)
        .expect("first add");

    // same (race, sex) pair rejected
    let err = ctx
        .order_api
        .add_selection(&mut draft, selection("Leghorn", SexCategory::Female, 5), today)
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateSelection { .. }));
    assert_eq!(draft.selections.len(), 1);

    // same race, other sex is fine
    ctx.order_api
        .add_selection(&mut draft, selection("Leghorn", SexCategory::Male, 1), today)
        .expect("other sex add");
    assert_eq!(draft.selections.len(), 2);
}

#[test]
fn test_no_matching_lot_stays_unbound() {
    let ctx = setup();
    seed_lots(&ctx);

    let mut draft = OrderDraft::new();
    let binding = ctx
        .order_api
        .add_selection(
            &mut draft,
            selection("Marans", SexCategory::Any, 2),
            date(2024, 4, 1),
        )
        .expect("add");
    assert_eq!(binding, SelectionBinding::UnboundNoMatchingLot);
    assert!(draft.selections[0].bound_lot.is_none());

    // no bound lot anywhere -> no collection date suggestion
    assert_eq!(ctx.order_api.suggested_collection_date(&draft), None);
}

#[test]
fn test_submit_flags_missing_pricing_instead_of_failing() {
    let ctx = setup();
    seed_lots(&ctx);
    // no pricing grid stored at all

    let mut draft = OrderDraft::new();
    ctx.order_api
        .add_selection(
            &mut draft,
            selection("Leghorn", SexCategory::Female, 2),
            date(2024, 4, 1),
        )
        .expect("add");

    let record = ctx.order_api.submit(&draft).expect("submit");
    assert!(record
        .price_breakdown
        .missing_pricing_species
        .contains("chicken"));
    assert_eq!(record.price_breakdown.grand_total, 0.0);
}

#[test]
fn test_submit_rejects_empty_order() {
    let ctx = setup();
    let err = ctx.order_api.submit(&OrderDraft::new()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_availability_api_suggestions_and_summary() {
    let ctx = setup();
    seed_lots(&ctx);

    let suggestions = ctx
        .availability_api
        .suggestions(
            "chicken",
            "Leghorn",
            AgeSpec::new(2, 0),
            3,
            Some(date(2024, 5, 1)),
            date(2024, 4, 1),
        )
        .expect("suggestions");
    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0].lot.id, "young");

    let summary = ctx.availability_api.race_summary("chicken").expect("summary");
    let leghorn = summary.iter().find(|r| r.race == "Leghorn").expect("row");
    assert_eq!(leghorn.total_males, 10);
    assert_eq!(leghorn.total_females, 10);
    assert_eq!(leghorn.lot_count, 2);
    let sussex = summary.iter().find(|r| r.race == "Sussex").expect("row");
    assert_eq!(sussex.lot_count, 1);

    // unknown race is an empty list, not an error
    let none = ctx
        .availability_api
        .suggestions(
            "chicken",
            "Marans",
            AgeSpec::new(2, 0),
            1,
            None,
            date(2024, 4, 1),
        )
        .expect("suggestions");
    assert!(none.is_empty());
}
