use chrono::{TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    DatasetSource, Engine, EngineError, Month, PRICE_BUCKETS, RawDate, RawTransaction,
    StaticDataset, TransactionQuery,
};
use migration::MigratorTrait;

async fn memory_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

async fn engine_on(db: DatabaseConnection, items: Vec<RawTransaction>) -> Engine {
    Engine::builder()
        .database(db)
        .dataset(StaticDataset::new(items))
        .build()
        .await
        .unwrap()
}

async fn engine_with(items: Vec<RawTransaction>) -> Engine {
    let engine = engine_on(memory_db().await, items).await;
    engine.seed().await.unwrap();
    engine
}

fn item(id: i64, title: &str, price: f64, sold: bool, month: u32) -> RawTransaction {
    RawTransaction {
        id,
        title: title.to_string(),
        description: format!("{title} description"),
        price,
        category: "electronics".to_string(),
        sold,
        image: None,
        date_of_sale: RawDate::Text(
            Utc.with_ymd_and_hms(2022, month, 10, 12, 0, 0)
                .unwrap()
                .to_rfc3339(),
        ),
    }
}

fn in_category(mut raw: RawTransaction, category: &str) -> RawTransaction {
    raw.category = category.to_string();
    raw
}

fn mixed_year() -> Vec<RawTransaction> {
    vec![
        in_category(item(1, "Backpack", 109.95, true, 3), "men's clothing"),
        in_category(item(2, "T-shirt", 22.3, false, 3), "men's clothing"),
        in_category(item(3, "Ring", 695.0, true, 3), "jewelery"),
        in_category(item(4, "Monitor", 999.99, false, 3), "electronics"),
        in_category(item(5, "SSD", 100.5, true, 3), "electronics"),
        in_category(item(6, "Jacket", 56.99, true, 4), "women's clothing"),
        in_category(item(7, "Bracelet", 0.0, false, 4), "jewelery"),
        in_category(item(8, "Hard drive", 64.0, true, 11), "electronics"),
    ]
}

#[tokio::test]
async fn seed_is_idempotent() {
    let engine = engine_with(mixed_year()).await;

    assert_eq!(engine.seed().await.unwrap(), 8);
    assert_eq!(engine.seed().await.unwrap(), 8);

    let page = engine
        .list_transactions(&TransactionQuery::for_month(Month::March))
        .await
        .unwrap();
    assert_eq!(page.total, 5);
}

#[tokio::test]
async fn seed_without_dataset_fails() {
    let engine = Engine::builder()
        .database(memory_db().await)
        .build()
        .await
        .unwrap();

    assert!(matches!(
        engine.seed().await,
        Err(EngineError::SeedFetch(_))
    ));
}

#[tokio::test]
async fn seed_with_bad_date_keeps_previous_records() {
    let db = memory_db().await;
    let engine = engine_on(db.clone(), mixed_year()).await;
    engine.seed().await.unwrap();

    let mut broken = item(9, "Broken", 10.0, true, 3);
    broken.date_of_sale = RawDate::Text("someday".to_string());
    let reseeder = engine_on(db, vec![broken]).await;
    assert!(matches!(
        reseeder.seed().await,
        Err(EngineError::SeedFetch(_))
    ));

    let stats = engine.statistics(Month::March).await.unwrap();
    assert_eq!(stats.total_sold_items + stats.total_not_sold_items, 5);
}

#[tokio::test]
async fn replace_swaps_the_whole_collection() {
    let engine = engine_with(mixed_year()).await;

    let replacement: Vec<_> = vec![item(20, "Lamp", 30.0, true, 3)]
        .into_iter()
        .map(|raw| engine::Transaction::try_from(raw).unwrap())
        .collect();
    assert_eq!(engine.replace_transactions(&replacement).await.unwrap(), 1);

    let page = engine
        .list_transactions(&TransactionQuery::for_month(Month::March))
        .await
        .unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].title, "Lamp");
}

#[tokio::test]
async fn statistics_and_bar_chart_scenario() {
    let engine = engine_with(vec![
        item(1, "Cheap", 50.0, true, 3),
        item(2, "Middle", 150.0, false, 3),
        item(3, "Pricey", 920.0, true, 3),
    ])
    .await;

    let stats = engine.statistics(Month::March).await.unwrap();
    assert_eq!(stats.total_sale_amount, 970.0);
    assert_eq!(stats.total_sold_items, 2);
    assert_eq!(stats.total_not_sold_items, 1);

    let ranges = engine.price_ranges(Month::March).await.unwrap();
    assert_eq!(ranges.len(), 10);
    for range in ranges {
        let expected = match range.bucket.label().as_str() {
            "0-100" | "101-200" | "901-above" => 1,
            _ => 0,
        };
        assert_eq!(range.count, expected, "bucket {}", range.bucket.label());
    }
}

#[tokio::test]
async fn month_without_sales_reports_zero() {
    let engine = engine_with(vec![item(1, "Unsold", 10.0, false, 5)]).await;

    let stats = engine.statistics(Month::May).await.unwrap();
    assert_eq!(stats.total_sale_amount, 0.0);
    assert_eq!(stats.total_sold_items, 0);
    assert_eq!(stats.total_not_sold_items, 1);
}

#[tokio::test]
async fn aggregates_agree_with_month_totals() {
    let engine = engine_with(mixed_year()).await;

    for month in [Month::March, Month::April, Month::November, Month::June] {
        let total = engine
            .list_transactions(&TransactionQuery::for_month(month))
            .await
            .unwrap()
            .total;

        let stats = engine.statistics(month).await.unwrap();
        assert_eq!(stats.total_sold_items + stats.total_not_sold_items, total);

        let histogram: u64 = engine
            .price_ranges(month)
            .await
            .unwrap()
            .iter()
            .map(|range| range.count)
            .sum();
        assert_eq!(histogram, total);

        let categories: u64 = engine
            .categories(month)
            .await
            .unwrap()
            .iter()
            .map(|entry| entry.count)
            .sum();
        assert_eq!(categories, total);
    }
}

#[tokio::test]
async fn fractional_prices_fill_the_gap_between_labels() {
    let engine = engine_with(mixed_year()).await;

    let ranges = engine.price_ranges(Month::March).await.unwrap();
    let count_of = |label: &str| {
        ranges
            .iter()
            .find(|range| range.bucket.label() == label)
            .map(|range| range.count)
            .unwrap()
    };
    assert_eq!(count_of("0-100"), 1);
    assert_eq!(count_of("101-200"), 2);
    assert_eq!(count_of("601-700"), 1);
    assert_eq!(count_of("901-above"), 1);
}

#[tokio::test]
async fn categories_are_grouped_per_month() {
    let engine = engine_with(mixed_year()).await;

    let categories = engine.categories(Month::March).await.unwrap();
    let pairs: Vec<(&str, u64)> = categories
        .iter()
        .map(|entry| (entry.category.as_str(), entry.count))
        .collect();
    assert_eq!(
        pairs,
        [("electronics", 2), ("jewelery", 1), ("men's clothing", 2)]
    );
}

#[tokio::test]
async fn listing_paginates_and_total_ignores_paging() {
    let items = (1..=25)
        .map(|id| item(id, &format!("Item {id}"), 10.0, id % 2 == 0, 3))
        .collect();
    let engine = engine_with(items).await;

    let mut query = TransactionQuery::for_month(Month::March);
    let first = engine.list_transactions(&query).await.unwrap();
    assert_eq!(first.data.len(), 10);
    assert_eq!(first.total, 25);
    assert_eq!(first.data[0].id, 1);

    query.page = 3;
    let last = engine.list_transactions(&query).await.unwrap();
    assert_eq!(last.data.len(), 5);
    assert_eq!(last.total, 25);
    assert_eq!(last.page, 3);
    assert_eq!(last.data[0].id, 21);

    query.page = 4;
    let past_end = engine.list_transactions(&query).await.unwrap();
    assert!(past_end.data.is_empty());
    assert_eq!(past_end.total, 25);

    query.page = 1;
    query.per_page = 7;
    let custom = engine.list_transactions(&query).await.unwrap();
    assert_eq!(custom.data.len(), 7);
    assert_eq!(custom.per_page, 7);
    assert_eq!(custom.total, 25);
}

#[tokio::test]
async fn listing_rejects_bad_pagination() {
    let engine = engine_with(mixed_year()).await;

    let mut query = TransactionQuery::for_month(Month::March);
    query.page = 0;
    assert!(matches!(
        engine.list_transactions(&query).await,
        Err(EngineError::InvalidPagination(_))
    ));

    query.page = 1;
    query.per_page = engine.max_per_page() + 1;
    assert!(matches!(
        engine.list_transactions(&query).await,
        Err(EngineError::InvalidPagination(_))
    ));
}

#[tokio::test]
async fn listing_rejects_pages_beyond_the_addressable_range() {
    let engine = engine_with(mixed_year()).await;

    let mut query = TransactionQuery::for_month(Month::March);
    for page in [1 << 62, u64::MAX] {
        query.page = page;
        assert!(matches!(
            engine.list_transactions(&query).await,
            Err(EngineError::InvalidPagination(_))
        ));
    }

    query.page = 1 << 40;
    let far = engine.list_transactions(&query).await.unwrap();
    assert!(far.data.is_empty());
    assert_eq!(far.total, 5);
}

#[tokio::test]
async fn search_matches_price_and_text_independently() {
    let mut by_text = item(2, "Poster", 12.0, false, 3);
    by_text.description = "Printed at 45.5 cm wide".to_string();
    let engine = engine_with(vec![
        item(1, "Headphones", 45.5, true, 3),
        by_text,
        item(3, "Speaker", 45.0, true, 3),
    ])
    .await;

    let mut query = TransactionQuery::for_month(Month::March);
    query.search = "45.5".to_string();
    let page = engine.list_transactions(&query).await.unwrap();

    let ids: Vec<i64> = page.data.iter().map(|tx| tx.id).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn text_search_is_case_insensitive_and_literal() {
    let mut discounted = item(2, "Sale sign", 5.0, false, 3);
    discounted.description = "Now 50% off".to_string();
    let engine = engine_with(vec![
        item(1, "Mens Casual Slim Fit", 15.99, true, 3),
        discounted,
        item(3, "500 off-brand cables", 9.0, false, 3),
    ])
    .await;

    let mut query = TransactionQuery::for_month(Month::March);
    query.search = "SLIM".to_string();
    let page = engine.list_transactions(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, 1);

    query.search = "50%".to_string();
    let page = engine.list_transactions(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].id, 2);
}

#[tokio::test]
async fn text_search_folds_non_ascii_case() {
    let mut pastry = item(2, "Croissant", 2.5, true, 3);
    pastry.description = "Best with a CAFÉ au lait".to_string();
    let engine = engine_with(vec![item(1, "CAFÉ CREME", 4.0, true, 3), pastry]).await;

    let mut query = TransactionQuery::for_month(Month::March);
    query.search = "café".to_string();
    let page = engine.list_transactions(&query).await.unwrap();
    let ids: Vec<i64> = page.data.iter().map(|tx| tx.id).collect();
    assert_eq!(ids, [1, 2]);

    query.search = "Café Creme".to_string();
    let page = engine.list_transactions(&query).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].title, "CAFÉ CREME");
}

#[tokio::test]
async fn search_respects_the_month() {
    let engine = engine_with(mixed_year()).await;

    let mut query = TransactionQuery::for_month(Month::April);
    query.search = "backpack".to_string();
    let page = engine.list_transactions(&query).await.unwrap();
    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());
}

#[tokio::test]
async fn empty_store_answers_with_zeros() {
    let engine = engine_with(Vec::new()).await;

    let page = engine
        .list_transactions(&TransactionQuery::for_month(Month::March))
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.data.is_empty());

    let stats = engine.statistics(Month::March).await.unwrap();
    assert_eq!(stats, engine::SalesStatistics::default());

    let ranges = engine.price_ranges(Month::March).await.unwrap();
    assert_eq!(ranges.len(), PRICE_BUCKETS.len());
    assert!(ranges.iter().all(|range| range.count == 0));

    assert!(engine.categories(Month::March).await.unwrap().is_empty());

    let dashboard = engine.dashboard(Month::March).await.unwrap();
    assert_eq!(dashboard.transactions.total, 0);
}

#[tokio::test]
async fn dashboard_combines_every_view() {
    let engine = engine_with(mixed_year()).await;

    let dashboard = engine.dashboard(Month::March).await.unwrap();
    assert_eq!(
        dashboard.transactions,
        engine
            .list_transactions(&TransactionQuery::for_month(Month::March))
            .await
            .unwrap()
    );
    assert_eq!(
        dashboard.statistics,
        engine.statistics(Month::March).await.unwrap()
    );
    assert_eq!(
        dashboard.price_ranges,
        engine.price_ranges(Month::March).await.unwrap()
    );
    assert_eq!(
        dashboard.categories,
        engine.categories(Month::March).await.unwrap()
    );
}

#[tokio::test]
async fn dashboard_page_follows_a_small_page_cap() {
    let engine = Engine::builder()
        .database(memory_db().await)
        .dataset(StaticDataset::new(mixed_year()))
        .max_per_page(3)
        .build()
        .await
        .unwrap();
    engine.seed().await.unwrap();

    let dashboard = engine.dashboard(Month::March).await.unwrap();
    assert_eq!(dashboard.transactions.per_page, 3);
    assert_eq!(dashboard.transactions.data.len(), 3);
    assert_eq!(dashboard.transactions.total, 5);
}

#[tokio::test]
async fn dashboard_failure_names_the_section() {
    let db = memory_db().await;
    let engine = engine_on(db.clone(), mixed_year()).await;
    engine.seed().await.unwrap();
    db.close().await.unwrap();

    let err = engine.dashboard(Month::March).await.unwrap_err();
    assert!(matches!(
        err,
        EngineError::Dashboard {
            section: "transactions" | "statistics" | "bar_chart" | "pie_chart",
            ..
        }
    ));
    assert!(matches!(err.root(), EngineError::Database(_)));
}

#[tokio::test]
async fn static_dataset_is_a_dataset_source() {
    let dataset = StaticDataset::new(mixed_year());
    assert_eq!(dataset.fetch().await.unwrap().len(), 8);
}
