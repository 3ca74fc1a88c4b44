use std::sync::Arc;

use car_rental_storefront::{
    catalog::{CatalogSource, JsonFileCatalog, StaticCatalog, dedupe_items},
    config::CheckoutTimings,
    error::AppError,
    models::{Item, PLACEHOLDER_IMAGE},
    routes::params::CatalogQuery,
    services::{catalog_service, favorite_service},
    state::AppState,
    store::StorefrontStore,
};
use rust_decimal::Decimal;

fn car(id: &str, name: &str, price: i64, seats: u32, transmission: &str) -> Item {
    Item {
        id: id.into(),
        name: name.into(),
        brand: "Generic".into(),
        price_per_day: Decimal::from(price),
        image_url: Some(format!("/cars/{name}.png")),
        tags: None,
        fuel_capacity: "60L".into(),
        transmission: transmission.into(),
        seating_capacity: seats,
    }
}

fn fleet() -> Vec<Item> {
    vec![
        car("1", "Koenigsegg", 99, 2, "Manual"),
        car("2", "Nissan GT-R", 80, 2, "Automatic"),
        car("3", "Rolls-Royce", 96, 4, "Automatic"),
        car("4", "CR-V", 80, 6, "Automatic"),
        car("5", "All New Terios", 74, 6, "Manual"),
        car("6", "MG ZX Exclusive", 76, 4, "Electric"),
        // Same document published twice upstream.
        car("7", "Nissan GT-R", 80, 2, "Automatic"),
    ]
}

fn state_with(items: Vec<Item>) -> AppState {
    AppState::new(Arc::new(StaticCatalog::new(items)), CheckoutTimings::default())
}

#[test]
fn dedupe_keeps_first_of_each_name_and_image() {
    let items = dedupe_items(fleet());
    assert_eq!(items.len(), 6);
    assert!(items.iter().any(|item| item.id == "2"));
    assert!(!items.iter().any(|item| item.id == "7"));

    let mut other_image = car("8", "Nissan GT-R", 80, 2, "Automatic");
    other_image.image_url = None;
    assert_eq!(dedupe_items(vec![car("2", "Nissan GT-R", 80, 2, "Automatic"), other_image]).len(), 2);
}

#[tokio::test]
async fn home_shows_a_preview_unless_all_requested() -> anyhow::Result<()> {
    let state = state_with(fleet());
    let store = StorefrontStore::in_memory();

    let resp = catalog_service::list_items(&state, &store, CatalogQuery::default()).await?;
    let meta = resp.meta.clone().expect("meta");
    let list = resp.data.expect("list");
    assert_eq!(list.items.len(), catalog_service::POPULAR_PREVIEW);
    assert!(list.has_more);
    assert_eq!(meta.total, Some(6));
    assert_eq!(meta.shown, Some(4));

    let query = CatalogQuery {
        show_all: Some(true),
        ..CatalogQuery::default()
    };
    let list = catalog_service::list_items(&state, &store, query)
        .await?
        .data
        .expect("list");
    assert_eq!(list.items.len(), 6);
    assert!(!list.has_more);
    Ok(())
}

#[tokio::test]
async fn filters_combine_capacity_transmission_and_price() -> anyhow::Result<()> {
    let state = state_with(fleet());
    let store = StorefrontStore::in_memory();

    let query = CatalogQuery {
        show_all: Some(true),
        capacity: Some("2, 6".into()),
        transmission: Some("Automatic".into()),
        min_price: Some(Decimal::from(80)),
        max_price: Some(Decimal::from(80)),
    };
    let list = catalog_service::list_items(&state, &store, query)
        .await?
        .data
        .expect("list");
    let ids: Vec<&str> = list.items.iter().map(|card| card.item.id.as_str()).collect();
    assert_eq!(ids, ["2", "4"]);

    let bad = CatalogQuery {
        capacity: Some("two".into()),
        ..CatalogQuery::default()
    };
    let result = catalog_service::list_items(&state, &store, bad).await;
    assert!(matches!(result, Err(AppError::BadRequest(_))));
    Ok(())
}

#[tokio::test]
async fn any_filter_applies_the_default_price_bounds() -> anyhow::Result<()> {
    let mut items = fleet();
    items.push(car("9", "Bajaj", 10, 4, "Manual"));
    items.push(car("10", "Bugatti", 1500, 4, "Automatic"));
    let state = state_with(items);
    let store = StorefrontStore::in_memory();

    let unfiltered = CatalogQuery {
        show_all: Some(true),
        ..CatalogQuery::default()
    };
    let list = catalog_service::list_items(&state, &store, unfiltered)
        .await?
        .data
        .expect("list");
    assert_eq!(list.items.len(), 8);

    let by_capacity = CatalogQuery {
        show_all: Some(true),
        capacity: Some("4".into()),
        ..CatalogQuery::default()
    };
    let list = catalog_service::list_items(&state, &store, by_capacity)
        .await?
        .data
        .expect("list");
    let ids: Vec<&str> = list.items.iter().map(|card| card.item.id.as_str()).collect();
    assert_eq!(ids, ["3", "6"]);
    Ok(())
}

#[tokio::test]
async fn cards_carry_favorite_flag_and_placeholder() -> anyhow::Result<()> {
    let mut items = fleet();
    items[0].image_url = None;
    let first = items[0].clone();
    let state = state_with(items);
    let store = StorefrontStore::in_memory();
    favorite_service::toggle(&store, &first);

    let list = catalog_service::list_items(&state, &store, CatalogQuery::default())
        .await?
        .data
        .expect("list");
    assert!(list.items[0].is_favorite);
    assert_eq!(list.items[0].image, PLACEHOLDER_IMAGE);
    assert!(!list.items[1].is_favorite);
    Ok(())
}

#[tokio::test]
async fn rent_now_selects_the_car_and_adds_it_to_the_cart() -> anyhow::Result<()> {
    let state = state_with(fleet());
    let store = StorefrontStore::in_memory();

    assert!(matches!(
        catalog_service::selected_item(&store),
        Err(AppError::NotFound)
    ));

    let resp = catalog_service::rent_now(&state, &store, "3").await?;
    assert_eq!(resp.redirect_to(), Some(catalog_service::DETAILS_PATH));
    assert_eq!(store.cart_count(), 1);

    let card = catalog_service::selected_item(&store)?.data.expect("card");
    assert_eq!(card.item.name, "Rolls-Royce");

    let missing = catalog_service::rent_now(&state, &store, "nope").await;
    assert!(matches!(missing, Err(AppError::NotFound)));
    Ok(())
}

#[tokio::test]
async fn unreadable_catalog_degrades_to_empty() -> anyhow::Result<()> {
    let catalog = JsonFileCatalog::new("/nonexistent/catalog.json");
    assert!(catalog.fetch_items().await.is_err());

    let state = AppState::new(Arc::new(catalog), CheckoutTimings::default());
    let list = catalog_service::list_items(&state, &StorefrontStore::in_memory(), CatalogQuery::default())
        .await?
        .data
        .expect("list");
    assert!(list.items.is_empty());
    assert!(!list.has_more);
    Ok(())
}

#[tokio::test]
async fn json_catalog_reads_projected_documents() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join(format!("catalog-{}.json", uuid::Uuid::new_v4()));
    tokio::fs::write(
        &path,
        r#"[{"_id":"c1","name":"Civic","brand":"Honda","price_per_day":55.5,"seating_capacity":5}]"#,
    )
    .await?;

    let items = JsonFileCatalog::new(&path).fetch_items().await?;
    tokio::fs::remove_file(&path).await?;

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].price_per_day, Decimal::new(555, 1));
    assert_eq!(items[0].image_or_placeholder(), PLACEHOLDER_IMAGE);
    assert_eq!(items[0].transmission, "");
    Ok(())
}
