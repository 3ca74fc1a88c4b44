use car_rental_storefront::{models::Item, services::favorite_service, store::StorefrontStore};
use rust_decimal::Decimal;

fn car(id: &str) -> Item {
    Item {
        id: id.into(),
        name: format!("Car {id}"),
        brand: "Mazda".into(),
        price_per_day: Decimal::from(45),
        image_url: None,
        tags: Some(vec!["compact".into()]),
        fuel_capacity: "50L".into(),
        transmission: "Manual".into(),
        seating_capacity: 2,
    }
}

#[test]
fn toggling_twice_restores_membership() {
    let store = StorefrontStore::in_memory();
    let x = car("x");

    assert_eq!(favorite_service::toggle(&store, &x), vec![x.clone()]);
    assert!(favorite_service::is_favorite(&store, "x"));

    assert!(favorite_service::toggle(&store, &x).is_empty());
    assert!(store.favorites().is_empty());
}

#[test]
fn membership_is_by_id_only() {
    let store = StorefrontStore::in_memory();
    favorite_service::toggle(&store, &car("x"));

    let renamed = Item {
        name: "Different name".into(),
        ..car("x")
    };
    let resp = favorite_service::toggle_favorite(&store, &renamed);
    assert_eq!(resp.message, "Removed from favorites");
    let result = resp.data.expect("toggle result");
    assert!(!result.is_favorite);
    assert!(result.favorites.is_empty());
}

#[test]
fn favorites_do_not_pulse_cart_updated() {
    let store = StorefrontStore::in_memory();
    let mut subscription = store.subscribe();

    favorite_service::toggle(&store, &car("x"));
    favorite_service::toggle(&store, &car("y"));

    assert!(!subscription.try_changed());
    assert_eq!(store.favorites().len(), 2);
}
