use crate::{
    dto::favorites::{FavoriteList, ToggleResult},
    models::Item,
    response::{ApiResponse, Meta},
    store::StorefrontStore,
};

/// Adds the item if absent, removes it if present. Matches on id only.
///
/// Unlike the cart this emits no `cartUpdated` pulse; favorites views re-read
/// the store when they mount.
pub fn toggle(store: &StorefrontStore, item: &Item) -> Vec<Item> {
    let mut favorites = store.favorites();
    if favorites.iter().any(|fav| fav.id == item.id) {
        favorites.retain(|fav| fav.id != item.id);
    } else {
        favorites.push(item.clone());
    }
    store.set_favorites(&favorites);
    favorites
}

pub fn is_favorite(store: &StorefrontStore, item_id: &str) -> bool {
    store.favorites().iter().any(|fav| fav.id == item_id)
}

pub fn list_favorites(store: &StorefrontStore) -> ApiResponse<FavoriteList> {
    let items = store.favorites();
    let count = items.len();
    ApiResponse::success("OK", FavoriteList { items }, Some(Meta::new(count, count)))
}

pub fn toggle_favorite(store: &StorefrontStore, item: &Item) -> ApiResponse<ToggleResult> {
    let favorites = toggle(store, item);
    let is_favorite = favorites.iter().any(|fav| fav.id == item.id);
    tracing::debug!(item_id = %item.id, is_favorite, "favorite toggled");

    let message = if is_favorite {
        "Added to favorites"
    } else {
        "Removed from favorites"
    };
    ApiResponse::success(
        message,
        ToggleResult {
            item_id: item.id.clone(),
            is_favorite,
            favorites,
        },
        Some(Meta::empty()),
    )
}
