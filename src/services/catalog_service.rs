use rust_decimal::Decimal;

use crate::{
    catalog::dedupe_items,
    dto::{
        cart::CartView,
        catalog::{ItemCard, ItemList},
    },
    error::{AppError, AppResult},
    models::Item,
    response::{ApiResponse, Meta},
    routes::params::CatalogQuery,
    services::{cart_service, favorite_service},
    state::AppState,
    store::StorefrontStore,
};

/// Number of cars on the home page before "View All".
pub const POPULAR_PREVIEW: usize = 4;
pub const DETAILS_PATH: &str = "/details";
/// Price slider bounds, applied once any filter is in use.
pub const DEFAULT_MIN_PRICE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
pub const DEFAULT_MAX_PRICE: Decimal = Decimal::from_parts(1000, 0, 0, false, 0);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    pub capacities: Vec<u32>,
    pub transmission: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl CatalogFilter {
    /// With no filter set every item matches. Once any filter is set the
    /// price range defaults to the slider bounds.
    pub fn from_query(query: &CatalogQuery) -> AppResult<Self> {
        let capacities = query.capacities().map_err(AppError::BadRequest)?;
        let transmission = query
            .transmission
            .as_ref()
            .filter(|t| !t.is_empty())
            .cloned();

        let filtering = !capacities.is_empty()
            || transmission.is_some()
            || query.min_price.is_some()
            || query.max_price.is_some();
        let (min_price, max_price) = if filtering {
            (
                Some(query.min_price.unwrap_or(DEFAULT_MIN_PRICE)),
                Some(query.max_price.unwrap_or(DEFAULT_MAX_PRICE)),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            capacities,
            transmission,
            min_price,
            max_price,
        })
    }

    pub fn matches(&self, item: &Item) -> bool {
        if !self.capacities.is_empty() && !self.capacities.contains(&item.seating_capacity) {
            return false;
        }
        if let Some(transmission) = &self.transmission {
            if &item.transmission != transmission {
                return false;
            }
        }
        if let Some(min) = self.min_price {
            if item.price_per_day < min {
                return false;
            }
        }
        if let Some(max) = self.max_price {
            if item.price_per_day > max {
                return false;
            }
        }
        true
    }
}

/// Fetches and de-duplicates the catalog. A failing source yields an empty catalog.
pub async fn load_items(state: &AppState) -> Vec<Item> {
    match state.catalog.fetch_items().await {
        Ok(items) => dedupe_items(items),
        Err(err) => {
            tracing::warn!(error = %err, "catalog fetch failed, showing empty catalog");
            Vec::new()
        }
    }
}

pub async fn find_item(state: &AppState, id: &str) -> AppResult<Item> {
    load_items(state)
        .await
        .into_iter()
        .find(|item| item.id == id)
        .ok_or(AppError::NotFound)
}

pub async fn list_items(
    state: &AppState,
    store: &StorefrontStore,
    query: CatalogQuery,
) -> AppResult<ApiResponse<ItemList>> {
    let filter = CatalogFilter::from_query(&query)?;
    let matching: Vec<Item> = load_items(state)
        .await
        .into_iter()
        .filter(|item| filter.matches(item))
        .collect();

    let total = matching.len();
    let shown = if query.show_all.unwrap_or(false) {
        total
    } else {
        total.min(POPULAR_PREVIEW)
    };

    let favorites = store.favorites();
    let items = matching
        .into_iter()
        .take(shown)
        .map(|item| ItemCard {
            image: item.image_or_placeholder().to_string(),
            is_favorite: favorites.iter().any(|fav| fav.id == item.id),
            item,
        })
        .collect();

    Ok(ApiResponse::success(
        "Cars",
        ItemList {
            items,
            has_more: shown < total,
        },
        Some(Meta::new(total, shown)),
    ))
}

pub async fn get_item(state: &AppState, id: &str) -> AppResult<ApiResponse<Item>> {
    let item = find_item(state, id).await?;
    Ok(ApiResponse::success("Car", item, None))
}

/// "Rent Now" on the catalog: remember the car for the detail page and add it to the cart.
pub async fn rent_now(
    state: &AppState,
    store: &StorefrontStore,
    id: &str,
) -> AppResult<ApiResponse<CartView>> {
    let item = find_item(state, id).await?;
    store.set_selected_item(&item);
    let lines = cart_service::add_or_increment(store, &item);
    Ok(ApiResponse::success(
        "Added to cart",
        cart_service::cart_view(lines),
        Some(Meta::redirect(DETAILS_PATH)),
    ))
}

/// The detail page's car. Absent until something was rented from the catalog.
pub fn selected_item(store: &StorefrontStore) -> AppResult<ApiResponse<ItemCard>> {
    let item = store.selected_item().ok_or(AppError::NotFound)?;
    let card = ItemCard {
        image: item.image_or_placeholder().to_string(),
        is_favorite: favorite_service::is_favorite(store, &item.id),
        item,
    };
    Ok(ApiResponse::success("Selected car", card, None))
}
