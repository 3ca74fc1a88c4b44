use serde::Serialize;
use utoipa::ToSchema;

use crate::models::Item;

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemCard {
    #[serde(flatten)]
    pub item: Item,
    pub image: String,
    pub is_favorite: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ItemList {
    pub items: Vec<ItemCard>,
    pub has_more: bool,
}
