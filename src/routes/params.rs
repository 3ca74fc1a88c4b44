use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

/// Catalog listing filters. `capacity` is a comma separated list, e.g. `2,4`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CatalogQuery {
    pub show_all: Option<bool>,
    pub capacity: Option<String>,
    pub transmission: Option<String>,
    #[schema(value_type = Option<f64>)]
    pub min_price: Option<Decimal>,
    #[schema(value_type = Option<f64>)]
    pub max_price: Option<Decimal>,
}

impl CatalogQuery {
    pub fn capacities(&self) -> Result<Vec<u32>, String> {
        let Some(raw) = self.capacity.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| format!("invalid capacity {part:?}"))
            })
            .collect()
    }
}
