use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{ApiKey, ApiKeyValue, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        cart::{AddToCartRequest, CartLineView, CartView, CheckoutSnapshot, UpdateQuantityRequest},
        catalog::{ItemCard, ItemList},
        checkout::{CheckoutDraft, ConfirmationView, PaymentSummary, ValidationReport},
        favorites::{FavoriteList, ToggleFavoriteRequest, ToggleResult},
    },
    middleware::session::SESSION_HEADER,
    models::{CartLine, CartTotals, DisplayTotals, Item},
    response::{ApiResponse, Meta},
    routes::{cart, catalog, checkout, confirmation, favorites, health, navbar, params, session},
    services::{
        checkout_service::PaymentPhase, confirmation_service::ConfirmationPhase,
        navbar_service::NavbarView,
    },
};

struct SessionHeaderAddon;

impl Modify for SessionHeaderAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "session_id",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(SESSION_HEADER))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        session::create_session,
        session::clear_session,
        catalog::list_items,
        catalog::get_item,
        catalog::rent_now,
        catalog::selected_item,
        cart::cart_list,
        cart::add_to_cart,
        cart::remove_from_cart,
        cart::update_quantity,
        cart::proceed_to_checkout,
        favorites::list_favorites,
        favorites::toggle_favorite,
        checkout::payment_summary,
        checkout::validate,
        checkout::submit,
        checkout::payment_status,
        checkout::cancel_payment,
        confirmation::open_confirmation,
        confirmation::leave_confirmation,
        navbar::navbar,
        navbar::cart_count_stream
    ),
    components(
        schemas(
            Item,
            CartLine,
            CartTotals,
            DisplayTotals,
            AddToCartRequest,
            UpdateQuantityRequest,
            CartLineView,
            CartView,
            CheckoutSnapshot,
            ItemCard,
            ItemList,
            FavoriteList,
            ToggleFavoriteRequest,
            ToggleResult,
            CheckoutDraft,
            ValidationReport,
            PaymentSummary,
            PaymentPhase,
            ConfirmationPhase,
            ConfirmationView,
            NavbarView,
            session::SessionData,
            params::CatalogQuery,
            Meta,
            ApiResponse<CartView>,
            ApiResponse<ItemList>,
            ApiResponse<PaymentPhase>,
            ApiResponse<ConfirmationView>
        )
    ),
    modifiers(&SessionHeaderAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Session", description = "Browser session endpoints"),
        (name = "Catalog", description = "Car catalog endpoints"),
        (name = "Cart", description = "Cart endpoints"),
        (name = "Favorites", description = "Favorite endpoints"),
        (name = "Checkout", description = "Payment form endpoints"),
        (name = "Confirmation", description = "Order confirmation endpoints"),
        (name = "Navbar", description = "Navigation bar endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
