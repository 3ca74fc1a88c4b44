use futures::{Stream, StreamExt, stream};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::Identity,
    response::{ApiResponse, Meta},
    store::StorefrontStore,
};

pub const DEFAULT_PROFILE_IMAGE: &str = "/default-profile.png";

#[derive(Debug, Serialize, ToSchema)]
pub struct NavbarView {
    /// Hidden by the client when zero.
    pub cart_count: usize,
    pub signed_in: bool,
    /// Only set for signed in visitors; signed out visitors get the sign-in button.
    pub profile_image: Option<String>,
}

pub fn navbar(store: &StorefrontStore, identity: &Identity) -> ApiResponse<NavbarView> {
    let profile_image = identity.signed_in.then(|| {
        identity
            .image_url
            .clone()
            .unwrap_or_else(|| DEFAULT_PROFILE_IMAGE.to_string())
    });
    let view = NavbarView {
        cart_count: store.cart_count(),
        signed_in: identity.signed_in,
        profile_image,
    };
    ApiResponse::success("Navbar", view, Some(Meta::empty()))
}

/// The badge as a live value: the current count, then a re-read of the store
/// after every `cartUpdated` pulse. Dropping the stream unsubscribes.
pub fn cart_count_stream(store: StorefrontStore) -> impl Stream<Item = usize> {
    let subscription = store.subscribe();
    let initial = store.cart_count();
    stream::once(async move { initial }).chain(stream::unfold(
        (store, subscription),
        |(store, mut subscription)| async move {
            if subscription.changed().await {
                let count = store.cart_count();
                Some((count, (store, subscription)))
            } else {
                None
            }
        },
    ))
}
