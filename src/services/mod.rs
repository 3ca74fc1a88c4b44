pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod confirmation_service;
pub mod favorite_service;
pub mod navbar_service;
