pub const CART_ITEMS: &str = "cartItems";
pub const CART_COUNT: &str = "cartCount";
pub const FAVORITE_CARS: &str = "favoriteCars";
pub const SELECTED_CAR: &str = "selectedCar";
pub const TOTAL_PRICE: &str = "totalPrice";
