use serde::Deserialize;
use validator::Validate;

/// JSON payload for adding a line to the cart.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCartItemForm {
    /// Product to add.
    pub product_id: i32,
    /// Selected shoe size.
    #[validate(range(min = 1))]
    pub size: i32,
    /// Units to add, at least 1.
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// JSON payload for changing the quantity of an existing line.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartItemForm {
    /// Product the line refers to.
    pub product_id: i32,
    /// Selected shoe size.
    #[validate(range(min = 1))]
    pub size: i32,
    /// New quantity; zero or less removes the line.
    pub quantity: i32,
}
