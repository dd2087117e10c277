use crate::auth::CurrentUser;
use crate::domain::order::Order;
use crate::repository::{CheckoutError, CheckoutWriter};

/// Converts the user's cart into an order.
///
/// The heavy lifting happens inside one storage transaction; this wrapper
/// exists so the identity stays an explicit argument and commits get logged.
/// Failures are returned as-is for the route layer to translate; none of them
/// leave partial stock mutations behind.
pub fn checkout<R>(repo: &R, user: &CurrentUser) -> Result<Order, CheckoutError>
where
    R: CheckoutWriter + ?Sized,
{
    let order = repo.checkout(user.id)?;

    log::info!(
        "User {} paid order {} ({} lines, total {})",
        user.id,
        order.id,
        order.items.len(),
        order.total_amount
    );

    Ok(order)
}
