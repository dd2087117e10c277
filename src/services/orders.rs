use crate::auth::CurrentUser;
use crate::domain::order::Order;
use crate::repository::OrderReader;
use crate::services::ServiceResult;

/// The user's order history, most recently paid first.
pub fn my_orders<R>(repo: &R, user: &CurrentUser) -> ServiceResult<Vec<Order>>
where
    R: OrderReader + ?Sized,
{
    Ok(repo.list_orders(user.id)?)
}
