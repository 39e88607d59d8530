use uuid::Uuid;

use gamestore_domain::user::UserRole;

use crate::domain::repository::OrderRepository;
use crate::domain::types::Order;
use crate::error::StoreServiceError;

/// Fetch one order. Customers see their own; admins see any.
pub struct GetOrderUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrderUseCase<O> {
    pub async fn execute(
        &self,
        order_id: Uuid,
        requester_id: Uuid,
        requester_role: UserRole,
    ) -> Result<Order, StoreServiceError> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or(StoreServiceError::OrderNotFound)?;
        if order.customer_id != requester_id && !requester_role.is_admin() {
            return Err(StoreServiceError::Forbidden);
        }
        Ok(order)
    }
}

pub struct GetOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetOrdersUseCase<O> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<Vec<Order>, StoreServiceError> {
        self.orders.list_by_customer(customer_id).await
    }
}

/// Admin-only view over the whole ledger.
pub struct GetAllOrdersUseCase<O: OrderRepository> {
    pub orders: O,
}

impl<O: OrderRepository> GetAllOrdersUseCase<O> {
    pub async fn execute(&self) -> Result<Vec<Order>, StoreServiceError> {
        self.orders.list_all().await
    }
}
