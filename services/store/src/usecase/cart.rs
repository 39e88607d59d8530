use uuid::Uuid;

use crate::domain::repository::{CartRepository, GameRepository};
use crate::domain::types::Cart;
use crate::error::StoreServiceError;

/// Fetch the customer's cart, creating an empty one on first access.
pub struct GetCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> GetCartUseCase<C> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<Cart, StoreServiceError> {
        if let Some(cart) = self.carts.find_by_customer(customer_id).await? {
            return Ok(cart);
        }
        let cart_id = Uuid::now_v7();
        self.carts.create(cart_id, customer_id).await?;
        Ok(Cart {
            id: cart_id,
            customer_id,
            games: vec![],
        })
    }
}

pub struct AddGameToCartUseCase<C: CartRepository, G: GameRepository> {
    pub carts: C,
    pub games: G,
}

impl<C: CartRepository, G: GameRepository> AddGameToCartUseCase<C, G> {
    pub async fn execute(
        &self,
        customer_id: Uuid,
        game_id: Uuid,
    ) -> Result<(), StoreServiceError> {
        if self.games.find_by_id(game_id).await?.is_none() {
            return Err(StoreServiceError::GameNotFound);
        }
        let cart = match self.carts.find_by_customer(customer_id).await? {
            Some(cart) => cart,
            None => {
                let cart_id = Uuid::now_v7();
                self.carts.create(cart_id, customer_id).await?;
                Cart {
                    id: cart_id,
                    customer_id,
                    games: vec![],
                }
            }
        };
        if cart.contains(game_id) {
            return Err(StoreServiceError::GameAlreadyInCart);
        }
        self.carts.add_game(cart.id, game_id).await
    }
}

pub struct RemoveGameFromCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> RemoveGameFromCartUseCase<C> {
    pub async fn execute(
        &self,
        customer_id: Uuid,
        game_id: Uuid,
    ) -> Result<(), StoreServiceError> {
        let cart = self
            .carts
            .find_by_customer(customer_id)
            .await?
            .ok_or(StoreServiceError::CartNotFound)?;
        if self.carts.remove_game(cart.id, game_id).await? {
            Ok(())
        } else {
            Err(StoreServiceError::GameNotInCart)
        }
    }
}

pub struct ClearCartUseCase<C: CartRepository> {
    pub carts: C,
}

impl<C: CartRepository> ClearCartUseCase<C> {
    pub async fn execute(&self, customer_id: Uuid) -> Result<(), StoreServiceError> {
        let cart = self
            .carts
            .find_by_customer(customer_id)
            .await?
            .ok_or(StoreServiceError::CartNotFound)?;
        self.carts.clear(cart.id).await
    }
}
