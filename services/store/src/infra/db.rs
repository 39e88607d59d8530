use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, TransactionTrait,
    sea_query::{Expr, OnConflict},
};
use uuid::Uuid;

use gamestore_domain::order::OrderStatus;
use gamestore_domain::pagination::PageRequest;
use gamestore_domain::user::UserRole;
use gamestore_schema::{
    cart_games, comments, games, genres, order_games, orders, owned_games, shopping_carts, users,
};

use crate::domain::repository::{
    CartRepository, CheckoutStore, GameRepository, GenreRepository, OrderRepository,
    UserRepository,
};
use crate::domain::types::{
    Cart, CartGame, Comment, Game, Genre, Order, OrderGame, OwnedGame, StoreUser,
};
use crate::error::StoreServiceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<StoreUser>, StoreServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<StoreUser>, StoreServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find user by username")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<StoreUser>, StoreServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &StoreUser) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            age: Set(user.age),
            role: Set(user.role.as_i16()),
            profile_picture_url: Set(user.profile_picture_url.clone()),
            email_confirmed: Set(user.email_confirmed),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        email: &str,
        first_name: &str,
        last_name: &str,
        age: i16,
    ) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(id),
            email: Set(email.to_owned()),
            first_name: Set(first_name.to_owned()),
            last_name: Set(last_name.to_owned()),
            age: Set(age),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update user profile")?;
        Ok(())
    }

    async fn update_password_hash(&self, id: Uuid, hash: &str) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(id),
            password_hash: Set(hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password hash")?;
        Ok(())
    }

    async fn set_email_confirmed(
        &self,
        id: Uuid,
        confirmed: bool,
    ) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(id),
            email_confirmed: Set(confirmed),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set email confirmed")?;
        Ok(())
    }

    async fn set_role(&self, id: Uuid, role: UserRole) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(id),
            role: Set(role.as_i16()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set user role")?;
        Ok(())
    }

    async fn set_profile_picture(&self, id: Uuid, url: &str) -> Result<(), StoreServiceError> {
        users::ActiveModel {
            id: Set(id),
            profile_picture_url: Set(Some(url.to_owned())),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set profile picture")?;
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<StoreUser>, StoreServiceError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::Role)
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?;
        Ok(models.into_iter().map(user_from_model).collect())
    }

    async fn list_owned_games(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<OwnedGame>, StoreServiceError> {
        let rows = owned_games::Entity::find()
            .filter(owned_games::Column::UserId.eq(user_id))
            .find_also_related(games::Entity)
            .order_by_desc(owned_games::Column::GrantedAt)
            .all(&self.db)
            .await
            .context("list owned games")?;
        Ok(rows
            .into_iter()
            .filter_map(|(owned, game)| {
                game.map(|game| OwnedGame {
                    game_id: owned.game_id,
                    title: game.title,
                    image_url: game.image_url,
                    granted_at: owned.granted_at,
                })
            })
            .collect())
    }

    async fn owns_game(&self, user_id: Uuid, game_id: Uuid) -> Result<bool, StoreServiceError> {
        let row = owned_games::Entity::find_by_id((user_id, game_id))
            .one(&self.db)
            .await
            .context("check game ownership")?;
        Ok(row.is_some())
    }
}

fn user_from_model(model: users::Model) -> StoreUser {
    StoreUser {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        first_name: model.first_name,
        last_name: model.last_name,
        age: model.age,
        role: UserRole::from_i16(model.role).unwrap_or(UserRole::User),
        profile_picture_url: model.profile_picture_url,
        email_confirmed: model.email_confirmed,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Game repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGameRepository {
    pub db: DatabaseConnection,
}

impl GameRepository for DbGameRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Game>, StoreServiceError> {
        let row = games::Entity::find_by_id(id)
            .find_also_related(genres::Entity)
            .one(&self.db)
            .await
            .context("find game by id")?;
        Ok(row.map(|(game, genre)| game_from_model(game, genre)))
    }

    async fn list(&self, page: PageRequest) -> Result<Vec<Game>, StoreServiceError> {
        let rows = games::Entity::find()
            .find_also_related(genres::Entity)
            .order_by_asc(games::Column::Title)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list games")?;
        Ok(rows
            .into_iter()
            .map(|(game, genre)| game_from_model(game, genre))
            .collect())
    }

    async fn create(&self, game: &Game) -> Result<(), StoreServiceError> {
        game_active_model(game)
            .insert(&self.db)
            .await
            .context("create game")?;
        Ok(())
    }

    async fn update(&self, game: &Game) -> Result<(), StoreServiceError> {
        game_active_model(game)
            .update(&self.db)
            .await
            .context("update game")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreServiceError> {
        let result = games::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete game")?;
        Ok(result.rows_affected > 0)
    }

    async fn list_comments(&self, game_id: Uuid) -> Result<Vec<Comment>, StoreServiceError> {
        let rows = comments::Entity::find()
            .filter(comments::Column::GameId.eq(game_id))
            .find_also_related(users::Entity)
            .order_by_asc(comments::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list comments")?;
        Ok(rows
            .into_iter()
            .map(|(comment, author)| {
                let (author_name, author_avatar_url) = match author {
                    Some(author) => (
                        format!("{} {}", author.first_name, author.last_name),
                        author.profile_picture_url,
                    ),
                    None => ("Deleted user".to_owned(), None),
                };
                Comment {
                    id: comment.id,
                    content: comment.content,
                    author_id: comment.author_id,
                    author_name,
                    author_avatar_url,
                    game_id: comment.game_id,
                    created_at: comment.created_at,
                }
            })
            .collect())
    }

    async fn add_comment(
        &self,
        game_id: Uuid,
        author_id: Uuid,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(), StoreServiceError> {
        comments::ActiveModel {
            content: Set(content.to_owned()),
            author_id: Set(author_id),
            game_id: Set(game_id),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("add comment")?;
        Ok(())
    }
}

fn game_from_model(model: games::Model, genre: Option<genres::Model>) -> Game {
    Game {
        id: model.id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        video_url: model.video_url,
        release_date: model.release_date,
        publisher: model.publisher,
        price: model.price,
        genre_id: model.genre_id,
        genre_name: genre.map(|g| g.name).unwrap_or_default(),
    }
}

fn game_active_model(game: &Game) -> games::ActiveModel {
    games::ActiveModel {
        id: Set(game.id),
        title: Set(game.title.clone()),
        description: Set(game.description.clone()),
        image_url: Set(game.image_url.clone()),
        video_url: Set(game.video_url.clone()),
        release_date: Set(game.release_date),
        publisher: Set(game.publisher.clone()),
        price: Set(game.price),
        genre_id: Set(game.genre_id),
    }
}

// ── Genre repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGenreRepository {
    pub db: DatabaseConnection,
}

impl GenreRepository for DbGenreRepository {
    async fn list_all(&self) -> Result<Vec<Genre>, StoreServiceError> {
        let models = genres::Entity::find()
            .order_by_asc(genres::Column::Name)
            .all(&self.db)
            .await
            .context("list genres")?;
        Ok(models.into_iter().map(genre_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, StoreServiceError> {
        let model = genres::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find genre by id")?;
        Ok(model.map(genre_from_model))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Genre>, StoreServiceError> {
        let model = genres::Entity::find()
            .filter(genres::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find genre by name")?;
        Ok(model.map(genre_from_model))
    }

    async fn create(&self, name: &str, description: &str) -> Result<(), StoreServiceError> {
        genres::ActiveModel {
            name: Set(name.to_owned()),
            description: Set(description.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create genre")?;
        Ok(())
    }

    async fn update(
        &self,
        id: i32,
        name: &str,
        description: &str,
    ) -> Result<bool, StoreServiceError> {
        let result = genres::Entity::update_many()
            .col_expr(genres::Column::Name, Expr::value(name))
            .col_expr(genres::Column::Description, Expr::value(description))
            .filter(genres::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("update genre")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreServiceError> {
        let result = genres::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete genre")?;
        Ok(result.rows_affected > 0)
    }
}

fn genre_from_model(model: genres::Model) -> Genre {
    Genre {
        id: model.id,
        name: model.name,
        description: model.description,
    }
}

// ── Cart repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCartRepository {
    pub db: DatabaseConnection,
}

impl CartRepository for DbCartRepository {
    async fn find_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Option<Cart>, StoreServiceError> {
        let Some(cart) = shopping_carts::Entity::find()
            .filter(shopping_carts::Column::CustomerId.eq(customer_id))
            .one(&self.db)
            .await
            .context("find cart by customer")?
        else {
            return Ok(None);
        };

        let rows = cart_games::Entity::find()
            .filter(cart_games::Column::CartId.eq(cart.id))
            .find_also_related(games::Entity)
            .order_by_asc(cart_games::Column::Position)
            .all(&self.db)
            .await
            .context("list cart lines")?;
        let lines = rows
            .into_iter()
            .filter_map(|(line, game)| {
                game.map(|game| CartGame {
                    game_id: line.game_id,
                    title: game.title,
                    image_url: game.image_url,
                    price: game.price,
                })
            })
            .collect();

        Ok(Some(Cart {
            id: cart.id,
            customer_id: cart.customer_id,
            games: lines,
        }))
    }

    async fn create(&self, cart_id: Uuid, customer_id: Uuid) -> Result<(), StoreServiceError> {
        shopping_carts::ActiveModel {
            id: Set(cart_id),
            customer_id: Set(customer_id),
        }
        .insert(&self.db)
        .await
        .context("create cart")?;
        Ok(())
    }

    async fn add_game(&self, cart_id: Uuid, game_id: Uuid) -> Result<(), StoreServiceError> {
        let last = cart_games::Entity::find()
            .filter(cart_games::Column::CartId.eq(cart_id))
            .order_by_desc(cart_games::Column::Position)
            .one(&self.db)
            .await
            .context("find last cart position")?;
        let position = last.map(|l| l.position + 1).unwrap_or(0);

        cart_games::ActiveModel {
            cart_id: Set(cart_id),
            game_id: Set(game_id),
            position: Set(position),
            added_at: Set(Utc::now()),
        }
        .insert(&self.db)
        .await
        .context("add game to cart")?;
        Ok(())
    }

    async fn remove_game(
        &self,
        cart_id: Uuid,
        game_id: Uuid,
    ) -> Result<bool, StoreServiceError> {
        let result = cart_games::Entity::delete_many()
            .filter(cart_games::Column::CartId.eq(cart_id))
            .filter(cart_games::Column::GameId.eq(game_id))
            .exec(&self.db)
            .await
            .context("remove game from cart")?;
        Ok(result.rows_affected > 0)
    }

    async fn clear(&self, cart_id: Uuid) -> Result<(), StoreServiceError> {
        cart_games::Entity::delete_many()
            .filter(cart_games::Column::CartId.eq(cart_id))
            .exec(&self.db)
            .await
            .context("clear cart")?;
        Ok(())
    }
}

// ── Order repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOrderRepository {
    pub db: DatabaseConnection,
}

impl OrderRepository for DbOrderRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, StoreServiceError> {
        let Some(order) = orders::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find order by id")?
        else {
            return Ok(None);
        };
        let lines = order_games::Entity::find()
            .filter(order_games::Column::OrderId.eq(order.id))
            .all(&self.db)
            .await
            .context("list order lines")?;
        let customer = users::Entity::find_by_id(order.customer_id)
            .one(&self.db)
            .await
            .context("find order customer")?;
        let customer_name = customer
            .map(|c| format!("{} {}", c.first_name, c.last_name))
            .unwrap_or_else(|| "Deleted user".to_owned());
        Ok(Some(order_from_model(order, lines, customer_name)))
    }

    async fn list_by_customer(
        &self,
        customer_id: Uuid,
    ) -> Result<Vec<Order>, StoreServiceError> {
        let models = orders::Entity::find()
            .filter(orders::Column::CustomerId.eq(customer_id))
            .order_by_desc(orders::Column::OrderedAt)
            .all(&self.db)
            .await
            .context("list orders by customer")?;
        self.assemble(models).await
    }

    async fn list_all(&self) -> Result<Vec<Order>, StoreServiceError> {
        let models = orders::Entity::find()
            .order_by_asc(orders::Column::OrderedAt)
            .all(&self.db)
            .await
            .context("list all orders")?;
        self.assemble(models).await
    }
}

impl DbOrderRepository {
    /// Join lines and customer names for a batch of order rows.
    async fn assemble(
        &self,
        models: Vec<orders::Model>,
    ) -> Result<Vec<Order>, StoreServiceError> {
        if models.is_empty() {
            return Ok(vec![]);
        }
        let order_ids: Vec<Uuid> = models.iter().map(|o| o.id).collect();
        let customer_ids: Vec<Uuid> = models.iter().map(|o| o.customer_id).collect();

        let mut lines_by_order: HashMap<Uuid, Vec<order_games::Model>> = HashMap::new();
        let lines = order_games::Entity::find()
            .filter(order_games::Column::OrderId.is_in(order_ids))
            .all(&self.db)
            .await
            .context("list order lines")?;
        for line in lines {
            lines_by_order.entry(line.order_id).or_default().push(line);
        }

        let customers: HashMap<Uuid, String> = users::Entity::find()
            .filter(users::Column::Id.is_in(customer_ids))
            .all(&self.db)
            .await
            .context("list order customers")?
            .into_iter()
            .map(|c| (c.id, format!("{} {}", c.first_name, c.last_name)))
            .collect();

        Ok(models
            .into_iter()
            .map(|order| {
                let lines = lines_by_order.remove(&order.id).unwrap_or_default();
                let customer_name = customers
                    .get(&order.customer_id)
                    .cloned()
                    .unwrap_or_else(|| "Deleted user".to_owned());
                order_from_model(order, lines, customer_name)
            })
            .collect())
    }
}

fn order_from_model(
    model: orders::Model,
    lines: Vec<order_games::Model>,
    customer_name: String,
) -> Order {
    Order {
        id: model.id,
        customer_id: model.customer_id,
        customer_name,
        games: lines
            .into_iter()
            .map(|line| OrderGame {
                game_id: line.game_id,
                title: line.title,
                price: line.price,
            })
            .collect(),
        total_price: model.total_price,
        status: OrderStatus::from_i16(model.status).unwrap_or(OrderStatus::Approved),
        ordered_at: model.ordered_at,
    }
}

// ── Checkout store ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCheckoutStore {
    pub db: DatabaseConnection,
}

impl CheckoutStore for DbCheckoutStore {
    async fn commit(
        &self,
        order: &Order,
        clear_cart: Option<Uuid>,
    ) -> Result<(), StoreServiceError> {
        let order = order.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    orders::ActiveModel {
                        id: Set(order.id),
                        customer_id: Set(order.customer_id),
                        total_price: Set(order.total_price),
                        status: Set(order.status.as_i16()),
                        ordered_at: Set(order.ordered_at),
                    }
                    .insert(txn)
                    .await?;

                    let lines: Vec<order_games::ActiveModel> = order
                        .games
                        .iter()
                        .map(|game| order_games::ActiveModel {
                            order_id: Set(order.id),
                            game_id: Set(game.game_id),
                            title: Set(game.title.clone()),
                            price: Set(game.price),
                        })
                        .collect();
                    order_games::Entity::insert_many(lines)
                        .exec_without_returning(txn)
                        .await?;

                    // Already-owned games keep their original grant row.
                    let grants: Vec<owned_games::ActiveModel> = order
                        .games
                        .iter()
                        .map(|game| owned_games::ActiveModel {
                            user_id: Set(order.customer_id),
                            game_id: Set(game.game_id),
                            granted_at: Set(order.ordered_at),
                        })
                        .collect();
                    owned_games::Entity::insert_many(grants)
                        .on_conflict(
                            OnConflict::columns([
                                owned_games::Column::UserId,
                                owned_games::Column::GameId,
                            ])
                            .do_nothing()
                            .to_owned(),
                        )
                        .exec_without_returning(txn)
                        .await?;

                    if let Some(cart_id) = clear_cart {
                        cart_games::Entity::delete_many()
                            .filter(cart_games::Column::CartId.eq(cart_id))
                            .exec(txn)
                            .await?;
                    }
                    Ok(())
                })
            })
            .await
            .context("commit checkout")?;
        Ok(())
    }
}
