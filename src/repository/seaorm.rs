use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::{
    entity::{
        Favorites, Properties, Users, favorites, properties,
        users::{self, ActiveModel as UserActive},
    },
    models::{Favorite, FavoriteWithProperty, NewProperty, Property, PropertyChanges, User},
};

use super::{Store, StoreResult};

/// [`Store`] backed by a SeaORM connection.
#[derive(Clone)]
pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for SeaOrmStore {
    async fn list_users(&self) -> StoreResult<Vec<User>> {
        let users = Users::find()
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(User::from)
            .collect();
        Ok(users)
    }

    async fn find_user(&self, id: i32) -> StoreResult<Option<User>> {
        let user = Users::find_by_id(id).one(&self.db).await?;
        Ok(user.map(User::from))
    }

    async fn user_exists(&self, id: i32) -> StoreResult<bool> {
        let count = Users::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn username_exists(&self, username: &str) -> StoreResult<bool> {
        let count = Users::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn insert_user(&self, username: &str, created_at: DateTime<Utc>) -> StoreResult<User> {
        let user = UserActive {
            id: NotSet,
            username: Set(username.to_owned()),
            created_at: Set(created_at),
        }
        .insert(&self.db)
        .await?;
        Ok(user.into())
    }

    async fn delete_user(&self, id: i32) -> StoreResult<u64> {
        let result = Users::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let properties = Properties::find()
            .order_by_asc(properties::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Property::from)
            .collect();
        Ok(properties)
    }

    async fn find_property(&self, id: i32) -> StoreResult<Option<Property>> {
        let property = Properties::find_by_id(id).one(&self.db).await?;
        Ok(property.map(Property::from))
    }

    async fn property_exists(&self, id: i32) -> StoreResult<bool> {
        let count = Properties::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property> {
        let active = properties::ActiveModel {
            id: NotSet,
            title: Set(property.title),
            price: Set(property.price.minor_units()),
            location: Set(property.location),
            image_url: Set(property.image_url),
            description: Set(property.description),
        };
        let model = active.insert(&self.db).await?;
        Ok(model.into())
    }

    async fn update_property(
        &self,
        id: i32,
        changes: PropertyChanges,
    ) -> StoreResult<Option<Property>> {
        let Some(existing) = Properties::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        if changes == PropertyChanges::default() {
            return Ok(Some(existing.into()));
        }

        let mut active: properties::ActiveModel = existing.into();
        if let Some(title) = changes.title {
            active.title = Set(title);
        }
        if let Some(price) = changes.price {
            active.price = Set(price.minor_units());
        }
        if let Some(location) = changes.location {
            active.location = Set(location);
        }
        if let Some(image_url) = changes.image_url {
            active.image_url = Set(Some(image_url));
        }
        if let Some(description) = changes.description {
            active.description = Set(Some(description));
        }

        let model = active.update(&self.db).await?;
        Ok(Some(model.into()))
    }

    async fn delete_property(&self, id: i32) -> StoreResult<u64> {
        let result = Properties::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }

    async fn list_favorites(&self, user_id: Option<i32>) -> StoreResult<Vec<FavoriteWithProperty>> {
        let mut finder = Favorites::find();
        if let Some(user_id) = user_id {
            finder = finder.filter(favorites::Column::UserId.eq(user_id));
        }

        let rows = finder
            .find_also_related(Properties)
            .order_by_asc(favorites::Column::UserId)
            .order_by_asc(favorites::Column::PropertyId)
            .all(&self.db)
            .await?;

        // The foreign key guarantees the property; a missing one means a
        // concurrent delete won and the link is already gone.
        let items = rows
            .into_iter()
            .filter_map(|(favorite, property)| {
                property.map(|property| FavoriteWithProperty {
                    user_id: favorite.user_id,
                    property_id: favorite.property_id,
                    created_at: favorite.created_at,
                    property: property.into(),
                })
            })
            .collect();
        Ok(items)
    }

    async fn list_favorite_properties(&self, user_id: i32) -> StoreResult<Vec<Property>> {
        let properties = Properties::find()
            .inner_join(Favorites)
            .filter(favorites::Column::UserId.eq(user_id))
            .order_by_asc(properties::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Property::from)
            .collect();
        Ok(properties)
    }

    async fn find_favorite(
        &self,
        user_id: i32,
        property_id: i32,
    ) -> StoreResult<Option<Favorite>> {
        let favorite = Favorites::find_by_id((user_id, property_id))
            .one(&self.db)
            .await?;
        Ok(favorite.map(Favorite::from))
    }

    async fn insert_favorite(
        &self,
        user_id: i32,
        property_id: i32,
        created_at: DateTime<Utc>,
    ) -> StoreResult<Favorite> {
        let active = favorites::ActiveModel {
            user_id: Set(user_id),
            property_id: Set(property_id),
            created_at: Set(created_at),
        };
        Favorites::insert(active)
            .exec_without_returning(&self.db)
            .await?;
        Ok(Favorite {
            user_id,
            property_id,
            created_at,
        })
    }

    async fn delete_favorite(&self, user_id: i32, property_id: i32) -> StoreResult<u64> {
        let result = Favorites::delete_by_id((user_id, property_id))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
