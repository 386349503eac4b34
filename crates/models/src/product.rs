use sea_orm::{entity::prelude::*, ActiveValue::NotSet, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
    pub stock: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn db_err(e: DbErr) -> errors::ModelError {
    errors::ModelError::Db(e.to_string())
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("name required".into())); }
    Ok(())
}

pub fn validate_price(price: f64) -> Result<(), errors::ModelError> {
    if !price.is_finite() { return Err(errors::ModelError::Validation("price must be a finite number".into())); }
    Ok(())
}

/// All rows ordered by id, which is insertion order.
pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find().order_by_asc(Column::Id).all(db).await.map_err(db_err)
}

pub async fn find(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id).one(db).await.map_err(db_err)
}

pub async fn create(db: &DatabaseConnection, name: &str, price: f64, stock: i64) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    validate_price(price)?;
    let am = ActiveModel {
        id: NotSet,
        name: Set(name.to_string()),
        price: Set(price),
        stock: Set(stock),
    };
    am.insert(db).await.map_err(db_err)
}

/// Overwrite only the supplied columns. `Ok(None)` when no row has `id`.
pub async fn update_fields(
    db: &DatabaseConnection,
    id: i64,
    name: Option<&str>,
    price: Option<f64>,
    stock: Option<i64>,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = find(db, id).await? else { return Ok(None) };
    let mut am: ActiveModel = found.clone().into();
    if let Some(name) = name {
        validate_name(name)?;
        am.name = Set(name.to_string());
    }
    if let Some(price) = price {
        validate_price(price)?;
        am.price = Set(price);
    }
    if let Some(stock) = stock {
        am.stock = Set(stock);
    }
    if !am.is_changed() {
        return Ok(Some(found));
    }
    am.update(db).await.map(Some).map_err(db_err)
}

/// Delete and return the removed row. `Ok(None)` when no row has `id`.
pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = find(db, id).await? else { return Ok(None) };
    Entity::delete_by_id(id).exec(db).await.map_err(db_err)?;
    Ok(Some(found))
}
