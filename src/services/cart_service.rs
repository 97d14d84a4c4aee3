use crate::{
    database::{MongoDB, CARTS},
    models::{CartItem, DeleteResponse, InsertResponse, NewCartItem},
    utils::{error::AppError, ids::parse_object_id},
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;

pub async fn list_cart(db: &MongoDB, email: &str) -> Result<Vec<CartItem>, AppError> {
    let cursor = db
        .collection::<CartItem>(CARTS)
        .find(doc! { "userEmail": email })
        .await?;
    Ok(cursor.try_collect().await?)
}

pub async fn add_to_cart(db: &MongoDB, item: NewCartItem) -> Result<InsertResponse, AppError> {
    let result = db.collection::<NewCartItem>(CARTS).insert_one(&item).await?;
    Ok(result.into())
}

/// Deletes one cart line, scoped to its owner so callers cannot empty other carts.
pub async fn remove_from_cart(
    db: &MongoDB,
    id: &str,
    owner_email: &str,
) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<mongodb::bson::Document>(CARTS)
        .delete_one(doc! { "_id": oid, "userEmail": owner_email })
        .await?;

    Ok(result.into())
}
