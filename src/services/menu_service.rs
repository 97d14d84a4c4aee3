use crate::{
    database::{MongoDB, MENU},
    models::{DeleteResponse, InsertResponse, MenuItem, NewMenuItem, UpdateMenuItem, UpdateResponse},
    utils::{error::AppError, ids::parse_object_id},
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;

pub async fn list_menu(db: &MongoDB) -> Result<Vec<MenuItem>, AppError> {
    let cursor = db.collection::<MenuItem>(MENU).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

pub async fn get_menu_item(db: &MongoDB, id: &str) -> Result<MenuItem, AppError> {
    let oid = parse_object_id(id)?;

    db.collection::<MenuItem>(MENU)
        .find_one(doc! { "_id": oid })
        .await?
        .ok_or_else(|| AppError::NotFound(format!("menu item {}", id)))
}

pub async fn create_menu_item(db: &MongoDB, item: NewMenuItem) -> Result<InsertResponse, AppError> {
    let result = db.collection::<NewMenuItem>(MENU).insert_one(&item).await?;
    log::info!("🍽️ Menu item '{}' added to {}", item.name, item.category);
    Ok(result.into())
}

pub async fn update_menu_item(
    db: &MongoDB,
    id: &str,
    update: &UpdateMenuItem,
) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;

    if update.is_empty() {
        return Err(AppError::InvalidRequest("no fields to update".to_string()));
    }

    let result = db
        .collection::<mongodb::bson::Document>(MENU)
        .update_one(doc! { "_id": oid }, doc! { "$set": update.to_set_document() })
        .await?;

    Ok(result.into())
}

pub async fn delete_menu_item(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<mongodb::bson::Document>(MENU)
        .delete_one(doc! { "_id": oid })
        .await?;

    Ok(result.into())
}
