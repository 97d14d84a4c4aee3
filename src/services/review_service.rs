use crate::{
    database::{MongoDB, REVIEWS},
    models::Review,
    utils::error::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;

pub async fn list_reviews(db: &MongoDB) -> Result<Vec<Review>, AppError> {
    let cursor = db.collection::<Review>(REVIEWS).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}
