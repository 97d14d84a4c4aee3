use crate::{
    database::{MongoDB, MENU, PAYMENTS, USERS},
    models::{AdminStats, CategorySales},
    utils::error::AppError,
};
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, Document};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RevenueRow {
    #[serde(rename = "totalRevenue")]
    total_revenue: f64,
}

pub fn revenue_pipeline() -> Vec<Document> {
    vec![doc! {
        "$group": {
            "_id": null,
            "totalRevenue": { "$sum": "$price" }
        }
    }]
}

/// Unwinds each payment's menu item ids, joins them against the menu and totals per category.
pub fn category_sales_pipeline() -> Vec<Document> {
    vec![
        doc! { "$unwind": "$menuItemIds" },
        doc! {
            "$addFields": {
                "menuItemObjectId": {
                    "$convert": {
                        "input": "$menuItemIds",
                        "to": "objectId",
                        "onError": null,
                        "onNull": null
                    }
                }
            }
        },
        doc! {
            "$lookup": {
                "from": MENU,
                "localField": "menuItemObjectId",
                "foreignField": "_id",
                "as": "menuItems"
            }
        },
        doc! { "$unwind": "$menuItems" },
        // Menu documents without a category would group under null.
        doc! { "$match": { "menuItems.category": { "$type": "string" } } },
        doc! {
            "$group": {
                "_id": "$menuItems.category",
                "quantity": { "$sum": 1 },
                "revenue": { "$sum": "$menuItems.price" }
            }
        },
        doc! {
            "$project": {
                "_id": 0,
                "category": "$_id",
                "quantity": "$quantity",
                "revenue": "$revenue"
            }
        },
        doc! { "$sort": { "category": 1 } },
    ]
}

pub async fn total_revenue(db: &MongoDB) -> Result<f64, AppError> {
    let mut cursor = db
        .collection::<Document>(PAYMENTS)
        .aggregate(revenue_pipeline())
        .await?;

    match cursor.try_next().await? {
        Some(row) => Ok(mongodb::bson::from_document::<RevenueRow>(row)?.total_revenue),
        None => Ok(0.0),
    }
}

pub async fn admin_stats(db: &MongoDB) -> Result<AdminStats, AppError> {
    let users = db
        .collection::<Document>(USERS)
        .estimated_document_count()
        .await?;
    let menu_items = db
        .collection::<Document>(MENU)
        .estimated_document_count()
        .await?;
    let orders = db
        .collection::<Document>(PAYMENTS)
        .estimated_document_count()
        .await?;
    let revenue = total_revenue(db).await?;

    Ok(AdminStats {
        users,
        menu_items,
        orders,
        revenue,
    })
}

pub async fn category_sales(db: &MongoDB) -> Result<Vec<CategorySales>, AppError> {
    let cursor = db
        .collection::<Document>(PAYMENTS)
        .aggregate(category_sales_pipeline())
        .await?;
    let rows: Vec<Document> = cursor.try_collect().await?;

    rows.into_iter()
        .map(|row| mongodb::bson::from_document::<CategorySales>(row).map_err(AppError::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage_names(pipeline: &[Document]) -> Vec<String> {
        pipeline
            .iter()
            .map(|stage| stage.keys().next().cloned().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_category_pipeline_stage_order() {
        assert_eq!(
            stage_names(&category_sales_pipeline()),
            vec![
                "$unwind",
                "$addFields",
                "$lookup",
                "$unwind",
                "$match",
                "$group",
                "$project",
                "$sort"
            ]
        );
    }

    #[test]
    fn test_lookup_joins_menu_on_converted_id() {
        let pipeline = category_sales_pipeline();
        let lookup = pipeline[2].get_document("$lookup").unwrap();

        assert_eq!(lookup.get_str("from").unwrap(), "menu");
        assert_eq!(lookup.get_str("localField").unwrap(), "menuItemObjectId");
        assert_eq!(lookup.get_str("foreignField").unwrap(), "_id");
    }

    #[test]
    fn test_uncategorised_items_are_filtered_before_grouping() {
        let pipeline = category_sales_pipeline();
        let filter = pipeline[4].get_document("$match").unwrap();

        assert_eq!(
            filter.get_document("menuItems.category").unwrap(),
            &doc! { "$type": "string" }
        );
        assert!(pipeline[5].contains_key("$group"));
    }

    #[test]
    fn test_revenue_row_accepts_integer_sums() {
        let row = doc! { "_id": null, "totalRevenue": 120_i64 };
        let parsed: RevenueRow = mongodb::bson::from_document(row).unwrap();
        assert_eq!(parsed.total_revenue, 120.0);
    }

    #[test]
    fn test_category_row_decodes() {
        let row = doc! { "category": "salad", "quantity": 3_i32, "revenue": 31.5 };
        let parsed: CategorySales = mongodb::bson::from_document(row).unwrap();

        assert_eq!(parsed.category, "salad");
        assert_eq!(parsed.quantity, 3);
        assert_eq!(parsed.revenue, 31.5);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_revenue_is_sum_of_payment_prices() {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db = MongoDB::new(&uri, &format!("bistro_stats_{}", uuid::Uuid::new_v4().simple()))
            .await
            .unwrap();

        assert_eq!(total_revenue(&db).await.unwrap(), 0.0);

        let payments = db.collection::<Document>(PAYMENTS);
        payments
            .insert_many(vec![
                doc! { "email": "a@bistro.test", "price": 12.5, "transactionId": "t1" },
                doc! { "email": "b@bistro.test", "price": 7.25, "transactionId": "t2" },
            ])
            .await
            .unwrap();

        assert_eq!(total_revenue(&db).await.unwrap(), 19.75);

        db.database().drop().await.unwrap();
    }
}
