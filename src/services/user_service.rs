use crate::{
    database::{MongoDB, USERS},
    models::{
        CreateUserResponse, DeleteResponse, NewUser, Role, UpdateResponse, User,
        UserExistsResponse, ADMIN_ROLE,
    },
    utils::{error::AppError, ids::parse_object_id},
};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;

pub async fn list_users(db: &MongoDB) -> Result<Vec<User>, AppError> {
    let cursor = db.collection::<User>(USERS).find(doc! {}).await?;
    Ok(cursor.try_collect().await?)
}

pub async fn find_by_email(db: &MongoDB, email: &str) -> Result<Option<User>, AppError> {
    Ok(db
        .collection::<User>(USERS)
        .find_one(doc! { "email": email })
        .await?)
}

/// Role of the stored user; unknown emails are treated as customers.
pub async fn find_role(db: &MongoDB, email: &str) -> Result<Role, AppError> {
    Ok(find_by_email(db, email)
        .await?
        .map(|user| user.role())
        .unwrap_or(Role::Customer))
}

/// Inserts the user unless one with the same email already exists.
pub async fn create_user(db: &MongoDB, user: NewUser) -> Result<CreateUserResponse, AppError> {
    if find_by_email(db, &user.email).await?.is_some() {
        log::info!("ℹ️  User {} already exists", user.email);
        return Ok(CreateUserResponse::Exists(UserExistsResponse {
            message: "User already exists".to_string(),
            inserted_id: None,
        }));
    }

    let result = db.collection::<NewUser>(USERS).insert_one(&user).await?;
    Ok(CreateUserResponse::Created(result.into()))
}

pub async fn make_admin(db: &MongoDB, id: &str) -> Result<UpdateResponse, AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<mongodb::bson::Document>(USERS)
        .update_one(doc! { "_id": oid }, doc! { "$set": { "role": ADMIN_ROLE } })
        .await?;

    Ok(result.into())
}

pub async fn delete_user(db: &MongoDB, id: &str) -> Result<DeleteResponse, AppError> {
    let oid = parse_object_id(id)?;

    let result = db
        .collection::<mongodb::bson::Document>(USERS)
        .delete_one(doc! { "_id": oid })
        .await?;

    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn live_db() -> MongoDB {
        dotenv::dotenv().ok();
        let uri = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        MongoDB::new(&uri, "bistro_user_service_test").await.unwrap()
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_duplicate_email_is_not_inserted_twice() {
        let db = live_db().await;
        let email = format!("{}@bistro.test", uuid::Uuid::new_v4());
        let user = NewUser {
            email: email.clone(),
            name: Some("Twice".to_string()),
            photo_url: None,
        };

        let first = create_user(&db, user.clone()).await.unwrap();
        assert!(matches!(first, CreateUserResponse::Created(_)));

        let second = create_user(&db, user).await.unwrap();
        match second {
            CreateUserResponse::Exists(exists) => assert!(exists.inserted_id.is_none()),
            other => panic!("expected Exists, got {:?}", other),
        }

        let count = db
            .collection::<mongodb::bson::Document>(USERS)
            .count_documents(doc! { "email": &email })
            .await
            .unwrap();
        assert_eq!(count, 1);
    }

    #[actix_web::test]
    #[ignore] // Requires MongoDB to be running
    async fn test_promoted_user_becomes_admin() {
        let db = live_db().await;
        let email = format!("{}@bistro.test", uuid::Uuid::new_v4());
        let created = create_user(
            &db,
            NewUser {
                email: email.clone(),
                name: None,
                photo_url: None,
            },
        )
        .await
        .unwrap();

        assert_eq!(find_role(&db, &email).await.unwrap(), Role::Customer);

        let id = match created {
            CreateUserResponse::Created(insert) => insert.inserted_id.unwrap(),
            other => panic!("expected Created, got {:?}", other),
        };
        let update = make_admin(&db, &id).await.unwrap();
        assert_eq!(update.modified_count, 1);
        assert_eq!(find_role(&db, &email).await.unwrap(), Role::Admin);
    }
}
