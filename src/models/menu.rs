use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use mongodb::bson::{oid::ObjectId, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MenuItem {
    #[serde(rename = "_id", serialize_with = "serialize_object_id_as_hex_string")]
    #[schema(value_type = String)]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct NewMenuItem {
    pub name: String,
    #[serde(default)]
    pub recipe: String,
    #[serde(default)]
    pub image: String,
    pub category: String,
    pub price: f64,
}

/// PATCH body. Only the fields present are written.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub recipe: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
}

impl UpdateMenuItem {
    pub fn to_set_document(&self) -> Document {
        let mut set = Document::new();
        if let Some(name) = &self.name {
            set.insert("name", name);
        }
        if let Some(recipe) = &self.recipe {
            set.insert("recipe", recipe);
        }
        if let Some(image) = &self.image {
            set.insert("image", image);
        }
        if let Some(category) = &self.category {
            set.insert("category", category);
        }
        if let Some(price) = self.price {
            set.insert("price", price);
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.to_set_document().is_empty()
    }
}
