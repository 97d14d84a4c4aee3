use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const MENU: &str = "menu";
pub const REVIEWS: &str = "reviews";
pub const CARTS: &str = "carts";
pub const USERS: &str = "users";
pub const PAYMENTS: &str = "payments";

#[derive(Clone)]
pub struct MongoDB {
    client: Client,
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str, db_name: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Connection pool
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(5);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        let client = Client::with_options(client_options)?;
        let db = client.database(db_name);

        let mongodb = Self { client, db };

        mongodb.ping().await?;
        log::info!("📡 Pinged deployment, database: {}", db_name);

        mongodb.ensure_indexes().await?;

        Ok(mongodb)
    }

    /// Builds a handle without touching the network. The driver connects on first use.
    pub async fn lazy(uri: &str, db_name: &str) -> Result<Self, mongodb::error::Error> {
        let client = Client::with_uri_str(uri).await?;
        let db = client.database(db_name);
        Ok(Self { client, db })
    }

    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        // (collection, field) pairs backing the per-email lookups
        let indexes = [(USERS, "email"), (CARTS, "userEmail"), (PAYMENTS, "email")];

        for (collection, field) in indexes {
            let index = IndexModel::builder().keys(doc! { field: 1 }).build();

            match self
                .collection::<mongodb::bson::Document>(collection)
                .create_index(index)
                .await
            {
                Ok(_) => log::info!("   ✅ Index created: {}({})", collection, field),
                Err(e) => log::debug!("   ℹ️  Index already exists: {}", e),
            }
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Closes pooled connections. Called once the HTTP server has stopped.
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }
}
