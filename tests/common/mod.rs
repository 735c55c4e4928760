use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

pub struct TestApp {
    pub router: Router,
    pub db: SqlitePool,
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("Failed to create in-memory SQLite pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        let router = flowery::build_app(pool.clone());

        Self { router, db: pool }
    }

    /// Send a request through the app and return the response.
    pub async fn request(&self, req: Request<Body>) -> Response {
        tower::ServiceExt::oneshot(self.router.clone(), req)
            .await
            .unwrap()
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.request(req).await
    }

    /// Insert a flower row directly and return its id.
    pub async fn insert_flower(
        &self,
        name: &str,
        month: Option<&str>,
        day: Option<&str>,
        created_at: &str,
    ) -> i64 {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO flowers (name, month, day, created_at) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(month)
        .bind(day)
        .bind(created_at)
        .fetch_one(&self.db)
        .await
        .expect("Failed to insert flower");
        id
    }

    /// Insert a flower row with an explicit id.
    pub async fn insert_flower_with_id(
        &self,
        id: i64,
        name: &str,
        month: &str,
        created_at: &str,
    ) {
        sqlx::query("INSERT INTO flowers (id, name, month, day, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(id)
            .bind(name)
            .bind(month)
            .bind("1")
            .bind(created_at)
            .execute(&self.db)
            .await
            .expect("Failed to insert flower");
    }

    /// Remove the catalog tables so every query fails at the store.
    pub async fn drop_catalog(&self) {
        sqlx::query("DROP TABLE flower_hashtags")
            .execute(&self.db)
            .await
            .unwrap();
        sqlx::query("DROP TABLE flowers")
            .execute(&self.db)
            .await
            .unwrap();
    }

    /// Link a hashtag to a flower, creating the hashtag if needed.
    pub async fn tag_flower(&self, flower_id: i64, tag_name: &str) {
        sqlx::query("INSERT OR IGNORE INTO hashtags (tag_name) VALUES (?)")
            .bind(tag_name)
            .execute(&self.db)
            .await
            .unwrap();

        sqlx::query(
            "INSERT INTO flower_hashtags (flower_id, hashtag_id) \
             SELECT ?, id FROM hashtags WHERE tag_name = ?",
        )
        .bind(flower_id)
        .bind(tag_name)
        .execute(&self.db)
        .await
        .unwrap();
    }
}

/// Build a search filter from optional string parts.
pub fn filter(
    name: Option<&str>,
    tag: Option<&str>,
    month: Option<&str>,
    day: Option<&str>,
) -> flowery::catalog::FlowerFilter {
    flowery::catalog::FlowerFilter {
        name: name.map(str::to_string),
        tag: tag.map(str::to_string),
        month: month.map(str::to_string),
        day: day.map(str::to_string),
    }
}

/// Read the full response body as a String.
pub async fn body_string(resp: Response) -> String {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
