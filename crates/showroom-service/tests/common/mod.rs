#![allow(dead_code)]

use chrono::Duration;
use diesel::sqlite::SqliteConnection;
use showroom_service::auth::AdminAuth;
use showroom_service::db::establish_connection;

pub const ADMIN_USERNAME: &str = "admin@showroom.test";
pub const ADMIN_PASSWORD: &str = "correct horse battery staple";
pub const JWT_SECRET: &str = "integration-test-secret";

pub fn establish_test_connection() -> SqliteConnection {
    establish_connection(":memory:").expect("Failed to create in-memory database")
}

pub fn test_auth() -> AdminAuth {
    AdminAuth::new(
        Some(ADMIN_USERNAME.to_string()),
        Some(ADMIN_PASSWORD.to_string()),
        Some(JWT_SECRET.to_string()),
        Duration::hours(24),
    )
}

pub fn admin_token() -> String {
    test_auth()
        .login(ADMIN_USERNAME, ADMIN_PASSWORD)
        .expect("Failed to issue admin token")
}

pub mod server_utils {
    use super::*;
    use axum_test::TestServer;
    use showroom_service::{DefaultAppState, routes};
    use std::sync::{Arc, Mutex};

    pub fn create_test_server_with_auth(
        auth: AdminAuth,
    ) -> (TestServer, Arc<Mutex<SqliteConnection>>) {
        let connection = establish_test_connection();
        let db = Arc::new(Mutex::new(connection));

        let state = DefaultAppState::new(db.clone(), auth);
        let app = routes::create_router().with_state(state);

        let server = TestServer::new(app).unwrap();
        (server, db)
    }

    pub fn create_test_server() -> (TestServer, Arc<Mutex<SqliteConnection>>) {
        create_test_server_with_auth(test_auth())
    }
}

pub mod fixtures {
    use serde_json::{Value, json};

    pub fn vehicle_payload() -> Value {
        json!({
            "category": "Car",
            "brand": "Toyota",
            "model": "Land Cruiser",
            "price": 32500000.0,
            "year": 2021,
            "odometer": 45000,
            "fuelType": "Diesel",
            "transmission": "Automatic",
            "description": "One owner, full service history",
            "images": [
                "https://res.cloudinary.com/demo/image/upload/lc-front.jpg",
                "https://res.cloudinary.com/demo/image/upload/lc-back.jpg"
            ]
        })
    }

    pub fn post_payload(title: &str) -> Value {
        json!({
            "title": title,
            "content": "Checking tyre pressure before a long trip saves fuel.",
            "excerpt": "Quick tips before the road",
            "image": "https://res.cloudinary.com/demo/image/upload/tyres.jpg",
            "category": "Maintenance"
        })
    }
}

pub mod test_utils {
    use chrono::NaiveDateTime;
    use diesel::prelude::*;
    use diesel::sqlite::SqliteConnection;
    use showroom_service::models::{NewNotification, Vehicle};
    use showroom_service::schema::{notifications, posts, vehicles};

    pub fn count_vehicles(conn: &mut SqliteConnection) -> i64 {
        vehicles::table
            .count()
            .get_result(conn)
            .expect("Failed to count vehicles")
    }

    pub fn count_posts(conn: &mut SqliteConnection) -> i64 {
        posts::table
            .count()
            .get_result(conn)
            .expect("Failed to count posts")
    }

    pub fn count_notifications(conn: &mut SqliteConnection) -> i64 {
        notifications::table
            .count()
            .get_result(conn)
            .expect("Failed to count notifications")
    }

    pub fn count_unread_notifications(conn: &mut SqliteConnection) -> i64 {
        notifications::table
            .filter(notifications::read.eq(false))
            .count()
            .get_result(conn)
            .expect("Failed to count unread notifications")
    }

    pub fn get_vehicle(conn: &mut SqliteConnection, id: i32) -> Option<Vehicle> {
        vehicles::table
            .find(id)
            .select(Vehicle::as_select())
            .first(conn)
            .optional()
            .expect("Failed to query vehicle")
    }

    pub fn get_post_slugs(conn: &mut SqliteConnection) -> Vec<String> {
        posts::table
            .select(posts::slug)
            .order(posts::id.asc())
            .load(conn)
            .expect("Failed to load post slugs")
    }

    pub fn insert_notification(conn: &mut SqliteConnection, page_origin: &str) {
        diesel::insert_into(notifications::table)
            .values(&NewNotification {
                page_origin: page_origin.to_string(),
            })
            .execute(conn)
            .expect("Failed to insert notification");
    }

    pub fn update_vehicle_timestamp(conn: &mut SqliteConnection, id: i32, timestamp: NaiveDateTime) {
        diesel::update(vehicles::table.find(id))
            .set(vehicles::created_at.eq(timestamp))
            .execute(conn)
            .expect("Failed to update vehicle timestamp");
    }

    pub fn set_vehicle_views(conn: &mut SqliteConnection, id: i32, count: i64) {
        diesel::update(vehicles::table.find(id))
            .set(vehicles::views.eq(count))
            .execute(conn)
            .expect("Failed to set vehicle views");
    }

    pub fn update_post_timestamp(conn: &mut SqliteConnection, id: i32, timestamp: NaiveDateTime) {
        diesel::update(posts::table.find(id))
            .set(posts::created_at.eq(timestamp))
            .execute(conn)
            .expect("Failed to update post timestamp");
    }
}
