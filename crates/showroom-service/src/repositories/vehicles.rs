use super::traits::VehicleRepository;
use super::{SharedConnection, lock};
use crate::errors::ApiError;
use crate::models::{NewVehicle, Vehicle, VehicleChanges};
use crate::schema::vehicles;
use async_trait::async_trait;
use diesel::prelude::*;

#[derive(Clone)]
pub struct SqliteVehicleRepository {
    db: SharedConnection,
}

impl SqliteVehicleRepository {
    pub fn new(db: SharedConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl VehicleRepository for SqliteVehicleRepository {
    async fn list(&self) -> Result<Vec<Vehicle>, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = vehicles::table
            .order((vehicles::created_at.desc(), vehicles::id.desc()))
            .select(Vehicle::as_select())
            .load(&mut *conn)?;
        Ok(result)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Vehicle>, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = vehicles::table
            .find(id)
            .select(Vehicle::as_select())
            .first(&mut *conn)
            .optional()?;
        Ok(result)
    }

    async fn create(&self, vehicle: &NewVehicle) -> Result<Vehicle, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = diesel::insert_into(vehicles::table)
            .values(vehicle)
            .returning(Vehicle::as_returning())
            .get_result(&mut *conn)?;
        Ok(result)
    }

    async fn update(&self, id: i32, changes: &VehicleChanges) -> Result<Option<Vehicle>, ApiError> {
        let mut conn = lock(&self.db)?;
        // Diesel refuses an empty SET clause
        if changes.is_empty() {
            let current = vehicles::table
                .find(id)
                .select(Vehicle::as_select())
                .first(&mut *conn)
                .optional()?;
            return Ok(current);
        }

        let result = diesel::update(vehicles::table.find(id))
            .set(changes)
            .returning(Vehicle::as_returning())
            .get_result(&mut *conn)
            .optional()?;
        Ok(result)
    }

    async fn delete(&self, id: i32) -> Result<bool, ApiError> {
        let mut conn = lock(&self.db)?;
        let deleted = diesel::delete(vehicles::table.find(id)).execute(&mut *conn)?;
        Ok(deleted > 0)
    }

    async fn increment_views(&self, id: i32) -> Result<Option<i64>, ApiError> {
        let mut conn = lock(&self.db)?;
        let result = diesel::update(vehicles::table.find(id))
            .set(vehicles::views.eq(vehicles::views + 1))
            .returning(vehicles::views)
            .get_result::<i64>(&mut *conn)
            .optional()?;
        Ok(result)
    }
}
