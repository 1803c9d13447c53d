use std::sync::{Arc, Mutex, MutexGuard};

use diesel::sqlite::SqliteConnection;
use tracing::error;

use crate::errors::ApiError;

pub mod notifications;
pub mod posts;
pub mod traits;
pub mod vehicles;

pub use notifications::SqliteNotificationRepository;
pub use posts::SqlitePostRepository;
pub use traits::{NotificationRepository, PostRepository, PostVisibility, VehicleRepository};
pub use vehicles::SqliteVehicleRepository;

pub type SharedConnection = Arc<Mutex<SqliteConnection>>;

pub(crate) fn lock(db: &SharedConnection) -> Result<MutexGuard<'_, SqliteConnection>, ApiError> {
    db.lock().map_err(|_| {
        error!("Database connection mutex poisoned");
        ApiError::InternalError
    })
}
