use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json as ResponseJson,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::auth::AdminSession;
use crate::errors::ApiError;
use crate::extractors::{JsonBody, PathParam};
use crate::models::{
    FuelType, ImageList, NewVehicle, Transmission, Vehicle, VehicleCategory, VehicleChanges,
};
use crate::validation::{
    ValidationError, optional_text, require_text, validate_image_urls, validate_odometer,
    validate_price, validate_year,
};
use crate::{AppState, repositories::VehicleRepository};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateVehicleRequest {
    category: VehicleCategory,
    brand: String,
    model: String,
    price: f64,
    year: Option<i32>,
    odometer: Option<i64>,
    #[serde(default)]
    fuel_type: FuelType,
    #[serde(default)]
    transmission: Transmission,
    tonnage: Option<String>,
    description: Option<String>,
    #[serde(default)]
    images: Vec<String>,
}

impl TryFrom<CreateVehicleRequest> for NewVehicle {
    type Error = ValidationError;

    fn try_from(request: CreateVehicleRequest) -> Result<Self, Self::Error> {
        Ok(NewVehicle {
            category: request.category,
            brand: require_text("brand", request.brand)?,
            model: require_text("model", request.model)?,
            price: validate_price(request.price)?,
            year: request.year.map(validate_year).transpose()?,
            odometer: request.odometer.map(validate_odometer).transpose()?,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            tonnage: optional_text(request.tonnage),
            description: optional_text(request.description),
            images: ImageList(validate_image_urls(request.images)?),
        })
    }
}

/// Every field is optional; absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVehicleRequest {
    category: Option<VehicleCategory>,
    brand: Option<String>,
    model: Option<String>,
    price: Option<f64>,
    year: Option<i32>,
    odometer: Option<i64>,
    fuel_type: Option<FuelType>,
    transmission: Option<Transmission>,
    tonnage: Option<String>,
    description: Option<String>,
    images: Option<Vec<String>>,
}

impl TryFrom<UpdateVehicleRequest> for VehicleChanges {
    type Error = ValidationError;

    fn try_from(request: UpdateVehicleRequest) -> Result<Self, Self::Error> {
        Ok(VehicleChanges {
            category: request.category,
            brand: request
                .brand
                .map(|brand| require_text("brand", brand))
                .transpose()?,
            model: request
                .model
                .map(|model| require_text("model", model))
                .transpose()?,
            price: request.price.map(validate_price).transpose()?,
            year: request.year.map(validate_year).transpose()?,
            odometer: request.odometer.map(validate_odometer).transpose()?,
            fuel_type: request.fuel_type,
            transmission: request.transmission,
            tonnage: optional_text(request.tonnage),
            description: optional_text(request.description),
            images: request
                .images
                .map(validate_image_urls)
                .transpose()?
                .map(ImageList),
        })
    }
}

#[derive(Debug, Serialize)]
struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
struct ViewsResponse {
    views: i64,
}

#[instrument(skip_all)]
async fn list_vehicles<S: AppState>(
    State(state): State<S>,
) -> Result<ResponseJson<Vec<Vehicle>>, ApiError> {
    debug!("Processing list vehicles request");

    let vehicles = state.vehicle_repo().list().await?;

    info!(returned_count = vehicles.len(), "Successfully retrieved vehicles");
    Ok(ResponseJson(vehicles))
}

#[instrument(skip_all, fields(id = %id))]
async fn get_vehicle<S: AppState>(
    State(state): State<S>,
    PathParam(id): PathParam<i32>,
) -> Result<ResponseJson<Vehicle>, ApiError> {
    debug!("Processing get vehicle request");

    match state.vehicle_repo().find_by_id(id).await? {
        Some(vehicle) => {
            info!(id = vehicle.id, "Successfully retrieved vehicle");
            Ok(ResponseJson(vehicle))
        }
        None => {
            debug!("Vehicle not found");
            Err(ApiError::NotFound("Vehicle"))
        }
    }
}

#[instrument(skip_all, fields(category = %payload.category, brand = %payload.brand, images = payload.images.len()))]
async fn create_vehicle<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    JsonBody(payload): JsonBody<CreateVehicleRequest>,
) -> Result<(StatusCode, ResponseJson<Vehicle>), ApiError> {
    debug!("Processing create vehicle request");

    let new_vehicle = NewVehicle::try_from(payload)?;
    let vehicle = state.vehicle_repo().create(&new_vehicle).await?;

    info!(id = vehicle.id, "Successfully created vehicle");
    Ok((StatusCode::CREATED, ResponseJson(vehicle)))
}

#[instrument(skip_all, fields(id = %id))]
async fn update_vehicle<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<UpdateVehicleRequest>,
) -> Result<ResponseJson<Vehicle>, ApiError> {
    debug!("Processing update vehicle request");

    let changes = VehicleChanges::try_from(payload)?;
    let vehicle = state
        .vehicle_repo()
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound("Vehicle"))?;

    info!(id = vehicle.id, "Successfully updated vehicle");
    Ok(ResponseJson(vehicle))
}

#[instrument(skip_all, fields(id = %id))]
async fn delete_vehicle<S: AppState>(
    State(state): State<S>,
    _admin: AdminSession,
    PathParam(id): PathParam<i32>,
) -> Result<ResponseJson<MessageResponse>, ApiError> {
    debug!("Processing delete vehicle request");

    if !state.vehicle_repo().delete(id).await? {
        debug!("Vehicle already deleted");
        return Err(ApiError::NotFound("Vehicle"));
    }

    info!("Successfully deleted vehicle");
    Ok(ResponseJson(MessageResponse {
        message: "Vehicle deleted".to_string(),
    }))
}

/// Counts detail-page visits. There is no dedup: every call adds one.
#[instrument(skip_all, fields(id = %id))]
async fn increment_views<S: AppState>(
    State(state): State<S>,
    PathParam(id): PathParam<i32>,
) -> Result<ResponseJson<ViewsResponse>, ApiError> {
    let views = state
        .vehicle_repo()
        .increment_views(id)
        .await?
        .ok_or(ApiError::NotFound("Vehicle"))?;

    debug!(views, "Incremented vehicle views");
    Ok(ResponseJson(ViewsResponse { views }))
}

pub fn create_vehicle_router<S: AppState>() -> Router<S> {
    Router::new()
        .route("/cars", get(list_vehicles::<S>))
        .route("/cars/add", post(create_vehicle::<S>))
        .route("/cars/views/{id}", put(increment_views::<S>))
        .route(
            "/cars/{id}",
            get(get_vehicle::<S>)
                .put(update_vehicle::<S>)
                .delete(delete_vehicle::<S>),
        )
}
