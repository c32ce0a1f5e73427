use crate::{
    error::{self, Error},
    state::AppState,
};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    response::IntoResponse,
    routing::{get, post},
};
use liborg::{
    loadable::Loadable,
    location::{self, BoundingBox, Location},
    organisation::Organisation,
};
use serde::{Deserialize, Serialize};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_organisations))
        .route("/create", post(create_organisation))
        .route("/create/locations", post(create_location))
        .route("/{id}", get(show_organisation))
        .route("/{id}/locations", get(list_organisation_locations))
}

#[derive(Deserialize)]
struct CreateOrganisationParams {
    name: String,
}

async fn create_organisation(
    State(state): State<AppState>,
    Json(params): Json<CreateOrganisationParams>,
) -> Result<Json<Organisation>, error::Error> {
    let mut organisation = Organisation::new(params.name);
    organisation.insert(&state.db).await?;
    Ok(Json(organisation))
}

async fn list_organisations(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, error::Error> {
    let organisations = Organisation::load_all(None, &state.db).await?;
    Ok(Json(organisations).into_response())
}

async fn show_organisation(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Organisation>, error::Error> {
    let organisation = Organisation::load(id, &state.db)
        .await
        .map_err(|err| match err {
            liborg::Error::DatabaseRowNotFound(_) => {
                Error::NotFound(format!("Organisation {id} not found"))
            }
            err => err.into(),
        })?;
    Ok(Json(organisation))
}

#[derive(Deserialize)]
struct CreateLocationParams {
    organisation_id: i64,
    location_name: String,
    latitude: f64,
    longitude: f64,
}

async fn create_location(
    State(state): State<AppState>,
    Json(params): Json<CreateLocationParams>,
) -> Result<Json<Location>, error::Error> {
    let mut location = Location::new(
        params.location_name,
        params.latitude,
        params.longitude,
        params.organisation_id,
    );
    location.insert(&state.db).await?;
    Ok(Json(location))
}

#[derive(Deserialize)]
struct BoundsParams {
    x_min: Option<f64>,
    y_min: Option<f64>,
    x_max: Option<f64>,
    y_max: Option<f64>,
}

impl BoundsParams {
    /// Callers give all four bounds or none at all; anything in between is
    /// rejected, naming the first missing bound.
    fn bounding_box(&self) -> Result<Option<BoundingBox>, Error> {
        match (self.x_min, self.y_min, self.x_max, self.y_max) {
            (None, None, None, None) => Ok(None),
            (Some(x_min), Some(y_min), Some(x_max), Some(y_max)) => Ok(Some(BoundingBox {
                x_min,
                y_min,
                x_max,
                y_max,
            })),
            _ => {
                let missing = [
                    ("x_min", self.x_min.is_none()),
                    ("y_min", self.y_min.is_none()),
                    ("x_max", self.x_max.is_none()),
                    ("y_max", self.y_max.is_none()),
                ]
                .iter()
                .find(|(_, missing)| *missing)
                .map(|(name, _)| *name)
                .unwrap_or("bounding box");
                Err(Error::RequiredParameterMissing(missing.to_string()))
            }
        }
    }
}

#[derive(Serialize)]
struct LocationSummary {
    location_name: String,
    location_latitude: f64,
    location_longitude: f64,
}

impl From<Location> for LocationSummary {
    fn from(value: Location) -> Self {
        Self {
            location_name: value.name,
            location_latitude: value.latitude,
            location_longitude: value.longitude,
        }
    }
}

async fn list_organisation_locations(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    query: Result<Query<BoundsParams>, QueryRejection>,
) -> Result<impl IntoResponse, error::Error> {
    let Query(params) = query.map_err(Error::UnprocessableEntityQueryRejection)?;
    let filter = params
        .bounding_box()?
        .map(|bounds| location::Filter::Bounds(bounds).into());
    let locations = Location::load_all_organisation(id, filter, &state.db).await?;
    Ok(Json(
        locations
            .into_iter()
            .map(LocationSummary::from)
            .collect::<Vec<_>>(),
    ))
}
