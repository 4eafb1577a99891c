//! HTTP route handlers.

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Query, RawQuery, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};
use url::form_urlencoded;

use crate::domain::{Coordinates, SearchFilters};
use crate::service::{self, SubmitOutcome};
use crate::store::{FoodStore, StoreError};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
///
/// `static_dir` is the path to the static assets directory.
pub fn create_router<S: FoodStore + 'static>(state: AppState<S>, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/search", get(search_page::<S>))
        .route("/submit", get(submit_page::<S>).post(submit_form::<S>))
        .route("/api/locate", get(locate::<S>))
        .route("/api/stations/nearest", get(nearest_stations::<S>))
        .nest_service("/static", ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn index() -> Redirect {
    Redirect::to("/search")
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

fn render(template: &impl Template) -> Result<Html<String>, AppError> {
    template.render().map(Html).map_err(|e| AppError::Internal {
        message: format!("Template error: {}", e),
    })
}

/// Search submissions.
///
/// `tags` may repeat in the query string, so it is decoded by hand rather
/// than through `Query`.
async fn search_page<S: FoodStore>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let html = accepts_html(&headers);
    let query = query.unwrap_or_default();
    let filters = SearchFilters::from_pairs(form_urlencoded::parse(query.as_bytes()));

    let results = service::search(state.store.as_ref(), &filters)
        .await
        .map_err(|e| AppError::from(e).page_if(html))?;

    // Return HTML or JSON based on Accept header
    if html {
        let options = service::filter_options(state.store.as_ref())
            .await
            .map_err(|e| AppError::from(e).page())?;
        let template = SearchTemplate::new(&filters, &options, &results);
        Ok(render(&template).map_err(AppError::page)?.into_response())
    } else {
        Ok(Json(SearchResponse {
            count: results.len(),
            submissions: results,
        })
        .into_response())
    }
}

/// Submission form, optionally pre-filled from a map link.
async fn submit_page<S: FoodStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<SubmitPageRequest>,
) -> Result<Response, AppError> {
    let station_names = state
        .store
        .station_names()
        .await
        .map_err(|e| AppError::from(e).page())?;

    let link = req.map_link.unwrap_or_default().trim().to_string();
    let mut form = SubmitFormInput {
        map_link: link.clone(),
        ..SubmitFormInput::default()
    };
    let mut notice = None;

    if !link.is_empty() {
        match state.geo.locate(state.store.as_ref(), &link).await {
            Some(place) => {
                form.name = place.place_name;
                form.stations = place
                    .nearest_stations
                    .into_iter()
                    .map(|s| s.name)
                    .collect();
                if place.coordinates.is_none() {
                    notice = Some("No coordinates found in that link. Please pick stations yourself.".to_string());
                } else if form.stations.is_empty() {
                    notice = Some(format!(
                        "No MRT station within {} km. Please pick stations yourself.",
                        state.geo.radius_km()
                    ));
                }
            }
            None => {
                notice = Some("Couldn't open that map link. Please fill in the details yourself.".to_string());
            }
        }
    }

    let mut template = SubmitTemplate::new(form, &station_names);
    if let Some(notice) = notice {
        template = template.with_notice(notice);
    }
    Ok(render(&template).map_err(AppError::page)?.into_response())
}

/// Handle a submitted form.
///
/// Validation failures and unknown stations re-render the form with the
/// user's input intact.
async fn submit_form<S: FoodStore>(
    State(state): State<AppState<S>>,
    body: Bytes,
) -> Result<Response, AppError> {
    let input = SubmitFormInput::from_pairs(form_urlencoded::parse(&body));

    let station_names = state
        .store
        .station_names()
        .await
        .map_err(|e| AppError::from(e).page())?;

    let form = match input.to_form() {
        Ok(form) => form,
        Err(message) => {
            let template = SubmitTemplate::new(input, &station_names).with_errors(vec![message]);
            return rejected(&template);
        }
    };

    match service::submit(state.store.as_ref(), &form).await {
        Ok(SubmitOutcome::Created(_)) => {
            let template = SubmitTemplate::new(SubmitFormInput::default(), &station_names)
                .with_success("Thanks! Your recommendation has been submitted.");
            Ok(render(&template).map_err(AppError::page)?.into_response())
        }
        Ok(SubmitOutcome::Rejected(errors)) => {
            rejected(&SubmitTemplate::new(input, &station_names).with_errors(errors))
        }
        Err(StoreError::UnknownStation(name)) => {
            let template = SubmitTemplate::new(input, &station_names)
                .with_errors(vec![format!("Unknown MRT station: {name}")]);
            rejected(&template)
        }
        Err(e) => Err(AppError::from(e).page()),
    }
}

fn rejected(template: &SubmitTemplate) -> Result<Response, AppError> {
    let html = render(template).map_err(AppError::page)?;
    Ok((StatusCode::UNPROCESSABLE_ENTITY, html).into_response())
}

/// Resolve a map link to a place name, coordinates and nearby stations.
async fn locate<S: FoodStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<LocateRequest>,
) -> Result<Json<LocateResponse>, AppError> {
    let link = req.link.trim();
    if link.is_empty() {
        return Err(AppError::BadRequest {
            message: "link must not be empty".to_string(),
        });
    }

    let place = state.geo.locate(state.store.as_ref(), link).await;
    Ok(Json(LocateResponse { place }))
}

/// Stations nearest a point.
async fn nearest_stations<S: FoodStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<NearestRequest>,
) -> Result<Json<NearestResponse>, AppError> {
    if !(-90.0..=90.0).contains(&req.lat) || !(-180.0..=180.0).contains(&req.lon) {
        return Err(AppError::BadRequest {
            message: format!("Invalid coordinates: {}, {}", req.lat, req.lon),
        });
    }

    let radius_km = req.radius_km.unwrap_or(state.geo.radius_km());
    if !radius_km.is_finite() || radius_km < 0.0 {
        return Err(AppError::BadRequest {
            message: format!("Invalid radius: {radius_km}"),
        });
    }

    let limit = req
        .limit
        .unwrap_or(state.geo.station_limit())
        .min(MAX_NEAREST_LIMIT);

    let origin = Coordinates::new(req.lat, req.lon);
    let stations = state
        .geo
        .nearest_stations(state.store.as_ref(), origin, limit, radius_km)
        .await;

    Ok(Json(NearestResponse { stations }))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Internal { message: String },
    /// Render the wrapped error as an HTML page rather than JSON.
    Page(Box<AppError>),
}

impl AppError {
    fn page(self) -> Self {
        match self {
            AppError::Page(_) => self,
            other => AppError::Page(Box::new(other)),
        }
    }

    fn page_if(self, html: bool) -> Self {
        if html { self.page() } else { self }
    }

    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
            AppError::Page(inner) => inner.status_and_message(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::UnknownStation(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = self.status_and_message();

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        if let AppError::Page(_) = self {
            let page = ErrorTemplate {
                title: status.canonical_reason().unwrap_or("Error").to_string(),
                message: message.clone(),
            };
            if let Ok(html) = page.render() {
                return (status, Html(html)).into_response();
            }
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
