//! Action-keyed HTTP boundary.
//!
//! One endpoint, `/api`, serves every action. The `action` selector always
//! comes from the query string; per-action fields come from the query
//! parameters on GET and from a JSON body on POST. A malformed POST body
//! degrades to an empty parameter set, so downstream field lookups yield
//! nulls rather than errors; within a well-formed body, each field is read
//! independently, so one malformed value never discards its siblings.
//!
//! Status contract: 200 `{"ok": true, ...}` (or a bare collection array for
//! the list actions), 404 `not_found`, 400 `unknown_action`, 500 on
//! persistence failure.

use crate::service::{
    AdminActionRequest, CancelAppointmentRequest, CreateAppointmentRequest,
    EscalateAppointmentRequest, RecordService, ServiceError, ServiceResult,
};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Query, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::error;

#[derive(Clone)]
pub struct AppState {
    // Serializes read-modify-write cycles within this process. Writers in
    // other processes still race on the same files (last-rename-wins).
    service: Arc<Mutex<RecordService>>,
}

pub fn router(service: RecordService) -> Router {
    let state = AppState {
        service: Arc::new(Mutex::new(service)),
    };
    Router::new()
        .route("/api", get(dispatch).post(dispatch))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn dispatch(
    State(state): State<AppState>,
    method: Method,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> Response {
    let action = query.get("action").map(String::as_str).unwrap_or("");
    let params = request_params(&method, &query, &body);
    let service = state.service.lock().await;

    match action {
        "users" => collection(service.list_users()),
        "list_appointments" => collection(service.list_appointments()),
        "create_appointment" => {
            match service.create_appointment(CreateAppointmentRequest::from_params(&params)) {
                Ok(item) => ok_json(json!({ "ok": true, "appointment": item })),
                Err(e) => error_response(e),
            }
        }
        "cancel_appointment" => {
            match service.cancel_appointment(CancelAppointmentRequest::from_params(&params)) {
                Ok(item) => ok_json(json!({ "ok": true, "appointment": item })),
                Err(e) => error_response(e),
            }
        }
        "escalate_appointment" => {
            match service.escalate_appointment(EscalateAppointmentRequest::from_params(&params)) {
                Ok(item) => ok_json(json!({ "ok": true, "appointment": item })),
                Err(e) => error_response(e),
            }
        }
        "admin_action" => match service.record_admin_action(AdminActionRequest::from_params(&params)) {
            Ok(()) => ok_json(json!({ "ok": true })),
            Err(e) => error_response(e),
        },
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "ok": false, "error": "unknown_action" })),
        )
            .into_response(),
    }
}

/// GET: query parameters as a string-valued object. POST: the body parsed as
/// a JSON object, or an empty object when it is absent or malformed.
fn request_params(method: &Method, query: &HashMap<String, String>, body: &Bytes) -> Value {
    if method == Method::POST {
        match serde_json::from_slice::<Value>(body) {
            Ok(value @ Value::Object(_)) => value,
            _ => Value::Object(Map::new()),
        }
    } else {
        Value::Object(
            query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        )
    }
}

fn collection<T: Serialize>(result: ServiceResult<Vec<T>>) -> Response {
    match result {
        Ok(items) => Json(items).into_response(),
        Err(e) => error_response(e),
    }
}

fn ok_json(body: Value) -> Response {
    Json(body).into_response()
}

fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::NotFound => (
            StatusCode::NOT_FOUND,
            Json(json!({ "ok": false, "error": "not_found" })),
        )
            .into_response(),
        ServiceError::Store(e) => {
            error!(error = %e, "persistence failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "ok": false, "error": "internal_error" })),
            )
                .into_response()
        }
    }
}
