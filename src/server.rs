use std::sync::Arc;
use std::time::Instant;
use axum::{routing::{get, post}, Router, Json};
use axum::extract::{Path, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use tower_http::cors::{CorsLayer, Any};
use serde::Serialize;
use tracing::{info, warn};
use crate::engine::Semester;
use crate::error::SgpaError;
use crate::interface::{validate_modules, validate_semesters, GradeInterface, Submission};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub error: String,
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

fn status_for(e: &SgpaError) -> StatusCode {
    match e {
        SgpaError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn reject(e: SgpaError, started: Instant) -> Response {
    let status = status_for(&e);
    let msg = format!("{e}");
    warn!(%msg, code=%status.as_u16(), ms=elapsed_ms(started), "request rejected");
    (status, Json(ErrorResponse { status: "error".into(), error: msg })).into_response()
}

fn join_error(e: tokio::task::JoinError, started: Instant) -> Response {
    warn!(error=%e, ms=elapsed_ms(started), "Join error");
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse { status: "error".into(), error: "Join error".into() })).into_response()
}

async fn semester_sgpa(State(iface): State<Arc<GradeInterface>>, Json(semester): Json<Semester>) -> Response {
    let started = Instant::now();
    if let Err(e) = validate_modules(&semester.modules) {
        return reject(e, started);
    }
    let result = iface.compute_semester(&semester);
    info!(ms=elapsed_ms(started), semester=%result.name, sgpa=result.sgpa, credits=result.credits, "semester computed");
    (StatusCode::OK, Json(result)).into_response()
}

async fn final_sgpa(State(iface): State<Arc<GradeInterface>>, Json(semesters): Json<Vec<Semester>>) -> Response {
    let started = Instant::now();
    if let Err(e) = validate_semesters(&semesters) {
        return reject(e, started);
    }
    let result = iface.compute_final(&semesters);
    info!(ms=elapsed_ms(started), semesters=semesters.len(), final_sgpa=result.final_sgpa, standing=%result.standing, "final computed");
    (StatusCode::OK, Json(result)).into_response()
}

async fn submit(State(iface): State<Arc<GradeInterface>>, Json(submission): Json<Submission>) -> Response {
    let started = Instant::now();
    // The store is synchronous, so saving happens on a blocking thread.
    let outcome = tokio::task::spawn_blocking(move || iface.submit(&submission)).await;
    match outcome {
        Ok(Ok(evaluation)) => {
            info!(ms=elapsed_ms(started), student_id=evaluation.stored.student_id, rows=evaluation.stored.rows, "submission stored");
            (StatusCode::CREATED, Json(evaluation)).into_response()
        }
        Ok(Err(e)) => reject(e, started),
        Err(e) => join_error(e, started),
    }
}

async fn transcript(State(iface): State<Arc<GradeInterface>>, Path(registration_number): Path<String>) -> Response {
    let started = Instant::now();
    let lookup = registration_number.clone();
    let outcome = tokio::task::spawn_blocking(move || iface.transcript(&lookup)).await;
    match outcome {
        Ok(Ok(Some(transcript))) => {
            info!(ms=elapsed_ms(started), %registration_number, rows=transcript.sgpa_records.len(), "transcript found");
            (StatusCode::OK, Json(transcript)).into_response()
        }
        Ok(Ok(None)) => {
            info!(ms=elapsed_ms(started), %registration_number, "no transcript");
            let body = ErrorResponse { status: "error".into(), error: format!("no student with registration number '{registration_number}'") };
            (StatusCode::NOT_FOUND, Json(body)).into_response()
        }
        Ok(Err(e)) => reject(e, started),
        Err(e) => join_error(e, started),
    }
}

async fn grades(State(iface): State<Arc<GradeInterface>>) -> Response {
    (StatusCode::OK, Json(iface.vocabulary())).into_response()
}

pub fn router(interface: Arc<GradeInterface>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/sgpa/", post(semester_sgpa))
        .route("/final-sgpa/", post(final_sgpa))
        .route("/students/", post(submit))
        .route("/students/:registration_number", get(transcript))
        .route("/grades/", get(grades))
        .with_state(interface)
        .layer(cors)
}
