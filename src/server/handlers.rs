//! HTTP request handlers

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::engine::{CompletionResult, Predictor};
use crate::error::PredictError;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared application state
pub struct AppState {
    pub predictor: Arc<Predictor>,
}

impl AppState {
    pub fn new(predictor: Arc<Predictor>) -> Self {
        Self { predictor }
    }
}

/// Web form
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Health check endpoint
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            model: state.predictor.model_name().to_string(),
        }),
    )
}

/// Fill-mask endpoint
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return error_response(rejection_status(&rejection), rejection.body_text())
        }
    };

    let predictor = Arc::clone(&state.predictor);
    let outcome =
        tokio::task::spawn_blocking(move || predictor.predict_text(&request.sentence)).await;

    match outcome {
        Ok(Ok(result)) => (StatusCode::OK, Json(PredictResponse::from(&result))).into_response(),
        Ok(Err(e)) => {
            if !e.is_validation() {
                tracing::error!("Prediction failed: {}", e);
            }
            error_response(status_for(&e), e.to_string())
        }
        Err(e) => {
            tracing::error!("Prediction task failed: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Inference failed: {}", e),
            )
        }
    }
}

/// HTTP status for a prediction error
pub fn status_for(err: &PredictError) -> StatusCode {
    match err {
        PredictError::Validation(_) => StatusCode::BAD_REQUEST,
        PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Oversized bodies keep their 413; every other unreadable body is a 400
fn rejection_status(rejection: &JsonRejection) -> StatusCode {
    match rejection.status() {
        StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
        _ => StatusCode::BAD_REQUEST,
    }
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// Round to 4 decimals for the wire
fn round4(score: f32) -> f64 {
    (f64::from(score) * 10_000.0).round() / 10_000.0
}

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub sentence: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predictions: Vec<WordConfidence>,
    pub completed_sentence: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WordConfidence {
    pub word: String,
    pub confidence: f64,
}

impl From<&CompletionResult> for PredictResponse {
    fn from(result: &CompletionResult) -> Self {
        Self {
            predictions: result
                .predictions()
                .iter()
                .map(|p| WordConfidence {
                    word: p.token.clone(),
                    confidence: round4(p.score),
                })
                .collect(),
            completed_sentence: result.completed_sentence().to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{MaskedSentence, Prediction};

    #[test]
    fn test_round4() {
        assert_eq!(round4(0.123456), 0.1235);
        assert_eq!(round4(1.0), 1.0);
        assert_eq!(round4(0.0), 0.0);
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&PredictError::Validation("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&PredictError::Inference("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_response_wire_shape() {
        let sentence = MaskedSentence::new("The cat sat on the [MASK].").unwrap();
        let result =
            CompletionResult::from_ranked(sentence, vec![Prediction::new("mat", 0.5)]).unwrap();

        let value = serde_json::to_value(PredictResponse::from(&result)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "predictions": [{"word": "mat", "confidence": 0.5}],
                "completed_sentence": "The cat sat on the **MAT**."
            })
        );
    }
}
