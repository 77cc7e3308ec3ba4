use log::{debug, error, warn};
use serde::Serialize;
use std::{convert::Infallible, sync::Arc};
use thiserror::Error;
use warp::{
    http::StatusCode,
    reply::{json, with_status, Json, WithStatus},
};
use wsa_chart::ChartError;
use wsa_curve::{AnnotatedPoint, Curve, CurveError, DerivedPair, SupplyAnalysis, SupplyRequest};

use crate::AppContext;

/// Successful `POST /generate_plot` answer.
#[derive(Debug, Serialize)]
pub struct PlotResponse {
    /// Relative URL of the rendered chart.
    pub image_path: String,
    /// The submitted curve followed by the derived Q20 and Q0 points.
    pub first_line_points: Curve,
    pub second_line_points: Curve,
    pub optional_points: Vec<AnnotatedPoint>,
    /// `[[Q20, 20], [Q0, 0]]`
    pub derived_points: DerivedPair,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub kind: &'static str,
}

/// Anything that can go wrong while answering a plot request.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Chart(#[from] ChartError),

    #[error("Render task failed: {0}")]
    Task(String),
}

impl ServiceError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServiceError::Curve(_) => StatusCode::BAD_REQUEST,
            ServiceError::Chart(_) | ServiceError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Curve(e) => e.kind(),
            ServiceError::Chart(_) | ServiceError::Task(_) => "render_failed",
        }
    }
}

/// Validate, extrapolate, render and store: one synchronous request cycle.
pub fn process(context: &AppContext, request: &SupplyRequest) -> Result<PlotResponse, ServiceError> {
    let input = request.validate()?;
    let analysis = SupplyAnalysis::run(input)?;
    let artifact = wsa_chart::publish(
        context.renderer.as_ref(),
        &context.store,
        &analysis,
        &context.layout,
    )?;
    debug!("Extended first line: {:?}", analysis.primary.points());

    Ok(PlotResponse {
        image_path: artifact.url_path,
        first_line_points: analysis.primary,
        second_line_points: analysis.secondary,
        optional_points: analysis.annotations,
        derived_points: analysis.derived,
    })
}

pub async fn generate_plot(
    request: SupplyRequest,
    context: Arc<AppContext>,
) -> Result<WithStatus<Json>, Infallible> {
    debug!("generate_plot: {:?}", request);
    // plotters drawing is CPU-bound; keep it off the async workers
    let outcome = tokio::task::spawn_blocking(move || process(&context, &request))
        .await
        .unwrap_or_else(|e| Err(ServiceError::Task(e.to_string())));

    Ok(match outcome {
        Ok(response) => with_status(json(&response), StatusCode::OK),
        Err(e) => {
            if e.status().is_client_error() {
                warn!("Rejected plot request: {}", e);
            } else {
                error!("Plot request failed: {}", e);
            }
            error_reply(e.status(), e.to_string(), e.kind())
        }
    })
}

pub fn error_reply(status: StatusCode, error: String, kind: &'static str) -> WithStatus<Json> {
    with_status(json(&ErrorBody { error, kind }), status)
}
