use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    AllocationConfig, ErrorResponse, GenerateScheduleRequest, GenerateScheduleResponse,
    HealthResponse, ScorePairRequest, ScorePairResponse,
};
use crate::core::{calculate_compatibility, Scheduler};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Scheduler,
}

/// Configure all schedule-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/schedule/generate", web::post().to(generate_schedule))
        .route("/schedule/score", web::post().to(score_pair));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Merge per-request overrides into the service defaults
fn run_config(base: &AllocationConfig, req: &GenerateScheduleRequest) -> AllocationConfig {
    let mut config = base.clone();
    if let Some(min_score) = req.min_score {
        config.min_score = min_score;
    }
    if let Some(min_meetings) = req.min_meetings_per_investor {
        config.min_meetings_per_investor = min_meetings;
    }
    if let Some(filter) = &req.investor_filter {
        config.investor_filter = Some(filter.iter().cloned().collect());
    }
    config
}

/// Generate schedule endpoint
///
/// POST /api/v1/schedule/generate
///
/// Request body:
/// ```json
/// {
///   "startups": [...],
///   "investors": [...],
///   "existingMatches": [...],
///   "timeSlots": [...],
///   "minScore": 70,
///   "minMeetingsPerInvestor": 0,
///   "investorFilter": ["investor-id"]
/// }
/// ```
async fn generate_schedule(
    state: web::Data<AppState>,
    req: web::Json<GenerateScheduleRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for generate_schedule request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let scheduler = Scheduler::new(run_config(state.scheduler.config(), &req));

    tracing::info!(
        "Generating schedule for {} startups, {} investors, {} existing matches",
        req.startups.len(),
        req.investors.len(),
        req.existing_matches.len()
    );

    // CPU-bound; keep it off the worker thread
    let outcome = tokio::task::spawn_blocking(move || {
        scheduler.generate(&req.startups, &req.investors, &req.existing_matches, &req.time_slots)
    })
    .await;

    match outcome {
        Ok(Ok(result)) => HttpResponse::Ok().json(GenerateScheduleResponse {
            matches: result.matches,
            stats: result.stats,
        }),
        Ok(Err(e)) => {
            tracing::warn!("Schedule generation rejected: {}", e);
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                error: "Schedule generation rejected".to_string(),
                message: e.to_string(),
                status_code: 422,
            })
        }
        Err(e) => {
            tracing::error!("Schedule generation task failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Schedule generation failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

/// Score a single pair
///
/// POST /api/v1/schedule/score
///
/// Assumes the investor has a free slot whenever its capacity is non-zero.
async fn score_pair(
    state: web::Data<AppState>,
    req: web::Json<ScorePairRequest>,
) -> impl Responder {
    let remaining = req.investor.total_slots.min(1);
    let compatibility = calculate_compatibility(&req.startup, &req.investor, remaining);

    HttpResponse::Ok().json(ScorePairResponse {
        passes_hard_filters: compatibility.passes_hard_filters,
        score: compatibility.score,
        eligible: compatibility.is_eligible(state.scheduler.config().min_score),
        breakdown: compatibility.breakdown,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerateScheduleRequest {
        GenerateScheduleRequest {
            startups: vec![],
            investors: vec![],
            existing_matches: vec![],
            time_slots: vec![],
            min_score: None,
            min_meetings_per_investor: None,
            investor_filter: None,
        }
    }

    #[test]
    fn test_run_config_keeps_defaults() {
        let base = AllocationConfig::default();
        assert_eq!(run_config(&base, &request()), base);
    }

    #[test]
    fn test_run_config_applies_overrides() {
        let req = GenerateScheduleRequest {
            min_score: Some(80),
            min_meetings_per_investor: Some(2),
            investor_filter: Some(vec!["i1".to_string()]),
            ..request()
        };

        let config = run_config(&AllocationConfig::default(), &req);
        assert_eq!(config.min_score, 80);
        assert_eq!(config.min_meetings_per_investor, 2);
        assert!(config.investor_filter.unwrap().contains("i1"));
    }
}
