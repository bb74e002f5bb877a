use actix_web::{get, post, web, HttpResponse};
use serde::Deserialize;

use crate::domain::activity::ActivityInput;
use crate::domain::error::AppError;

use super::{validated, AppState};

const DEFAULT_LIMIT: i64 = 10;

#[derive(Deserialize)]
pub struct RecentQuery {
    limit: Option<String>,
}

/// Missing, zero, or non-numeric limits all fall back to the default.
fn parse_limit(raw: Option<&str>) -> i64 {
    raw.and_then(|s| s.parse::<i64>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

#[get("/activities/recent")]
pub async fn recent(
    state: web::Data<AppState>,
    query: web::Query<RecentQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = parse_limit(query.limit.as_deref());
    let activities = state.repo.recent_activities(limit).await?;
    Ok(HttpResponse::Ok().json(activities))
}

#[post("/activities")]
pub async fn create(
    state: web::Data<AppState>,
    input: web::Json<ActivityInput>,
) -> Result<HttpResponse, AppError> {
    validated(&*input)?;
    let activity = state.repo.create_activity(&input).await?;
    Ok(HttpResponse::Ok().json(activity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_falls_back_to_default_for_bad_values() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("0")), 10);
        assert_eq!(parse_limit(Some("-3")), 10);
        assert_eq!(parse_limit(Some("twenty")), 10);
        assert_eq!(parse_limit(Some("25")), 25);
    }
}
