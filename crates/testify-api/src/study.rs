use axum::{Json, extract::State};

use testify_store::lessons;
use testify_types::api::{
    CheckAnswersRequest, CheckAnswersResponse, LessonListResponse, LessonResponse, LessonSummary,
    ProgressQuery, ProgressResponse,
};
use testify_types::models::{Lesson, StudyDomain};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;
use crate::testimonies::required;

/// GET /{domain}/progress?address=
pub async fn get_progress(
    State(state): State<AppState>,
    ApiPath(domain): ApiPath<StudyDomain>,
    ApiQuery(query): ApiQuery<ProgressQuery>,
) -> Result<Json<ProgressResponse>, ApiError> {
    let address = required(query.address, "address")?;
    let record = state.store.get_or_create_progress(domain, &address)?;
    Ok(Json(record.into()))
}

/// GET /{domain}/lessons
pub async fn list_lessons(
    State(state): State<AppState>,
    ApiPath(domain): ApiPath<StudyDomain>,
) -> Json<LessonListResponse> {
    let lessons = state
        .store
        .lessons()
        .list(domain)
        .iter()
        .map(LessonSummary::from)
        .collect();
    Json(LessonListResponse {
        success: true,
        domain,
        lessons,
    })
}

fn find_lesson<'a>(
    state: &'a AppState,
    domain: StudyDomain,
    id: &str,
) -> Result<&'a Lesson, ApiError> {
    state
        .store
        .lessons()
        .get(domain, id)
        .ok_or_else(|| ApiError::NotFound("Lesson not found".into()))
}

/// GET /{domain}/lessons/{lesson_id}
pub async fn get_lesson(
    State(state): State<AppState>,
    ApiPath((domain, lesson_id)): ApiPath<(StudyDomain, String)>,
) -> Result<Json<LessonResponse>, ApiError> {
    let lesson = find_lesson(&state, domain, &lesson_id)?;
    Ok(Json(LessonResponse {
        success: true,
        lesson: lesson.into(),
    }))
}

/// POST /{domain}/lessons/{lesson_id}/check: grades answers. Progress is
/// not touched.
pub async fn check_answers(
    State(state): State<AppState>,
    ApiPath((domain, lesson_id)): ApiPath<(StudyDomain, String)>,
    ApiJson(req): ApiJson<CheckAnswersRequest>,
) -> Result<Json<CheckAnswersResponse>, ApiError> {
    let lesson = find_lesson(&state, domain, &lesson_id)?;
    let grade = lessons::grade(lesson, &req.answers);
    let passed = grade.passed();

    Ok(Json(CheckAnswersResponse {
        success: true,
        correct: grade.correct,
        total: grade.total,
        passed,
        reward: if passed { lesson.reward.clone() } else { "0".into() },
    }))
}
