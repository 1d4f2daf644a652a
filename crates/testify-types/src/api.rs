use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Comment, Difficulty, Lesson, ProgressRecord, StudyDomain, Testimony, User};

// Request fields are optional so that a missing field surfaces as a
// validation error with a readable message instead of a body rejection.

// -- Testimonies --

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonyRequest {
    pub address: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestimonyResponse {
    pub success: bool,
    pub testimony: Testimony,
    pub reward: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct TestimonyListResponse {
    pub success: bool,
    pub testimonies: Vec<Testimony>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeRequest {
    pub testimony_id: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleLikeResponse {
    pub success: bool,
    /// Like count after the toggle.
    pub likes: usize,
    pub liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    pub minting_enabled: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCommentRequest {
    pub testimony_id: Option<String>,
    pub address: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub success: bool,
    pub comment: Comment,
}

// -- Users --

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

// -- Study --

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub success: bool,
    pub completed_lessons: Vec<String>,
    pub total_rewards_earned: String,
    pub current_streak: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_study_date: Option<DateTime<Utc>>,
}

impl From<ProgressRecord> for ProgressResponse {
    fn from(record: ProgressRecord) -> Self {
        Self {
            success: true,
            completed_lessons: record.completed_lessons,
            total_rewards_earned: record.total_rewards_earned,
            current_streak: record.current_streak,
            last_study_date: record.last_study_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
    pub reward: String,
    pub difficulty: Difficulty,
    pub question_count: usize,
}

impl From<&Lesson> for LessonSummary {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            reward: lesson.reward.clone(),
            difficulty: lesson.difficulty,
            question_count: lesson.questions.len(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LessonListResponse {
    pub success: bool,
    pub domain: StudyDomain,
    pub lessons: Vec<LessonSummary>,
}

/// A question as shown to the learner: the answer index is withheld.
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct LessonView {
    pub id: String,
    pub title: String,
    pub content: String,
    pub questions: Vec<QuestionView>,
    pub reward: String,
    pub difficulty: Difficulty,
}

impl From<&Lesson> for LessonView {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            questions: lesson
                .questions
                .iter()
                .map(|q| QuestionView {
                    question: q.question.clone(),
                    options: q.options.clone(),
                })
                .collect(),
            reward: lesson.reward.clone(),
            difficulty: lesson.difficulty,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LessonResponse {
    pub success: bool,
    pub lesson: LessonView,
}

#[derive(Debug, Default, Deserialize)]
pub struct CheckAnswersRequest {
    #[serde(default)]
    pub answers: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct CheckAnswersResponse {
    pub success: bool,
    pub correct: usize,
    pub total: usize,
    pub passed: bool,
    pub reward: String,
}

// -- Token info --

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub address: String,
    pub name: String,
    pub symbol: String,
    pub decimals: Option<u8>,
    pub total_supply: Option<String>,
    pub token_type: Option<String>,
    pub verified: bool,
    pub basescan_url: String,
}

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: TokenInfo,
}

// -- Media --

#[derive(Debug, Default, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub success: bool,
    pub image_url: String,
    pub original_prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SpeechRequest {
    pub text: Option<String>,
}

// -- Misc --

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
}

/// Error envelope returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
