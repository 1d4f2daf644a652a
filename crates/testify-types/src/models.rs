use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub address: String,
    pub username: String,
    pub display_name: String,
    pub bio: String,
    pub followers: Vec<String>,
    pub following: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Testimony categories. The set is closed; anything else is rejected at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Healing,
    Provision,
    Salvation,
    Deliverance,
    Breakthrough,
    Relationships,
    Faith,
    Other,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Healing,
        Category::Provision,
        Category::Salvation,
        Category::Deliverance,
        Category::Breakthrough,
        Category::Relationships,
        Category::Faith,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Healing => "Healing",
            Category::Provision => "Provision",
            Category::Salvation => "Salvation",
            Category::Deliverance => "Deliverance",
            Category::Breakthrough => "Breakthrough",
            Category::Relationships => "Relationships",
            Category::Faith => "Faith",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user-authored post. `likes` holds addresses and never contains the same
/// address twice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimony {
    pub id: String,
    pub author: String,
    pub title: String,
    pub content: String,
    pub category: Category,
    pub tags: Vec<String>,
    pub likes: Vec<String>,
    pub comments: Vec<Comment>,
    pub created_at: DateTime<Utc>,
}

// -- Study --

/// The four study areas. Each keeps its own isolated progress map and
/// lesson set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyDomain {
    Bible,
    Jesus,
    Kings,
    Mythology,
}

impl StudyDomain {
    pub const ALL: [StudyDomain; 4] = [
        StudyDomain::Bible,
        StudyDomain::Jesus,
        StudyDomain::Kings,
        StudyDomain::Mythology,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StudyDomain::Bible => "bible",
            StudyDomain::Jesus => "jesus",
            StudyDomain::Kings => "kings",
            StudyDomain::Mythology => "mythology",
        }
    }
}

impl fmt::Display for StudyDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRecord {
    pub address: String,
    pub completed_lessons: Vec<String>,
    pub total_rewards_earned: String,
    pub current_streak: u32,
    pub last_study_date: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    pub fn empty(address: &str) -> Self {
        Self {
            address: address.to_lowercase(),
            completed_lessons: Vec::new(),
            total_rewards_earned: "0".into(),
            current_streak: 0,
            last_study_date: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: usize,
}

/// Static study content. Lessons are reference data and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub content: String,
    pub questions: Vec<Question>,
    pub reward: String,
    pub difficulty: Difficulty,
}
