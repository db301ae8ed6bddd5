//! Payload models mirroring the backend's serializers.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::auth::claims::Role;

/// Credential pair from the login exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access: String,
    pub refresh: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub user_type: Role,
}

/// Account summary as embedded in appointment and faculty listings.
#[derive(Debug, Clone, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub user_type: Option<Role>,
}

/// Practice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub question: String,
    pub difficulty: String,
    pub category: String,
    pub subcategory: String,
}

/// Question creation body.
#[derive(Debug, Clone, Serialize)]
pub struct NewQuestion {
    pub question: String,
    pub difficulty: String,
    pub category: String,
    pub subcategory: String,
}

/// Scored answer with its question embedded (`/student/answers/`).
///
/// `strengths`/`weaknesses` stay as raw JSON: the backend stores lists,
/// but older rows carry newline-separated strings. Normalize with
/// [`super::progress::parse_list`].
#[derive(Debug, Clone, Deserialize)]
pub struct Answer {
    pub id: u64,
    pub question: Question,
    pub answer: String,
    #[serde(default)]
    pub strengths: Value,
    #[serde(default)]
    pub weaknesses: Value,
    pub score: Option<u32>,
    pub created_at: String,
}

/// Evaluation returned by submit-answer; the question is a bare id here.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmittedAnswer {
    pub id: u64,
    pub question: u64,
    pub answer: String,
    #[serde(default)]
    pub strengths: Value,
    #[serde(default)]
    pub weaknesses: Value,
    pub score: Option<u32>,
    pub created_at: String,
}

/// Appointment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// Appointment as a student sees it (faculty embedded).
#[derive(Debug, Clone, Deserialize)]
pub struct StudentAppointment {
    pub id: u64,
    pub faculty: UserSummary,
    pub scheduled_at: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
}

/// Appointment as a faculty member sees it (student embedded).
#[derive(Debug, Clone, Deserialize)]
pub struct FacultyAppointment {
    pub id: u64,
    pub faculty: u64,
    pub student: UserSummary,
    pub scheduled_at: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: String,
    pub created_at: String,
}

/// Appointment booking body.
#[derive(Debug, Clone, Serialize)]
pub struct NewAppointment {
    pub faculty: u64,
    pub scheduled_at: String,
    #[serde(default)]
    pub notes: String,
}

/// One month of averaged scores from the performance endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyPerformance {
    pub month: String,
    pub average_score: f64,
    pub count: u64,
}

/// Envelope of `/student/performance/over-time/`.
#[derive(Debug, Clone, Deserialize)]
pub struct PerformanceOverTime {
    pub performance_data: Vec<MonthlyPerformance>,
}

/// Row of `/student/performance/by-category/`.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub average_score: f64,
    pub count: u64,
}

/// Row of `/student/performance/by-subcategory/`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubcategoryPerformance {
    pub subcategory: String,
    pub average_score: f64,
    pub count: u64,
}

/// Stored CV (PDF carried as base64).
#[derive(Debug, Clone, Deserialize)]
pub struct Cv {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub pdf_base64: Option<String>,
}
