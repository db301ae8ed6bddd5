//! Typed endpoint wrappers.
//!
//! Thin: each method builds an [`ApiRequest`], hands it to the pipeline,
//! and deserializes a 2xx body. Authorization and credential renewal are
//! entirely the pipeline's business.

use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::Arc;

use crate::api::types::*;
use crate::config::ClientConfig;
use crate::pipeline::{ApiClient, ApiRequest, ClientError};

/// Typed client for the UniTalk backend.
pub struct UniTalkApi {
    client: Arc<ApiClient>,
    token_path: String,
    register_path: String,
}

impl UniTalkApi {
    pub fn new(client: Arc<ApiClient>, config: &ClientConfig) -> Self {
        Self {
            client,
            token_path: config.token_path.clone(),
            register_path: config.register_path.clone(),
        }
    }

    /// Access to the underlying pipeline, e.g. for untyped calls or
    /// session event subscriptions.
    pub fn client(&self) -> &Arc<ApiClient> {
        &self.client
    }

    async fn expect_json<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ClientError> {
        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }
        Ok(response.json()?)
    }

    async fn expect_status(&self, request: ApiRequest) -> Result<(), ClientError> {
        let response = self.client.send(request).await?;
        if !response.is_success() {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                body: response.text(),
            });
        }
        Ok(())
    }

    // --- auth ---

    /// Exchange username/password for a credential pair.
    ///
    /// Goes through the pipeline like any other call; with no stored
    /// access credential, no Authorization header is attached.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthTokens, ClientError> {
        let request = ApiRequest::post(self.token_path.clone())
            .json(json!({ "username": username, "password": password }));
        self.expect_json(request).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<UserSummary, ClientError> {
        let body = serde_json::to_value(request)?;
        self.expect_json(ApiRequest::post(self.register_path.clone()).json(body))
            .await
    }

    // --- questions & answers ---

    pub async fn questions(&self) -> Result<Vec<Question>, ClientError> {
        self.expect_json(ApiRequest::get("/questions/")).await
    }

    pub async fn question(&self, id: u64) -> Result<Question, ClientError> {
        self.expect_json(ApiRequest::get(format!("/questions/{id}/")))
            .await
    }

    pub async fn create_question(&self, question: &NewQuestion) -> Result<Question, ClientError> {
        let body = serde_json::to_value(question)?;
        self.expect_json(ApiRequest::post("/questions/").json(body))
            .await
    }

    /// Submit an answer for AI evaluation; returns the scored result.
    pub async fn submit_answer(
        &self,
        question_id: u64,
        answer: &str,
    ) -> Result<SubmittedAnswer, ClientError> {
        let request = ApiRequest::post(format!("/questions/{question_id}/submit-answer/"))
            .json(json!({ "answer": answer }));
        self.expect_json(request).await
    }

    pub async fn student_answers(&self) -> Result<Vec<Answer>, ClientError> {
        self.expect_json(ApiRequest::get("/student/answers/")).await
    }

    // --- progress ---

    pub async fn performance_over_time(
        &self,
        category: Option<&str>,
        subcategory: Option<&str>,
    ) -> Result<PerformanceOverTime, ClientError> {
        let mut request = ApiRequest::get("/student/performance/over-time/");
        if let Some(category) = category {
            request = request.query("category", category);
        }
        if let Some(subcategory) = subcategory {
            request = request.query("subcategory", subcategory);
        }
        self.expect_json(request).await
    }

    pub async fn performance_by_category(&self) -> Result<Vec<CategoryPerformance>, ClientError> {
        self.expect_json(ApiRequest::get("/student/performance/by-category/"))
            .await
    }

    pub async fn performance_by_subcategory(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<SubcategoryPerformance>, ClientError> {
        let mut request = ApiRequest::get("/student/performance/by-subcategory/");
        if let Some(category) = category {
            request = request.query("category", category);
        }
        self.expect_json(request).await
    }

    // --- appointments ---

    pub async fn appointments(&self) -> Result<Vec<StudentAppointment>, ClientError> {
        self.expect_json(ApiRequest::get("/appointments/")).await
    }

    pub async fn book_appointment(
        &self,
        appointment: &NewAppointment,
    ) -> Result<FacultyAppointment, ClientError> {
        let body = serde_json::to_value(appointment)?;
        self.expect_json(ApiRequest::post("/appointments/").json(body))
            .await
    }

    pub async fn faculty_appointments(&self) -> Result<Vec<FacultyAppointment>, ClientError> {
        self.expect_json(ApiRequest::get("/faculty/appointments/"))
            .await
    }

    pub async fn update_appointment_status(
        &self,
        appointment_id: u64,
        status: AppointmentStatus,
    ) -> Result<FacultyAppointment, ClientError> {
        let request = ApiRequest::patch(format!("/appointments/{appointment_id}/status/"))
            .json(json!({ "status": status }));
        self.expect_json(request).await
    }

    pub async fn faculty_list(&self) -> Result<Vec<UserSummary>, ClientError> {
        self.expect_json(ApiRequest::get("/faculty/")).await
    }

    /// Answers of one student, as visible to faculty.
    pub async fn student_answers_for(&self, student_id: u64) -> Result<Vec<Answer>, ClientError> {
        self.expect_json(ApiRequest::get(format!("/faculty/student/{student_id}/answers/")))
            .await
    }

    // --- CV ---

    /// The stored CV, or `None` when the student has not uploaded one
    /// (the backend answers `null` in that case).
    pub async fn cv(&self) -> Result<Option<Cv>, ClientError> {
        self.expect_json(ApiRequest::get("/student/cv/")).await
    }

    pub async fn delete_cv(&self) -> Result<(), ClientError> {
        self.expect_status(ApiRequest::delete("/student/cv/")).await
    }
}
