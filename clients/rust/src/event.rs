use crate::{APIResponse, BaseClient, ID};
use agenda_api_structs::*;
use reqwest::StatusCode;
use std::sync::Arc;

#[derive(Clone)]
pub struct CalendarEventClient {
    base: Arc<BaseClient>,
}

pub struct CreateEventInput {
    pub user_id: ID,
    pub body: create_event::RequestBody,
}

pub struct UpdateEventInput {
    pub event_id: ID,
    pub body: update_event::RequestBody,
}

pub struct GetEventsInput {
    pub user_id: ID,
    pub query: get_events::QueryParams,
}

pub struct GetDashboardInput {
    pub user_id: ID,
    pub query: get_dashboard::QueryParams,
}

impl CalendarEventClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn delete(&self, event_id: ID) -> APIResponse<delete_event::APIResponse> {
        self.base
            .delete(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn get(&self, event_id: ID) -> APIResponse<get_event::APIResponse> {
        self.base
            .get(format!("events/{}", event_id), StatusCode::OK)
            .await
    }

    pub async fn create(&self, input: CreateEventInput) -> APIResponse<create_event::APIResponse> {
        self.base
            .post(
                input.body,
                format!("user/{}/events", input.user_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn update(&self, input: UpdateEventInput) -> APIResponse<update_event::APIResponse> {
        self.base
            .put(
                input.body,
                format!("events/{}", input.event_id),
                StatusCode::OK,
            )
            .await
    }

    pub async fn list(&self, input: GetEventsInput) -> APIResponse<get_events::APIResponse> {
        self.base
            .get_with_query(
                format!("user/{}/events", input.user_id),
                &input.query,
                StatusCode::OK,
            )
            .await
    }

    pub async fn dashboard(
        &self,
        input: GetDashboardInput,
    ) -> APIResponse<get_dashboard::APIResponse> {
        self.base
            .get_with_query(
                format!("user/{}/dashboard", input.user_id),
                &input.query,
                StatusCode::OK,
            )
            .await
    }

    pub async fn admin_schema(&self) -> APIResponse<get_event_admin_schema::APIResponse> {
        self.base
            .get("events/admin-schema".into(), StatusCode::OK)
            .await
    }
}
