use async_trait::async_trait;
use client_state::{ClientError, TodoApi};
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared_types::{
    CreateListRequest, CreateTaskRequest, ErrorResponse, RenameListRequest, Task, TodoList,
    UpdateTaskRequest, User,
};
use uuid::Uuid;

/// Backend origin baked in at build time; empty means same origin.
const API_BASE_URL: &str = match option_env!("TODO_API_BASE_URL") {
    Some(url) => url,
    None => "",
};

/// Authenticated client for the `/api` endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiService {
    token: String,
}

impl ApiService {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    fn url(path: &str) -> String {
        format!("{}/api{}", API_BASE_URL.trim_end_matches('/'), path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header("Authorization", &format!("Bearer {}", self.token))
    }

    async fn send(
        &self,
        request: Result<Request, gloo_net::Error>,
    ) -> Result<Response, ClientError> {
        if self.token.trim().is_empty() {
            return Err(ClientError::MissingToken);
        }

        let request = request.map_err(|e| ClientError::Network(e.to_string()))?;
        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;

        if !response.ok() {
            let status = response.status();
            let message = response
                .json::<ErrorResponse>()
                .await
                .ok()
                .map(|body| body.error);
            tracing::warn!("API error {}: {:?}", status, message);
            return Err(ClientError::status(status, message));
        }

        Ok(response)
    }

    async fn read<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait(?Send)]
impl TodoApi for ApiService {
    async fn sync_user(&self) -> Result<User, ClientError> {
        let request = self.authorized(Request::post(&Self::url("/sync-user"))).build();
        Self::read(self.send(request).await?).await
    }

    async fn fetch_lists(&self) -> Result<Vec<TodoList>, ClientError> {
        let request = self.authorized(Request::get(&Self::url("/lists"))).build();
        Self::read(self.send(request).await?).await
    }

    async fn create_list(&self, title: &str) -> Result<TodoList, ClientError> {
        let body = CreateListRequest {
            title: title.to_string(),
        };
        let request = self.authorized(Request::post(&Self::url("/lists"))).json(&body);
        Self::read(self.send(request).await?).await
    }

    async fn rename_list(&self, list_id: Uuid, title: &str) -> Result<TodoList, ClientError> {
        let body = RenameListRequest {
            title: title.to_string(),
        };
        let request = self
            .authorized(Request::put(&Self::url(&format!("/lists/{}", list_id))))
            .json(&body);
        Self::read(self.send(request).await?).await
    }

    async fn delete_list(&self, list_id: Uuid) -> Result<(), ClientError> {
        let request = self
            .authorized(Request::delete(&Self::url(&format!("/lists/{}", list_id))))
            .build();
        self.send(request).await?;
        Ok(())
    }

    async fn create_task(&self, list_id: Uuid, content: &str) -> Result<Task, ClientError> {
        let body = CreateTaskRequest {
            content: content.to_string(),
        };
        let request = self
            .authorized(Request::post(&Self::url(&format!("/lists/{}/tasks", list_id))))
            .json(&body);
        Self::read(self.send(request).await?).await
    }

    async fn update_task(
        &self,
        task_id: Uuid,
        request: &UpdateTaskRequest,
    ) -> Result<Task, ClientError> {
        let request = self
            .authorized(Request::put(&Self::url(&format!("/tasks/{}", task_id))))
            .json(request);
        Self::read(self.send(request).await?).await
    }

    async fn delete_task(&self, task_id: Uuid) -> Result<(), ClientError> {
        let request = self
            .authorized(Request::delete(&Self::url(&format!("/tasks/{}", task_id))))
            .build();
        self.send(request).await?;
        Ok(())
    }
}
