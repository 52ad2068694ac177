use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Json, Path, State,
    },
    http::StatusCode,
    Extension,
};
use shared_types::{
    CreateListRequest, CreateTaskRequest, RenameListRequest, Task, TodoList, UpdateTaskRequest,
    User,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::state::AppState;

type JsonBody<T> = Result<Json<T>, JsonRejection>;
type IdParam = Result<Path<Uuid>, PathRejection>;

pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

// User handlers
pub async fn sync_user(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<User>> {
    let user = state.todos().sync_user(&caller).await?;
    Ok(Json(user))
}

// List handlers
pub async fn list_lists(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<Json<Vec<TodoList>>> {
    let lists = state.todos().lists(&caller).await?;
    Ok(Json(lists))
}

pub async fn create_list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    payload: JsonBody<CreateListRequest>,
) -> ApiResult<Json<TodoList>> {
    let Json(payload) = payload?;
    let list = state.todos().create_list(&caller, payload).await?;
    Ok(Json(list))
}

pub async fn rename_list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    list_id: IdParam,
    payload: JsonBody<RenameListRequest>,
) -> ApiResult<Json<TodoList>> {
    let Path(list_id) = list_id?;
    let Json(payload) = payload?;
    let list = state.todos().rename_list(&caller, list_id, payload).await?;
    Ok(Json(list))
}

pub async fn delete_list(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    list_id: IdParam,
) -> ApiResult<StatusCode> {
    let Path(list_id) = list_id?;
    state.todos().delete_list(&caller, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Task handlers
pub async fn create_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    list_id: IdParam,
    payload: JsonBody<CreateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let Path(list_id) = list_id?;
    let Json(payload) = payload?;
    let task = state.todos().create_task(&caller, list_id, payload).await?;
    Ok(Json(task))
}

pub async fn update_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    task_id: IdParam,
    payload: JsonBody<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    let Path(task_id) = task_id?;
    let Json(payload) = payload?;
    let task = state.todos().update_task(&caller, task_id, payload).await?;
    Ok(Json(task))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    task_id: IdParam,
) -> ApiResult<StatusCode> {
    let Path(task_id) = task_id?;
    state.todos().delete_task(&caller, task_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
