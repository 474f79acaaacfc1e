//! HTTP handlers for the users collection

use axum::{extract::State, Json};
use tracing::{debug, info, warn};

use crate::{
    error::{Error, ErrorResponse, Result, ValidationErrorResponse},
    extract::{JsonBody, UserIdPath},
    models::{CreateUserRequest, DeleteUserResponse, NewUser, User},
    repository::{RepositoryError, RepositoryOperation, UserRepository},
    state::AppState,
};

/// Create a new user
///
/// Shape validation runs first (422), then the age rule and the email
/// uniqueness rule, in that order (400).
#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created record with its assigned id", body = User),
        (status = 400, description = "Age out of range or email already exists", body = ErrorResponse),
        (status = 422, description = "Missing or mistyped field", body = ValidationErrorResponse)
    )
)]
pub async fn create_user<R>(
    State(state): State<AppState<R>>,
    JsonBody(body): JsonBody,
) -> Result<Json<User>>
where
    R: UserRepository,
{
    let new_user = NewUser::from_json(body)?;

    if let Err(e) = new_user.check_age() {
        warn!(age = new_user.age, "Rejected user: age out of range");
        return Err(e);
    }

    let user = state.users().create(new_user).await.map_err(|e| {
        warn!(error = %e, "Rejected user");
        Error::from(e)
    })?;

    info!(user_id = user.id, "User created");
    Ok(Json(user))
}

/// List all users in insertion order
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses((status = 200, description = "All records, possibly empty", body = Vec<User>))
)]
pub async fn list_users<R>(State(state): State<AppState<R>>) -> Result<Json<Vec<User>>>
where
    R: UserRepository,
{
    let users = state.users().find_all().await?;
    debug!(count = users.len(), "Listing users");
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The first record with this id", body = User),
        (status = 404, description = "No record has this id", body = ErrorResponse),
        (status = 422, description = "Id is not an integer", body = ValidationErrorResponse)
    )
)]
pub async fn get_user<R>(
    State(state): State<AppState<R>>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<User>>
where
    R: UserRepository,
{
    debug!(user_id, "Getting user");

    match state.users().find_by_id(user_id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(user_id, "User not found");
            Err(RepositoryError::not_found(RepositoryOperation::FindById, user_id).into())
        }
    }
}

/// Delete every user with the given id
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "Records removed", body = DeleteUserResponse),
        (status = 404, description = "No record has this id", body = ErrorResponse),
        (status = 422, description = "Id is not an integer", body = ValidationErrorResponse)
    )
)]
pub async fn delete_user<R>(
    State(state): State<AppState<R>>,
    UserIdPath(user_id): UserIdPath,
) -> Result<Json<DeleteUserResponse>>
where
    R: UserRepository,
{
    let removed = state.users().delete(user_id).await.map_err(|e| {
        warn!(user_id, "User not found");
        Error::from(e)
    })?;

    info!(user_id, removed, "User deleted");
    Ok(Json(DeleteUserResponse::for_id(user_id)))
}
