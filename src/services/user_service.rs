use argon2::{
    Argon2, PasswordHasher,
    password_hash::SaltString,
};
use chrono::Utc;
use password_hash::rand_core::OsRng;

use crate::{
    dto::users::{RegisterRequest, UserList},
    error::{AppError, AppResult},
    models::{Sale, User},
    response::{ApiResponse, Meta},
    state::AppState,
    store::{Collection, next_id},
};

pub async fn list_users(state: &AppState) -> AppResult<ApiResponse<UserList>> {
    let users: Vec<User> = state.store.load(Collection::Users).await?;
    let meta = Meta::total(users.len() as i64);
    Ok(ApiResponse::success(
        "Users",
        UserList { items: users },
        Some(meta),
    ))
}

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    if payload.first_name.trim().is_empty()
        || payload.last_name.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(AppError::BadRequest(
            "first_name, last_name, email and password are required".into(),
        ));
    }

    let mut users: Vec<User> = state.store.load(Collection::Users).await?;

    let email = payload.email.trim().to_string();
    if users
        .iter()
        .any(|u| u.email.eq_ignore_ascii_case(&email))
    {
        return Err(AppError::Conflict("email is already registered".into()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let user = User {
        id: next_id(&users),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email,
        password_hash,
        active: payload.active,
        is_admin: payload.is_admin,
        registered_at: Utc::now(),
    };

    users.push(user.clone());
    state.store.commit(Collection::Users, &users).await?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(ApiResponse::success("User created", user, None))
}

/// Deletion is blocked while any sale references the user, so sale records
/// always resolve to a real buyer.
pub async fn delete_user(state: &AppState, id: i64) -> AppResult<ApiResponse<serde_json::Value>> {
    let users: Vec<User> = state.store.load(Collection::Users).await?;
    let sales: Vec<Sale> = state.store.load(Collection::Sales).await?;

    if sales.iter().any(|s| s.user_id == id) {
        return Err(AppError::Conflict(
            "cannot delete user: referenced by existing sales".into(),
        ));
    }

    let before = users.len();
    let remaining: Vec<User> = users.into_iter().filter(|u| u.id != id).collect();
    if remaining.len() == before {
        return Err(AppError::NotFound);
    }

    state.store.commit(Collection::Users, &remaining).await?;
    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({ "deleted": id }),
        Some(Meta::empty()),
    ))
}
