use restkit::{ApiResult, Auth, Claims, Reply};

/// GET /api/me - claims of the calling token.
#[axum::debug_handler]
pub async fn me(Auth(claims): Auth) -> ApiResult<Claims> {
    Ok(Reply::resource(claims))
}
