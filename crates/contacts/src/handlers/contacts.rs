use axum::{
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
};
use restkit::{ApiError, ApiResult, Pagination, Reply, ValidForm, ValidJson, ValidPath, ValidQuery};

use crate::{
    models::{Contact, ContactFilter, ContactPath, CreateContact},
    state::AppState,
};

/// GET /api/contacts - paged listing, optionally filtered with `q`.
#[axum::debug_handler]
pub async fn list_contacts(
    State(state): State<AppState>,
    pagination: Pagination,
    ValidQuery(filter): ValidQuery<ContactFilter>,
) -> ApiResult<Contact> {
    let source = state.store.listing(filter.q.as_deref());
    let page = pagination.page(&source).await?;

    Ok(page.into())
}

/// GET /api/contacts/{id}
#[axum::debug_handler]
pub async fn get_contact(
    State(state): State<AppState>,
    ValidPath(path): ValidPath<ContactPath>,
) -> ApiResult<Contact> {
    let contact = state.store.get(path.id).await?.ok_or_else(ApiError::not_found)?;

    Ok(Reply::resource(contact))
}

/// POST /api/contacts - JSON or form body.
#[axum::debug_handler]
pub async fn create_contact(
    State(state): State<AppState>,
    NewContact(payload): NewContact,
) -> ApiResult<Contact> {
    let contact = state.store.insert(&payload).await?;

    Ok(Reply::created(contact))
}

/// DELETE /api/contacts/{id}
#[axum::debug_handler]
pub async fn delete_contact(
    State(state): State<AppState>,
    ValidPath(path): ValidPath<ContactPath>,
) -> ApiResult {
    if !state.store.delete(path.id).await? {
        return Err(ApiError::not_found());
    }

    tracing::info!(contact_id = path.id, "Deleted contact");
    Ok(Reply::deleted())
}

/// Create payload bound from JSON when the request says so, and from
/// form data otherwise.
pub struct NewContact(pub CreateContact);

impl<S> FromRequest<S> for NewContact
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("application/json"));

        let payload = if is_json {
            let ValidJson(payload) = ValidJson::<CreateContact>::from_request(req, state).await?;
            payload
        } else {
            let ValidForm(payload) = ValidForm::<CreateContact>::from_request(req, state).await?;
            payload
        };

        Ok(NewContact(payload))
    }
}
