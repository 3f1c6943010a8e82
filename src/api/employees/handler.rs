//! Employee CRUD Handlers
//!
//! Each handler is a straight translation: shape-check the input, make at
//! most one store mutation, then render a view or redirect. Attribute
//! values pass through uninterpreted — no field validation by design.

use std::collections::HashMap;

use axum::{
    Extension,
    extract::{Multipart, Path, State},
    response::{Html, Redirect},
};
use serde_json::json;

use crate::auth::CurrentAdmin;
use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::utils::{AppError, AppResult};
use crate::db::models::{EmployeeCreate, EmployeeUpdate};

/// Multipart field carrying the picture
const PICTURE_FIELD: &str = "profilePicture";

/// List all employees
pub async fn list(State(state): State<ServerState>) -> AppResult<Html<String>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employees = repo.find_all().await?;

    let data = json!({ "employees": employees });
    Ok(Html(state.renderer.render("index", &data)?))
}

/// Show one employee
pub async fn profile(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;

    let data = json!({ "employee": employee });
    Ok(Html(state.renderer.render("profile", &data)?))
}

/// Show the edit form
pub async fn edit_form(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Html<String>> {
    let repo = EmployeeRepository::new(state.db.clone());
    let employee = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;

    let data = json!({ "employee": employee });
    Ok(Html(state.renderer.render("edit", &data)?))
}

/// Create a new employee (multipart, optional file part)
pub async fn create(
    State(state): State<ServerState>,
    Extension(admin): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let form = read_multipart(multipart).await?;

    let mut data = EmployeeCreate::from_form(&form.fields);
    data.profile_picture = Some(match &form.picture {
        Some((original, bytes)) => state.uploads.store(PICTURE_FIELD, original, bytes)?,
        // no upload: the record still gets the sentinel placeholder
        None => state.uploads.default_picture().to_string(),
    });

    let repo = EmployeeRepository::new(state.db.clone());
    let created = repo.create(data).await?;
    tracing::info!(id = %created.id_str(), by = %admin.0, "Employee created");

    Ok(Redirect::to("/"))
}

/// Update an employee (multipart, optional file part)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Extension(admin): Extension<CurrentAdmin>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let repo = EmployeeRepository::new(state.db.clone());

    // Read the existing record first: an update without a replacement
    // upload must keep the current picture. Read-then-write here races with
    // concurrent updates; last write wins, which is accepted.
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;

    let form = read_multipart(multipart).await?;
    let mut data = EmployeeUpdate::from_form(&form.fields, state.config.update_clears_on_empty);
    data.profile_picture = match &form.picture {
        Some((original, bytes)) => Some(state.uploads.store(PICTURE_FIELD, original, bytes)?),
        None => existing.profile_picture.clone(),
    };

    repo.update(&id, data).await?;
    tracing::info!(id = %id, by = %admin.0, "Employee updated");

    Ok(Redirect::to("/"))
}

/// Remove an employee
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Extension(admin): Extension<CurrentAdmin>,
) -> AppResult<Redirect> {
    let repo = EmployeeRepository::new(state.db.clone());
    if !repo.delete(&id).await? {
        return Err(AppError::not_found(format!("Employee {} not found", id)));
    }
    tracing::info!(id = %id, by = %admin.0, "Employee deleted");

    Ok(Redirect::to("/"))
}

struct SubmittedForm {
    fields: HashMap<String, String>,
    picture: Option<(String, Vec<u8>)>,
}

/// Collect text fields and the optional picture part from a multipart body
async fn read_multipart(mut multipart: Multipart) -> AppResult<SubmittedForm> {
    let mut fields = HashMap::new();
    let mut picture = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == PICTURE_FIELD {
            let original = field.file_name().unwrap_or_default().to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            // Browsers submit an empty part when no file was chosen.
            if !original.is_empty() && !data.is_empty() {
                picture = Some((original, data.to_vec()));
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?;
            fields.insert(name, value);
        }
    }

    Ok(SubmittedForm { fields, picture })
}
