use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    models::{Client, ClientMutationResponse, CreateClientInput, UpdateClientInput},
    AppError, AppResult, AppState,
};

/// GET /api/clients - newest first
#[utoipa::path(
    get,
    path = "/api/clients",
    responses(
        (status = 200, description = "All clients, newest first", body = Vec<Client>)
    ),
    tag = "clients"
)]
pub async fn get_clients(State(state): State<Arc<AppState>>) -> AppResult<Json<Vec<Client>>> {
    let clients =
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY created_at DESC")
            .fetch_all(&state.db)
            .await?;

    Ok(Json(clients))
}

/// POST /api/clients
#[utoipa::path(
    post,
    path = "/api/clients",
    request_body = CreateClientInput,
    responses(
        (status = 200, description = "Client created", body = Client),
        (status = 422, description = "Missing or malformed fields")
    ),
    tag = "clients"
)]
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(input): Json<CreateClientInput>,
) -> AppResult<Json<Client>> {
    input.validate()?;

    let client = sqlx::query_as::<_, Client>(
        r#"
        INSERT INTO clients (id, company_name, category, website, booth_location, contacts, notes)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(input.company_name.trim())
    .bind(input.category.trim())
    .bind(&input.website)
    .bind(&input.booth_location)
    .bind(SqlJson(&input.contacts))
    .bind(&input.notes)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(client))
}

/// GET /api/clients/{id}
#[utoipa::path(
    get,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client", body = Client),
        (status = 404, description = "Client not found")
    ),
    tag = "clients"
)]
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Client>> {
    let client = sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
        .bind(id)
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;

    Ok(Json(client))
}

/// PUT /api/clients/{id}
#[utoipa::path(
    put,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    request_body = UpdateClientInput,
    responses(
        (status = 200, description = "Client updated", body = Client),
        (status = 400, description = "No fields to update"),
        (status = 404, description = "Client not found"),
        (status = 422, description = "Malformed fields")
    ),
    tag = "clients"
)]
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateClientInput>,
) -> AppResult<Json<Client>> {
    input.validate()?;

    let mut updates = vec![];
    let mut bind_count = 1;

    if input.company_name.is_some() {
        updates.push(format!("company_name = ${}", bind_count));
        bind_count += 1;
    }
    if input.category.is_some() {
        updates.push(format!("category = ${}", bind_count));
        bind_count += 1;
    }
    if input.website.is_some() {
        updates.push(format!("website = ${}", bind_count));
        bind_count += 1;
    }
    if input.booth_location.is_some() {
        updates.push(format!("booth_location = ${}", bind_count));
        bind_count += 1;
    }
    if input.contacts.is_some() {
        updates.push(format!("contacts = ${}", bind_count));
        bind_count += 1;
    }
    if input.notes.is_some() {
        updates.push(format!("notes = ${}", bind_count));
        bind_count += 1;
    }

    if updates.is_empty() {
        return Err(AppError::BadRequest("No fields to update".to_string()));
    }

    let sql = format!(
        "UPDATE clients SET {} WHERE id = ${} RETURNING *",
        updates.join(", "),
        bind_count
    );

    let mut query = sqlx::query_as::<_, Client>(&sql);

    if let Some(company_name) = &input.company_name {
        query = query.bind(company_name.trim().to_string());
    }
    if let Some(category) = &input.category {
        query = query.bind(category.trim().to_string());
    }
    if let Some(website) = &input.website {
        query = query.bind(website);
    }
    if let Some(booth_location) = &input.booth_location {
        query = query.bind(booth_location);
    }
    if let Some(contacts) = &input.contacts {
        query = query.bind(SqlJson(contacts));
    }
    if let Some(notes) = &input.notes {
        query = query.bind(notes);
    }

    query = query.bind(id);

    let client = query
        .fetch_optional(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Client {} not found", id)))?;

    Ok(Json(client))
}

/// DELETE /api/clients/{id}
#[utoipa::path(
    delete,
    path = "/api/clients/{id}",
    params(("id" = Uuid, Path, description = "Client id")),
    responses(
        (status = 200, description = "Client deleted", body = ClientMutationResponse),
        (status = 404, description = "Client not found")
    ),
    tag = "clients"
)]
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ClientMutationResponse>> {
    let result = sqlx::query("DELETE FROM clients WHERE id = $1")
        .bind(id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound(format!("Client {} not found", id)));
    }

    Ok(Json(ClientMutationResponse {
        success: true,
        message: Some("Client deleted successfully".to_string()),
    }))
}
