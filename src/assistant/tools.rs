//! The three staff operations exposed to the completion service, thin
//! wrappers over the staff gateway. Tool failures are reported back to the
//! model as JSON error payloads rather than HTTP errors, so a bad tool call
//! never aborts the chat.

use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Location, Staff, UpdateStaffInput};
use crate::{AppError, AppResult};

/// Tool declarations sent with every completion request.
pub fn tool_definitions() -> Value {
    json!([
        {
            "type": "function",
            "function": {
                "name": "searchStaff",
                "description": "Search for staff members by name or email, optionally filtered by location. Use this first to find a staff member before updating.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string", "description": "Search query for name or email" },
                        "location": { "type": "string", "enum": ["ATL", "NYC", "LA", "DAL"], "description": "Filter by location code" }
                    },
                    "required": ["query"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "getStaffMember",
                "description": "Get a specific staff member by name or email. Use this to get a staff member's details before updating.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string", "description": "The name of the staff member" },
                        "email": { "type": "string", "description": "The email of the staff member" }
                    },
                    "required": ["name"]
                }
            }
        },
        {
            "type": "function",
            "function": {
                "name": "updateStaffMember",
                "description": "Update fields of a staff member. The id must come from a previous searchStaff or getStaffMember call.",
                "parameters": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string", "format": "uuid", "description": "Staff member id from a previous lookup" },
                        "updates": {
                            "type": "object",
                            "description": "The fields to update",
                            "properties": {
                                "name": { "type": "string" },
                                "email": { "type": "string" },
                                "phone": { "type": "string" },
                                "locations": { "type": "array", "items": { "type": "string", "enum": ["ATL", "NYC", "LA", "DAL"] } },
                                "status": { "type": "string", "enum": ["active", "inactive", "on_leave"] },
                                "notes": { "type": "string" }
                            }
                        }
                    },
                    "required": ["id", "updates"]
                }
            }
        }
    ])
}

/// Execute one tool call and render the result (or the failure) as the JSON
/// string handed back to the model.
pub async fn run_tool(db: &PgPool, name: &str, arguments: &str) -> String {
    let result = dispatch(db, name, arguments).await;
    let payload = match result {
        Ok(data) => json!({ "success": true, "data": data }),
        Err(e) => json!({ "success": false, "error": e.to_string() }),
    };
    payload.to_string()
}

async fn dispatch(db: &PgPool, name: &str, arguments: &str) -> AppResult<Value> {
    let args: Value = serde_json::from_str(arguments)
        .map_err(|e| AppError::BadRequest(format!("Malformed tool arguments: {}", e)))?;

    match name {
        "searchStaff" => search_staff(db, serde_json::from_value(args).bad_args()?).await,
        "getStaffMember" => get_staff_member(db, serde_json::from_value(args).bad_args()?).await,
        "updateStaffMember" => {
            update_staff_member(db, serde_json::from_value(args).bad_args()?).await
        }
        other => Err(AppError::BadRequest(format!("Unknown tool: {}", other))),
    }
}

trait BadArgs<T> {
    fn bad_args(self) -> AppResult<T>;
}

impl<T> BadArgs<T> for Result<T, serde_json::Error> {
    fn bad_args(self) -> AppResult<T> {
        self.map_err(|e| AppError::BadRequest(format!("Invalid tool arguments: {}", e)))
    }
}

#[derive(Debug, Deserialize)]
struct SearchStaffArgs {
    query: String,
    location: Option<Location>,
}

async fn search_staff(db: &PgPool, args: SearchStaffArgs) -> AppResult<Value> {
    let pattern = format!("%{}%", args.query);

    let staff = if let Some(location) = args.location {
        sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE (name ILIKE $1 OR email ILIKE $1) AND $2 = ANY(locations) ORDER BY name LIMIT 20",
        )
        .bind(&pattern)
        .bind(location)
        .fetch_all(db)
        .await?
    } else {
        sqlx::query_as::<_, Staff>(
            "SELECT * FROM staff WHERE name ILIKE $1 OR email ILIKE $1 ORDER BY name LIMIT 20",
        )
        .bind(&pattern)
        .fetch_all(db)
        .await?
    };

    Ok(serde_json::to_value(staff).map_err(|e| AppError::Internal(e.to_string()))?)
}

#[derive(Debug, Deserialize)]
struct GetStaffMemberArgs {
    name: Option<String>,
    email: Option<String>,
}

async fn get_staff_member(db: &PgPool, args: GetStaffMemberArgs) -> AppResult<Value> {
    let staff = match (&args.name, &args.email) {
        (_, Some(email)) => {
            sqlx::query_as::<_, Staff>("SELECT * FROM staff WHERE email = $1")
                .bind(email)
                .fetch_optional(db)
                .await?
        }
        (Some(name), None) => {
            sqlx::query_as::<_, Staff>(
                "SELECT * FROM staff WHERE name ILIKE $1 ORDER BY name LIMIT 1",
            )
            .bind(format!("%{}%", name))
            .fetch_optional(db)
            .await?
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "getStaffMember needs a name or an email".to_string(),
            ))
        }
    };

    let staff = staff.ok_or_else(|| AppError::NotFound("Staff member not found".to_string()))?;
    Ok(serde_json::to_value(staff).map_err(|e| AppError::Internal(e.to_string()))?)
}

#[derive(Debug, Deserialize)]
struct UpdateStaffMemberArgs {
    id: Uuid,
    updates: UpdateStaffInput,
}

async fn update_staff_member(db: &PgPool, args: UpdateStaffMemberArgs) -> AppResult<Value> {
    args.updates.validate()?;

    let staff = crate::handlers::staff_handler::apply_staff_update(db, args.id, &args.updates)
        .await?;
    crate::handlers::staff_handler::invalidate_roster_cache().await;

    Ok(serde_json::to_value(staff).map_err(|e| AppError::Internal(e.to_string()))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definitions_declare_exactly_the_three_contract_tools() {
        let defs = tool_definitions();
        let names: Vec<&str> = defs
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["function"]["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["searchStaff", "getStaffMember", "updateStaffMember"]);
    }

    #[test]
    fn search_args_accept_optional_location() {
        let args: SearchStaffArgs =
            serde_json::from_str(r#"{"query": "dana", "location": "NYC"}"#).unwrap();
        assert_eq!(args.query, "dana");
        assert_eq!(args.location, Some(Location::NYC));

        let args: SearchStaffArgs = serde_json::from_str(r#"{"query": "dana"}"#).unwrap();
        assert!(args.location.is_none());
    }

    #[test]
    fn update_args_reject_non_uuid_ids() {
        let result: Result<UpdateStaffMemberArgs, _> =
            serde_json::from_str(r#"{"id": "not-a-uuid", "updates": {}}"#);
        assert!(result.is_err());
    }
}
