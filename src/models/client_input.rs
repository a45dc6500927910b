use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::client::Contact;
use crate::error::{AppResult, FieldErrors};

const MAX_COMPANY_NAME_LEN: usize = 100;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    pub company_name: String,
    pub category: String,
    pub website: Option<String>,
    pub booth_location: Option<String>,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub notes: Option<String>,
}

impl CreateClientInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        validate_company_name(&self.company_name, &mut errors);

        if self.category.trim().is_empty() {
            errors.push("category", "Please specify the category");
        }

        validate_contacts(&self.contacts, &mut errors);

        errors.into_result()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    pub company_name: Option<String>,
    pub category: Option<String>,
    pub website: Option<String>,
    pub booth_location: Option<String>,
    /// Replaces the whole contact list when present.
    pub contacts: Option<Vec<Contact>>,
    pub notes: Option<String>,
}

impl UpdateClientInput {
    pub fn validate(&self) -> AppResult<()> {
        let mut errors = FieldErrors::new();

        if let Some(company_name) = &self.company_name {
            validate_company_name(company_name, &mut errors);
        }

        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                errors.push("category", "Category cannot be empty");
            }
        }

        if let Some(contacts) = &self.contacts {
            validate_contacts(contacts, &mut errors);
        }

        errors.into_result()
    }
}

fn validate_company_name(company_name: &str, errors: &mut FieldErrors) {
    if company_name.trim().is_empty() {
        errors.push("companyName", "Please provide a company name");
    } else if company_name.len() > MAX_COMPANY_NAME_LEN {
        errors.push(
            "companyName",
            "Company name cannot be more than 100 characters",
        );
    }
}

fn validate_contacts(contacts: &[Contact], errors: &mut FieldErrors) {
    for (i, contact) in contacts.iter().enumerate() {
        if contact.name.trim().is_empty() {
            errors.push(
                &format!("contacts[{}].name", i),
                "Please provide a contact name",
            );
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ClientMutationResponse {
    pub success: bool,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppError;

    #[test]
    fn company_name_and_category_are_required() {
        let input = CreateClientInput {
            company_name: "".to_string(),
            category: "".to_string(),
            website: None,
            booth_location: None,
            contacts: vec![],
            notes: None,
        };

        match input.validate() {
            Err(AppError::Validation(fields)) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, ["companyName", "category"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn contact_names_are_required_by_index() {
        let input = CreateClientInput {
            company_name: "Acme Corp".to_string(),
            category: "Gift".to_string(),
            website: None,
            booth_location: None,
            contacts: vec![
                Contact {
                    name: "Sam Ortiz".to_string(),
                    email: None,
                    phone: None,
                },
                Contact {
                    name: "".to_string(),
                    email: Some("second@acme.test".to_string()),
                    phone: None,
                },
            ],
            notes: None,
        };

        match input.validate() {
            Err(AppError::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "contacts[1].name");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
