//! Required-field and default rules for projects and tickets.
//!
//! Handlers run these before anything reaches the database, so a request
//! that fails here never touches storage.

use crate::error::CoreError;

/// Field names as they appear in request bodies, used in error messages.
pub const FIELD_NAME: &str = "name";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_PROJECT_ID: &str = "projectId";

/// Require `value` to be present and not blank.
pub fn require_field<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        Some(_) => Err(CoreError::Validation(format!("{field} must not be empty"))),
        None => Err(CoreError::Validation(format!("{field} is required"))),
    }
}

/// A field that may be omitted from a partial update, but must not be blank
/// when supplied.
pub fn reject_blank(field: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(CoreError::Validation(format!("{field} must not be empty")))
        }
        _ => Ok(()),
    }
}

/// Descriptions are optional and stored as an empty string when omitted.
pub fn description_or_default(description: Option<String>) -> String {
    description.unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Projects
// ---------------------------------------------------------------------------

/// A new project needs a name.
pub fn validate_new_project(name: Option<&str>) -> Result<(), CoreError> {
    require_field(FIELD_NAME, name).map(|_| ())
}

/// A project update may omit the name but may not blank it out.
pub fn validate_project_patch(name: Option<&str>) -> Result<(), CoreError> {
    reject_blank(FIELD_NAME, name)
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// A new ticket needs a title and the project it belongs to.
pub fn validate_new_ticket(title: Option<&str>, project_id: Option<&str>) -> Result<(), CoreError> {
    require_field(FIELD_TITLE, title)?;
    require_field(FIELD_PROJECT_ID, project_id)?;
    Ok(())
}

/// A ticket update may omit any field but may not blank out the title or
/// the owning project.
pub fn validate_ticket_patch(title: Option<&str>, project_id: Option<&str>) -> Result<(), CoreError> {
    reject_blank(FIELD_TITLE, title)?;
    reject_blank(FIELD_PROJECT_ID, project_id)?;
    Ok(())
}

/// Error for a ticket pointing at a project that does not exist.
pub fn unknown_project(project_id: &str) -> CoreError {
    CoreError::Validation(format!("Project {project_id} does not exist"))
}
