use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Lookup by id, name, email or filter produced nothing.
    #[error("{0}")]
    NotFound(String),

    #[error("There is an account with that email address: {0}")]
    DuplicateEmail(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Crypto error: {0}")]
    Crypto(String),
}

impl DomainError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let msg = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{}: {}", field, msg)
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            DomainError::Validation("Validation failed".to_string())
        } else {
            DomainError::Validation(messages.join("; "))
        }
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
