use uuid::Uuid;

use crate::domain::clients::client::FieldError;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("client {0} not found")]
    NotFound(Uuid),
    #[error("invalid client input")]
    Validation(Vec<FieldError>),
    #[error("client store request failed")]
    Store(#[from] anyhow::Error),
}

impl ClientError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        ClientError::Validation(vec![FieldError {
            field,
            message: message.into(),
        }])
    }
}
