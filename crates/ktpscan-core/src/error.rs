use thiserror::Error;

use crate::nik::IdentityNumberError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("no extracted record to validate")]
    MissingRecord,

    #[error("invalid identity number: {0}")]
    IdentityNumber(#[from] IdentityNumberError),
}
