use actix_web::{body::BoxBody, http::StatusCode, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use derive_more::derive::{Display, Error as DeriveMoreError};

/// Failures that stop the process before or while serving.
#[derive(Debug, Error)]
pub enum AppError{
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Cant connect to the DB")]
    DbConnect,
    #[error("Cant create the courses table")]
    Schema,
    #[error("Cant seed the courses table: {0}")]
    Seed(String),
    #[error("Cant bind to the Socket")]
    SocketBind,
    #[error("Cant start the server")]
    ServerStart,
    #[error("Internal Server Error")]
    InternalError
}

/// JSON error body returned by every failing handler.
#[derive(Debug, Display, DeriveMoreError, Serialize, Deserialize)]
#[display("error :{}", error)]
pub struct CustomError{
    pub error:String
}

impl CustomError {
    pub fn new(error: impl Into<String>) -> Self {
        CustomError { error: error.into() }
    }
}

/// Storage faults surface as 500 with the JSON body.
impl ResponseError for CustomError{
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(self)
    }
}
