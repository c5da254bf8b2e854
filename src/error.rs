use actix_web::{HttpResponse, ResponseError};
use reqwest::StatusCode;
use serde_json::json;

use crate::uwave::error::UwaveError;

#[derive(thiserror::Error, Debug)]
pub enum EtaError {
    #[error("uWave error: {0}")]
    Uwave(#[from] UwaveError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Error response: {0} {1}")]
    Response(u16, String),
}

impl ResponseError for EtaError {
    fn error_response(&self) -> actix_web::HttpResponse<actix_web::body::BoxBody> {
        match self {
            EtaError::NotFound(_) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
            }
            EtaError::Response(_, message) => {
                HttpResponse::build(self.status_code()).json(json!({ "error": message }))
            }
            other => {
                log::error!("{}", other);
                actix_web::HttpResponse::InternalServerError().finish()
            }
        }
    }

    fn status_code(&self) -> reqwest::StatusCode {
        match self {
            EtaError::NotFound(_) => StatusCode::NOT_FOUND,
            EtaError::Response(status, _) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type EtaResult<T> = Result<T, EtaError>;

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            EtaError::NotFound("stop 1".to_string()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            EtaError::Response(400, "missing route".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            EtaError::Response(1000, "bogus".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let url = url::Url::parse("http://uwave.test/busLines").unwrap();
        assert_eq!(
            EtaError::from(UwaveError::Status(502, url)).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
