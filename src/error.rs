// region:    --- Imports
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

// endregion: --- Imports

// region:    --- Error
/// 마켓 전역 에러 타입
/// 클라이언트에서는 에러 알림으로, 서버에서는 JSON 에러 응답으로 변환된다.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("{0}")]
    Validation(String),

    #[error("Please connect your wallet first")]
    NotAuthorized,

    #[error("Invalid ciphertext: {0}")]
    InvalidTokenFormat(String),

    #[error("Listing {0} not found")]
    ListingNotFound(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type MarketResult<T> = Result<T, MarketError>;

impl MarketError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// 응답 바디에 실리는 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotAuthorized => "NOT_AUTHORIZED",
            Self::InvalidTokenFormat(_) => "INVALID_TOKEN_FORMAT",
            Self::ListingNotFound(_) => "LISTING_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidTokenFormat(_) => StatusCode::BAD_REQUEST,
            Self::NotAuthorized => StatusCode::UNAUTHORIZED,
            Self::ListingNotFound(_) => StatusCode::NOT_FOUND,
            Self::Io(_) | Self::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// 요청 바디를 읽지 못하면 검증 에러로 취급
impl From<JsonRejection> for MarketError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for MarketError {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for MarketError {
    fn into_response(self) -> Response {
        warn!("{:<12} --> 요청 실패: {} ({})", "Error", self, self.code());
        (
            self.status(),
            Json(serde_json::json!({
                "error": self.to_string(),
                "code": self.code(),
            })),
        )
            .into_response()
    }
}
// endregion: --- Error
