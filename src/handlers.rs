// region:    --- Imports
use crate::bid_store::{BidStore, InMemoryBidStore};
use crate::deployment::ContractAddresses;
use crate::error::MarketError;
use crate::marketplace::commands::{
    handle_decrypt, handle_encrypt, handle_submit_bid, DecryptCommand, EncryptCommand,
    SubmitBidCommand, SubmitBidResponse,
};
use crate::marketplace::model::Catalog;
use crate::random::ThreadRng;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

// endregion: --- Imports

// region:    --- State
/// 핸들러 공유 상태
#[derive(Clone)]
pub struct ServiceState {
    pub catalog: Arc<Catalog>,
    pub bid_store: Arc<InMemoryBidStore>,
    /// 시작 시 배포 기록을 찾지 못했으면 None
    pub contracts: Option<Arc<ContractAddresses>>,
}

// endregion: --- State

// region:    --- Command Handlers

/// 암호화 요청 처리
pub async fn handle_encrypt_request(
    payload: Result<Json<EncryptCommand>, JsonRejection>,
) -> Result<impl IntoResponse, MarketError> {
    let Json(cmd) = payload?;
    Ok(Json(handle_encrypt(cmd)?))
}

/// 복호화 요청 처리
pub async fn handle_decrypt_request(
    payload: Result<Json<DecryptCommand>, JsonRejection>,
) -> Result<impl IntoResponse, MarketError> {
    let Json(cmd) = payload?;
    Ok(Json(handle_decrypt(cmd)?))
}

/// 입찰 제출 요청 처리
pub async fn handle_submit_bid_request(
    State(state): State<ServiceState>,
    payload: Result<Json<SubmitBidCommand>, JsonRejection>,
) -> Result<impl IntoResponse, MarketError> {
    let Json(cmd) = payload?;
    let bid = handle_submit_bid(cmd, &state.catalog, &*state.bid_store, &ThreadRng::new()).await?;
    info!("{:<12} --> 입찰 제출 완료 id: {}", "Command", bid.id);
    Ok(Json(SubmitBidResponse {
        success: true,
        bid_id: bid.id,
    }))
}

// endregion: --- Command Handlers

// region:    --- Query Handlers

/// 모든 상품 조회
pub async fn handle_get_listings(State(state): State<ServiceState>) -> impl IntoResponse {
    info!("{:<12} --> 모든 상품 조회", "HandlerQuery");
    Json(state.catalog.listings().to_vec())
}

/// 상품 조회
pub async fn handle_get_listing(
    State(state): State<ServiceState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse, MarketError> {
    let Path(listing_id) = path?;
    info!("{:<12} --> 상품 조회 id: {}", "HandlerQuery", listing_id);
    state
        .catalog
        .get(listing_id)
        .cloned()
        .map(Json)
        .ok_or(MarketError::ListingNotFound(listing_id))
}

/// 모든 입찰 조회
pub async fn handle_get_bids(State(state): State<ServiceState>) -> impl IntoResponse {
    info!("{:<12} --> 모든 입찰 조회", "HandlerQuery");
    Json(state.bid_store.all_bids().await)
}

/// 상품 입찰 이력 조회
pub async fn handle_get_listing_bids(
    State(state): State<ServiceState>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<impl IntoResponse, MarketError> {
    let Path(listing_id) = path?;
    info!(
        "{:<12} --> 상품 입찰 이력 조회 id: {}",
        "HandlerQuery", listing_id
    );
    if !state.catalog.contains(listing_id) {
        return Err(MarketError::ListingNotFound(listing_id));
    }
    Ok(Json(state.bid_store.bids_for_listing(listing_id).await))
}

/// 배포 기록 조회
pub async fn handle_get_contracts(State(state): State<ServiceState>) -> impl IntoResponse {
    info!("{:<12} --> 컨트랙트 주소 조회", "HandlerQuery");
    match state.contracts {
        Some(contracts) => Json(contracts.as_ref().clone()).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "contract addresses have not been deployed",
                "code": "NOT_DEPLOYED"
            })),
        )
            .into_response(),
    }
}

/// 헬스 체크
pub async fn handle_health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

// endregion: --- Query Handlers

// region:    --- Router
/// 라우터 설정 (CORS 전체 허용)
pub fn create_router(state: ServiceState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/listings", get(handle_get_listings))
        .route("/listings/:id", get(handle_get_listing))
        .route("/listings/:id/bids", get(handle_get_listing_bids))
        .route("/bids", get(handle_get_bids))
        .route("/encrypt", post(handle_encrypt_request))
        .route("/decrypt", post(handle_decrypt_request))
        .route("/submit-bid", post(handle_submit_bid_request));

    Router::new()
        .nest("/api", api)
        .route("/contracts/addresses.json", get(handle_get_contracts))
        .route("/health", get(handle_health))
        .layer(cors)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state)
}
// endregion: --- Router
