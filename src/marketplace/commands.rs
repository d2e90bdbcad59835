/// 목업 API 커맨드 처리
/// 1. 암호화 (난독화)
/// 2. 복호화
/// 3. 입찰 제출
// region:    --- Imports
use super::model::{Bid, Catalog};
use crate::bid_store::{BidStore, NewBid};
use crate::codec::{self, Token, TOKEN_PREFIX};
use crate::error::{MarketError, MarketResult};
use crate::random::{random_address, RandomSource};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
// endregion: --- Imports

// region:    --- Commands
/// 암호화 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EncryptCommand {
    pub plaintext: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EncryptResponse {
    pub ciphertext: Token,
}

/// 복호화 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecryptCommand {
    pub ciphertext: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DecryptResponse {
    pub plaintext: f64,
}

/// 입찰 제출 명령
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidCommand {
    pub listing_id: u64,
    pub encrypted_bid: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBidResponse {
    pub success: bool,
    pub bid_id: u64,
}

/// 1. 암호화
pub fn handle_encrypt(cmd: EncryptCommand) -> MarketResult<EncryptResponse> {
    info!("{:<12} --> 암호화 요청 처리: {:?}", "Command", cmd);
    let ciphertext = codec::encode(cmd.plaintext)?;
    Ok(EncryptResponse { ciphertext })
}

/// 2. 복호화
pub fn handle_decrypt(cmd: DecryptCommand) -> MarketResult<DecryptResponse> {
    info!("{:<12} --> 복호화 요청 처리: {:?}", "Command", cmd);
    let plaintext = codec::decode(&cmd.ciphertext)?;
    Ok(DecryptResponse { plaintext })
}

/// 3. 입찰 제출
/// 존재하지 않는 상품에 대한 입찰은 거부한다. 입찰자 주소는 매번 새로 생성한다.
pub async fn handle_submit_bid(
    cmd: SubmitBidCommand,
    catalog: &Catalog,
    bid_store: &impl BidStore,
    rng: &dyn RandomSource,
) -> MarketResult<Bid> {
    info!("{:<12} --> 입찰 제출 처리 시작: {:?}", "Command", cmd);

    if !catalog.contains(cmd.listing_id) {
        return Err(MarketError::ListingNotFound(cmd.listing_id));
    }

    let encrypted_bid = cmd.encrypted_bid.trim();
    if encrypted_bid.is_empty() || !encrypted_bid.starts_with(TOKEN_PREFIX) {
        return Err(MarketError::validation(
            "encryptedBid must be a non-empty string starting with 0x",
        ));
    }

    let bid = bid_store
        .append_bid(NewBid {
            listing_id: cmd.listing_id,
            bidder: random_address(rng),
            encrypted_bid: encrypted_bid.to_string(),
            timestamp: Utc::now().timestamp_millis(),
        })
        .await;

    Ok(bid)
}

// endregion: --- Commands
