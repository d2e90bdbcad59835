// region:    --- Imports
use crate::marketplace::model::Bid;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

// endregion: --- Imports

// region:    --- New Bid
/// 저장 전 입찰 (id는 저장소가 부여)
#[derive(Debug, Clone)]
pub struct NewBid {
    pub listing_id: u64,
    pub bidder: String,
    pub encrypted_bid: String,
    pub timestamp: i64,
}
// endregion: --- New Bid

// region:    --- Bid Store Trait
/// 입찰 저장소 트레이트
/// 입찰은 추가만 가능하며 수정/삭제되지 않는다.
#[async_trait]
pub trait BidStore: Send + Sync {
    async fn append_bid(&self, bid: NewBid) -> Bid;

    async fn all_bids(&self) -> Vec<Bid>;

    async fn bids_for_listing(&self, listing_id: u64) -> Vec<Bid>;
}

struct BidLog {
    bids: Vec<Bid>,
    next_id: u64,
}

/// 프로세스 메모리 입찰 저장소 (재시작 시 초기화)
pub struct InMemoryBidStore {
    log: RwLock<BidLog>,
}

impl InMemoryBidStore {
    pub fn new(seed: Vec<Bid>) -> Self {
        let next_id = seed.iter().map(|bid| bid.id).max().unwrap_or(0) + 1;
        Self {
            log: RwLock::new(BidLog {
                bids: seed,
                next_id,
            }),
        }
    }
}

/// 쓰기 락 안에서 id 부여와 추가를 함께 처리해 도착 순서대로 직렬화한다.
#[async_trait]
impl BidStore for InMemoryBidStore {
    async fn append_bid(&self, bid: NewBid) -> Bid {
        let mut log = self.log.write().await;
        let stored = Bid {
            id: log.next_id,
            listing_id: bid.listing_id,
            bidder: bid.bidder,
            encrypted_bid: bid.encrypted_bid,
            timestamp: bid.timestamp,
        };
        log.next_id += 1;
        log.bids.push(stored.clone());
        info!(
            "{:<12} --> 입찰 저장 id: {}, listing: {}",
            "BidStore", stored.id, stored.listing_id
        );
        stored
    }

    async fn all_bids(&self) -> Vec<Bid> {
        self.log.read().await.bids.clone()
    }

    async fn bids_for_listing(&self, listing_id: u64) -> Vec<Bid> {
        self.log
            .read()
            .await
            .bids
            .iter()
            .filter(|bid| bid.listing_id == listing_id)
            .cloned()
            .collect()
    }
}
// endregion: --- Bid Store Trait
