use crate::codec::Token;
use crate::marketplace::model::{Catalog, Listing};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

/// 타임라인에 유지하는 최대 입찰 수
pub const TIMELINE_CAPACITY: usize = 5;

// 지갑 세션
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub connected: bool,
    pub wallet_address: Option<String>,
    /// 표시용 잔액 (소수점 셋째 자리 문자열)
    pub balance: Option<String>,
}

// 타임라인 입찰 항목
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: u64,
    pub listing_id: Option<u64>,
    pub bidder: String,
    pub encrypted_bid: String,
    pub timestamp: i64,
}

// 공개된 낙찰 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Winner {
    pub address: String,
    pub winning_bid: f64,
}

impl Winner {
    pub fn display_amount(&self) -> String {
        format!("{:.3} ETH", self.winning_bid)
    }
}

/// 입찰 타임라인 (최신 항목이 앞, 가득 차면 가장 오래된 항목부터 제거)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    entries: VecDeque<TimelineEntry>,
}

impl Timeline {
    pub fn push(&mut self, entry: TimelineEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(TIMELINE_CAPACITY);
    }

    pub fn newest(&self) -> Option<&TimelineEntry> {
        self.entries.front()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 최신순
    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter()
    }
}

/// 클라이언트 경매 상태
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionState {
    pub session: Session,
    pub catalog: Arc<Catalog>,
    pub selected_listing: Option<u64>,
    pub plaintext: Option<f64>,
    pub ciphertext: Option<Token>,
    pub timeline: Timeline,
    pub next_bid_id: u64,
    pub winner: Option<Winner>,
}

impl AuctionState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            session: Session::default(),
            catalog,
            selected_listing: None,
            plaintext: None,
            ciphertext: None,
            timeline: Timeline::default(),
            next_bid_id: 1,
            winner: None,
        }
    }

    pub fn products(&self) -> &[Listing] {
        self.catalog.listings()
    }

    pub fn selected_product(&self) -> Option<&Listing> {
        self.selected_listing.and_then(|id| self.catalog.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u64) -> TimelineEntry {
        TimelineEntry {
            id,
            listing_id: None,
            bidder: "0xbidder".to_string(),
            encrypted_bid: format!("0x{id:x}"),
            timestamp: id as i64,
        }
    }

    #[test]
    fn test_timeline_evicts_oldest_first() {
        let mut timeline = Timeline::default();
        for id in 1..=8 {
            timeline.push(entry(id));
            assert!(timeline.len() <= TIMELINE_CAPACITY);
        }
        let ids: Vec<u64> = timeline.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![8, 7, 6, 5, 4]);
        assert_eq!(timeline.newest().map(|e| e.id), Some(8));
    }

    #[test]
    fn test_winner_display_amount() {
        let winner = Winner {
            address: "0x00".to_string(),
            winning_bid: 1.5,
        };
        assert_eq!(winner.display_amount(), "1.500 ETH");
    }
}
