use crate::codec::Token;
use serde::{Deserialize, Serialize};

// 상품 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub category: String,
    pub encrypted_price: Token,
    pub seller: String,
}

// 입찰 모델
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bid {
    pub id: u64,
    pub listing_id: u64,
    pub bidder: String,
    pub encrypted_bid: String,
    /// epoch milliseconds
    pub timestamp: i64,
}

/// 고정된 상품 목록
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    listings: Vec<Listing>,
}

impl Catalog {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn get(&self, id: u64) -> Option<&Listing> {
        self.listings.iter().find(|listing| listing.id == id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }
}
