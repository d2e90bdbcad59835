/// 데모용 시드 데이터
// region:    --- Imports
use super::model::{Bid, Catalog, Listing};
use crate::codec;
use crate::error::MarketResult;
use chrono::{DateTime, Duration, Utc};

// endregion: --- Imports

// (id, 이름, 설명, 카테고리, 가격, 판매자)
const SEED_LISTINGS: [(u64, &str, &str, &str, f64, &str); 4] = [
    (
        1,
        "Digital Art NFT",
        "Exclusive encrypted digital artwork",
        "Art",
        2.5,
        "0x8f3a186c8f25591e4b2c8f2d9a1b7c3d8e4f2a6c",
    ),
    (
        2,
        "Premium Domain",
        "Crypto domain name (.eth)",
        "Domains",
        12.75,
        "0x3a7d186c8f25591e4b2c8f2d9a1b7c3d8e4f2a6c",
    ),
    (
        3,
        "AI Model",
        "Encrypted machine learning model",
        "AI",
        4.2,
        "0x5c9e2b7f1a3d4e6c8b0a2f4d6e8c1b3a5d7f9e2c",
    ),
    (
        4,
        "Data Set",
        "Private encrypted data collection",
        "Data",
        0.875,
        "0xd4e6f8a0b2c4d6e8f0a1b3c5d7e9f1a3b5c7d9e1",
    ),
];

const SEED_BIDDER: &str = "0xa1b2c3d4e5f678901234567890abcdef12345678";
const SEED_BID_AMOUNT: f64 = 1.25;

/// 시드 상품 목록
pub fn seed_catalog() -> MarketResult<Catalog> {
    let listings = SEED_LISTINGS
        .iter()
        .map(|&(id, name, description, category, price, seller)| -> MarketResult<Listing> {
            Ok(Listing {
                id,
                name: name.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                encrypted_price: codec::encode(price)?,
                seller: seller.to_string(),
            })
        })
        .collect::<MarketResult<Vec<_>>>()?;
    Ok(Catalog::new(listings))
}

/// 시드 입찰 (서버 시작 한 시간 전에 들어온 입찰 1건)
pub fn seed_bids(now: DateTime<Utc>) -> MarketResult<Vec<Bid>> {
    Ok(vec![Bid {
        id: 1,
        listing_id: 1,
        bidder: SEED_BIDDER.to_string(),
        encrypted_bid: codec::encode(SEED_BID_AMOUNT)?.into_inner(),
        timestamp: (now - Duration::hours(1)).timestamp_millis(),
    }])
}
