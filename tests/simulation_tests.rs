use dark_market::codec;
use dark_market::config::SimulationDelays;
use dark_market::error::MarketError;
use dark_market::marketplace::seed::seed_catalog;
use dark_market::random::SeededRandom;
use dark_market::simulation::{Effect, Notification, Simulation, UiEvent, TIMELINE_CAPACITY};
use std::sync::Arc;
use std::time::Duration;

fn simulation() -> (Simulation, tokio::sync::mpsc::UnboundedReceiver<Effect>) {
    Simulation::new(
        Arc::new(seed_catalog().unwrap()),
        Arc::new(SeededRandom::new(2024)),
        SimulationDelays::default(),
    )
}

async fn advance(millis: u64) {
    tokio::time::sleep(Duration::from_millis(millis)).await;
    tokio::task::yield_now().await;
}

/// 지갑 연결 후 입찰 제출 시나리오
#[tokio::test(start_paused = true)]
async fn test_connect_then_submit_bid() {
    let (sim, _rx) = simulation();
    sim.dispatch(UiEvent::ConnectWallet).unwrap();
    let wallet = sim.snapshot().session.wallet_address.unwrap();

    sim.dispatch(UiEvent::SubmitBid {
        input: "0xabc123".to_string(),
    })
    .unwrap();
    advance(2001).await;

    let state = sim.snapshot();
    let newest = state.timeline.newest().unwrap();
    assert_eq!(newest.bidder, wallet);
    assert_eq!(newest.encrypted_bid, "0xabc123");
    assert_eq!(newest.id, 1);
}

/// 제출 지연 중 재연결하면 새 지갑 주소로 기록
#[tokio::test(start_paused = true)]
async fn test_reconnect_during_submit_delay() {
    let (sim, _rx) = simulation();
    sim.dispatch(UiEvent::ConnectWallet).unwrap();
    let first_wallet = sim.snapshot().session.wallet_address.unwrap();

    sim.dispatch(UiEvent::SubmitBid {
        input: "0xabc123".to_string(),
    })
    .unwrap();
    advance(500).await;
    sim.dispatch(UiEvent::ConnectWallet).unwrap();
    let current_wallet = sim.snapshot().session.wallet_address.unwrap();
    assert_ne!(first_wallet, current_wallet);
    advance(1600).await;

    let state = sim.snapshot();
    assert_eq!(state.timeline.newest().unwrap().bidder, current_wallet);
}

/// 연결 전 입찰 제출 거부
#[tokio::test(start_paused = true)]
async fn test_submit_while_disconnected() {
    let (sim, mut rx) = simulation();

    let result = sim.dispatch(UiEvent::SubmitBid {
        input: "0xabc123".to_string(),
    });
    assert!(matches!(result, Err(MarketError::NotAuthorized)));

    advance(5000).await;
    assert!(sim.snapshot().timeline.is_empty());
    assert_eq!(
        rx.try_recv().unwrap(),
        Effect::Notify(Notification::error("Please connect your wallet first"))
    );
}

/// 타임라인은 최신 5건만 유지
#[tokio::test(start_paused = true)]
async fn test_timeline_keeps_five_newest() {
    let (sim, _rx) = simulation();
    sim.dispatch(UiEvent::ConnectWallet).unwrap();

    for i in 1..=8 {
        sim.dispatch(UiEvent::SubmitBid {
            input: format!("0x{i:02x}"),
        })
        .unwrap();
        advance(2001).await;
    }

    let state = sim.snapshot();
    assert_eq!(state.timeline.len(), TIMELINE_CAPACITY);
    let bids: Vec<&str> = state
        .timeline
        .iter()
        .map(|e| e.encrypted_bid.as_str())
        .collect();
    assert_eq!(bids, vec!["0x08", "0x07", "0x06", "0x05", "0x04"]);
}

/// 암호화 -> 제출 -> 공개 전체 흐름
#[tokio::test(start_paused = true)]
async fn test_full_auction_flow() {
    let (sim, mut rx) = simulation();
    sim.dispatch(UiEvent::ConnectWallet).unwrap();
    sim.dispatch(UiEvent::SelectListing { listing_id: 2 })
        .unwrap();
    sim.dispatch(UiEvent::Encrypt {
        input: "1.25".to_string(),
    })
    .unwrap();

    let token = sim.snapshot().ciphertext.unwrap();
    assert_eq!(codec::decode(token.as_str()).unwrap(), 1.25);

    sim.dispatch(UiEvent::SubmitBid {
        input: token.to_string(),
    })
    .unwrap();
    sim.dispatch(UiEvent::RevealWinner).unwrap();
    advance(3001).await;

    let state = sim.snapshot();
    let newest = state.timeline.newest().unwrap();
    assert_eq!(newest.listing_id, Some(2));
    assert_eq!(newest.encrypted_bid, token.as_str());
    let winner = state.winner.unwrap();
    assert!((0.0..5.0).contains(&winner.winning_bid));

    let mut messages = vec![];
    while let Ok(effect) = rx.try_recv() {
        if let Effect::Notify(n) = effect {
            messages.push(n.message);
        }
    }
    assert_eq!(
        messages,
        vec![
            "Wallet connected successfully!",
            "Selected Premium Domain for bidding",
            "Value encrypted successfully!",
            "Submitting encrypted bid...",
            "Decrypting winner... This may take a moment",
            "Encrypted bid submitted successfully!",
            "Winner decrypted successfully!",
        ]
    );
}
