// 브라우저 없이 경매 시뮬레이션 흐름 실행
use dark_market::config::Config;
use dark_market::marketplace::seed::seed_catalog;
use dark_market::random::ThreadRng;
use dark_market::simulation::{Effect, NotificationLevel, Simulation, UiEvent};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    let (sim, mut effects) = Simulation::new(
        Arc::new(seed_catalog()?),
        Arc::new(ThreadRng::new()),
        config.delays,
    );

    // 알림 출력
    let printer = tokio::spawn(async move {
        while let Some(effect) = effects.recv().await {
            match effect {
                Effect::Notify(n) => match n.level {
                    NotificationLevel::Error => error!("{:<12} --> {}", "Notify", n.message),
                    NotificationLevel::Info => info!("{:<12} --> {}", "Notify", n.message),
                    NotificationLevel::Success => info!("{:<12} --> ✔ {}", "Notify", n.message),
                },
                Effect::CopyToClipboard(text) => info!("{:<12} --> {}", "Clipboard", text),
                Effect::ClearBidInput => info!("{:<12} --> 입찰 입력 초기화", "Ui"),
                Effect::Schedule { .. } => {}
            }
        }
    });

    // 연결 전 제출은 거부된다
    if let Err(e) = sim.dispatch(UiEvent::SubmitBid {
        input: "0xabc123".to_string(),
    }) {
        warn!("{:<12} --> 예상된 거부: {}", "Demo", e);
    }

    sim.dispatch(UiEvent::ConnectWallet)?;
    sim.dispatch(UiEvent::SelectListing { listing_id: 1 })?;
    sim.dispatch(UiEvent::Encrypt {
        input: "2.75".to_string(),
    })?;
    sim.dispatch(UiEvent::CopyCiphertext)?;

    let ciphertext = sim
        .snapshot()
        .ciphertext
        .map(String::from)
        .unwrap_or_default();
    sim.dispatch(UiEvent::SubmitBid { input: ciphertext })?;
    sim.dispatch(UiEvent::RevealWinner)?;

    // 두 지연 작업이 끝날 때까지 대기
    let wait = config.delays.submit.max(config.delays.reveal) + Duration::from_millis(200);
    tokio::time::sleep(wait).await;

    let state = sim.snapshot();
    if let Some(address) = &state.session.wallet_address {
        info!("{:<12} --> 지갑: {}", "Demo", address);
    }
    for entry in state.timeline.iter() {
        info!(
            "{:<12} --> 입찰 #{} {} {}",
            "Demo", entry.id, entry.bidder, entry.encrypted_bid
        );
    }
    if let Some(winner) = &state.winner {
        info!(
            "{:<12} --> 낙찰자 {} ({})",
            "Demo",
            winner.address,
            winner.display_amount()
        );
    }

    drop(sim);
    printer.abort();
    Ok(())
}
