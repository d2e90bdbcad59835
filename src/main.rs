// region:    --- Imports
use chrono::Utc;
use dark_market::bid_store::InMemoryBidStore;
use dark_market::config::Config;
use dark_market::deployment::ContractAddresses;
use dark_market::handlers::{self, ServiceState};
use dark_market::marketplace::seed::{seed_bids, seed_catalog};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // logging 초기화
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!("{:<12} --> 설정: {:?}", "Main", config);

    // 시드 데이터 준비
    let catalog = Arc::new(seed_catalog()?);
    let bid_store = Arc::new(InMemoryBidStore::new(seed_bids(Utc::now())?));
    info!(
        "{:<12} --> 시드 상품 {}건 로드",
        "Main",
        catalog.listings().len()
    );

    // 배포 기록은 없어도 서버는 뜬다
    let contracts = match ContractAddresses::load(&config.addresses_path) {
        Ok(addresses) => {
            info!("{:<12} --> 컨트랙트 주소 로드: {:?}", "Main", addresses);
            Some(Arc::new(addresses))
        }
        Err(e) => {
            warn!(
                "{:<12} --> 컨트랙트 주소 파일을 읽지 못했습니다 ({}): {}",
                "Main",
                config.addresses_path.display(),
                e
            );
            None
        }
    };

    // 라우터 설정
    let routes_all = handlers::create_router(ServiceState {
        catalog,
        bid_store,
        contracts,
    });

    // 리스너 생성
    let listener = TcpListener::bind(config.listen_addr).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행 (Ctrl+C 시 종료)
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 신호 대기 실패: {}", "Main", e);
        std::future::pending::<()>().await;
    }
    info!("{:<12} --> 종료 신호 수신", "Main");
}
// endregion: --- Main
