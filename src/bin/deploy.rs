// 목업 컨트랙트 "배포" 후 주소 파일 기록
use dark_market::config::Config;
use dark_market::deployment::ContractAddresses;
use dark_market::random::ThreadRng;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .without_time()
        .with_target(false)
        .init();

    let config = Config::from_env();
    info!("{:<12} --> DarkMarket 컨트랙트 배포 시작", "Deploy");

    let addresses = ContractAddresses::deploy(&ThreadRng::new());
    addresses.save(&config.addresses_path)?;

    info!("{:<12} --> 배포 완료", "Deploy");
    Ok(())
}
