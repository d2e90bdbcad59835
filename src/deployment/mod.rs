/// 배포 기록
/// 배포 시 한 번 기록되고 프론트엔드가 읽어 가는 컨트랙트 주소 파일
// region:    --- Imports
use crate::error::MarketResult;
use crate::random::{random_address, RandomSource};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

// endregion: --- Imports

// region:    --- Contract Addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAddresses {
    pub encrypted_math: String,
    pub dark_market: String,
}

impl ContractAddresses {
    /// 목업 컨트랙트 배포 (주소만 생성)
    pub fn deploy(rng: &dyn RandomSource) -> Self {
        let encrypted_math = random_address(rng);
        info!(
            "{:<12} --> MockEncryptedMath 배포: {}",
            "Deploy", encrypted_math
        );
        let dark_market = random_address(rng);
        info!("{:<12} --> MockDarkMarket 배포: {}", "Deploy", dark_market);

        Self {
            encrypted_math,
            dark_market,
        }
    }

    pub fn load(path: &Path) -> MarketResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// 상위 디렉터리가 없으면 생성 후 저장
    pub fn save(&self, path: &Path) -> MarketResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("{:<12} --> 컨트랙트 주소 저장: {}", "Deploy", path.display());
        Ok(())
    }
}
// endregion: --- Contract Addresses
