//! 환경 변수 기반 설정
//!
//! | 변수 | 기본값 |
//! |---|---|
//! | `DARKMARKET_LISTEN_ADDR` | `0.0.0.0:3000` |
//! | `DARKMARKET_ADDRESSES_PATH` | `contracts/addresses.json` |
//! | `DARKMARKET_SUBMIT_DELAY_MS` | `2000` |
//! | `DARKMARKET_REVEAL_DELAY_MS` | `3000` |

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const LISTEN_ADDR_ENV: &str = "DARKMARKET_LISTEN_ADDR";
pub const ADDRESSES_PATH_ENV: &str = "DARKMARKET_ADDRESSES_PATH";
pub const SUBMIT_DELAY_ENV: &str = "DARKMARKET_SUBMIT_DELAY_MS";
pub const REVEAL_DELAY_ENV: &str = "DARKMARKET_REVEAL_DELAY_MS";

const DEFAULT_LISTEN_ADDR: ([u8; 4], u16) = ([0, 0, 0, 0], 3000);
const DEFAULT_ADDRESSES_PATH: &str = "contracts/addresses.json";

/// 입찰 제출 지연 (네트워크/합의 시뮬레이션)
pub const SUBMIT_DELAY_MS: u64 = 2000;
/// 낙찰자 복호화 지연
pub const REVEAL_DELAY_MS: u64 = 3000;

/// 시뮬레이션 인위적 지연 시간
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationDelays {
    pub submit: Duration,
    pub reveal: Duration,
}

impl Default for SimulationDelays {
    fn default() -> Self {
        Self {
            submit: Duration::from_millis(SUBMIT_DELAY_MS),
            reveal: Duration::from_millis(REVEAL_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP 서버 주소
    pub listen_addr: SocketAddr,
    /// 배포 시 기록되는 컨트랙트 주소 파일
    pub addresses_path: PathBuf,
    pub delays: SimulationDelays,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(DEFAULT_LISTEN_ADDR),
            addresses_path: PathBuf::from(DEFAULT_ADDRESSES_PATH),
            delays: SimulationDelays::default(),
        }
    }
}

impl Config {
    /// 환경 변수에서 설정 로드 (해석할 수 없는 값은 기본값 사용)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let millis = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
                .unwrap_or(default)
        };

        Self {
            listen_addr: lookup(LISTEN_ADDR_ENV)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.listen_addr),
            addresses_path: lookup(ADDRESSES_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.addresses_path),
            delays: SimulationDelays {
                submit: millis(SUBMIT_DELAY_ENV, defaults.delays.submit),
                reveal: millis(REVEAL_DELAY_ENV, defaults.delays.reveal),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.addresses_path, PathBuf::from("contracts/addresses.json"));
        assert_eq!(config.delays.submit, Duration::from_millis(2000));
        assert_eq!(config.delays.reveal, Duration::from_millis(3000));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            (LISTEN_ADDR_ENV, "127.0.0.1:8080"),
            (ADDRESSES_PATH_ENV, "/tmp/addresses.json"),
            (SUBMIT_DELAY_ENV, "10"),
            (REVEAL_DELAY_ENV, "20"),
        ]);
        assert_eq!(config.listen_addr.to_string(), "127.0.0.1:8080");
        assert_eq!(config.addresses_path, PathBuf::from("/tmp/addresses.json"));
        assert_eq!(config.delays.submit, Duration::from_millis(10));
        assert_eq!(config.delays.reveal, Duration::from_millis(20));
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_with(&[(LISTEN_ADDR_ENV, "nope"), (SUBMIT_DELAY_ENV, "-5")]);
        assert_eq!(config.listen_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.delays.submit, Duration::from_millis(2000));
    }
}
