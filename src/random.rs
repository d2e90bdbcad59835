//! 지갑 주소, 잔액, 낙찰 결과 등 데모용 난수 생성

use rand::RngCore;
use std::sync::atomic::{AtomicU64, Ordering};

/// 주소 길이 (바이트) - 16진수 40자리
pub const ADDRESS_BYTES: usize = 20;

/// 난수 공급원
/// 테스트에서는 결정적인 구현으로 교체한다.
pub trait RandomSource: Send + Sync {
    fn fill_bytes(&self, dest: &mut [u8]);

    /// [0, 1) 구간의 균등 분포 실수
    fn next_f64(&self) -> f64 {
        let mut bytes = [0u8; 8];
        self.fill_bytes(&mut bytes);
        (u64::from_le_bytes(bytes) >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// 스레드 로컬 RNG를 사용하는 기본 구현
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRng;

impl ThreadRng {
    pub fn new() -> Self {
        Self
    }
}

impl RandomSource for ThreadRng {
    fn fill_bytes(&self, dest: &mut [u8]) {
        rand::thread_rng().fill_bytes(dest);
    }
}

/// 시드 기반 결정적 난수 (테스트, 데모 재현용)
#[derive(Debug)]
pub struct SeededRandom {
    seed: u64,
    counter: AtomicU64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: AtomicU64::new(0),
        }
    }

    const fn mix(&self, counter: u64) -> u64 {
        let mut x = self.seed.wrapping_add(counter);
        x = x.wrapping_mul(0x517C_C1B7_2722_0A95);
        x ^= x >> 32;
        x = x.wrapping_mul(0x517C_C1B7_2722_0A95);
        x ^= x >> 32;
        x
    }
}

impl RandomSource for SeededRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let counter = self.counter.fetch_add(1, Ordering::SeqCst);
            let bytes = self.mix(counter).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }
}

/// `0x` + 16진수 40자리 주소
pub fn random_address(rng: &dyn RandomSource) -> String {
    let mut bytes = [0u8; ADDRESS_BYTES];
    rng.fill_bytes(&mut bytes);
    format!("0x{}", hex::encode(bytes))
}

/// [0, upper) 구간, 소수점 셋째 자리에서 내림한 금액
pub fn random_amount(rng: &dyn RandomSource, upper: f64) -> f64 {
    (rng.next_f64() * upper * 1000.0).floor() / 1000.0
}
