/// 가격/입찰 값 난독화 코덱
/// 값에 1000을 곱해 소수점 셋째 자리까지 고정소수점으로 만든 뒤 64자리 16진수로 표현한다.
/// 실제 암호화가 아니며 언제든 되돌릴 수 있다.
// region:    --- Imports
use crate::error::{MarketError, MarketResult};
use num_bigint::BigUint;
use num_traits::{Num, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

// endregion: --- Imports

// region:    --- Constants
pub const TOKEN_PREFIX: &str = "0x";
pub const TOKEN_HEX_WIDTH: usize = 64;
/// 고정소수점 배율 (소수점 셋째 자리)
pub const SCALE: f64 = 1000.0;

// endregion: --- Constants

// region:    --- Token
/// `0x` + 64자리 소문자 16진수
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Token> for String {
    fn from(token: Token) -> Self {
        token.0
    }
}
// endregion: --- Token

// region:    --- Encode / Decode
/// 평문 값을 토큰으로 변환
pub fn encode(value: f64) -> MarketResult<Token> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketError::validation(format!(
            "plaintext must be a finite non-negative number, got {value}"
        )));
    }

    let scaled = BigUint::from_str_radix(&scaled_digits(value), 10)
        .map_err(|e| MarketError::validation(format!("cannot scale plaintext {value}: {e}")))?;
    let hex = scaled.to_str_radix(16);
    if hex.len() > TOKEN_HEX_WIDTH {
        return Err(MarketError::validation(format!(
            "plaintext {value} does not fit in {TOKEN_HEX_WIDTH} hex digits"
        )));
    }

    Ok(Token(format!(
        "{}{:0>width$}",
        TOKEN_PREFIX,
        hex,
        width = TOKEN_HEX_WIDTH
    )))
}

/// 토큰을 평문 값으로 복원
/// 접두사 뒤 64자리만 읽고 그 이후 문자는 무시한다.
pub fn decode(token: &str) -> MarketResult<f64> {
    let digits = token
        .strip_prefix(TOKEN_PREFIX)
        .ok_or_else(|| MarketError::InvalidTokenFormat("missing 0x prefix".to_string()))?;

    let digits = digits.get(..TOKEN_HEX_WIDTH).ok_or_else(|| {
        MarketError::InvalidTokenFormat(format!("expected {TOKEN_HEX_WIDTH} hex digits"))
    })?;
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(MarketError::InvalidTokenFormat(
            "token contains non-hex characters".to_string(),
        ));
    }

    let scaled = BigUint::from_str_radix(digits, 16)
        .map_err(|e| MarketError::InvalidTokenFormat(e.to_string()))?;
    let scaled = scaled
        .to_f64()
        .ok_or_else(|| MarketError::InvalidTokenFormat("value out of range".to_string()))?;

    Ok(scaled / SCALE)
}

/// floor(value * 1000) 의 10진 숫자열
/// 최단 10진 표현에서 소수점 셋째 자리 뒤를 잘라내므로 1.005 는 1005, 0.9999999999999999 는 999 가 된다.
fn scaled_digits(value: f64) -> String {
    let text = value.abs().to_string();
    let (integer, fraction) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let fraction: String = fraction
        .chars()
        .chain(std::iter::repeat('0'))
        .take(3)
        .collect();
    format!("{integer}{fraction}")
}
// endregion: --- Encode / Decode
