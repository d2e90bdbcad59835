use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 사용자 이벤트와 지연 완료 이벤트
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    // 지갑 연결
    ConnectWallet,
    // 입력 값 암호화
    Encrypt { input: String },
    // 암호문 클립보드 복사
    CopyCiphertext,
    // 입찰 대상 상품 선택
    SelectListing { listing_id: u64 },
    // 암호화된 입찰 제출
    SubmitBid { input: String },
    // 입찰 입력 초기화
    ClearBid,
    // 낙찰자 공개
    RevealWinner,
    // 제출 지연 완료
    BidConfirmed {
        listing_id: Option<u64>,
        encrypted_bid: String,
    },
    // 복호화 지연 완료
    WinnerDecrypted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// 화면에 잠깐 표시되는 알림
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            message: message.into(),
        }
    }
}

/// 상태 전이가 만들어 내는 부수 효과
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Notify(Notification),
    /// delay 후 event를 다시 상태 머신에 넣는다
    Schedule { delay: Duration, event: UiEvent },
    CopyToClipboard(String),
    ClearBidInput,
}
