//! 클라이언트 측 경매 시뮬레이션
//!
//! 지갑 연결, 입찰 값 암호화, 암호문 제출, 낙찰자 복호화를 흉내 낸다.
//! `machine`은 순수 상태 전이, `runtime`은 지연 효과 실행을 맡는다.

pub mod events;
pub mod machine;
pub mod runtime;
pub mod state;

pub use events::{Effect, Notification, NotificationLevel, UiEvent};
pub use runtime::Simulation;
pub use state::{AuctionState, TimelineEntry, Winner, TIMELINE_CAPACITY};
