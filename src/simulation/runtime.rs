/// 시뮬레이션 런타임
/// 상태 머신이 돌려준 효과를 실행한다. 지연 효과는 취소 토큰에 묶인 tokio 작업으로 돌린다.
// region:    --- Imports
use super::events::{Effect, Notification, UiEvent};
use super::machine::{transition, Context};
use super::state::AuctionState;
use crate::config::SimulationDelays;
use crate::error::MarketResult;
use crate::marketplace::model::Catalog;
use crate::random::RandomSource;
use chrono::Utc;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Simulation
struct Inner {
    state: Mutex<AuctionState>,
    rng: Arc<dyn RandomSource>,
    delays: SimulationDelays,
    outputs: mpsc::UnboundedSender<Effect>,
    cancel: Mutex<CancellationToken>,
    tasks: TaskTracker,
}

impl Inner {
    /// 화면 쪽으로 효과 전달
    fn emit(&self, effect: Effect) {
        if self.outputs.send(effect).is_err() {
            debug!("{:<12} --> 효과 수신자가 없습니다", "Simulation");
        }
    }
}

/// 경매 시뮬레이션 인스턴스
#[derive(Clone)]
pub struct Simulation {
    inner: Arc<Inner>,
}

impl Simulation {
    /// 시뮬레이션 생성
    /// 알림, 클립보드, 입력 초기화 효과는 반환된 수신자로 전달된다.
    pub fn new(
        catalog: Arc<Catalog>,
        rng: Arc<dyn RandomSource>,
        delays: SimulationDelays,
    ) -> (Self, mpsc::UnboundedReceiver<Effect>) {
        let (outputs, receiver) = mpsc::unbounded_channel();
        let inner = Inner {
            state: Mutex::new(AuctionState::new(catalog)),
            rng,
            delays,
            outputs,
            cancel: Mutex::new(CancellationToken::new()),
            tasks: TaskTracker::new(),
        };
        (
            Self {
                inner: Arc::new(inner),
            },
            receiver,
        )
    }

    /// 이벤트 처리
    /// 실패하면 상태는 그대로 두고 에러 알림을 보낸 뒤 에러를 돌려준다.
    /// 지연 효과를 tokio 태스크로 띄우므로 tokio 런타임 안에서 호출해야 한다.
    pub fn dispatch(&self, event: UiEvent) -> MarketResult<()> {
        Self::apply(&self.inner, event)
    }

    /// 현재 상태 스냅샷
    pub fn snapshot(&self) -> AuctionState {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 진행 중인 지연 작업 수
    pub fn in_flight(&self) -> usize {
        self.inner.tasks.len()
    }

    /// 진행 중인 제출/공개 작업을 모두 중단
    /// 중단된 작업은 상태를 바꾸지 않는다.
    pub fn cancel_pending(&self) {
        let mut token = self
            .inner
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
        info!(
            "{:<12} --> 진행 중인 작업 취소: {}건",
            "Simulation",
            self.inner.tasks.len()
        );
    }

    fn apply(inner: &Arc<Inner>, event: UiEvent) -> MarketResult<()> {
        let effects = {
            let mut state = inner.state.lock().unwrap_or_else(PoisonError::into_inner);
            let ctx = Context {
                rng: inner.rng.as_ref(),
                now: Utc::now(),
                delays: inner.delays,
            };
            match transition(&state, event, &ctx) {
                Ok(next) => {
                    *state = next.state;
                    next.effects
                }
                Err(e) => {
                    warn!("{:<12} --> 이벤트 거부: {}", "Simulation", e);
                    inner.emit(Effect::Notify(Notification::error(e.to_string())));
                    return Err(e);
                }
            }
        };

        for effect in effects {
            match effect {
                Effect::Schedule { delay, event } => Self::schedule(inner, delay, event),
                other => inner.emit(other),
            }
        }
        Ok(())
    }

    /// delay 후 event 적용 (취소되면 아무것도 하지 않음)
    fn schedule(inner: &Arc<Inner>, delay: Duration, event: UiEvent) {
        let token = inner
            .cancel
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token();
        let task_inner = Arc::clone(inner);

        inner.tasks.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("{:<12} --> 지연 작업 취소됨: {:?}", "Simulation", event);
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = Self::apply(&task_inner, event) {
                        error!("{:<12} --> 지연 작업 처리 오류: {}", "Simulation", e);
                    }
                }
            }
        });
    }
}
// endregion: --- Simulation
