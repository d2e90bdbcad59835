/// 경매 시뮬레이션 상태 머신
/// 전이는 순수 함수: (상태, 이벤트, 컨텍스트) -> (새 상태, 효과 목록)
/// 실패하면 상태는 그대로이고 에러만 돌려준다.
// region:    --- Imports
use super::events::{Effect, Notification, UiEvent};
use super::state::{AuctionState, TimelineEntry, Winner};
use crate::codec::{self, TOKEN_PREFIX};
use crate::config::SimulationDelays;
use crate::error::{MarketError, MarketResult};
use crate::random::{random_address, random_amount, RandomSource};
use chrono::{DateTime, Utc};
use tracing::debug;

// endregion: --- Imports

/// 표시용 잔액 상한
const BALANCE_UPPER: f64 = 10.0;
/// 낙찰가 상한 (ETH)
const WINNING_BID_UPPER: f64 = 5.0;

/// 전이에 필요한 외부 입력
pub struct Context<'a> {
    pub rng: &'a dyn RandomSource,
    pub now: DateTime<Utc>,
    pub delays: SimulationDelays,
}

#[derive(Debug)]
pub struct Transition {
    pub state: AuctionState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn new(state: AuctionState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn notify(mut self, notification: Notification) -> Self {
        self.effects.push(Effect::Notify(notification));
        self
    }

    fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

// region:    --- Transition
pub fn transition(
    state: &AuctionState,
    event: UiEvent,
    ctx: &Context<'_>,
) -> MarketResult<Transition> {
    debug!("{:<12} --> 이벤트 처리: {:?}", "Simulation", event);
    match event {
        UiEvent::ConnectWallet => Ok(connect_wallet(state, ctx)),
        UiEvent::Encrypt { input } => encrypt(state, &input),
        UiEvent::CopyCiphertext => copy_ciphertext(state),
        UiEvent::SelectListing { listing_id } => select_listing(state, listing_id),
        UiEvent::SubmitBid { input } => submit_bid(state, &input, ctx),
        UiEvent::ClearBid => Ok(Transition::new(state.clone())
            .effect(Effect::ClearBidInput)
            .notify(Notification::info("Bid cleared"))),
        UiEvent::RevealWinner => reveal_winner(state, ctx),
        UiEvent::BidConfirmed {
            listing_id,
            encrypted_bid,
        } => Ok(confirm_bid(state, listing_id, encrypted_bid, ctx)),
        UiEvent::WinnerDecrypted => Ok(decrypt_winner(state, ctx)),
    }
}

/// Disconnected -> Connected
/// 외부 검증 없이 임의의 주소와 잔액을 만든다.
fn connect_wallet(state: &AuctionState, ctx: &Context<'_>) -> Transition {
    let mut next = state.clone();
    next.session.connected = true;
    next.session.wallet_address = Some(random_address(ctx.rng));
    next.session.balance = Some(format!("{:.3}", random_amount(ctx.rng, BALANCE_UPPER)));

    Transition::new(next).notify(Notification::success("Wallet connected successfully!"))
}

/// Idle -> Encrypted
fn encrypt(state: &AuctionState, input: &str) -> MarketResult<Transition> {
    let value = input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| MarketError::validation("Please enter a valid number"))?;
    let token = codec::encode(value)?;

    let mut next = state.clone();
    next.plaintext = Some(value);
    next.ciphertext = Some(token);

    Ok(Transition::new(next).notify(Notification::success("Value encrypted successfully!")))
}

fn copy_ciphertext(state: &AuctionState) -> MarketResult<Transition> {
    let token = state
        .ciphertext
        .as_ref()
        .ok_or_else(|| MarketError::validation("No ciphertext to copy"))?;

    Ok(Transition::new(state.clone())
        .effect(Effect::CopyToClipboard(token.to_string()))
        .notify(Notification::success("Ciphertext copied to clipboard!")))
}

fn select_listing(state: &AuctionState, listing_id: u64) -> MarketResult<Transition> {
    let listing = state
        .catalog
        .get(listing_id)
        .ok_or(MarketError::ListingNotFound(listing_id))?;
    let message = format!("Selected {} for bidding", listing.name);

    let mut next = state.clone();
    next.selected_listing = Some(listing_id);
    Ok(Transition::new(next).notify(Notification::info(message)))
}

/// Encrypted -> Submitted
fn submit_bid(state: &AuctionState, input: &str, ctx: &Context<'_>) -> MarketResult<Transition> {
    if !state.session.connected || state.session.wallet_address.is_none() {
        return Err(MarketError::NotAuthorized);
    }

    let ciphertext = input.trim();
    if ciphertext.is_empty() || !ciphertext.starts_with(TOKEN_PREFIX) {
        return Err(MarketError::validation("Please enter a valid encrypted bid"));
    }

    Ok(Transition::new(state.clone())
        .notify(Notification::info("Submitting encrypted bid..."))
        .effect(Effect::Schedule {
            delay: ctx.delays.submit,
            event: UiEvent::BidConfirmed {
                listing_id: state.selected_listing,
                encrypted_bid: ciphertext.to_string(),
            },
        }))
}

/// 입찰자는 지연이 끝난 시점의 지갑 주소
fn confirm_bid(
    state: &AuctionState,
    listing_id: Option<u64>,
    encrypted_bid: String,
    ctx: &Context<'_>,
) -> Transition {
    let mut next = state.clone();
    next.timeline.push(TimelineEntry {
        id: next.next_bid_id,
        listing_id,
        bidder: state.session.wallet_address.clone().unwrap_or_default(),
        encrypted_bid,
        timestamp: ctx.now.timestamp_millis(),
    });
    next.next_bid_id += 1;

    Transition::new(next)
        .effect(Effect::ClearBidInput)
        .notify(Notification::success("Encrypted bid submitted successfully!"))
}

/// Submitted -> Winner Revealed
fn reveal_winner(state: &AuctionState, ctx: &Context<'_>) -> MarketResult<Transition> {
    if !state.session.connected {
        return Err(MarketError::NotAuthorized);
    }

    Ok(Transition::new(state.clone())
        .notify(Notification::info(
            "Decrypting winner... This may take a moment",
        ))
        .effect(Effect::Schedule {
            delay: ctx.delays.reveal,
            event: UiEvent::WinnerDecrypted,
        }))
}

/// 기록된 입찰과 무관한 임의의 낙찰 결과
fn decrypt_winner(state: &AuctionState, ctx: &Context<'_>) -> Transition {
    let mut next = state.clone();
    next.winner = Some(Winner {
        address: random_address(ctx.rng),
        winning_bid: random_amount(ctx.rng, WINNING_BID_UPPER),
    });

    Transition::new(next).notify(Notification::success("Winner decrypted successfully!"))
}
// endregion: --- Transition

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marketplace::seed::seed_catalog;
    use crate::random::SeededRandom;
    use crate::simulation::events::NotificationLevel;
    use crate::simulation::state::TIMELINE_CAPACITY;
    use std::sync::Arc;

    fn initial_state() -> AuctionState {
        AuctionState::new(Arc::new(seed_catalog().unwrap()))
    }

    fn run(state: &AuctionState, event: UiEvent, rng: &SeededRandom) -> MarketResult<Transition> {
        let ctx = Context {
            rng,
            now: Utc::now(),
            delays: SimulationDelays::default(),
        };
        transition(state, event, &ctx)
    }

    fn connected(rng: &SeededRandom) -> AuctionState {
        run(&initial_state(), UiEvent::ConnectWallet, rng)
            .unwrap()
            .state
    }

    fn scheduled(effects: &[Effect]) -> Vec<(std::time::Duration, UiEvent)> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::Schedule { delay, event } => Some((*delay, event.clone())),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_connect_generates_address_and_balance() {
        let rng = SeededRandom::new(1);
        let t = run(&initial_state(), UiEvent::ConnectWallet, &rng).unwrap();

        assert!(t.state.session.connected);
        let address = t.state.session.wallet_address.clone().unwrap();
        assert_eq!(address.len(), 42);
        assert!(address.starts_with("0x"));
        let balance: f64 = t.state.session.balance.clone().unwrap().parse().unwrap();
        assert!((0.0..10.0).contains(&balance));
        assert_eq!(
            t.effects,
            vec![Effect::Notify(Notification::success(
                "Wallet connected successfully!"
            ))]
        );
    }

    #[test]
    fn test_encrypt_stores_token() {
        let rng = SeededRandom::new(1);
        let t = run(
            &initial_state(),
            UiEvent::Encrypt {
                input: " 3.14159 ".to_string(),
            },
            &rng,
        )
        .unwrap();

        assert_eq!(t.state.plaintext, Some(3.14159));
        assert_eq!(
            t.state.ciphertext.unwrap().as_str(),
            format!("0x{}c45", "0".repeat(61))
        );
    }

    #[test]
    fn test_encrypt_rejects_non_numbers_without_changing_state() {
        let rng = SeededRandom::new(1);
        let state = initial_state();
        for input in ["", "abc", "NaN", "inf"] {
            let err = run(
                &state,
                UiEvent::Encrypt {
                    input: input.to_string(),
                },
                &rng,
            )
            .unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid number");
        }
        assert!(matches!(
            run(&state, UiEvent::Encrypt { input: "-2".to_string() }, &rng),
            Err(MarketError::Validation(_))
        ));
    }

    #[test]
    fn test_copy_requires_ciphertext() {
        let rng = SeededRandom::new(1);
        let err = run(&initial_state(), UiEvent::CopyCiphertext, &rng).unwrap_err();
        assert_eq!(err.to_string(), "No ciphertext to copy");

        let encrypted = run(
            &initial_state(),
            UiEvent::Encrypt {
                input: "1".to_string(),
            },
            &rng,
        )
        .unwrap()
        .state;
        let t = run(&encrypted, UiEvent::CopyCiphertext, &rng).unwrap();
        let token = encrypted.ciphertext.unwrap().into_inner();
        assert!(t.effects.contains(&Effect::CopyToClipboard(token)));
    }

    #[test]
    fn test_select_listing() {
        let rng = SeededRandom::new(1);
        let t = run(
            &initial_state(),
            UiEvent::SelectListing { listing_id: 3 },
            &rng,
        )
        .unwrap();
        assert_eq!(t.state.selected_product().map(|l| l.name.as_str()), Some("AI Model"));
        assert_eq!(
            t.effects,
            vec![Effect::Notify(Notification::info(
                "Selected AI Model for bidding"
            ))]
        );

        assert!(matches!(
            run(&initial_state(), UiEvent::SelectListing { listing_id: 42 }, &rng),
            Err(MarketError::ListingNotFound(42))
        ));
    }

    #[test]
    fn test_submit_while_disconnected_is_not_authorized() {
        let rng = SeededRandom::new(1);
        let result = run(
            &initial_state(),
            UiEvent::SubmitBid {
                input: "0xabc123".to_string(),
            },
            &rng,
        );
        assert!(matches!(result, Err(MarketError::NotAuthorized)));
    }

    #[test]
    fn test_submit_validates_ciphertext() {
        let rng = SeededRandom::new(1);
        let state = connected(&rng);
        for input in ["", "  ", "abc123", "1x00"] {
            let err = run(
                &state,
                UiEvent::SubmitBid {
                    input: input.to_string(),
                },
                &rng,
            )
            .unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid encrypted bid");
        }
    }

    #[test]
    fn test_submit_schedules_confirmation() {
        let rng = SeededRandom::new(1);
        let state = connected(&rng);

        let t = run(
            &state,
            UiEvent::SubmitBid {
                input: "0xabc123".to_string(),
            },
            &rng,
        )
        .unwrap();

        // 제출 즉시 타임라인은 변하지 않는다
        assert!(t.state.timeline.is_empty());
        assert_eq!(
            t.effects.first(),
            Some(&Effect::Notify(Notification::info(
                "Submitting encrypted bid..."
            )))
        );
        assert_eq!(
            scheduled(&t.effects),
            vec![(
                std::time::Duration::from_millis(2000),
                UiEvent::BidConfirmed {
                    listing_id: None,
                    encrypted_bid: "0xabc123".to_string(),
                }
            )]
        );
    }

    #[test]
    fn test_confirmations_keep_five_newest() {
        let rng = SeededRandom::new(1);
        let mut state = connected(&rng);
        for i in 1..=7u64 {
            let t = run(
                &state,
                UiEvent::BidConfirmed {
                    listing_id: Some(1),
                    encrypted_bid: format!("0x{i:x}"),
                },
                &rng,
            )
            .unwrap();
            assert!(t.effects.contains(&Effect::ClearBidInput));
            state = t.state;
        }

        assert_eq!(state.timeline.len(), TIMELINE_CAPACITY);
        let ids: Vec<u64> = state.timeline.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 3]);
        assert_eq!(state.next_bid_id, 8);
    }

    #[test]
    fn test_confirmation_records_wallet_at_confirm_time() {
        let rng = SeededRandom::new(1);
        let first = connected(&rng);
        let submitted = run(
            &first,
            UiEvent::SubmitBid {
                input: "0xabc123".to_string(),
            },
            &rng,
        )
        .unwrap();
        let (_, confirmation) = scheduled(&submitted.effects).remove(0);

        // 지연 중 재연결하면 새 주소가 발급된다
        let reconnected = run(&submitted.state, UiEvent::ConnectWallet, &rng)
            .unwrap()
            .state;
        let old_wallet = first.session.wallet_address.unwrap();
        let new_wallet = reconnected.session.wallet_address.clone().unwrap();
        assert_ne!(old_wallet, new_wallet);

        let t = run(&reconnected, confirmation, &rng).unwrap();
        assert_eq!(t.state.timeline.newest().unwrap().bidder, new_wallet);
    }

    #[test]
    fn test_reveal_requires_connection() {
        let rng = SeededRandom::new(1);
        assert!(matches!(
            run(&initial_state(), UiEvent::RevealWinner, &rng),
            Err(MarketError::NotAuthorized)
        ));

        let t = run(&connected(&rng), UiEvent::RevealWinner, &rng).unwrap();
        assert_eq!(
            scheduled(&t.effects),
            vec![(
                std::time::Duration::from_millis(3000),
                UiEvent::WinnerDecrypted
            )]
        );
        assert!(t.state.winner.is_none());
    }

    #[test]
    fn test_winner_decrypted_is_random_in_range() {
        let rng = SeededRandom::new(9);
        let t = run(&connected(&rng), UiEvent::WinnerDecrypted, &rng).unwrap();
        let winner = t.state.winner.unwrap();
        assert_eq!(winner.address.len(), 42);
        assert!((0.0..5.0).contains(&winner.winning_bid));
        assert!(winner.display_amount().ends_with(" ETH"));
        assert!(matches!(
            t.effects.as_slice(),
            [Effect::Notify(n)] if n.level == NotificationLevel::Success
        ));
    }

    #[test]
    fn test_clear_bid() {
        let rng = SeededRandom::new(1);
        let t = run(&initial_state(), UiEvent::ClearBid, &rng).unwrap();
        assert_eq!(
            t.effects,
            vec![
                Effect::ClearBidInput,
                Effect::Notify(Notification::info("Bid cleared"))
            ]
        );
    }
}
