//! Create and move transitions through the public registry API.

use checkers_registry::core::{AccountId, Coin, Color, Denom, Pos, RegistryConfig, Timestamp, Winner};
use checkers_registry::escrow::{InMemoryBank, Ledger};
use checkers_registry::registry::{MsgCreateGame, MsgPlayMove, Registry};
use checkers_registry::rules::{BoardEngine, IllegalMove, MoveOutcome};
use checkers_registry::store::MemoryStore;
use checkers_registry::{Event, RegistryError};

const HOLDING: &str = "checkers-module";

fn t(secs: u64) -> Timestamp {
    Timestamp::from_secs(secs)
}

fn bank() -> InMemoryBank {
    InMemoryBank::new()
        .with_balance("bob", Coin::new(100, "stake"))
        .with_balance("carol", Coin::new(100, "stake"))
}

fn registry() -> Registry<InMemoryBank> {
    Registry::new(RegistryConfig::default(), bank())
}

fn stake<L: Ledger, B: BoardEngine>(registry: &Registry<L, B>, who: &str) -> u64 {
    registry
        .ledger()
        .balance(&AccountId::new(who), &Denom::new("stake"))
}

/// Engine that counts moves in the board string and declares a winner on
/// the second move.
struct SecondMoveDecides {
    winner_is_mover: bool,
}

impl BoardEngine for SecondMoveDecides {
    fn initial_board(&self) -> String {
        "0".to_string()
    }

    fn apply_move(
        &self,
        board: &str,
        _from: Pos,
        _to: Pos,
        mover: Color,
    ) -> Result<MoveOutcome, IllegalMove> {
        let played: u32 = board
            .parse()
            .map_err(|_| IllegalMove::BadBoard(board.to_string()))?;
        let played = played + 1;
        let winner = (played >= 2).then(|| {
            if self.winner_is_mover {
                mover
            } else {
                mover.opponent()
            }
        });
        Ok(MoveOutcome {
            board: played.to_string(),
            captured: None,
            winner,
        })
    }
}

fn decisive_registry(winner_is_mover: bool) -> Registry<InMemoryBank, SecondMoveDecides> {
    Registry::with_parts(
        RegistryConfig::default(),
        MemoryStore::new(),
        bank(),
        SecondMoveDecides { winner_is_mover },
    )
}

// =============================================================================
// Create
// =============================================================================

#[test]
fn test_create_stores_game_at_tail() {
    let mut registry = registry();
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(100))
        .unwrap();

    let game = registry.game_by_id("1").unwrap().unwrap();
    assert_eq!(game.turn, Color::Black);
    assert_eq!(game.move_count, 0);
    assert_eq!(game.winner, Winner::None);
    assert_eq!(game.deadline, t(100 + 24 * 60 * 60));
    assert_eq!(game.denom, Denom::new("stake"));
    assert!(!game.black_paid && !game.red_paid);

    let next = registry.next_game().unwrap();
    assert_eq!(next.id_value, 2);
    assert_eq!(next.fifo_head, Some(game.index));
    assert_eq!(next.fifo_tail, Some(game.index));

    // Nothing moves at creation.
    assert_eq!(stake(&registry, "bob"), 100);
    assert_eq!(stake(&registry, "carol"), 100);
}

#[test]
fn test_create_event_attributes() {
    let mut registry = registry();
    let receipt = registry
        .create_game(
            MsgCreateGame::new("alice", "bob", "carol", 11).with_token("gold"),
            t(0),
        )
        .unwrap();

    let events = receipt.stringify_events("checkers");
    assert_eq!(events.len(), 1);
    let attrs: Vec<(&str, &str)> = events[0]
        .attributes
        .iter()
        .map(|a| (a.key.as_str(), a.value.as_str()))
        .collect();
    assert_eq!(
        attrs,
        vec![
            ("module", "checkers"),
            ("action", "NewGameCreated"),
            ("Creator", "alice"),
            ("Index", "1"),
            ("Red", "bob"),
            ("Black", "carol"),
            ("Wager", "11"),
            ("Token", "gold"),
        ]
    );
}

#[test]
fn test_games_link_in_creation_order() {
    let mut registry = registry();
    for _ in 0..3 {
        registry
            .create_game(MsgCreateGame::new("alice", "bob", "carol", 1), t(0))
            .unwrap();
    }

    let order: Vec<u64> = registry
        .active_games()
        .unwrap()
        .iter()
        .map(|g| g.index.raw())
        .collect();
    assert_eq!(order, vec![1, 2, 3]);
}

// =============================================================================
// Moves
// =============================================================================

#[test]
fn test_first_moves_collect_antes() {
    let mut registry = registry();
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();

    let black = registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(10))
        .unwrap();
    assert_eq!(black.value.winner, "*");
    assert_eq!(black.value.captured_x, -1);
    assert_eq!(black.transfers().count(), 1);
    assert!(matches!(
        &black.events[0],
        Event::Transfer { sender, recipient, coin }
            if sender.as_str() == "carol" && recipient.as_str() == HOLDING && coin.amount == 11
    ));
    assert!(matches!(&black.events[1], Event::MovePlayed { .. }));

    let red = registry
        .play_move(MsgPlayMove::new("bob", "1", (0, 5), (1, 4)), t(20))
        .unwrap();
    assert_eq!(red.transfers().count(), 1);

    // Later moves do not ante again.
    let again = registry
        .play_move(MsgPlayMove::new("carol", "1", (2, 3), (3, 4)), t(30))
        .unwrap();
    assert_eq!(again.transfers().count(), 0);

    let game = registry.game_by_id("1").unwrap().unwrap();
    assert!(game.black_paid && game.red_paid);
    assert_eq!(game.move_count, 3);
    assert_eq!(game.turn, Color::Red);
    assert_eq!(game.deadline, t(30 + 24 * 60 * 60));
    assert_eq!(stake(&registry, HOLDING), 22);
    assert_eq!(stake(&registry, "bob"), 89);
    assert_eq!(stake(&registry, "carol"), 89);
}

#[test]
fn test_jump_reports_capture() {
    let mut registry = registry();
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 0), t(0))
        .unwrap();
    registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(1))
        .unwrap();
    registry
        .play_move(MsgPlayMove::new("bob", "1", (4, 5), (3, 4)), t(2))
        .unwrap();
    let jump = registry
        .play_move(MsgPlayMove::new("carol", "1", (2, 3), (4, 5)), t(3))
        .unwrap();

    assert_eq!((jump.value.captured_x, jump.value.captured_y), (3, 4));
    let attrs = &jump.stringify_events("checkers")[0].attributes;
    assert_eq!(attrs[4].value, "3");
    assert_eq!(attrs[5].value, "4");
}

#[test]
fn test_zero_wager_never_touches_ledger() {
    let mut registry = Registry::new(RegistryConfig::default(), InMemoryBank::new());
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 0), t(0))
        .unwrap();
    let receipt = registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(1))
        .unwrap();

    assert_eq!(receipt.transfers().count(), 0);
    assert!(registry.game_by_id("1").unwrap().unwrap().black_paid);
}

#[test]
fn test_move_errors_leave_state_untouched() {
    let mut registry = registry();
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();
    let before = registry.export_genesis().unwrap();

    let not_found = registry
        .play_move(MsgPlayMove::new("carol", "7", (1, 2), (2, 3)), t(1))
        .unwrap_err();
    assert!(matches!(not_found, RegistryError::NotFound { .. }));

    let stranger = registry
        .play_move(MsgPlayMove::new("alice", "1", (1, 2), (2, 3)), t(1))
        .unwrap_err();
    assert!(matches!(stranger, RegistryError::Unauthorized { .. }));

    let off_board = registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (9, 3)), t(1))
        .unwrap_err();
    assert!(matches!(off_board, RegistryError::InvalidRequest { .. }));

    assert_eq!(registry.export_genesis().unwrap(), before);
    assert_eq!(stake(&registry, "carol"), 100);
}

#[test]
fn test_insufficient_funds_aborts_move() {
    let bank = InMemoryBank::new().with_balance("carol", Coin::new(5, "stake"));
    let mut registry = Registry::new(RegistryConfig::default(), bank);
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();

    let err = registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(1))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InsufficientFunds { available: 5, .. }));
    assert!(err.is_ledger_failure());

    let game = registry.game_by_id("1").unwrap().unwrap();
    assert_eq!(game.move_count, 0);
    assert!(!game.black_paid);
    assert_eq!(stake(&registry, "carol"), 5);
}

// =============================================================================
// Decisive wins
// =============================================================================

#[test]
fn test_winning_move_pays_pot_and_removes_game() {
    let mut registry = decisive_registry(true);
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();
    registry
        .play_move(MsgPlayMove::new("carol", "1", (0, 0), (1, 1)), t(1))
        .unwrap();
    let win = registry
        .play_move(MsgPlayMove::new("bob", "1", (0, 0), (1, 1)), t(2))
        .unwrap();

    assert_eq!(win.value.winner, "r");
    // Ante, move, payout.
    assert_eq!(win.events.len(), 3);
    assert!(matches!(&win.events[0], Event::Transfer { sender, .. } if sender.as_str() == "bob"));
    assert!(matches!(
        &win.events[1],
        Event::MovePlayed { winner: Winner::Color(Color::Red), .. }
    ));
    assert!(matches!(
        &win.events[2],
        Event::Transfer { recipient, coin, .. } if recipient.as_str() == "bob" && coin.amount == 22
    ));

    assert!(registry.game_by_id("1").unwrap().is_none());
    let next = registry.next_game().unwrap();
    assert!(next.is_queue_empty());
    assert_eq!(next.fifo_tail, None);
    assert_eq!(stake(&registry, "bob"), 111);
    assert_eq!(stake(&registry, "carol"), 89);
    assert_eq!(stake(&registry, HOLDING), 0);
}

#[test]
fn test_failed_payout_reverses_ante() {
    let mut registry = decisive_registry(false);
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();
    registry
        .play_move(MsgPlayMove::new("carol", "1", (0, 0), (1, 1)), t(1))
        .unwrap();

    // Black would win on red's move, but black's account is frozen.
    let (config, store, mut bank, engine) = registry.into_parts();
    bank.block("carol");
    let mut registry = Registry::with_parts(config, store, bank, engine);
    let err = registry
        .play_move(MsgPlayMove::new("bob", "1", (0, 0), (1, 1)), t(2))
        .unwrap_err();
    assert!(matches!(err, RegistryError::InvalidAccount { .. }));

    let game = registry.game_by_id("1").unwrap().unwrap();
    assert_eq!(game.move_count, 1);
    assert!(!game.red_paid);
    assert_eq!(stake(&registry, "bob"), 100);
    assert_eq!(stake(&registry, HOLDING), 11);
}

// =============================================================================
// Queue order
// =============================================================================

#[test]
fn test_moves_keep_creation_order_by_default() {
    let mut registry = registry();
    for _ in 0..2 {
        registry
            .create_game(MsgCreateGame::new("alice", "bob", "carol", 1), t(0))
            .unwrap();
    }
    registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(5))
        .unwrap();

    let order: Vec<u64> = registry
        .active_games()
        .unwrap()
        .iter()
        .map(|g| g.index.raw())
        .collect();
    assert_eq!(order, vec![1, 2]);
}

#[test]
fn test_requeue_on_move_sends_game_to_tail() {
    let config = RegistryConfig::default().requeue_on_move();
    let mut registry = Registry::new(config, bank());
    for _ in 0..3 {
        registry
            .create_game(MsgCreateGame::new("alice", "bob", "carol", 1), t(0))
            .unwrap();
    }
    registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(5))
        .unwrap();

    let order: Vec<u64> = registry
        .active_games()
        .unwrap()
        .iter()
        .map(|g| g.index.raw())
        .collect();
    assert_eq!(order, vec![2, 3, 1]);

    let next = registry.next_game().unwrap();
    assert_eq!(next.fifo_head.map(|id| id.raw()), Some(2));
    assert_eq!(next.fifo_tail.map(|id| id.raw()), Some(1));
}

// =============================================================================
// Parts
// =============================================================================

#[test]
fn test_parts_reassemble_into_same_registry() {
    let mut registry = registry();
    registry
        .create_game(MsgCreateGame::new("alice", "bob", "carol", 11), t(0))
        .unwrap();
    registry
        .play_move(MsgPlayMove::new("carol", "1", (1, 2), (2, 3)), t(1))
        .unwrap();
    let before = registry.active_games().unwrap();

    let (config, store, bank, engine) = registry.into_parts();
    assert_eq!(bank.balance(&AccountId::new(HOLDING), &Denom::new("stake")), 11);
    let mut registry = Registry::with_parts(config, store, bank, engine);

    assert_eq!(registry.active_games().unwrap(), before);
    assert_eq!(registry.next_game().unwrap().id_value, 2);
    registry
        .play_move(MsgPlayMove::new("bob", "1", (0, 5), (1, 4)), t(2))
        .unwrap();
    assert_eq!(stake(&registry, HOLDING), 22);
}
