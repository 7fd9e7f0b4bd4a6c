//! Create, move and reject.

use tracing::{debug, info};

use super::msgs::{
    CanPlayMove, MsgCreateGame, MsgCreateGameResponse, MsgPlayMove, MsgPlayMoveResponse,
    MsgRejectGame, MsgRejectGameResponse,
};
use super::{Receipt, Registry};
use crate::core::{Color, Event, Pos, RegistryError, Timestamp, Winner};
use crate::escrow::Ledger;
use crate::rules::BoardEngine;
use crate::store::{fifo, GameRecord, GameStore};

impl<L, B, S> Registry<L, B, S>
where
    L: Ledger,
    B: BoardEngine,
    S: GameStore + Clone,
{
    /// Register a new game at the FIFO tail. No funds move.
    pub fn create_game(
        &mut self,
        msg: MsgCreateGame,
        now: Timestamp,
    ) -> Result<Receipt<MsgCreateGameResponse>, RegistryError> {
        msg.validate_basic()?;

        self.transact(|tx| {
            let index = tx.next.allocate();
            let denom = msg
                .token
                .unwrap_or_else(|| tx.config.native_denom.clone());

            let mut game = GameRecord {
                creator: msg.creator,
                index,
                board: tx.engine.initial_board(),
                turn: Color::Black,
                red: msg.red,
                black: msg.black,
                move_count: 0,
                before_id: None,
                after_id: None,
                deadline: now.after(tx.config.max_turn_duration),
                winner: Winner::None,
                wager: msg.wager,
                denom,
                black_paid: false,
                red_paid: false,
            };
            fifo::append(&mut tx.store, &mut tx.next, &mut game)?;
            tx.store.set(&game)?;

            info!(
                game = %index,
                red = %game.red,
                black = %game.black,
                wager = %game.wager_coin(),
                "game created"
            );
            tx.emit(Event::GameCreated {
                creator: game.creator,
                index,
                red: game.red,
                black: game.black,
                wager: game.wager,
                denom: game.denom,
            });

            Ok(MsgCreateGameResponse {
                id_value: index.to_string(),
            })
        })
    }

    /// Play one move. The mover antes first if they have not yet.
    ///
    /// A move that ends the game pays the whole pot to the winner and
    /// removes the game.
    pub fn play_move(
        &mut self,
        msg: MsgPlayMove,
        now: Timestamp,
    ) -> Result<Receipt<MsgPlayMoveResponse>, RegistryError> {
        msg.validate_basic()?;

        self.transact(|tx| {
            let mut game = tx.load(&msg.id_value)?;
            let index = game.index;
            if !game.is_active() {
                return Err(RegistryError::invalid_transition(index, "game is already finished"));
            }
            let mover = game
                .color_of(&msg.creator)
                .ok_or_else(|| RegistryError::Unauthorized {
                    caller: msg.creator.clone(),
                    game: index,
                })?;
            if game.turn != mover {
                return Err(RegistryError::invalid_transition(index, "player tried to play out of turn"));
            }

            let outcome = tx
                .engine
                .apply_move(&game.board, msg.from(), msg.to(), mover)
                .map_err(|source| RegistryError::IllegalMove { game: index, source })?;

            if !game.has_paid(mover) {
                let ante = game.wager_coin();
                tx.collect_wager(&msg.creator, &ante)?;
                game.set_paid(mover, true);
            }

            game.board = outcome.board;
            game.turn = mover.opponent();
            game.move_count += 1;
            // Never pull a deadline in: the queue relies on it only moving forward.
            game.deadline = game.deadline.max(now.after(tx.config.max_turn_duration));

            let winner = outcome.winner.map(Winner::from).unwrap_or_default();
            debug!(
                game = %index,
                mover = %mover,
                from = %msg.from(),
                to = %msg.to(),
                captured = ?outcome.captured,
                moves = game.move_count,
                "move played"
            );
            tx.emit(Event::MovePlayed {
                creator: msg.creator.clone(),
                index,
                captured: outcome.captured,
                winner,
            });

            match outcome.winner {
                Some(color) => {
                    let pot = game.pot();
                    let champion = game.player(color).clone();
                    tx.payout(&champion, &pot)?;
                    game.winner = winner;
                    tx.retire(&mut game)?;
                    info!(game = %index, winner = %winner, pot = %pot, "game won");
                }
                None => {
                    if tx.config.requeue_on_move {
                        fifo::requeue(&mut tx.store, &mut tx.next, &mut game)?;
                    }
                    tx.store.set(&game)?;
                }
            }

            let (captured_x, captured_y) = match outcome.captured {
                Some(Pos { x, y }) => (i64::from(x), i64::from(y)),
                None => (-1, -1),
            };
            Ok(MsgPlayMoveResponse {
                id_value: index.to_string(),
                captured_x,
                captured_y,
                winner: winner.symbol().to_string(),
            })
        })
    }

    /// Decline a game before having moved in it. Every collected ante goes
    /// back to its owner.
    pub fn reject_game(
        &mut self,
        msg: MsgRejectGame,
    ) -> Result<Receipt<MsgRejectGameResponse>, RegistryError> {
        msg.validate_basic()?;

        self.transact(|tx| {
            let mut game = tx.load(&msg.id_value)?;
            let index = game.index;
            let color = game
                .color_of(&msg.creator)
                .ok_or_else(|| RegistryError::Unauthorized {
                    caller: msg.creator.clone(),
                    game: index,
                })?;
            if game.has_moved(color) {
                return Err(RegistryError::invalid_transition(
                    index,
                    format!("{color} has already played"),
                ));
            }

            tx.settle_void(&game)?;
            tx.retire(&mut game)?;

            info!(game = %index, by = %msg.creator, moves = game.move_count, "game rejected");
            tx.emit(Event::GameRejected {
                creator: msg.creator,
                index,
            });
            Ok(MsgRejectGameResponse {})
        })
    }

    /// Dry-run a move for `player` without touching any state.
    ///
    /// A missing game is an error; every other refusal is an answer.
    pub fn can_play_move(
        &self,
        id_value: &str,
        player: Color,
        from: Pos,
        to: Pos,
    ) -> Result<CanPlayMove, RegistryError> {
        let game = self
            .game_by_id(id_value)?
            .ok_or_else(|| RegistryError::not_found(id_value))?;

        if !game.is_active() {
            return Ok(CanPlayMove::no("game is already finished"));
        }
        if game.turn != player {
            return Ok(CanPlayMove::no("player tried to play out of turn"));
        }
        Ok(match self.engine().apply_move(&game.board, from, to, player) {
            Ok(_) => CanPlayMove::yes(),
            Err(err) => CanPlayMove::no(format!("wrong move: {err}")),
        })
    }
}
