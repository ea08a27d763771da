use crate::error::ActionError;
use crate::round::{HandSide, PlayerTurn, Round, RoundPhase, Seat, SingleHandTurn, SplitHandTurn};
use crate::scheduler::{Scheduler, Step};
use crate::settlement::{handle_game_result, Outcome, RoundResult};
use crate::{Card, CoinLedger, Hand, Shoe, SoundEffect, SoundPlayer, TableRules, BLACKJACK};
use std::time::Duration;

/// A blackjack table for one player against the dealer.
///
/// The table owns the round, the shoe, the queue of paced steps, the coin
/// ledger and the sound player. Player actions either apply right away or
/// queue [`Step`]s; the caller waits [`Table::next_step_delay`] and then
/// calls [`Table::advance`] until the table is idle again.
#[derive(Debug)]
pub struct Table<L: CoinLedger, S: SoundPlayer> {
    rules: TableRules,
    round: Round,
    shoe: Shoe,
    scheduler: Scheduler,
    ledger: L,
    sound: S,
}

impl<L: CoinLedger, S: SoundPlayer> Table<L, S> {
    pub fn new(rules: TableRules, shoe: Shoe, ledger: L, mut sound: S) -> Self {
        sound.load_effects();
        Self {
            rules,
            round: Round::new(),
            shoe,
            scheduler: Scheduler::new(),
            ledger,
            sound,
        }
    }

    /// Table with a shoe of `rules.num_decks` decks shuffled from `seed`
    pub fn with_seed(rules: TableRules, seed: u64, ledger: L, sound: S) -> Self {
        let shoe = Shoe::new(rules.num_decks, seed);
        Self::new(rules, shoe, ledger, sound)
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase
    }

    pub fn current_bet(&self) -> u64 {
        self.round.bet
    }

    pub fn previous_bet(&self) -> u64 {
        self.round.previous_bet
    }

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn sound_mut(&mut self) -> &mut S {
        &mut self.sound
    }

    pub fn shoe_len(&self) -> usize {
        self.shoe.len()
    }

    pub fn dealer_visible_score(&self) -> u8 {
        self.round.dealer_visible_score()
    }

    pub fn result(&self) -> Option<&RoundResult> {
        self.round.result.as_ref()
    }

    /// Steps are still queued; player actions wait until they ran
    pub fn is_busy(&self) -> bool {
        !self.scheduler.is_idle()
    }

    pub fn can_hit(&self) -> bool {
        self.round.phase == RoundPhase::Playing && !self.is_busy()
    }

    pub fn can_stand(&self) -> bool {
        self.can_hit()
    }

    pub fn can_double(&self) -> bool {
        self.can_hit()
            && self
                .round
                .single()
                .is_some_and(|turn| turn.hand.len() == 2)
            && self.ledger.balance() >= self.round.bet
    }

    pub fn can_split(&self) -> bool {
        self.can_hit()
            && self
                .round
                .single()
                .is_some_and(|turn| turn.splitable && turn.hand.can_split())
            && self.ledger.balance() >= self.round.bet
    }

    // ── Betting ──

    pub fn place_bet(&mut self, amount: u64) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Betting)?;
        if amount == 0 {
            return Err(ActionError::InvalidBet(amount));
        }
        let wanted = self.round.bet.saturating_add(amount);
        self.ensure_coins(wanted)?;
        self.round.bet = wanted;
        Ok(())
    }

    pub fn remove_bet(&mut self, amount: u64) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Betting)?;
        if amount == 0 || amount > self.round.bet {
            return Err(ActionError::InvalidBet(amount));
        }
        self.round.bet -= amount;
        Ok(())
    }

    pub fn clear_bet(&mut self) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Betting)?;
        self.round.bet = 0;
        Ok(())
    }

    /// Put the previous round's stake back on the table
    pub fn rebet(&mut self) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Betting)?;
        if self.round.bet != 0 {
            return Err(ActionError::BetAlreadyPlaced);
        }
        let previous = self.round.previous_bet;
        if previous == 0 {
            return Err(ActionError::NoPreviousBet);
        }
        self.ensure_coins(previous)?;
        self.round.bet = previous;
        Ok(())
    }

    // ── Round ──

    /// Take the stake and queue the opening deal: player, dealer (face
    /// down), player, dealer.
    pub fn start_round(&mut self) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Betting)?;
        let bet = self.round.bet;
        if bet == 0 {
            return Err(ActionError::InvalidBet(bet));
        }
        self.ensure_coins(bet)?;

        self.ledger.decrease(bet);
        self.round.previous_bet = bet;
        self.round.phase = RoundPhase::Playing;
        self.round.turn = PlayerTurn::default();
        self.round.dealer = Hand::new();
        self.round.dealer_revealed = false;
        self.round.result = None;
        log::info!("Round started with bet {bet}, balance now {}", self.ledger.balance());

        let pace = self.rules.pace();
        self.scheduler.schedule(Duration::ZERO, Step::DealInitial(Seat::Player));
        self.scheduler.schedule(pace, Step::DealInitial(Seat::Dealer));
        self.scheduler.schedule(pace, Step::DealInitial(Seat::Player));
        self.scheduler.schedule(pace, Step::DealInitial(Seat::Dealer));
        self.scheduler.schedule(pace, Step::FinishDeal);
        Ok(())
    }

    pub fn hit(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        if self.round.is_split() {
            return Err(ActionError::HandIsSplit);
        }
        let card = self.draw_card().ok_or(ActionError::ShoeEmpty)?;

        let score = match self.single_mut() {
            Some(turn) => {
                turn.hand.add_card(card);
                turn.splitable = false;
                turn.hand.score
            }
            None => return Ok(()),
        };
        log::info!("Player hits {card}, has {score}");

        if score > BLACKJACK {
            self.round.dealer_revealed = true;
            self.finish_round();
        } else if score == BLACKJACK {
            self.begin_dealer_turn();
        }
        Ok(())
    }

    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        if self.round.is_split() {
            return Err(ActionError::HandIsSplit);
        }
        log::info!("Player stands");
        self.begin_dealer_turn();
        Ok(())
    }

    /// Match the stake, take exactly one card and let the dealer play
    pub fn double_down(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        match self.round.single() {
            Some(turn) if turn.hand.len() == 2 => {}
            Some(_) => return Err(ActionError::CannotDouble),
            None => return Err(ActionError::HandIsSplit),
        }
        let stake = self.round.bet;
        self.ensure_coins(stake)?;
        let card = self.draw_card().ok_or(ActionError::ShoeEmpty)?;

        self.ledger.decrease(stake);
        self.round.bet += stake;

        let score = match self.single_mut() {
            Some(turn) => {
                turn.hand.add_card(card);
                turn.splitable = false;
                turn.hand.score
            }
            None => return Ok(()),
        };
        log::info!(
            "Player doubles to {} and draws {card}, has {score}",
            self.round.bet
        );

        if score > BLACKJACK {
            self.round.dealer_revealed = true;
            self.finish_round();
        } else {
            self.begin_dealer_turn();
        }
        Ok(())
    }

    /// Turn the pair into two hands, each carrying the original stake
    pub fn split(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        let (first, second) = match self.round.single() {
            Some(turn) if turn.splitable && turn.hand.can_split() => {
                (turn.hand.cards[0], turn.hand.cards[1])
            }
            Some(_) => return Err(ActionError::NotSplittable),
            None => return Err(ActionError::HandIsSplit),
        };
        let stake = self.round.bet;
        self.ensure_coins(stake)?;

        self.ledger.decrease(stake);
        self.round.bet += stake;
        self.round.turn = PlayerTurn::Split(SplitHandTurn::new(
            Hand::from_cards(vec![first]),
            Hand::from_cards(vec![second]),
        ));
        self.sound.play(SoundEffect::Flip);
        log::info!("Player splits {first} / {second}, bet now {}", self.round.bet);

        let pace = self.rules.pace();
        self.scheduler.schedule(pace * 2, Step::DealSplit(HandSide::Left));
        self.scheduler.schedule(pace, Step::DealSplit(HandSide::Right));
        self.scheduler.schedule(pace, Step::CheckSplit);
        Ok(())
    }

    pub fn hit_split_hand(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        let already_resolved = match self.round.split() {
            Some(turn) => turn.active_hand().is_resolved(),
            None => return Err(ActionError::NotSplit),
        };
        if already_resolved {
            self.advance_split_hand();
            return Ok(());
        }
        let card = self.draw_card().ok_or(ActionError::ShoeEmpty)?;

        let (side, score) = match self.split_mut() {
            Some(turn) => {
                turn.active_hand_mut().add_card(card);
                (turn.active, turn.active_hand().score)
            }
            None => return Ok(()),
        };
        log::info!("Player hits {} hand with {card}, has {score}", side.label());

        if score >= BLACKJACK {
            self.advance_split_hand();
        }
        Ok(())
    }

    pub fn stand_split_hand(&mut self) -> Result<(), ActionError> {
        self.expect_player_turn()?;
        let side = match self.round.split() {
            Some(turn) => turn.active,
            None => return Err(ActionError::NotSplit),
        };
        log::info!("Player stands on {} hand", side.label());
        match side {
            HandSide::Left => {
                if let Some(turn) = self.split_mut() {
                    turn.active = HandSide::Right;
                }
            }
            HandSide::Right => self.begin_dealer_turn(),
        }
        Ok(())
    }

    /// Tear the round down and return to betting. Queued steps are
    /// cancelled; a stake already on an unfinished round is forfeited.
    pub fn reset(&mut self) {
        let dropped = self.scheduler.cancel_all();
        if matches!(self.round.phase, RoundPhase::Playing | RoundPhase::Dealer) {
            log::warn!(
                "Abandoning round in {:?} with bet {} ({dropped} pending steps dropped)",
                self.round.phase,
                self.round.bet
            );
        }
        self.round.reset();
        self.shoe.refill_if_below(self.rules.refill_threshold);
    }

    // ── Pacing ──

    /// How long to wait before calling [`Table::advance`]
    pub fn next_step_delay(&self) -> Option<Duration> {
        self.scheduler.next_delay()
    }

    /// Apply the next queued step. Returns false when nothing was queued.
    pub fn advance(&mut self) -> bool {
        let Some(pending) = self.scheduler.pop_next() else {
            return false;
        };
        if !self.scheduler.is_current(&pending) {
            log::debug!("Dropping step {:?} of a cancelled round", pending.step);
            return true;
        }
        match pending.step {
            Step::DealInitial(seat) => self.deal_initial(seat),
            Step::FinishDeal => self.finish_deal(),
            Step::DealSplit(side) => self.deal_split(side),
            Step::CheckSplit => self.check_split(),
            Step::DealerTurn => self.dealer_turn(),
        }
        true
    }

    /// Run every queued step back to back, ignoring delays
    pub fn run_until_idle(&mut self) -> usize {
        let mut applied = 0;
        while self.advance() {
            applied += 1;
        }
        applied
    }

    // ── Deferred steps ──

    fn deal_initial(&mut self, seat: Seat) {
        if self.round.phase != RoundPhase::Playing {
            return;
        }
        let Some(card) = self.draw_card() else {
            log::warn!("No card for the opening deal, skipping");
            return;
        };
        match seat {
            Seat::Player => {
                if let Some(turn) = self.single_mut() {
                    turn.hand.add_card(card);
                }
            }
            Seat::Dealer => self.round.dealer.add_card(card),
        }
    }

    fn finish_deal(&mut self) {
        if self.round.phase != RoundPhase::Playing {
            return;
        }
        let Some(turn) = self.single_mut() else {
            return;
        };
        if turn.hand.score == BLACKJACK {
            log::info!("Player has blackjack");
            self.round.dealer_revealed = true;
            self.finish_round();
        } else if turn.hand.can_split() {
            turn.splitable = true;
        }
    }

    fn deal_split(&mut self, side: HandSide) {
        if self.round.phase != RoundPhase::Playing || !self.round.is_split() {
            return;
        }
        let Some(card) = self.draw_card() else {
            log::warn!("No card for the {} split hand, skipping", side.label());
            return;
        };
        if let Some(turn) = self.split_mut() {
            turn.hand_mut(side).add_card(card);
        }
    }

    fn check_split(&mut self) {
        if self.round.phase != RoundPhase::Playing {
            return;
        }
        let Some(turn) = self.split_mut() else {
            return;
        };
        if turn.left.score == BLACKJACK && turn.right.score == BLACKJACK {
            self.begin_dealer_turn();
        } else if turn.left.score == BLACKJACK {
            turn.active = HandSide::Right;
        }
    }

    /// Draw while under the stand value, one card per step
    fn dealer_turn(&mut self) {
        if self.round.phase != RoundPhase::Dealer {
            return;
        }
        if self.round.dealer.is_blackjack() {
            log::info!("Dealer has blackjack");
            self.finish_round();
            return;
        }
        if self.round.dealer.score >= self.rules.dealer_stands_on {
            self.finish_round();
            return;
        }
        match self.draw_card() {
            Some(card) => {
                self.round.dealer.add_card(card);
                log::info!("Dealer draws {card}, has {}", self.round.dealer.score);
                self.scheduler.schedule(self.rules.pace(), Step::DealerTurn);
            }
            None => {
                log::warn!("Shoe exhausted during dealer turn, settling as is");
                self.finish_round();
            }
        }
    }

    // ── Helpers ──

    /// Move on from a resolved split hand: to the right hand if it still
    /// takes cards, otherwise to the dealer.
    fn advance_split_hand(&mut self) {
        let Some(turn) = self.split_mut() else {
            return;
        };
        if turn.active == HandSide::Right || turn.both_resolved() {
            self.begin_dealer_turn();
        } else {
            turn.active = HandSide::Right;
        }
    }

    fn begin_dealer_turn(&mut self) {
        self.round.phase = RoundPhase::Dealer;
        self.round.dealer_revealed = true;
        log::info!("Dealer reveals, has {}", self.round.dealer.score);
        self.scheduler.schedule(self.rules.pace(), Step::DealerTurn);
    }

    /// Settle every player hand against the dealer, using the same rules
    /// for a single hand and for each split hand.
    fn resolve_against_dealer(&self) -> RoundResult {
        let dealer = self.round.dealer.score;
        match &self.round.turn {
            PlayerTurn::Single(turn) => {
                RoundResult::Single(handle_game_result(turn.hand.score, dealer, self.round.bet))
            }
            PlayerTurn::Split(turn) => {
                let stake = self.round.bet / 2;
                RoundResult::Split {
                    left: handle_game_result(turn.left.score, dealer, stake),
                    right: handle_game_result(turn.right.score, dealer, stake),
                }
            }
        }
    }

    fn finish_round(&mut self) {
        let result = self.resolve_against_dealer();
        let credit = result.total_credit();
        if credit > 0 {
            self.ledger.add(credit);
        }
        self.sound.play(outcome_sound(&result));
        log::info!(
            "Round finished: {} (balance {})",
            result.message(),
            self.ledger.balance()
        );
        self.round.result = Some(result);
        self.round.phase = RoundPhase::Finished;
    }

    fn draw_card(&mut self) -> Option<Card> {
        let card = self.shoe.draw()?;
        self.sound.play(SoundEffect::Flip);
        Some(card)
    }

    fn single_mut(&mut self) -> Option<&mut SingleHandTurn> {
        match &mut self.round.turn {
            PlayerTurn::Single(turn) => Some(turn),
            PlayerTurn::Split(_) => None,
        }
    }

    fn split_mut(&mut self) -> Option<&mut SplitHandTurn> {
        match &mut self.round.turn {
            PlayerTurn::Split(turn) => Some(turn),
            PlayerTurn::Single(_) => None,
        }
    }

    fn expect_phase(&self, expected: RoundPhase) -> Result<(), ActionError> {
        if self.round.phase != expected {
            log::debug!("Rejected action in {:?}", self.round.phase);
            return Err(ActionError::WrongPhase {
                expected,
                actual: self.round.phase,
            });
        }
        Ok(())
    }

    fn expect_player_turn(&self) -> Result<(), ActionError> {
        self.expect_phase(RoundPhase::Playing)?;
        if self.is_busy() {
            log::debug!("Rejected action while dealing");
            return Err(ActionError::Busy);
        }
        Ok(())
    }

    fn ensure_coins(&self, needed: u64) -> Result<(), ActionError> {
        let available = self.ledger.balance();
        if needed > available {
            log::debug!("Rejected action: need {needed} coins, have {available}");
            return Err(ActionError::InsufficientCoins { needed, available });
        }
        Ok(())
    }
}

/// One sound per round: a win anywhere beats a push, a push beats a loss
fn outcome_sound(result: &RoundResult) -> SoundEffect {
    let outcomes: Vec<Outcome> = result.settlements().iter().map(|s| s.outcome).collect();
    if outcomes.contains(&Outcome::Win) {
        SoundEffect::Win
    } else if outcomes.contains(&Outcome::Push) {
        SoundEffect::Draw
    } else {
        SoundEffect::Lose
    }
}
