use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::deck::GameDeck;
use crate::domain::hand::{BettingRound, CommunityCards};
use crate::domain::player::Player;
use crate::domain::{PlayerId, TableId};
use crate::engine::errors::EngineError;
use crate::engine::side_pots::SidePot;

/// Индекс места за столом (0..max_players-1).
pub type SeatIndex = u8;

/// Допустимый размер стола.
pub const MIN_TABLE_PLAYERS: u8 = 2;
pub const MAX_TABLE_PLAYERS: u8 = 10;

/// Конфиг стола: блайнды, лимиты бай-ина, количество мест.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub max_players: u8,
}

impl TableConfig {
    pub fn new(
        small_blind: Chips,
        big_blind: Chips,
        min_buy_in: Chips,
        max_buy_in: Chips,
        max_players: u8,
    ) -> Self {
        Self {
            small_blind,
            big_blind,
            min_buy_in,
            max_buy_in,
            max_players,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.small_blind.is_zero() {
            return Err(EngineError::InvalidConfig("малый блайнд должен быть больше нуля".into()));
        }
        if self.big_blind.0 < self.small_blind.0.saturating_mul(2) {
            return Err(EngineError::InvalidConfig(format!(
                "большой блайнд {} должен быть не меньше двух малых ({})",
                self.big_blind, self.small_blind
            )));
        }
        if self.min_buy_in.is_zero() {
            return Err(EngineError::InvalidConfig("минимальный бай-ин должен быть больше нуля".into()));
        }
        if self.min_buy_in > self.max_buy_in {
            return Err(EngineError::InvalidConfig(format!(
                "минимальный бай-ин {} больше максимального {}",
                self.min_buy_in, self.max_buy_in
            )));
        }
        if !(MIN_TABLE_PLAYERS..=MAX_TABLE_PLAYERS).contains(&self.max_players) {
            return Err(EngineError::InvalidConfig(format!(
                "количество мест {} вне диапазона [{}, {}]",
                self.max_players, MIN_TABLE_PLAYERS, MAX_TABLE_PLAYERS
            )));
        }
        Ok(())
    }
}

/// Статус стола.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TableStatus {
    /// Ждём игроков (меньше двух с фишками).
    Waiting,
    /// Идёт раздача.
    InProgress,
    /// Ставки закончены, ждём распределения банка.
    Showdown,
    /// Банк распределён, можно запускать следующую раздачу.
    Complete,
}

/// Фишки игрока, который ушёл из-за стола посреди раздачи.
/// Остаются в банке, но права на банк не дают.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeadMoney {
    pub player_id: PlayerId,
    pub amount: Chips,
}

/// Основное состояние стола: конфиг, места, текущая раздача.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub id: TableId,
    pub creator: PlayerId,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<Player>>,

    pub status: TableStatus,
    pub current_round: BettingRound,
    /// Место дилера или None, если раздач ещё не было.
    pub dealer_position: Option<SeatIndex>,
    /// Чей ход. None: никто не должен ходить (раунд закрыт или раздачи нет).
    pub current_player_position: Option<SeatIndex>,
    /// Ставка, до которой нужно уравнять в текущем раунде.
    pub current_bet: Chips,
    /// Размер последнего полного повышения в текущем раунде.
    pub last_raise_amount: Chips,
    pub pot_total: Chips,
    pub players_acted_this_round: u8,
    /// Номер раздачи за этим столом (растёт в start_game).
    pub game_number: u64,

    pub deck: GameDeck,
    pub community: CommunityCards,
    pub blinds_posted: bool,
    pub hole_cards_dealt: bool,
    pub dead_money: Vec<DeadMoney>,
    /// Сайд-поты последнего распределения банка.
    pub side_pots: Vec<SidePot>,
    /// Seed, заданный через shuffle_deck между раздачами.
    pub pending_seed: Option<u64>,
    /// Хедз-ап: дилер ставит малый блайнд (иначе большой).
    pub heads_up_dealer_posts_small_blind: bool,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, creator: PlayerId, config: TableConfig) -> Self {
        let seats = vec![None; config.max_players as usize];
        Self {
            id,
            creator,
            config,
            seats,
            status: TableStatus::Waiting,
            current_round: BettingRound::PreFlop,
            dealer_position: None,
            current_player_position: None,
            current_bet: Chips::ZERO,
            last_raise_amount: Chips::ZERO,
            pot_total: Chips::ZERO,
            players_acted_this_round: 0,
            game_number: 0,
            deck: GameDeck::standard_52(),
            community: CommunityCards::default(),
            blinds_posted: false,
            hole_cards_dealt: false,
            dead_money: Vec::new(),
            side_pots: Vec::new(),
            pending_seed: None,
            heads_up_dealer_posts_small_blind: true,
        }
    }

    pub fn seated_count(&self) -> usize {
        self.players().count()
    }

    /// Сколько игроков может сыграть следующую раздачу (стек > 0).
    pub fn funded_count(&self) -> usize {
        self.players().filter(|p| !p.stack.is_zero()).count()
    }

    /// Идёт ли раздача (включая ожидание распределения банка).
    pub fn hand_running(&self) -> bool {
        matches!(self.status, TableStatus::InProgress | TableStatus::Showdown)
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.seats.iter().filter_map(|s| s.as_ref())
    }

    pub fn players_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.seats.iter_mut().filter_map(|s| s.as_mut())
    }

    pub fn player(&self, seat: SeatIndex) -> Option<&Player> {
        self.seats.get(seat as usize).and_then(|s| s.as_ref())
    }

    pub fn player_mut(&mut self, seat: SeatIndex) -> Option<&mut Player> {
        self.seats.get_mut(seat as usize).and_then(|s| s.as_mut())
    }

    pub fn seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.players()
            .find(|p| p.player_id == player_id)
            .map(|p| p.position)
    }

    /// Место игрока или ошибка, если его нет за столом.
    pub fn require_seat(&self, player_id: PlayerId) -> Result<SeatIndex, EngineError> {
        self.seat_of(player_id)
            .ok_or(EngineError::PlayerNotAtTable(player_id))
    }

    pub fn lowest_free_seat(&self) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|idx| idx as SeatIndex)
    }

    /// Игроки, ещё претендующие на банк, в порядке мест.
    pub fn contenders(&self) -> impl Iterator<Item = &Player> {
        self.players().filter(|p| p.is_contender())
    }

    /// Сумма всех внесённых в раздаче фишек (живые игроки + ушедшие).
    pub fn contributed_total(&self) -> Chips {
        let live: Chips = self.players().map(|p| p.total_contributed).sum();
        let dead: Chips = self.dead_money.iter().map(|d| d.amount).sum();
        live + dead
    }
}
