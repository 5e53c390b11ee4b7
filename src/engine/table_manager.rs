//! Реестр столов: хранит столы, сериализует переходы каждого стола,
//! разбирает команды и запросы API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, RwLock, TryLockError};

use tracing::warn;

use crate::api::{
    build_players_dto, build_table_view, Command, CommandResponse, Query, QueryResponse,
    TableCommand,
};
use crate::domain::{Chips, PlayerId, SeatIndex, Table, TableConfig, TableId};
use crate::engine::actions::PlayerAction;
use crate::engine::errors::EngineError;
use crate::engine::events::{EventLog, EventRecord, TableEvent};
use crate::engine::showdown::{HandResult, Payout};
use crate::engine::{betting, dealing, lifecycle, showdown};
use crate::infra::config::EngineConfig;
use crate::infra::ids::IdGenerator;

/// Внутренний объект: один стол + его журнал событий.
#[derive(Debug)]
pub struct ManagedTable {
    table: Table,
    log: EventLog,
}

impl ManagedTable {
    fn new(table: Table) -> Self {
        Self {
            table,
            log: EventLog::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn log(&self) -> &EventLog {
        &self.log
    }
}

/// Как ждать блокировку стола.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LockMode {
    Wait,
    /// Не ждать: если стол занят, `TableBusy`.
    Try,
}

type TableHandle = Arc<Mutex<ManagedTable>>;

/// Реестр столов.
///
/// - карта столов под `RwLock` держится только на время поиска/вставки;
/// - у каждого стола свой `Mutex`, переходы разных столов не мешают друг другу;
/// - переход выполняется на копии стола и фиксируется только при успехе.
pub struct TableRegistry {
    config: EngineConfig,
    ids: IdGenerator,
    tables: RwLock<HashMap<TableId, TableHandle>>,
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl TableRegistry {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ids: IdGenerator::new(),
            tables: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn table_count(&self) -> usize {
        self.tables.read().map(|t| t.len()).unwrap_or(0)
    }

    /// Все id столов по возрастанию.
    pub fn table_ids(&self) -> Vec<TableId> {
        let mut ids: Vec<TableId> = self
            .tables
            .read()
            .map(|t| t.keys().copied().collect())
            .unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    fn handle(&self, table_id: TableId) -> Result<TableHandle, EngineError> {
        let tables = self
            .tables
            .read()
            .map_err(|_| EngineError::LockPoisoned(table_id))?;
        tables
            .get(&table_id)
            .cloned()
            .ok_or(EngineError::TableNotFound(table_id))
    }

    fn lock<'a>(
        handle: &'a TableHandle,
        table_id: TableId,
        mode: LockMode,
    ) -> Result<MutexGuard<'a, ManagedTable>, EngineError> {
        match mode {
            LockMode::Wait => handle
                .lock()
                .map_err(|_| EngineError::LockPoisoned(table_id)),
            LockMode::Try => match handle.try_lock() {
                Ok(guard) => Ok(guard),
                Err(TryLockError::WouldBlock) => Err(EngineError::TableBusy(table_id)),
                Err(TryLockError::Poisoned(_)) => Err(EngineError::LockPoisoned(table_id)),
            },
        }
    }

    /// Выполнить переход стола атомарно: на копии, с фиксацией только при `Ok`.
    fn transition<T>(
        &self,
        table_id: TableId,
        mode: LockMode,
        op: impl FnOnce(&mut Table) -> Result<(T, Vec<TableEvent>), EngineError>,
    ) -> Result<T, EngineError> {
        let handle = self.handle(table_id)?;
        let mut guard = Self::lock(&handle, table_id, mode)?;

        let mut draft = guard.table.clone();
        match op(&mut draft) {
            Ok((value, events)) => {
                guard.table = draft;
                guard.log.extend(table_id, events);
                Ok(value)
            }
            Err(err) => {
                warn!(table_id, kind = ?err.kind(), error = %err, "transition rejected");
                Err(err)
            }
        }
    }

    /// Чтение стола под его блокировкой.
    pub fn read<T>(
        &self,
        table_id: TableId,
        f: impl FnOnce(&ManagedTable) -> T,
    ) -> Result<T, EngineError> {
        let handle = self.handle(table_id)?;
        let guard = Self::lock(&handle, table_id, LockMode::Wait)?;
        Ok(f(&guard))
    }

    // ===== Жизненный цикл =====

    /// Создать стол. Id выдаются монотонно, начиная с 1.
    pub fn create_table(
        &self,
        creator: PlayerId,
        config: TableConfig,
    ) -> Result<TableId, EngineError> {
        if let Err(err) = config.validate() {
            warn!(creator, error = %err, "table creation rejected");
            return Err(err);
        }

        let mut tables = self
            .tables
            .write()
            .map_err(|_| EngineError::LockPoisoned(0))?;
        let table_id = self.ids.next_table_id();
        let (table, event) = lifecycle::create_table(table_id, creator, config, &self.config)?;

        let mut managed = ManagedTable::new(table);
        managed.log.push(table_id, event);
        tables.insert(table_id, Arc::new(Mutex::new(managed)));

        Ok(table_id)
    }

    pub fn join_table(
        &self,
        table_id: TableId,
        player_id: PlayerId,
        buy_in: Chips,
    ) -> Result<SeatIndex, EngineError> {
        self.join_in(LockMode::Wait, table_id, player_id, buy_in)
    }

    fn join_in(
        &self,
        mode: LockMode,
        table_id: TableId,
        player_id: PlayerId,
        buy_in: Chips,
    ) -> Result<SeatIndex, EngineError> {
        self.transition(table_id, mode, |t| {
            let events = lifecycle::join_table(t, player_id, buy_in)?;
            let seat = t.require_seat(player_id)?;
            Ok((seat, events))
        })
    }

    /// Уйти из-за стола. Возвращает (возвращённый стек, оставленные в банке фишки).
    pub fn leave_table(
        &self,
        table_id: TableId,
        player_id: PlayerId,
    ) -> Result<(Chips, Chips), EngineError> {
        self.leave_in(LockMode::Wait, table_id, player_id)
    }

    fn leave_in(
        &self,
        mode: LockMode,
        table_id: TableId,
        player_id: PlayerId,
    ) -> Result<(Chips, Chips), EngineError> {
        self.transition(table_id, mode, |t| {
            let outcome = lifecycle::leave_table(t, player_id)?;
            Ok(((outcome.refunded, outcome.forfeited), outcome.events))
        })
    }

    pub fn start_game(&self, table_id: TableId) -> Result<(), EngineError> {
        self.start_in(LockMode::Wait, table_id)
    }

    fn start_in(&self, mode: LockMode, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(mode, table_id, |t| lifecycle::start_game(t, &self.config))
    }

    pub fn shuffle_deck(&self, table_id: TableId, seed: u64) -> Result<(), EngineError> {
        self.shuffle_in(LockMode::Wait, table_id, seed)
    }

    fn shuffle_in(&self, mode: LockMode, table_id: TableId, seed: u64) -> Result<(), EngineError> {
        self.events_only(mode, table_id, |t| {
            dealing::shuffle_deck(t, seed).map(|_| Vec::new())
        })
    }

    pub fn post_blinds(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, betting::post_blinds)
    }

    pub fn deal_hole_cards(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, dealing::deal_hole_cards)
    }

    pub fn deal_flop(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, dealing::deal_flop)
    }

    pub fn deal_turn(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, dealing::deal_turn)
    }

    pub fn deal_river(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, dealing::deal_river)
    }

    pub fn player_action(
        &self,
        table_id: TableId,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<(), EngineError> {
        self.action_in(LockMode::Wait, table_id, player_id, action)
    }

    fn action_in(
        &self,
        mode: LockMode,
        table_id: TableId,
        player_id: PlayerId,
        action: PlayerAction,
    ) -> Result<(), EngineError> {
        self.events_only(mode, table_id, |t| {
            betting::player_action(t, player_id, action)
        })
    }

    pub fn advance_betting_round(&self, table_id: TableId) -> Result<(), EngineError> {
        self.events_only(LockMode::Wait, table_id, betting::advance_betting_round)
    }

    pub fn distribute_pot(&self, table_id: TableId) -> Result<Vec<Payout>, EngineError> {
        self.distribute_in(LockMode::Wait, table_id)
    }

    fn distribute_in(&self, mode: LockMode, table_id: TableId) -> Result<Vec<Payout>, EngineError> {
        self.transition(table_id, mode, showdown::distribute_pot)
    }

    fn events_only(
        &self,
        mode: LockMode,
        table_id: TableId,
        op: impl FnOnce(&mut Table) -> Result<Vec<TableEvent>, EngineError>,
    ) -> Result<(), EngineError> {
        self.transition(table_id, mode, |t| op(t).map(|events| ((), events)))
    }

    // ===== Чтение =====

    /// Копия текущего состояния стола.
    pub fn table_snapshot(&self, table_id: TableId) -> Result<Table, EngineError> {
        self.read(table_id, |m| m.table.clone())
    }

    pub fn is_table_ready_to_start(&self, table_id: TableId) -> Result<bool, EngineError> {
        self.read(table_id, |m| lifecycle::is_table_ready_to_start(&m.table))
    }

    pub fn can_player_act(&self, table_id: TableId, player_id: PlayerId) -> Result<bool, EngineError> {
        self.read(table_id, |m| betting::can_player_act(&m.table, player_id))
    }

    pub fn check_round_complete(&self, table_id: TableId) -> Result<bool, EngineError> {
        self.read(table_id, |m| betting::check_round_complete(&m.table))
    }

    pub fn get_current_bet(&self, table_id: TableId) -> Result<Chips, EngineError> {
        self.read(table_id, |m| betting::get_current_bet(&m.table))
    }

    pub fn get_player_to_act(&self, table_id: TableId) -> Result<Option<PlayerId>, EngineError> {
        self.read(table_id, |m| betting::get_player_to_act(&m.table))
    }

    pub fn get_active_players(&self, table_id: TableId) -> Result<Vec<PlayerId>, EngineError> {
        self.read(table_id, |m| betting::get_active_players(&m.table))
    }

    pub fn evaluate_hands(&self, table_id: TableId) -> Result<Vec<HandResult>, EngineError> {
        self.read(table_id, |m| showdown::evaluate_hands(&m.table))?
    }

    // ===== События =====

    pub fn events(&self, table_id: TableId) -> Result<Vec<EventRecord>, EngineError> {
        self.read(table_id, |m| m.log.records().to_vec())
    }

    /// Забрать накопленные события стола.
    pub fn drain_events(&self, table_id: TableId) -> Result<Vec<EventRecord>, EngineError> {
        let handle = self.handle(table_id)?;
        let mut guard = Self::lock(&handle, table_id, LockMode::Wait)?;
        Ok(guard.log.drain())
    }

    /// Журнал стола в формате JSON Lines.
    pub fn events_json_lines(&self, table_id: TableId) -> Result<String, EngineError> {
        self.read(table_id, |m| m.log.to_json_lines())?
            .map_err(|e| EngineError::Serialization(e.to_string()))
    }

    // ===== Команды и запросы API =====

    /// Выполнить команду, дождавшись блокировки стола.
    pub fn execute(&self, command: Command) -> Result<CommandResponse, EngineError> {
        self.dispatch(command, LockMode::Wait)
    }

    /// Выполнить команду, только если стол свободен. Иначе `TableBusy`.
    pub fn try_execute(&self, command: Command) -> Result<CommandResponse, EngineError> {
        self.dispatch(command, LockMode::Try)
    }

    fn dispatch(&self, command: Command, mode: LockMode) -> Result<CommandResponse, EngineError> {
        let table_command = match command {
            Command::CreateTable(c) => {
                let table_id = self.create_table(c.creator, c.table_config())?;
                return Ok(CommandResponse::TableCreated { table_id });
            }
            Command::TableCommand(tc) => tc,
        };

        let table_id = table_command.table_id();
        match table_command {
            TableCommand::JoinTable(c) => self
                .join_in(mode, c.table_id, c.player_id, c.buy_in)
                .map(|seat| CommandResponse::Seated { seat }),
            TableCommand::LeaveTable(c) => self
                .leave_in(mode, c.table_id, c.player_id)
                .map(|(refunded, forfeited)| CommandResponse::Left { refunded, forfeited }),
            TableCommand::StartGame { .. } => self
                .start_in(mode, table_id)
                .map(|_| CommandResponse::Ok),
            TableCommand::ShuffleDeck { seed, .. } => self
                .shuffle_in(mode, table_id, seed)
                .map(|_| CommandResponse::Ok),
            TableCommand::PostBlinds { .. } => self
                .events_only(mode, table_id, betting::post_blinds)
                .map(|_| CommandResponse::Ok),
            TableCommand::DealHoleCards { .. } => self
                .events_only(mode, table_id, dealing::deal_hole_cards)
                .map(|_| CommandResponse::Ok),
            TableCommand::DealFlop { .. } => self
                .events_only(mode, table_id, dealing::deal_flop)
                .map(|_| CommandResponse::Ok),
            TableCommand::DealTurn { .. } => self
                .events_only(mode, table_id, dealing::deal_turn)
                .map(|_| CommandResponse::Ok),
            TableCommand::DealRiver { .. } => self
                .events_only(mode, table_id, dealing::deal_river)
                .map(|_| CommandResponse::Ok),
            TableCommand::PlayerAction(c) => self
                .action_in(mode, table_id, c.player_id, c.action)
                .map(|_| CommandResponse::Ok),
            TableCommand::AdvanceBettingRound { .. } => self
                .events_only(mode, table_id, betting::advance_betting_round)
                .map(|_| CommandResponse::Ok),
            TableCommand::DistributePot { .. } => self
                .distribute_in(mode, table_id)
                .map(|payouts| CommandResponse::PotDistributed { payouts }),
        }
    }

    /// Ответить на запрос "только чтение".
    pub fn query(&self, query: Query) -> Result<QueryResponse, EngineError> {
        let response = match query {
            Query::ListTables => {
                let mut views = Vec::new();
                for id in self.table_ids() {
                    views.push(self.read(id, |m| build_table_view(&m.table))?);
                }
                QueryResponse::Tables(views)
            }
            Query::GetTableInfo { table_id } => {
                QueryResponse::Table(self.read(table_id, |m| build_table_view(&m.table))?)
            }
            Query::GetTablePlayers { table_id, viewer } => {
                QueryResponse::Players(self.read(table_id, |m| build_players_dto(&m.table, viewer))?)
            }
            Query::IsTableReadyToStart { table_id } => {
                QueryResponse::Flag(self.is_table_ready_to_start(table_id)?)
            }
            Query::CanPlayerAct { table_id, player_id } => {
                QueryResponse::Flag(self.can_player_act(table_id, player_id)?)
            }
            Query::CheckRoundComplete { table_id } => {
                QueryResponse::Flag(self.check_round_complete(table_id)?)
            }
            Query::GetCurrentBet { table_id } => {
                QueryResponse::Chips(self.get_current_bet(table_id)?)
            }
            Query::GetPlayerToAct { table_id } => {
                QueryResponse::PlayerToAct(self.get_player_to_act(table_id)?)
            }
            Query::GetActivePlayers { table_id } => {
                QueryResponse::ActivePlayers(self.get_active_players(table_id)?)
            }
            Query::GetSidePots { table_id } => {
                QueryResponse::SidePots(self.read(table_id, |m| m.table.side_pots.clone())?)
            }
            Query::GetCommunityCards { table_id } => {
                QueryResponse::CommunityCards(self.read(table_id, |m| m.table.community.cards())?)
            }
            Query::EvaluateHands { table_id } => QueryResponse::Hands(self.evaluate_hands(table_id)?),
            Query::GetEvents { table_id } => QueryResponse::Events(self.events(table_id)?),
        };
        Ok(response)
    }
}
