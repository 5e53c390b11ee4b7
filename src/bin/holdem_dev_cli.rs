// src/bin/holdem_dev_cli.rs
//
// Dev-CLI: прогоняет через реестр хедз-ап раздачу до шоудауна и
// трёхстороннюю раздачу с all-in, печатает журнал событий в JSON Lines.
//
// Логи: RUST_LOG=holdem_engine=debug cargo run --bin holdem_dev_cli

use holdem_engine::api::{build_players_dto, build_table_view};
use holdem_engine::domain::{Chips, PlayerId, TableConfig, TableId, TableStatus};
use holdem_engine::engine::{EngineError, PlayerAction, TableRegistry};
use holdem_engine::eval::describe_hand;
use holdem_engine::infra::EngineConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("holdem_engine=info")),
        )
        .with_target(false)
        .init();

    let config = match std::env::var("HOLDEM_ENGINE_CONFIG") {
        Ok(json) => EngineConfig::from_json_str(&json).unwrap_or_else(|e| {
            eprintln!("HOLDEM_ENGINE_CONFIG не разобран ({e}), берём значения по умолчанию");
            EngineConfig::default()
        }),
        Err(_) => EngineConfig {
            rng_seed: 2024,
            ..EngineConfig::default()
        },
    };
    let registry = TableRegistry::new(config);

    if let Err(e) = run(&registry) {
        eprintln!("сценарий прерван: {e}");
        std::process::exit(1);
    }
}

fn run(registry: &TableRegistry) -> Result<(), EngineError> {
    println!("================ HEADS-UP: check down to showdown ================");
    let heads_up = registry.create_table(
        1,
        TableConfig::new(Chips(1), Chips(2), Chips(20), Chips(200), 6),
    )?;
    registry.join_table(heads_up, 10, Chips(100))?;
    registry.join_table(heads_up, 11, Chips(100))?;
    registry.start_game(heads_up)?;
    play_passively(registry, heads_up)?;
    finish_hand(registry, heads_up)?;

    println!();
    println!("================ THREE-WAY: short all-in and side pot ================");
    let three_way = registry.create_table(
        2,
        TableConfig::new(Chips(5), Chips(10), Chips(40), Chips(1000), 6),
    )?;
    registry.join_table(three_way, 20, Chips(40))?;
    registry.join_table(three_way, 21, Chips(500))?;
    registry.join_table(three_way, 22, Chips(500))?;
    registry.start_game(three_way)?;

    // Первый ход: короткий стек идёт all-in, остальные уравнивают.
    if let Some(first) = registry.get_player_to_act(three_way)? {
        registry.player_action(three_way, first, PlayerAction::AllIn)?;
    }
    play_passively(registry, three_way)?;
    finish_hand(registry, three_way)?;

    Ok(())
}

/// Все оставшиеся ходы: check или call, улицы открываются по готовности.
fn play_passively(registry: &TableRegistry, table_id: TableId) -> Result<(), EngineError> {
    loop {
        let table = registry.table_snapshot(table_id)?;
        if table.status != TableStatus::InProgress {
            return Ok(());
        }
        match registry.get_player_to_act(table_id)? {
            Some(player) => act_passively(registry, table_id, player)?,
            None => registry.advance_betting_round(table_id)?,
        }
    }
}

fn act_passively(
    registry: &TableRegistry,
    table_id: TableId,
    player: PlayerId,
) -> Result<(), EngineError> {
    match registry.player_action(table_id, player, PlayerAction::Check) {
        Err(EngineError::CannotCheck { .. }) => {
            registry.player_action(table_id, player, PlayerAction::Call)
        }
        other => other,
    }
}

fn finish_hand(registry: &TableRegistry, table_id: TableId) -> Result<(), EngineError> {
    let table = registry.table_snapshot(table_id)?;
    let view = build_table_view(&table);
    println!(
        "table={} game={} board={:?} pot={}",
        view.table_id, view.game_number, view.board, view.pot_total
    );
    for p in build_players_dto(&table, None) {
        if let Some(cards) = table.player(p.seat_index).and_then(|pl| pl.hole_cards) {
            println!("  seat {} player {} holds {} {}", p.seat_index, p.player_id, cards[0], cards[1]);
        }
    }

    if let Ok(hands) = registry.evaluate_hands(table_id) {
        for h in hands {
            println!("  seat {} -> {}", h.seat, describe_hand(h.rank));
        }
    }

    for payout in registry.distribute_pot(table_id)? {
        println!(
            "  pot #{} -> player {} (seat {}) wins {}",
            payout.pot_index, payout.player_id, payout.seat, payout.amount
        );
    }

    println!("--- events ---");
    print!("{}", registry.events_json_lines(table_id)?);
    Ok(())
}
