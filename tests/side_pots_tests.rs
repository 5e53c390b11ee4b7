//! Сайд-поты: слои all-in, сфолдившие вкладчики, мёртвые деньги.

mod common;

use common::*;

use holdem_engine::domain::{Chips, SeatIndex};
use holdem_engine::engine::betting::player_action;
use holdem_engine::engine::lifecycle;
use holdem_engine::engine::side_pots::{collect_contributions, compute_side_pots, Contribution};
use holdem_engine::engine::{PlayerAction, SidePot};

fn live(seat: SeatIndex, amount: u64) -> Contribution {
    Contribution {
        seat: Some(seat),
        amount: Chips(amount),
        live: true,
    }
}

fn folded(seat: SeatIndex, amount: u64) -> Contribution {
    Contribution {
        seat: Some(seat),
        amount: Chips(amount),
        live: false,
    }
}

fn pot(amount: u64, eligible: &[SeatIndex]) -> SidePot {
    SidePot {
        amount: Chips(amount),
        eligible_players: eligible.to_vec(),
    }
}

/// Вклады 40 и 100: основной пот 80 на двоих, 60 только второму.
#[test]
fn short_all_in_creates_side_pot() {
    let pots = compute_side_pots(&[live(0, 40), live(1, 100)]);
    assert_eq!(pots, vec![pot(80, &[0, 1]), pot(60, &[1])]);
}

#[test]
fn three_all_in_layers() {
    let pots = compute_side_pots(&[live(0, 50), live(1, 100), live(2, 150), live(3, 150)]);
    assert_eq!(
        pots,
        vec![pot(200, &[0, 1, 2, 3]), pot(150, &[1, 2, 3]), pot(100, &[2, 3])]
    );
}

#[test]
fn folded_contributor_feeds_pots_without_claiming() {
    let pots = compute_side_pots(&[live(0, 100), live(1, 100), folded(2, 60), live(3, 30)]);
    assert_eq!(pots, vec![pot(120, &[0, 1, 3]), pot(170, &[0, 1])]);
}

#[test]
fn dead_money_of_departed_player_is_counted() {
    let gone = Contribution {
        seat: None,
        amount: Chips(10),
        live: false,
    };
    let pots = compute_side_pots(&[live(1, 10), live(2, 10), gone]);
    assert_eq!(pots, vec![pot(30, &[1, 2])]);
}

#[test]
fn zero_contributions_produce_no_pots() {
    assert!(compute_side_pots(&[live(0, 0), live(1, 0)]).is_empty());
    assert!(compute_side_pots(&[]).is_empty());
}

// ===== ВКЛАДЫ СО СТОЛА =====

#[test]
fn contributions_include_folded_players_and_dead_money() {
    let mut table = three_way_started();
    // 20 колл 10, 21 (SB) фолд, затем уходит 22: его BB становится мёртвыми деньгами.
    player_action(&mut table, 20, PlayerAction::Call).unwrap();
    player_action(&mut table, 21, PlayerAction::Fold).unwrap();
    lifecycle::leave_table(&mut table, 22).unwrap();

    let contributions = collect_contributions(&table);
    assert_eq!(
        contributions,
        vec![
            live(0, 10),
            folded(1, 5),
            Contribution {
                seat: None,
                amount: Chips(10),
                live: false
            },
        ]
    );

    let pots = compute_side_pots(&contributions);
    let total: Chips = pots.iter().map(|p| p.amount).sum();
    assert_eq!(total, table.pot_total);
    assert_eq!(pots, vec![pot(25, &[0])]);
}

#[test]
fn all_in_hand_pots_match_contributions() {
    let mut table = table_with_players(standard_config(), &[(30, 60), (31, 200), (32, 200)]);
    lifecycle::start_game(&mut table, &engine_config()).unwrap();

    // Дилер 0 (30) ходит первым: all-in 60, SB коллирует, BB коллирует.
    player_action(&mut table, 30, PlayerAction::AllIn).unwrap();
    player_action(&mut table, 31, PlayerAction::Call).unwrap();
    player_action(&mut table, 32, PlayerAction::Call).unwrap();

    let pots = compute_side_pots(&collect_contributions(&table));
    assert_eq!(pots, vec![pot(180, &[0, 1, 2])]);
    assert_eq!(table.pot_total, Chips(180));
}
