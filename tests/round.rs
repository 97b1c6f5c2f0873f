//! Deck and round integration tests.

#![allow(clippy::float_cmp)]

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tradetable::{
    COMMUNITY_CARDS, Card, DECK_SIZE, DECK_TOTAL, DealError, Deck, DeckError, RevealError, Round,
    RoundOptions, RoundState, SettleError, Table, Trade, TradeBook, TradeError,
};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

fn fixed_round(ids: &[&str], values: &[i32], fee_rate: f64) -> Round {
    let table = Table::with_players(ids.iter().copied(), 0.0).unwrap();
    let options = RoundOptions::default()
        .with_house_fee_rate(fee_rate)
        .with_shuffle(false);
    Round::new(table, Deck::from_values(values), options, 0)
}

fn revealed_round(ids: &[&str], seed: u64) -> Round {
    let table = Table::with_players(ids.iter().copied(), 0.0).unwrap();
    let mut round = Round::new(table, Deck::generate(), RoundOptions::default(), seed);
    round.deal().unwrap();
    round.reveal().unwrap();
    round
}

fn sorted_values(deck: &Deck) -> Vec<i32> {
    let mut values: Vec<i32> = deck.cards().iter().map(|card| card.value).collect();
    values.sort_unstable();
    values
}

#[test]
fn generated_deck_has_fixed_values() {
    let deck = Deck::generate();
    assert_eq!(deck.len(), DECK_SIZE);
    assert_eq!(deck.total(), DECK_TOTAL);

    let mut expected: Vec<i32> = (1..=15).collect();
    expected.push(20);
    expected.push(-10);
    let values: Vec<i32> = deck.cards().iter().map(|card| card.value).collect();
    assert_eq!(values, expected);
}

#[test]
fn shuffle_keeps_the_same_cards() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let original = Deck::generate();
    let mut deck = original.clone();
    deck.shuffle(&mut rng);

    assert_eq!(deck.len(), DECK_SIZE);
    assert_eq!(sorted_values(&deck), sorted_values(&original));
    assert_ne!(deck, original);
}

#[test]
fn shuffle_is_roughly_uniform_per_position() {
    const TRIALS: usize = 17_000;
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let canonical = Deck::generate();
    let mut counts = [[0_usize; DECK_SIZE]; DECK_SIZE];

    for _ in 0..TRIALS {
        let mut deck = canonical.clone();
        deck.shuffle(&mut rng);
        for (position, card) in deck.cards().iter().enumerate() {
            let index = canonical
                .cards()
                .iter()
                .position(|c| c == card)
                .unwrap();
            counts[index][position] += 1;
        }
    }

    let expected = TRIALS / DECK_SIZE;
    for row in &counts {
        for &count in row {
            assert!(
                count.abs_diff(expected) < 200,
                "count {count} too far from {expected}"
            );
        }
    }
}

#[test]
fn pop_draws_from_the_end() {
    let mut deck = Deck::from_values(&[1, 2]);
    assert_eq!(deck.pop(), Ok(Card::new(2)));
    assert_eq!(deck.pop(), Ok(Card::new(1)));
    assert!(deck.is_empty());
    assert_eq!(deck.pop(), Err(DeckError::Exhausted));
}

#[test]
fn deal_pops_players_then_community() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.01);
    assert_eq!(round.state(), RoundState::Deal);
    assert_eq!(round.hole_card("p1"), None);

    round.deal().unwrap();
    assert_eq!(round.state(), RoundState::Trading);
    assert_eq!(round.hole_card("p1"), Some(Card::new(5)));
    assert_eq!(round.hole_card("p2"), Some(Card::new(4)));
    assert_eq!(round.cards_remaining(), 0);
    assert_eq!(round.community(), None);

    let community = round.reveal().unwrap();
    assert_eq!(community, [Card::new(3), Card::new(2), Card::new(1)]);
    assert_eq!(round.community(), Some(&community[..]));
}

#[test]
fn two_player_scenario_settles() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.01);
    round.deal().unwrap();
    round.reveal().unwrap();

    let settlement = round.settle(&[Trade::new("p1", "p2", 10.0, 2)]).unwrap();
    assert_eq!(round.state(), RoundState::Settle);
    assert_eq!(settlement.community_total, 6);
    assert_eq!(settlement.trade_count, 1);

    let p1 = settlement.player("p1").unwrap();
    assert_eq!(p1.card_value, 5);
    assert_eq!(p1.net_position, -2);
    assert_close(p1.trade_volume, 20.0);
    assert_close(p1.fees, 0.2);
    assert_close(p1.final_value, 9.0);
    assert_close(p1.delta, 8.8);

    let p2 = settlement.player("p2").unwrap();
    assert_eq!(p2.net_position, 2);
    assert_close(p2.trade_volume, 20.0);
    assert_close(p2.fees, 0.2);
    assert_close(p2.final_value, 12.0);
    assert_close(p2.delta, 11.8);

    let table = round.table();
    assert_close(table.balance("p1").unwrap(), 8.8);
    assert_close(table.balance("p2").unwrap(), 11.8);
    assert_eq!(table.player("p1").unwrap().position, -2);
    assert_close(table.pot, 0.4);
    assert_close(settlement.fees_collected, 0.4);

    let deltas = settlement.deltas();
    assert_close(deltas["p1"], 8.8);
    assert_close(deltas["p2"], 11.8);
    assert_eq!(round.settlement(), Some(&settlement));
}

#[test]
fn transitions_out_of_order_fail() {
    let mut round = fixed_round(&["a", "b"], &[1, 2, 3, 4, 5, 6], 0.0);
    assert_eq!(round.reveal().unwrap_err(), RevealError::InvalidTransition);
    assert_eq!(round.settle(&[]).unwrap_err(), SettleError::InvalidTransition);
    assert_eq!(round.state(), RoundState::Deal);

    round.deal().unwrap();
    assert_eq!(round.deal().unwrap_err(), DealError::InvalidTransition);
    assert_eq!(round.settle(&[]).unwrap_err(), SettleError::InvalidTransition);
    assert_eq!(round.state(), RoundState::Trading);

    round.reveal().unwrap();
    assert_eq!(round.deal().unwrap_err(), DealError::InvalidTransition);
    assert_eq!(round.reveal().unwrap_err(), RevealError::InvalidTransition);
    assert_eq!(round.state(), RoundState::Reveal);

    round.settle(&[]).unwrap();
    assert_eq!(round.deal().unwrap_err(), DealError::InvalidTransition);
    assert_eq!(round.reveal().unwrap_err(), RevealError::InvalidTransition);
    assert_eq!(round.settle(&[]).unwrap_err(), SettleError::InvalidTransition);
    assert_eq!(round.state(), RoundState::Settle);
}

#[test]
fn short_deck_fails_without_dealing() {
    let mut round = fixed_round(&["a", "b", "c"], &[1, 2, 3, 4, 5], 0.0);
    assert_eq!(round.deal().unwrap_err(), DealError::DeckExhausted);
    assert_eq!(round.state(), RoundState::Deal);
    assert_eq!(round.cards_remaining(), 5);
    assert!(round.table().players.iter().all(|p| p.card.is_none()));
}

#[test]
fn no_trades_pays_card_plus_community() {
    for seed in 0..20 {
        let mut round = revealed_round(&["a", "b", "c", "d", "e"], seed);
        let community_total: i64 = round
            .community()
            .unwrap()
            .iter()
            .map(|c| i64::from(c.value))
            .sum();

        let settlement = round.settle(&[]).unwrap();
        assert_eq!(settlement.community_total, community_total);
        for player in &round.table().players {
            let card = i64::from(player.card.unwrap().value);
            assert_close(player.balance, (card + community_total) as f64);
            assert_eq!(player.position, 0);
        }
        assert_close(round.table().pot, 0.0);
    }
}

#[test]
fn all_cards_dealt_are_distinct() {
    let round = revealed_round(&["a", "b", "c", "d", "e"], 5);
    let mut values: Vec<i32> = round
        .table()
        .players
        .iter()
        .map(|p| p.card.unwrap().value)
        .chain(round.community().unwrap().iter().map(|c| c.value))
        .collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 5 + COMMUNITY_CARDS);
}

#[test]
fn random_trades_are_zero_sum_with_non_negative_fees() {
    let ids = ["a", "b", "c", "d"];
    let mut rng = ChaCha8Rng::seed_from_u64(99);

    for seed in 0..25 {
        let mut round = revealed_round(&ids, seed);
        let trades: Vec<Trade> = (0..rng.random_range(0..30))
            .map(|_| {
                let from = rng.random_range(0..ids.len());
                let to = (from + rng.random_range(1..ids.len())) % ids.len();
                Trade::new(
                    ids[from],
                    ids[to],
                    rng.random_range(0.0..25.0),
                    rng.random_range(1..6),
                )
            })
            .collect();

        let settlement = round.settle(&trades).unwrap();
        assert_eq!(settlement.net_position_total(), 0);
        assert!(settlement.players.iter().all(|p| p.fees >= 0.0));
        let fees: f64 = settlement.players.iter().map(|p| p.fees).sum();
        assert_close(settlement.fees_collected, fees);
    }
}

#[test]
fn invalid_quantity_leaves_balances_unchanged() {
    for quantity in [0, -3] {
        let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.01);
        round.deal().unwrap();
        round.reveal().unwrap();

        let trades = [
            Trade::new("p1", "p2", 10.0, 1),
            Trade::new("p2", "p1", 4.0, quantity),
        ];
        assert_eq!(
            round.settle(&trades).unwrap_err(),
            SettleError::InvalidTrade { trade: 1 }
        );
        assert_eq!(round.state(), RoundState::Reveal);
        assert!(round.table().players.iter().all(|p| p.balance == 0.0));
        assert_eq!(round.table().pot, 0.0);

        round.settle(&trades[..1]).unwrap();
        assert_eq!(round.state(), RoundState::Settle);
    }
}

#[test]
fn unknown_player_is_rejected() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.01);
    round.deal().unwrap();
    round.reveal().unwrap();

    let trades = [Trade::new("p1", "ghost", 3.0, 1)];
    assert_eq!(
        round.settle(&trades).unwrap_err(),
        SettleError::UnknownPlayer { trade: 0 }
    );
    assert!(round.table().players.iter().all(|p| p.balance == 0.0));
}

#[test]
fn malformed_trades_are_rejected() {
    let table = Table::with_players(["a", "b"], 0.0).unwrap();
    assert_eq!(
        Trade::new("a", "a", 1.0, 1).validate(&table),
        Err(TradeError::SelfTrade)
    );
    assert_eq!(
        Trade::new("a", "b", -1.0, 1).validate(&table),
        Err(TradeError::InvalidPrice)
    );
    assert_eq!(
        Trade::new("a", "b", f64::NAN, 1).validate(&table),
        Err(TradeError::InvalidPrice)
    );
    assert_eq!(
        Trade::new("a", "b", 1.0, 0).validate(&table),
        Err(TradeError::InvalidQuantity)
    );
    assert_eq!(
        Trade::new("a", "z", 1.0, 1).validate(&table),
        Err(TradeError::UnknownPlayer)
    );
    assert_eq!(Trade::new("a", "b", 0.0, 1).validate(&table), Ok(()));

    let mut round = fixed_round(&["a", "b"], &[1, 2, 3, 4, 5], 0.01);
    round.deal().unwrap();
    round.reveal().unwrap();
    assert_eq!(
        round
            .settle(&[Trade::new("b", "b", 1.0, 1)])
            .unwrap_err(),
        SettleError::InvalidTrade { trade: 0 }
    );
}

#[test]
fn extreme_card_values_do_not_overflow() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 1, i32::MAX, 5, 6], 0.0);
    round.deal().unwrap();
    round.reveal().unwrap();

    let settlement = round.settle(&[]).unwrap();
    let community_total = i64::from(i32::MAX) + 2;
    assert_eq!(settlement.community_total, community_total);
    assert_eq!(Deck::from_values(&[i32::MAX, i32::MAX]).total(), 2 * i64::from(i32::MAX));

    let p1 = settlement.player("p1").unwrap();
    assert_close(p1.final_value, (6 + community_total) as f64);
    assert!(round.table().players.iter().all(|p| p.balance.is_finite()));
}

#[test]
fn overflowing_notional_is_rejected() {
    let table = Table::with_players(["a", "b"], 0.0).unwrap();
    let huge = Trade::new("a", "b", 1e308, 10);
    assert!(huge.notional().is_infinite());
    assert_eq!(huge.validate(&table), Err(TradeError::InvalidPrice));

    let mut round = fixed_round(&["a", "b"], &[1, 2, 3, 4, 5], 0.01);
    round.deal().unwrap();
    round.reveal().unwrap();
    assert_eq!(
        round.settle(&[huge]).unwrap_err(),
        SettleError::InvalidTrade { trade: 0 }
    );

    let trades = [Trade::new("a", "b", 1e308, 1), Trade::new("b", "a", 1e308, 1)];
    assert_eq!(
        round.settle(&trades).unwrap_err(),
        SettleError::InvalidTrade { trade: 1 }
    );
    assert_eq!(round.state(), RoundState::Reveal);
    assert!(round.table().players.iter().all(|p| p.balance == 0.0));
    assert_eq!(round.table().pot, 0.0);
}

#[test]
fn fee_rate_is_clamped() {
    let table = Table::with_players(["a", "b"], 0.0).unwrap();
    let high = Round::new(
        table.clone(),
        Deck::generate(),
        RoundOptions::default().with_house_fee_rate(4.0),
        1,
    );
    assert_eq!(high.house_fee_rate(), 1.0);

    let negative = Round::new(
        table.clone(),
        Deck::generate(),
        RoundOptions::default().with_house_fee_rate(-0.5),
        1,
    );
    assert_eq!(negative.house_fee_rate(), 0.0);

    let nan = Round::new(
        table,
        Deck::generate(),
        RoundOptions::default().with_house_fee_rate(f64::NAN),
        1,
    );
    assert_eq!(nan.house_fee_rate(), 0.0);
}

#[test]
fn balances_carry_into_the_next_round() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.01);
    round.deal().unwrap();
    round.reveal().unwrap();
    round.settle(&[Trade::new("p1", "p2", 10.0, 2)]).unwrap();

    let table = round.into_table();
    let options = RoundOptions::default().with_shuffle(false);
    let mut next = Round::new(table, Deck::from_values(&[10, 20, 30, 1, 2]), options, 0);
    next.deal().unwrap();
    assert!(next.table().players.iter().all(|p| p.position == 0));
    next.reveal().unwrap();
    next.settle(&[]).unwrap();

    let table = next.table();
    assert_close(table.balance("p1").unwrap(), 8.8 + 2.0 + 60.0);
    assert_close(table.balance("p2").unwrap(), 11.8 + 1.0 + 60.0);
    assert_close(table.pot, 0.4);
}

#[test]
fn seeded_rounds_deal_identically() {
    let a = revealed_round(&["a", "b", "c"], 77);
    let b = revealed_round(&["a", "b", "c"], 77);
    assert_eq!(a.table(), b.table());
    assert_eq!(a.community(), b.community());
}

#[test]
fn trade_book_validates_on_submit() {
    let table = Table::with_players(["a", "b", "c"], 0.0).unwrap();
    let mut book = TradeBook::new();

    book.submit(&table, Trade::new("a", "b", 5.0, 2)).unwrap();
    book.submit(&table, Trade::new("c", "a", 7.0, 1)).unwrap();
    assert_eq!(
        book.submit(&table, Trade::new("a", "x", 5.0, 1)),
        Err(TradeError::UnknownPlayer)
    );
    assert_eq!(book.len(), 2);

    let positions = book.net_positions(&table);
    assert_eq!(
        positions,
        vec![
            ("a".to_owned(), -1),
            ("b".to_owned(), 2),
            ("c".to_owned(), -1),
        ]
    );

    book.clear();
    assert!(book.is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn settlement_serializes_to_json() {
    let mut round = fixed_round(&["p1", "p2"], &[1, 2, 3, 4, 5], 0.0);
    round.deal().unwrap();
    round.reveal().unwrap();
    let settlement = round.settle(&[Trade::new("p1", "p2", 1.0, 1)]).unwrap();

    let json = serde_json::to_value(&settlement).unwrap();
    assert_eq!(json["community_total"], 6);
    assert_eq!(json["players"][0]["player_id"], "p1");

    let state = serde_json::to_string(&round.state()).unwrap();
    assert_eq!(state, "\"Settle\"");

    let table: Table = serde_json::from_str(&serde_json::to_string(round.table()).unwrap()).unwrap();
    assert_eq!(&table, round.table());
}
