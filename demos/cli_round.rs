//! CLI trading table example.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use tradetable::{Card, MemoryStore, SessionRegistry, TableId, TableOptions, Trade};

fn main() {
    println!("Trading table CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = TableOptions::default().with_starting_balance(100.0);
    let registry = SessionRegistry::new(MemoryStore::new(), options, seed);

    let names = prompt_line("Players (2-5 names, space separated): ");
    let names: Vec<&str> = names.split_whitespace().collect();
    let table = match registry.create_table(names.iter().copied()) {
        Ok(id) => id,
        Err(err) => {
            println!("Table error: {err}");
            return;
        }
    };

    loop {
        if let Err(err) = registry.start_round(table) {
            println!("Cannot start round: {err}");
            break;
        }

        print_hole_cards(&registry, table, &names);
        println!("Enter trades as 'seller buyer price quantity', 'r' to reveal.");

        loop {
            let input = prompt_line("Trade: ");
            match input.as_str() {
                "r" | "reveal" => break,
                "q" | "quit" => return,
                _ => {}
            }

            let Some(trade) = parse_trade(&input) else {
                println!("Could not parse trade.");
                continue;
            };
            if let Err(err) = registry.submit_trade(table, trade) {
                println!("Trade error: {err}");
            }
        }

        match registry.close_trading(table) {
            Ok(community) => println!("\nCommunity: {}", format_cards(&community)),
            Err(err) => println!("Reveal error: {err}"),
        }

        match registry.settle(table) {
            Ok(settlement) => {
                println!("Community total: {}", settlement.community_total);
                for player in &settlement.players {
                    println!(
                        "{:>10}: card {:>3} | position {:>3} | fees {:>6.2} | delta {:>7.2}",
                        player.player_id,
                        player.card_value,
                        player.net_position,
                        player.fees,
                        player.delta
                    );
                }
            }
            Err(err) => {
                println!("Settle error: {err}");
                break;
            }
        }

        print_standings(&registry, table);

        if prompt_line("Another round? (y/n): ") != "y" {
            println!("Goodbye.");
            break;
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn parse_trade(input: &str) -> Option<Trade> {
    let mut parts = input.split_whitespace();
    let from = parts.next()?;
    let to = parts.next()?;
    let price = parts.next()?.parse::<f64>().ok()?;
    let quantity = parts.next()?.parse::<i64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Trade::new(from, to, price, quantity))
}

fn print_hole_cards(registry: &SessionRegistry, table: TableId, names: &[&str]) {
    println!();
    for name in names {
        if let Ok(Some(card)) = registry.hole_card(table, name) {
            println!("{name:>10} holds {}", format_card(&card));
        }
    }
    println!();
}

fn print_standings(registry: &SessionRegistry, table: TableId) {
    let Ok(standings) = registry.standings(table) else {
        return;
    };
    println!("\nStandings:");
    for (rank, standing) in standings.iter().enumerate() {
        println!("{:>2}. {:>10} {:>9.2}", rank + 1, standing.player_id, standing.balance);
    }
    println!();
}

fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

fn format_card(card: &Card) -> String {
    let code = if card.value < 0 { "31" } else { "32" };
    colorize(&card.value.to_string(), code)
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}
