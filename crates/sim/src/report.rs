//! Terminal rendering of battle records.

use std::collections::BTreeMap;

use battle_core::{BattleRecord, BattleRecordToken, BattleRecordTokenAction, TokenActionKind};
use console::style;

/// Print the header, per-player tallies and per-stack outcomes of a record.
pub fn print_summary(name: &str, record: &BattleRecord) {
    println!("{} {}", style("Battle:").bold().cyan(), name);
    println!(
        "{} {}",
        style("Rounds:").bold().cyan(),
        record.stats.num_rounds
    );
    println!(
        "{} {}",
        style("Actions:").bold().cyan(),
        record.all_actions().count()
    );
    println!();

    println!("{}", style("Players").bold().underlined());
    let stats = &record.stats;
    for (player, at_start) in &stats.ships_at_start {
        let destroyed = stats.ships_destroyed.get(player).copied().unwrap_or(0);
        let remaining = stats.ships_remaining.get(player).copied().unwrap_or(0);
        let fled = stats.ships_fled.get(player).copied().unwrap_or(0);
        let damage = stats.damage_taken.get(player).copied().unwrap_or(0.0);
        println!(
            "  {:<12} start {:>4}  lost {:>4}  left {:>4}  fled {:>4}  damage taken {:>8.1}",
            style(player).yellow(),
            at_start,
            style(destroyed).red(),
            style(remaining).green(),
            fled,
            damage
        );
    }
    println!();

    println!("{}", style("Stacks").bold().underlined());
    for (token, outcome) in record.tokens.iter().zip(&record.token_outcomes) {
        let status = if outcome.quantity == 0 {
            style("destroyed").red()
        } else if outcome.ran_away {
            style("fled").yellow()
        } else {
            style("held").green()
        };
        println!(
            "  #{:<3} {:<10} {:<16} {:>4} -> {:>4}  {}",
            token.num,
            token.player,
            token.design_name,
            token.quantity,
            outcome.quantity,
            status
        );
    }
    println!();

    let survivors = stats.survivors();
    if survivors.is_empty() {
        println!("{} none", style("Survivors:").bold().cyan());
    } else {
        let names: Vec<String> = survivors.iter().map(ToString::to_string).collect();
        println!("{} {}", style("Survivors:").bold().cyan(), names.join(", "));
    }
}

/// Print every action of one round.
pub fn print_round(record: &BattleRecord, round: usize) {
    let tokens: BTreeMap<u32, &BattleRecordToken> =
        record.tokens.iter().map(|t| (t.num, t)).collect();
    let label = |num: u32| {
        tokens
            .get(&num)
            .map_or_else(|| format!("#{num}"), |t| format!("#{num} {}", t.design_name))
    };

    println!("{} {}", style("Round").bold().magenta(), round + 1);
    let actions = record.actions(round);
    if actions.is_empty() {
        println!("  {}", style("(no actions)").dim());
    }
    for action in actions {
        println!("  {}", describe(action, &label));
    }
}

/// Print every round in order.
pub fn print_rounds(record: &BattleRecord) {
    for round in 0..record.num_rounds() {
        print_round(record, round);
    }
}

fn describe(action: &BattleRecordTokenAction, label: &impl Fn(u32) -> String) -> String {
    let who = label(action.token);
    match action.kind {
        TokenActionKind::Move => format!("{who} moves {} -> {}", action.from, action.to),
        TokenActionKind::RanAway => format!("{who} runs away from {}", action.from),
        TokenActionKind::BeamFire | TokenActionKind::TorpedoFire => {
            let target = action.target.map_or_else(|| "?".to_string(), label);
            let mut line = format!(
                "{who} slot {} {} at {target}: {:.1} shields, {:.1} armor",
                action.slot.unwrap_or(0),
                action.kind,
                action.shield_damage,
                action.armor_damage
            );
            if action.kind == TokenActionKind::TorpedoFire {
                line.push_str(&format!(
                    " ({} hit, {} missed)",
                    action.torpedo_hits, action.torpedo_misses
                ));
            }
            if action.ships_destroyed > 0 {
                line.push_str(&format!(
                    ", {}",
                    style(format!("{} destroyed", action.ships_destroyed)).red()
                ));
            }
            line
        }
    }
}
