use std::collections::BTreeMap;

use crate::player::PlayerId;
use crate::token::BattleToken;

/// Per-player casualty tallies.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BattleRecordStats {
    pub num_rounds: u32,
    pub ships_at_start: BTreeMap<PlayerId, u32>,
    pub ships_destroyed: BTreeMap<PlayerId, u32>,
    /// Ships alive at the end, including those that fled.
    pub ships_remaining: BTreeMap<PlayerId, u32>,
    pub ships_fled: BTreeMap<PlayerId, u32>,
    pub damage_taken: BTreeMap<PlayerId, f64>,
}

impl BattleRecordStats {
    pub(crate) fn tally(&mut self, num_rounds: u32, tokens: &[BattleToken]) {
        self.num_rounds = num_rounds;
        self.ships_destroyed.clear();
        self.ships_remaining.clear();
        self.ships_fled.clear();
        self.damage_taken.clear();

        for token in tokens {
            let player = token.player;
            *self.ships_destroyed.entry(player).or_default() += token.destroyed;
            *self.ships_remaining.entry(player).or_default() += token.quantity;
            *self.damage_taken.entry(player).or_default() += token.damage_taken;
            let fled = self.ships_fled.entry(player).or_default();
            if token.ran_away {
                *fled += token.quantity;
            }
        }
    }

    /// Players that still hold the field: ships left that did not flee.
    pub fn survivors(&self) -> Vec<PlayerId> {
        self.ships_remaining
            .iter()
            .filter(|&(player, &remaining)| {
                remaining > self.ships_fled.get(player).copied().unwrap_or(0)
            })
            .map(|(&player, _)| player)
            .collect()
    }

    pub fn total_destroyed(&self) -> u32 {
        self.ships_destroyed.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::ShipDesignSpec;
    use crate::player::BattlePlan;
    use crate::token::tests::token_for;

    #[test]
    fn fled_ships_are_not_survivors() {
        let design = ShipDesignSpec::new(1, "Scout", 10);
        let mut tokens = vec![
            token_for(0, 1, &design, 2, BattlePlan::default()),
            token_for(1, 2, &design, 3, BattlePlan::default()),
            token_for(2, 3, &design, 1, BattlePlan::default()),
        ];
        tokens[1].ran_away = true;
        tokens[2].apply_stack_damage(10.0);

        let mut stats = BattleRecordStats::default();
        stats.tally(4, &tokens);
        assert_eq!(stats.survivors(), vec![PlayerId(1)]);
        assert_eq!(stats.ships_fled[&PlayerId(2)], 3);
        assert_eq!(stats.ships_remaining[&PlayerId(2)], 3);
        assert_eq!(stats.ships_destroyed[&PlayerId(3)], 1);
        assert_eq!(stats.damage_taken[&PlayerId(3)], 10.0);
        assert_eq!(stats.total_destroyed(), 1);
    }
}
