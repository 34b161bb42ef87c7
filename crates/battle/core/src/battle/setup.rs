use std::collections::BTreeMap;

use super::Battle;
use crate::board::Board;
use crate::config::BattleRules;
use crate::design::ShipDesignSpec;
use crate::error::{BattleError, BattleResult};
use crate::fleet::{BattleScenario, Fleet, ShipStack};
use crate::player::{Player, PlayerId};
use crate::record::BattleRecord;
use crate::rng::BattleDice;
use crate::token::BattleToken;

impl Battle {
    /// Build a battle from the fleets present at one location.
    ///
    /// Every stack becomes one token. Players are placed in order of their
    /// first fleet and all of a player's tokens share that player's start
    /// cell.
    pub fn new(
        rules: BattleRules,
        players: &[Player],
        designs: &[ShipDesignSpec],
        fleets: &[Fleet],
    ) -> BattleResult<Self> {
        rules.validate()?;
        let board = Board::new(rules.board_size);

        let mut participants: Vec<PlayerId> = Vec::new();
        for fleet in fleets {
            if !participants.contains(&fleet.player) {
                participants.push(fleet.player);
            }
        }
        if participants.len() < 2 {
            return Err(BattleError::NotEnoughParticipants {
                found: participants.len(),
            });
        }
        let starts: BTreeMap<PlayerId, _> = participants
            .iter()
            .copied()
            .zip(board.start_positions(participants.len()))
            .collect();

        let mut tokens = Vec::new();
        for fleet in fleets {
            let owner = players
                .iter()
                .find(|p| p.num == fleet.player)
                .ok_or(BattleError::PlayerNotFound {
                    player: fleet.player,
                    fleet: fleet.num,
                })?;
            let plan = owner
                .battle_plan(fleet.battle_plan)
                .ok_or(BattleError::BattlePlanNotFound {
                    player: owner.num,
                    plan: fleet.battle_plan,
                })?;

            for stack in &fleet.stacks {
                let design = designs.iter().find(|d| d.id == stack.design).ok_or(
                    BattleError::DesignNotFound {
                        design: stack.design,
                        fleet: fleet.num,
                    },
                )?;
                validate_stack(fleet, stack, design)?;

                let num = tokens.len() as u32;
                let mut token = BattleToken::new(num, fleet, stack, design, owner, plan, &rules);
                if let Some(&start) = starts.get(&fleet.player) {
                    token.position = start;
                }
                tokens.push(token);
            }
        }

        let record = BattleRecord::new(&tokens);
        Ok(Self {
            dice: BattleDice::new(rules.seed),
            board,
            tokens,
            record,
            round: 0,
            rules,
        })
    }

    pub fn from_scenario(rules: BattleRules, scenario: &BattleScenario) -> BattleResult<Self> {
        Self::new(rules, &scenario.players, &scenario.designs, &scenario.fleets)
    }
}

fn validate_stack(fleet: &Fleet, stack: &ShipStack, design: &ShipDesignSpec) -> BattleResult<()> {
    let invalid = |reason| BattleError::InvalidStack {
        fleet: fleet.num,
        design: stack.design,
        reason,
    };
    if stack.quantity == 0 {
        return Err(invalid("stack has no ships"));
    }
    if stack.quantity_damaged > stack.quantity {
        return Err(invalid("more damaged ships than ships"));
    }
    if design.armor == 0 {
        return Err(invalid("design has no armor"));
    }
    if !stack.damage.is_finite() || stack.damage < 0.0 || stack.damage >= f64::from(design.armor) {
        return Err(invalid("damage must be below design armor"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BattleVector;
    use crate::design::WeaponSlotSpec;
    use crate::error::BattleFault;

    fn designs() -> Vec<ShipDesignSpec> {
        vec![ShipDesignSpec::new(1, "Frigate", 20).with_weapon(WeaponSlotSpec::beam(1, 10, 1))]
    }

    fn players() -> Vec<Player> {
        vec![Player::new(1, "One"), Player::new(2, "Two")]
    }

    #[test]
    fn one_token_per_stack() {
        let fleets = vec![
            Fleet::new(10, 1, "Alpha")
                .with_stack(ShipStack::new(1, 3))
                .with_stack(ShipStack::new(1, 1)),
            Fleet::new(20, 2, "Beta").with_stack(ShipStack::new(1, 2)),
        ];
        let battle = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap();
        let tokens = battle.tokens();
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens.iter().map(|t| t.num).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(tokens[0].position, BattleVector::new(1, 4));
        assert_eq!(tokens[1].position, BattleVector::new(1, 4));
        assert_eq!(tokens[2].position, BattleVector::new(8, 5));
        assert_eq!(battle.record().tokens[2].fleet_num, 20);
    }

    #[test]
    fn single_player_is_rejected() {
        let fleets = vec![
            Fleet::new(10, 1, "Alpha").with_stack(ShipStack::new(1, 3)),
            Fleet::new(11, 1, "Gamma").with_stack(ShipStack::new(1, 3)),
        ];
        let err = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap_err();
        assert_eq!(err, BattleError::NotEnoughParticipants { found: 1 });
    }

    #[test]
    fn dangling_references_are_reported() {
        let fleets = vec![
            Fleet::new(10, 1, "Alpha").with_stack(ShipStack::new(9, 3)),
            Fleet::new(20, 2, "Beta").with_stack(ShipStack::new(1, 2)),
        ];
        let err = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap_err();
        assert_eq!(err.error_code(), "design_not_found");

        let fleets = vec![
            Fleet::new(10, 1, "Alpha").with_stack(ShipStack::new(1, 3)),
            Fleet::new(30, 3, "Ghost").with_stack(ShipStack::new(1, 2)),
        ];
        let err = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap_err();
        assert!(matches!(err, BattleError::PlayerNotFound { fleet: 30, .. }));

        let fleets = vec![
            Fleet::new(10, 1, "Alpha")
                .with_stack(ShipStack::new(1, 3))
                .with_battle_plan(4),
            Fleet::new(20, 2, "Beta").with_stack(ShipStack::new(1, 2)),
        ];
        let err = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap_err();
        assert!(matches!(err, BattleError::BattlePlanNotFound { plan: 4, .. }));
    }

    #[test]
    fn malformed_stacks_are_rejected() {
        let cases = [
            ShipStack::new(1, 0),
            ShipStack::new(1, 2).with_damage(3, 5.0),
            ShipStack::new(1, 2).with_damage(1, 20.0),
        ];
        for stack in cases {
            let fleets = vec![
                Fleet::new(10, 1, "Alpha").with_stack(stack),
                Fleet::new(20, 2, "Beta").with_stack(ShipStack::new(1, 2)),
            ];
            let err = Battle::new(BattleRules::default(), &players(), &designs(), &fleets).unwrap_err();
            assert_eq!(err.error_code(), "invalid_stack");
        }
    }

    #[test]
    fn invalid_rules_fail_fast() {
        let rules = BattleRules::default().with_max_rounds(0);
        let err = Battle::new(rules, &players(), &designs(), &[]).unwrap_err();
        assert!(matches!(err, BattleError::InvalidRules(_)));
    }
}
