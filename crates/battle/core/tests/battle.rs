//! End-to-end battles through the public API.

use battle_core::{
    Battle, BattlePlan, BattleRecord, BattleRules, BattleScenario, BattleTactic, BattleToken,
    Cost, Fleet, Player, PlayerId, PlayerRelation, RngOracle, ShipDesignSpec, ShipStack,
    TokenActionKind, WeaponSlotSpec,
};

const DESTROYER: u32 = 1;
const FRIGATE: u32 = 2;
const FREIGHTER: u32 = 3;
const TORPEDO_BOAT: u32 = 4;
const HULK: u32 = 5;

fn designs() -> Vec<ShipDesignSpec> {
    vec![
        ShipDesignSpec::new(DESTROYER, "Destroyer", 50)
            .with_initiative(2)
            .with_movement(8)
            .with_cost(Cost::new(10, 20, 5, 40))
            .with_weapon(WeaponSlotSpec::beam(1, 30, 2)),
        ShipDesignSpec::new(FRIGATE, "Frigate", 20)
            .with_cost(Cost::new(5, 5, 0, 15))
            .with_weapon(WeaponSlotSpec::beam(1, 10, 1)),
        ShipDesignSpec::new(FREIGHTER, "Freighter", 20)
            .with_movement(6)
            .with_cargo_capacity(100),
        ShipDesignSpec::new(TORPEDO_BOAT, "Torpedo Boat", 40)
            .with_shield(10)
            .with_movement(6)
            .with_cost(Cost::new(10, 10, 10, 30))
            .with_weapon(WeaponSlotSpec::torpedo(2, 12, 4, 0.5)),
        ShipDesignSpec::new(HULK, "Hulk", 400)
            .with_shield(50)
            .with_movement(0)
            .with_cost(Cost::new(50, 50, 50, 200))
            .with_weapon(WeaponSlotSpec::beam(2, 8, 1).gatling()),
    ]
}

fn players() -> Vec<Player> {
    vec![Player::new(1, "Humans"), Player::new(2, "Insectoids")]
}

fn duel(ours: (u32, u32), theirs: (u32, u32)) -> Vec<Fleet> {
    vec![
        Fleet::new(1, 1, "Home Guard").with_stack(ShipStack::new(ours.0, ours.1)),
        Fleet::new(2, 2, "Raiders").with_stack(ShipStack::new(theirs.0, theirs.1)),
    ]
}

fn run(rules: BattleRules, players: &[Player], fleets: &[Fleet]) -> BattleRecord {
    Battle::new(rules, players, &designs(), fleets).unwrap().run()
}

fn assert_stack_invariants(token: &BattleToken) {
    assert!(token.quantity_damaged <= token.quantity, "token {}", token.num);
    assert!(token.damage >= 0.0 && token.damage < f64::from(token.armor));
    if token.quantity_damaged == 0 {
        assert_eq!(token.damage, 0.0);
    }
    assert!(token.stack_shields >= 0.0);
    assert!(token.stack_shields <= token.total_stack_shields);
    assert_eq!(
        token.total_stack_shields,
        f64::from(token.shield) * f64::from(token.quantity)
    );
}

#[test]
fn stronger_fleet_wins() {
    let record = run(
        BattleRules::default(),
        &players(),
        &duel((DESTROYER, 5), (FRIGATE, 1)),
    );

    assert!(record.stats.num_rounds < BattleRules::DEFAULT_MAX_ROUNDS);
    assert_eq!(record.stats.ships_destroyed[&PlayerId(2)], 1);
    assert_eq!(record.stats.ships_remaining[&PlayerId(1)], 5);
    assert_eq!(record.stats.survivors(), vec![PlayerId(1)]);
    assert!(record.all_actions().any(|a| a.kind == TokenActionKind::BeamFire));
    assert!(record.all_actions().any(|a| a.kind == TokenActionKind::Move));
}

#[test]
fn casualties_balance_against_starting_ships() {
    let fleets = vec![
        Fleet::new(1, 1, "Home Guard")
            .with_stack(ShipStack::new(DESTROYER, 2))
            .with_stack(ShipStack::new(TORPEDO_BOAT, 3)),
        Fleet::new(2, 2, "Raiders")
            .with_stack(ShipStack::new(FRIGATE, 6))
            .with_stack(ShipStack::new(TORPEDO_BOAT, 2).with_damage(1, 15.0)),
    ];
    let record = run(BattleRules::default().with_seed(11), &players(), &fleets);

    for player in [PlayerId(1), PlayerId(2)] {
        assert_eq!(
            record.stats.ships_at_start[&player],
            record.stats.ships_destroyed[&player] + record.stats.ships_remaining[&player],
        );
    }
    let per_token: u32 = record.token_outcomes.iter().map(|o| o.destroyed).sum();
    assert_eq!(per_token, record.stats.total_destroyed());
}

#[test]
fn stack_invariants_hold_every_round() {
    let fleets = vec![
        Fleet::new(1, 1, "Home Guard")
            .with_stack(ShipStack::new(TORPEDO_BOAT, 4))
            .with_stack(ShipStack::new(HULK, 1)),
        Fleet::new(2, 2, "Raiders")
            .with_stack(ShipStack::new(DESTROYER, 3))
            .with_stack(ShipStack::new(FRIGATE, 5).with_damage(2, 7.5)),
    ];
    let mut battle = Battle::new(
        BattleRules::default().with_seed(3),
        &players(),
        &designs(),
        &fleets,
    )
    .unwrap();

    while !battle.is_over() {
        battle.run_round();
        battle.tokens().iter().for_each(assert_stack_invariants);
    }
    let rounds = battle.round();
    let record = battle.finish();
    assert_eq!(record.num_rounds() as u32, rounds);
    assert!(rounds <= BattleRules::DEFAULT_MAX_ROUNDS);
}

#[test]
fn same_seed_replays_identically() {
    let fleets = duel((TORPEDO_BOAT, 6), (DESTROYER, 2));
    let rules = BattleRules::default().with_seed(0xbeef);
    let first = run(rules.clone(), &players(), &fleets);
    let second = run(rules, &players(), &fleets);
    assert_eq!(first, second);
    assert!(first.all_actions().any(|a| a.kind == TokenActionKind::TorpedoFire));
}

#[test]
fn torpedo_actions_account_for_every_shot() {
    let fleets = duel((TORPEDO_BOAT, 3), (HULK, 1));
    let record = run(BattleRules::default().with_seed(5), &players(), &fleets);

    let salvos: Vec<_> = record
        .all_actions()
        .filter(|a| a.kind == TokenActionKind::TorpedoFire)
        .collect();
    assert!(!salvos.is_empty());
    for salvo in salvos {
        assert!(salvo.torpedo_hits + salvo.torpedo_misses > 0);
        assert!(salvo.torpedo_hits + salvo.torpedo_misses <= 2 * 3);
    }
}

/// Every draw lands at zero, so every torpedo hits.
struct AlwaysHit;

impl RngOracle for AlwaysHit {
    fn next_u32(&self, _seed: u64) -> u32 {
        0
    }
}

#[test]
fn custom_rng_controls_torpedo_rolls() {
    let fleets = duel((TORPEDO_BOAT, 3), (HULK, 1));
    let record = Battle::new(BattleRules::default(), &players(), &designs(), &fleets)
        .unwrap()
        .with_rng(AlwaysHit)
        .run();

    assert!(
        record
            .all_actions()
            .filter(|a| a.kind == TokenActionKind::TorpedoFire)
            .all(|a| a.torpedo_misses == 0)
    );
}

#[test]
fn friends_never_fight() {
    let players = vec![
        Player::new(1, "Humans").with_relation(2, PlayerRelation::Friend),
        Player::new(2, "Insectoids").with_relation(1, PlayerRelation::Friend),
    ];
    let record = run(
        BattleRules::default(),
        &players,
        &duel((DESTROYER, 1), (FRIGATE, 1)),
    );
    assert_eq!(record.num_rounds(), 0);
    assert_eq!(record.stats.total_destroyed(), 0);
    assert_eq!(record.stats.survivors(), vec![PlayerId(1), PlayerId(2)]);
}

#[test]
fn unarmed_stack_escapes_when_out_of_range() {
    let record = run(
        BattleRules::default(),
        &players(),
        &duel((FRIGATE, 1), (FREIGHTER, 2)),
    );

    assert_eq!(record.num_rounds(), 1);
    assert!(
        record
            .actions(0)
            .iter()
            .any(|a| a.kind == TokenActionKind::RanAway && a.token == 1)
    );
    assert!(record.token_outcomes[1].ran_away);
    assert_eq!(record.stats.ships_fled[&PlayerId(2)], 2);
    assert_eq!(record.stats.survivors(), vec![PlayerId(1)]);
}

#[test]
fn disengage_plan_moves_away_from_threats() {
    let players = vec![
        Player::new(1, "Humans"),
        Player::new(2, "Insectoids")
            .with_battle_plan(BattlePlan::default().with_tactic(BattleTactic::Disengage)),
    ];
    let fleets = duel((FRIGATE, 1), (DESTROYER, 1));
    let mut battle = Battle::new(BattleRules::default(), &players, &designs(), &fleets).unwrap();
    let start = battle.tokens()[1].position;
    let threat = battle.tokens()[0].position;

    battle.run_round();
    let token = &battle.tokens()[1];
    assert!(token.ran_away);
    assert!(token.position.distance(threat) >= start.distance(threat));
}

#[test]
fn round_cap_stops_a_standoff() {
    let designs = vec![
        ShipDesignSpec::new(1, "Turret", 30)
            .with_movement(0)
            .with_weapon(WeaponSlotSpec::beam(1, 10, 1)),
    ];
    let fleets = vec![
        Fleet::new(1, 1, "West").with_stack(ShipStack::new(1, 1)),
        Fleet::new(2, 2, "East").with_stack(ShipStack::new(1, 1)),
    ];
    let record = Battle::new(
        BattleRules::default().with_max_rounds(3),
        &players(),
        &designs,
        &fleets,
    )
    .unwrap()
    .run();

    assert_eq!(record.num_rounds(), 3);
    assert_eq!(record.all_actions().count(), 0);
    assert_eq!(record.stats.num_rounds, 3);
}

#[test]
fn scenarios_build_battles() {
    let scenario = BattleScenario {
        name: "Skirmish".into(),
        players: players(),
        designs: designs(),
        fleets: duel((DESTROYER, 2), (FRIGATE, 2)),
    };
    let battle = Battle::from_scenario(BattleRules::default(), &scenario).unwrap();
    assert_eq!(battle.tokens().len(), 2);
    assert_eq!(battle.record().stats.ships_at_start[&PlayerId(2)], 2);
}

#[cfg(feature = "serde")]
#[test]
fn record_round_trips_through_json() {
    let record = run(
        BattleRules::default().with_seed(9),
        &players(),
        &duel((TORPEDO_BOAT, 2), (FRIGATE, 3)),
    );
    let json = serde_json::to_string(&record).unwrap();
    let back: BattleRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.tokens, record.tokens);
    assert_eq!(back.stats.ships_at_start, record.stats.ships_at_start);
    assert_eq!(back.num_rounds(), record.num_rounds());
}
