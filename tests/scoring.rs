use max_lair::ai::{combine_matchup_scores, evaluate_matchup, max_move_power, move_score, select_best_move};
use max_lair::ai::lut::{build_boss_matchups, build_rental_matchups};
use max_lair::{BaseStats, Combatant, Move, MoveCategory, Pokemon, PokemonType, Roster};

fn stats(hp: i32, atk: i32, def: i32) -> BaseStats {
    BaseStats {
        hp,
        atk,
        def,
        spa: atk,
        spd: def,
        spe: 80,
    }
}

fn attack(name: &str, move_type: PokemonType, base_power: u32) -> Move {
    Move::new(name, move_type, MoveCategory::Physical, base_power, 1.0, 10)
}

fn make_pokemon(name: &str, types: (PokemonType, Option<PokemonType>), base: BaseStats, moves: Vec<Move>) -> Pokemon {
    let max_moves = moves
        .iter()
        .map(|m| Move::new(format!("Max {}", m.name), m.move_type, m.category, max_move_power(m), 1.0, m.pp))
        .collect();
    Pokemon::new(name, "", types, base, moves, max_moves, 65)
}

fn boss() -> Pokemon {
    make_pokemon(
        "Zygarde",
        (PokemonType::Dragon, Some(PokemonType::Ground)),
        stats(108, 100, 121),
        vec![
            attack("Thousand Arrows", PokemonType::Ground, 90).spread(true),
            attack("Dragon Tail", PokemonType::Dragon, 60),
        ],
    )
}

fn team() -> Vec<Pokemon> {
    vec![
        make_pokemon(
            "Lapras",
            (PokemonType::Water, Some(PokemonType::Ice)),
            stats(130, 85, 80),
            vec![attack("Ice Shard", PokemonType::Ice, 40), attack("Waterfall", PokemonType::Water, 80)],
        ),
        make_pokemon(
            "Machamp",
            (PokemonType::Fighting, None),
            stats(90, 130, 80),
            vec![attack("Rock Smash", PokemonType::Fighting, 40), attack("Tackle", PokemonType::Normal, 40)],
        ),
        make_pokemon(
            "Garchomp",
            (PokemonType::Dragon, Some(PokemonType::Ground)),
            stats(108, 130, 95),
            vec![attack("Dragon Claw", PokemonType::Dragon, 80), attack("Earthquake", PokemonType::Ground, 100)],
        ),
    ]
}

#[test]
fn best_move_skips_moves_without_pp() {
    let boss = boss();
    let roster = team();
    let teammates: Vec<&Pokemon> = roster.iter().collect();
    let mut lapras = roster[0].clone();
    // Ice is four times as effective as Water against Dragon/Ground.
    assert_eq!(select_best_move(Combatant::new(&lapras), &boss, &teammates), 0);

    lapras.pp[0] = 0;
    assert_eq!(select_best_move(Combatant::new(&lapras), &boss, &teammates), 1);
}

#[test]
fn best_move_is_zero_when_every_move_is_out_of_pp() {
    let boss = boss();
    let mut machamp = team().remove(1);
    machamp.pp = vec![0, 0];
    assert_eq!(select_best_move(Combatant::new(&machamp), &boss, &[]), 0);
}

#[test]
fn ties_go_to_the_lower_index() {
    let boss = boss();
    let twin = make_pokemon(
        "Twin",
        (PokemonType::Normal, None),
        stats(80, 80, 80),
        vec![attack("Slam", PokemonType::Normal, 80), attack("Slam", PokemonType::Normal, 80)],
    );
    assert_eq!(select_best_move(Combatant::new(&twin), &boss, &[]), 0);
}

#[test]
fn combine_prefers_dynamax_only_when_it_helps() {
    assert_eq!(combine_matchup_scores(1.0, 3.0), 2.0);
    assert_eq!(combine_matchup_scores(3.0, 1.0), 3.0);
    assert_eq!(combine_matchup_scores(2.0, 2.0), 2.0);
}

#[test]
fn matchup_evaluation_leaves_inputs_untouched() {
    let boss = boss();
    let roster = team();
    let teammates: Vec<&Pokemon> = roster.iter().collect();
    let before_boss = boss.clone();
    let before_team = roster.clone();

    let first = evaluate_matchup(&roster[0], &boss, &teammates);
    let second = evaluate_matchup(&roster[0], &boss, &teammates);
    assert_eq!(first, second);
    assert!(first.is_finite() && first > 0.0);
    assert_eq!(boss, before_boss);
    assert_eq!(roster, before_team);
}

#[test]
fn ditto_scores_as_the_boss() {
    let boss = boss();
    let roster = team();
    let teammates: Vec<&Pokemon> = roster.iter().collect();
    let ditto = make_pokemon("Ditto", (PokemonType::Normal, None), stats(48, 48, 48), Vec::new());
    assert_eq!(
        evaluate_matchup(&ditto, &boss, &teammates),
        evaluate_matchup(&boss, &boss, &teammates)
    );
}

#[test]
fn super_effective_attacker_scores_higher() {
    let boss = boss();
    let roster = team();
    let lapras = evaluate_matchup(&roster[0], &boss, &[]);
    let machamp = evaluate_matchup(&roster[1], &boss, &[]);
    assert!(lapras > machamp);
}

#[test]
fn wide_guard_blocks_spread_damage() {
    let spreader = make_pokemon(
        "Spreader",
        (PokemonType::Rock, None),
        stats(100, 100, 100),
        vec![attack("Rock Slide", PokemonType::Rock, 75).spread(true)],
    );
    let guard = make_pokemon(
        "Guard",
        (PokemonType::Normal, None),
        stats(100, 100, 100),
        vec![Move::new("Wide Guard", PokemonType::Rock, MoveCategory::Status, 0, 1.0, 10)],
    );
    let blocked = move_score(Combatant::new(&guard), 0, &spreader, &[]);
    let dynamaxed = move_score(Combatant::dynamaxed(&guard), 0, &spreader, &[]);
    assert!(blocked.is_finite());
    assert!(blocked > dynamaxed * 1000.0);
}

#[test]
fn boss_without_moves_still_scores_finitely() {
    let roster = team();
    let harmless = make_pokemon("Harmless", (PokemonType::Normal, None), stats(100, 10, 100), Vec::new());
    let score = move_score(Combatant::new(&roster[1]), 0, &harmless, &[]);
    assert!(score.is_finite());
    assert!(score > 0.0);
}

#[test]
fn rental_scores_average_to_one() {
    let roster: Roster = team().into_iter().map(|p| (p.name.clone(), p)).collect();
    let (table, scores) = build_rental_matchups(&roster);
    assert_eq!(table.len(), 3);
    assert!(table.values().all(|row| row.len() == 3));
    let mean = scores.values().sum::<f64>() / scores.len() as f64;
    assert!((mean - 1.0).abs() < 1e-9);

    let bosses: Roster = [boss()].into_iter().map(|p| (p.name.clone(), p)).collect();
    let boss_table = build_boss_matchups(&roster, &bosses);
    assert_eq!(boss_table.len(), 3);
    assert!(boss_table.values().all(|row| row["Zygarde"] > 0.0));
}
