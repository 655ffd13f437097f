use max_lair::core::state::MAX_CATCHES;
use max_lair::{BallInventory, Mode, SessionState};

fn session(base_ball: &str, base_balls: u32, legendary_ball: &str, legendary_balls: u32) -> SessionState {
    let balls = BallInventory {
        base_ball: base_ball.to_string(),
        base_balls,
        legendary_ball: legendary_ball.to_string(),
        legendary_balls,
    };
    SessionState::new("Zygarde", balls, Mode::Default, 0)
}

#[test]
fn distinct_balls_come_out_of_their_own_pile() {
    let mut s = session("Dive", 10, "Beast", 2);
    assert_eq!(s.target_ball(), "Dive");
    for _ in 0..3 {
        s.record_ball_use();
    }
    assert_eq!(s.balls.base_balls, 7);
    assert_eq!(s.balls.legendary_balls, 2);
    assert_eq!(s.target_ball(), "Beast");

    s.record_ball_use();
    assert_eq!(s.balls.base_balls, 7);
    assert_eq!(s.balls.legendary_balls, 1);
    assert_eq!(s.run.num_caught, MAX_CATCHES);
}

#[test]
fn shared_balls_come_out_of_both_counters() {
    let mut s = session("Poke", 10, "Poke", 10);
    s.record_ball_use();
    s.record_ball_use();
    assert_eq!(s.balls.base_balls, 8);
    assert_eq!(s.balls.legendary_balls, 8);
    assert_eq!(s.run.num_caught, 2);
}

#[test]
fn catch_count_never_passes_four() {
    let mut s = session("Poke", 20, "Poke", 20);
    for _ in 0..6 {
        s.record_ball_use();
    }
    assert_eq!(s.run.num_caught, MAX_CATCHES);
}

#[test]
fn sufficiency_rules() {
    assert!(session("Dive", 3, "Beast", 1).check_sufficient_balls());
    assert!(!session("Dive", 3, "Beast", 0).check_sufficient_balls());
    assert!(!session("Dive", 2, "Beast", 5).check_sufficient_balls());
    assert!(session("Poke", 4, "Poke", 4).check_sufficient_balls());
    assert!(!session("Poke", 3, "Poke", 3).check_sufficient_balls());
}

#[test]
fn reset_refunds_the_balls_thrown_this_run() {
    let mut s = session("Dive", 10, "Beast", 3);
    for _ in 0..4 {
        s.record_ball_use();
    }
    assert_eq!((s.balls.base_balls, s.balls.legendary_balls), (7, 2));
    s.refund_run_balls();
    assert_eq!((s.balls.base_balls, s.balls.legendary_balls), (10, 3));
    // A second refund has nothing left to give back.
    s.refund_run_balls();
    assert_eq!((s.balls.base_balls, s.balls.legendary_balls), (10, 3));
}

#[test]
fn reset_cost_grows_after_two_free_resets() {
    let mut s = session("Dive", 10, "Beast", 3);
    s.dynite_ore = 5;
    s.pay_for_reset();
    s.pay_for_reset();
    assert_eq!(s.dynite_ore, 5);
    assert!(s.check_sufficient_ore(s.consecutive_resets + 1));
    s.pay_for_reset();
    assert_eq!(s.consecutive_resets, 3);
    assert_eq!(s.dynite_ore, 2);
    assert!(!s.check_sufficient_ore(s.consecutive_resets + 1));
}

#[test]
fn statistics_need_a_finished_run() {
    let mut s = session("Dive", 10, "Beast", 3);
    assert_eq!(s.win_percent(), None);
    assert!(s.time_per_run().is_none());
    s.runs = 3;
    s.wins = 2;
    assert_eq!(s.win_percent(), Some(67));
}

#[test]
fn new_run_clears_progress_but_keeps_inventory() {
    let mut s = session("Dive", 10, "Beast", 3);
    s.record_ball_use();
    s.run.hp_fraction = 0.4;
    s.reset_run();
    assert_eq!(s.run.num_caught, 0);
    assert_eq!(s.run.hp_fraction, 1.0);
    assert_eq!(s.run.balls_used(), (0, 0));
    assert_eq!(s.balls.base_balls, 9);
}
