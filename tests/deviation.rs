//! Index play tests.

#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use bjcount::{
    Action, Allowed, BasicStrategy, Direction, FAB_4, ILLUSTRIOUS_18, RuleSet, Situation,
    Surrender, find_deviation, find_index_play, recommend, should_take_insurance,
};

#[test]
fn catalogue_shape() {
    assert_eq!(ILLUSTRIOUS_18.len(), 18);
    assert_eq!(FAB_4.len(), 4);

    let insurance = &ILLUSTRIOUS_18[0];
    assert!(insurance.is_insurance());
    assert_eq!(insurance.player_total, 0);
    assert_eq!(insurance.dealer_upcard, 11);
    assert_eq!(insurance.index, 3.0);
    assert_eq!(insurance.deviation_action, Action::TakeInsurance);

    assert!(ILLUSTRIOUS_18[1..].iter().all(|play| !play.is_insurance()));
    assert!(FAB_4.iter().all(|play| play.deviation_action == Action::Surrender));
    assert!(
        FAB_4
            .iter()
            .all(|play| play.direction == Direction::AtOrAbove)
    );
}

#[test]
fn situations_are_unique_within_each_list() {
    let keys: HashSet<_> = ILLUSTRIOUS_18
        .iter()
        .map(|p| (p.player_total, p.soft, p.pair, p.dealer_upcard))
        .collect();
    assert_eq!(keys.len(), ILLUSTRIOUS_18.len());

    let keys: HashSet<_> = FAB_4
        .iter()
        .map(|p| (p.player_total, p.dealer_upcard))
        .collect();
    assert_eq!(keys.len(), FAB_4.len());
}

#[test]
fn sixteen_against_ten() {
    let situation = Situation::hard(16, 10);

    let play = find_deviation(&situation, 0.0, false).unwrap();
    assert_eq!(play.deviation_action, Action::Stand);
    assert!(find_deviation(&situation, -1.0, false).is_none());

    let entry = find_index_play(&situation, false).unwrap();
    assert_eq!(entry.get_action(-1.0), Action::Hit);
    assert_eq!(entry.get_action(0.0), Action::Stand);
    assert!(!entry.should_deviate(-0.5));
}

#[test]
fn matches_need_exact_situation() {
    assert!(find_deviation(&Situation::soft(16, 10), 5.0, false).is_none());
    assert!(find_deviation(&Situation::pair(8, 10), 5.0, false).is_none());
    assert!(find_deviation(&Situation::hard(16, 8), 5.0, false).is_none());

    let tens = find_deviation(&Situation::pair(10, 5), 5.0, false).unwrap();
    assert_eq!(tens.deviation_action, Action::Split);
    assert!(find_deviation(&Situation::hard(20, 5), 5.0, false).is_none());
}

#[test]
fn negative_indices_trigger_at_or_below() {
    let twelve_vs_four = Situation::hard(12, 4);
    let play = find_deviation(&twelve_vs_four, 0.0, false).unwrap();
    assert_eq!(play.direction, Direction::AtOrBelow);
    assert_eq!(play.deviation_action, Action::Hit);
    assert!(find_deviation(&twelve_vs_four, 0.5, false).is_none());

    assert!(find_deviation(&Situation::hard(13, 2), -1.0, false).is_some());
    assert!(find_deviation(&Situation::hard(13, 2), -0.9, false).is_none());
    assert!(find_deviation(&Situation::hard(12, 5), -3.0, false).is_some());
}

#[test]
fn surrender_plays_are_opt_in() {
    let fourteen_vs_ten = Situation::hard(14, 10);
    assert!(find_deviation(&fourteen_vs_ten, 3.0, false).is_none());
    let play = find_deviation(&fourteen_vs_ten, 3.0, true).unwrap();
    assert_eq!(play.deviation_action, Action::Surrender);
    assert!(find_deviation(&fourteen_vs_ten, 2.9, true).is_none());

    let fifteen_vs_ten = Situation::hard(15, 10);
    let surrender = find_deviation(&fifteen_vs_ten, 1.0, true).unwrap();
    assert_eq!(surrender.deviation_action, Action::Surrender);

    let stand = find_deviation(&fifteen_vs_ten, 4.0, true).unwrap();
    assert_eq!(stand.deviation_action, Action::Stand);
    assert_eq!(
        find_index_play(&fifteen_vs_ten, true).unwrap().deviation_action,
        Action::Stand
    );
}

#[test]
fn insurance_threshold() {
    assert!(should_take_insurance(3.0));
    assert!(should_take_insurance(4.2));
    assert!(!should_take_insurance(2.9));

    let play = find_deviation(&Situation::insurance(), 3.0, false).unwrap();
    assert_eq!(play.get_action(3.0), Action::TakeInsurance);
    assert_eq!(play.get_action(0.0), Action::DeclineInsurance);
}

#[test]
fn recommendations_combine_basic_and_index_plays() {
    let strategy = BasicStrategy::new(RuleSet::default());
    let sixteen_vs_ten = Situation::hard(16, 10);

    assert_eq!(
        recommend(&strategy, &sixteen_vs_ten, Allowed::NONE, -1.0, false),
        Action::Hit
    );
    assert_eq!(
        recommend(&strategy, &sixteen_vs_ten, Allowed::NONE, 1.0, false),
        Action::Stand
    );

    let ten_vs_ten = Situation::hard(10, 10);
    assert_eq!(
        recommend(&strategy, &ten_vs_ten, Allowed::ALL, 5.0, false),
        Action::Double
    );
    assert_eq!(
        recommend(&strategy, &ten_vs_ten, Allowed::NONE, 5.0, false),
        Action::Hit
    );

    let no_split = Allowed {
        can_split: false,
        ..Allowed::ALL
    };
    assert_eq!(
        recommend(&strategy, &Situation::pair(10, 6), no_split, 5.0, false),
        Action::Stand
    );

    assert_eq!(
        recommend(&strategy, &Situation::hard(12, 4), Allowed::ALL, 1.0, false),
        Action::Stand
    );
    assert_eq!(
        recommend(&strategy, &Situation::hard(12, 4), Allowed::ALL, -0.5, false),
        Action::Hit
    );
}

#[test]
fn descriptions_are_present() {
    for play in ILLUSTRIOUS_18.iter().chain(&FAB_4) {
        assert!(!play.description.is_empty());
        assert!(play.description.contains("vs") || play.is_insurance());
    }
}

#[test]
fn chart_surrender_is_kept_at_every_count() {
    let strategy = BasicStrategy::new(RuleSet::default());

    for true_count in [-3.0, -1.0, 0.0, 1.0, 4.0, 6.0] {
        for include_surrender in [false, true] {
            for situation in [Situation::hard(16, 10), Situation::hard(16, 9)] {
                assert_eq!(
                    recommend(&strategy, &situation, Allowed::ALL, true_count, include_surrender),
                    Action::Surrender,
                    "{situation:?} at {true_count}"
                );
            }
        }
    }

    assert_eq!(
        recommend(&strategy, &Situation::hard(15, 10), Allowed::ALL, 4.0, true),
        Action::Surrender
    );
}

#[test]
fn surrender_plays_come_before_the_illustrious_18() {
    let no_surrender_chart =
        BasicStrategy::new(RuleSet::default().with_surrender(Surrender::None));
    let fifteen_vs_ten = Situation::hard(15, 10);

    assert_eq!(
        recommend(&no_surrender_chart, &fifteen_vs_ten, Allowed::ALL, -1.0, true),
        Action::Hit
    );
    assert_eq!(
        recommend(&no_surrender_chart, &fifteen_vs_ten, Allowed::ALL, 1.0, true),
        Action::Surrender
    );
    assert_eq!(
        recommend(&no_surrender_chart, &fifteen_vs_ten, Allowed::ALL, 4.0, true),
        Action::Surrender
    );
    assert_eq!(
        recommend(&no_surrender_chart, &fifteen_vs_ten, Allowed::ALL, 4.0, false),
        Action::Stand
    );

    let cannot_surrender = Allowed {
        can_surrender: false,
        ..Allowed::ALL
    };
    assert_eq!(
        recommend(&no_surrender_chart, &fifteen_vs_ten, cannot_surrender, 4.0, true),
        Action::Stand
    );
}

#[test]
fn eleven_against_ace_always_doubles() {
    let strategy = BasicStrategy::new(RuleSet::default());
    let eleven_vs_ace = Situation::hard(11, 11);

    for true_count in [-2.0, 0.0, 1.0, 3.0] {
        assert_eq!(
            recommend(&strategy, &eleven_vs_ace, Allowed::ALL, true_count, false),
            Action::Double
        );
        assert_eq!(
            recommend(&strategy, &eleven_vs_ace, Allowed::NONE, true_count, false),
            Action::Hit
        );
    }
}
