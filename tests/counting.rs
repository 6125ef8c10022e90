//! Counting system tests.

#![allow(clippy::float_cmp)]

use bjcount::{
    COUNT_EPSILON, Card, Counter, CountingSystem, Deck, HiLo, Ko, OmegaII, Rank, Shoe, Suit,
    SystemKind, WongHalves, count_matches, round_count,
};

fn full_deck() -> Vec<Card> {
    Deck::new(0).cards().to_vec()
}

fn cards(list: &[&str]) -> Vec<Card> {
    list.iter().map(|s| s.parse().unwrap()).collect()
}

fn all_systems() -> Vec<Counter> {
    vec![
        HiLo::new().into(),
        Ko::default().into(),
        OmegaII::new().into(),
        WongHalves::new().into(),
        WongHalves::doubled().into(),
    ]
}

#[test]
fn full_deck_sums() {
    let expected = [
        (SystemKind::HiLo, 0.0, true),
        (SystemKind::Ko, 4.0, false),
        (SystemKind::OmegaII, 0.0, true),
        (SystemKind::WongHalves, 0.0, true),
    ];

    for (kind, sum, balanced) in expected {
        let mut counter = Counter::new(kind);
        assert_eq!(counter.full_deck_sum(), sum, "{}", counter.name());
        assert_eq!(counter.is_balanced(), balanced, "{}", counter.name());

        let counted = counter.count_cards(&full_deck());
        assert_eq!(counted, sum, "{}", counter.name());
        assert_eq!(counter.running_count(), sum, "{}", counter.name());
        assert_eq!(counter.cards_seen(), 52);
    }

    assert!(WongHalves::doubled().is_balanced());
}

#[test]
fn true_count_is_zero_without_decks() {
    for mut counter in all_systems() {
        counter.count_cards(&cards(&["2H", "3H", "4H", "5H"]));
        assert!(counter.running_count() != 0.0);
        assert_eq!(counter.true_count(0.0), 0.0, "{}", counter.name());
        assert_eq!(counter.true_count(-1.5), 0.0, "{}", counter.name());
    }
}

#[test]
fn true_count_is_an_unrounded_ratio() {
    let mut counter = HiLo::new();
    counter.count_cards(&cards(&["2H", "3H", "4H", "5H", "6H", "2D", "3D"]));
    assert_eq!(counter.running_count(), 7.0);
    assert_eq!(counter.true_count(3.0), 7.0 / 3.0);
    assert_eq!(round_count(counter.true_count(3.0), 1), 2.3);
}

#[test]
fn hi_lo_tags() {
    let counter = HiLo::new();
    assert_eq!(counter.tag(Rank::Two), 1.0);
    assert_eq!(counter.tag(Rank::Seven), 0.0);
    assert_eq!(counter.tag(Rank::Nine), 0.0);
    assert_eq!(counter.tag(Rank::Queen), -1.0);
    assert_eq!(counter.tag(Rank::Ace), -1.0);
}

#[test]
fn ko_seeding() {
    assert_eq!(Ko::initial_running_count(6), -20.0);
    assert_eq!(Ko::initial_running_count(1), 0.0);
    assert_eq!(Ko::initial_running_count(8), -28.0);

    let mut ko = Ko::new(6);
    assert_eq!(ko.running_count(), -20.0);
    assert_eq!(ko.tag(Rank::Seven), 1.0);

    ko.count_card("7H".parse().unwrap());
    ko.reset();
    assert_eq!(ko.running_count(), 0.0);
    assert_eq!(ko.cards_seen(), 0);

    ko.reset_for_shoe(2);
    assert_eq!(ko.running_count(), -4.0);

    let mut counter = Counter::from_name("ko");
    assert_eq!(counter.running_count(), 0.0);
    counter.reset_for_shoe(8);
    assert_eq!(counter.running_count(), -28.0);
}

#[test]
fn ko_ends_a_full_shoe_at_plus_four() {
    let mut shoe = Shoe::new(6, 1.0, 17).unwrap();
    let mut ko = Ko::new(shoe.num_decks());
    while let Ok(card) = shoe.draw() {
        ko.count_card(card);
    }
    assert_eq!(ko.running_count(), 4.0);
    assert_eq!(ko.cards_seen(), 312);
}

#[test]
fn balanced_systems_reset_for_shoe_to_zero() {
    let mut counter = Counter::from_name("omega2");
    counter.count_card("5H".parse().unwrap());
    counter.reset_for_shoe(6);
    assert_eq!(counter.running_count(), 0.0);
    assert_eq!(counter.cards_seen(), 0);
}

#[test]
fn omega_ii_ace_side_count() {
    let mut omega = OmegaII::new();
    assert_eq!(omega.ace_richness(1, 1.0), 1.0);

    let tags = omega.count_cards(&cards(&["AS", "AH", "5D", "KC"]));
    assert_eq!(tags, 0.0);
    assert_eq!(omega.aces_seen(), 2);
    assert_eq!(omega.running_count(), 0.0);

    assert_eq!(omega.ace_richness(1, 0.5), 1.0);
    assert_eq!(omega.ace_richness(1, 0.25), 2.0);
    assert_eq!(omega.ace_richness(1, 0.0), 1.0);

    omega.reset();
    assert_eq!(omega.aces_seen(), 0);
    assert_eq!(omega.ace_richness(1, 0.5), 2.0);
}

#[test]
fn wong_halves_fractions() {
    let mut halves = WongHalves::new();
    assert_eq!(halves.count_card(Card::new(Rank::Two, Suit::Hearts)), 0.5);
    assert_eq!(halves.count_card(Card::new(Rank::Five, Suit::Hearts)), 1.5);
    assert_eq!(halves.count_card(Card::new(Rank::Nine, Suit::Hearts)), -0.5);
    assert_eq!(halves.running_count(), 1.5);

    let mut doubled = WongHalves::doubled();
    doubled.count_cards(&cards(&["2H", "5H", "9H"]));
    assert_eq!(doubled.running_count(), 3.0);
    assert!(doubled.is_doubled());
    assert_ne!(doubled.name(), halves.name());
}

#[test]
fn factory_by_name() {
    assert_eq!(Counter::from_name("hilo").kind(), SystemKind::HiLo);
    assert_eq!(Counter::from_name("ko").kind(), SystemKind::Ko);
    assert_eq!(Counter::from_name("omega2").kind(), SystemKind::OmegaII);
    assert_eq!(Counter::from_name("wong_halves").kind(), SystemKind::WongHalves);
    assert_eq!(Counter::from_name("KO").kind(), SystemKind::Ko);

    assert_eq!(Counter::from_name("red7").kind(), SystemKind::HiLo);
    assert_eq!(Counter::from_name("").kind(), SystemKind::HiLo);
    assert_eq!(Counter::default().name(), "Hi-Lo");

    for kind in SystemKind::ALL {
        assert_eq!(SystemKind::from_name(kind.key()), kind);
    }
}

#[test]
fn counter_dispatch_keeps_side_counts() {
    let mut counter = Counter::from_name("omega2");
    counter.count_cards(&cards(&["AS", "4H"]));
    let Counter::OmegaII(omega) = counter else {
        panic!("expected Omega II");
    };
    assert_eq!(omega.aces_seen(), 1);
    assert_eq!(omega.running_count(), 2.0);

    counter.reset();
    let Counter::OmegaII(omega) = counter else {
        panic!("expected Omega II");
    };
    assert_eq!(omega.aces_seen(), 0);
}

#[test]
fn drill_answers_within_epsilon() {
    assert!(count_matches(2.0, 2.0));
    assert!(count_matches(2.005, 2.0));
    assert!(!count_matches(2.0 + 2.0 * COUNT_EPSILON, 2.0));
    assert!(!count_matches(-2.0, 2.0));
}
