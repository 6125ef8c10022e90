//! Card, deck and shoe tests.

#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use bjcount::{Card, DECK_SIZE, Deck, DrawError, ParseCardError, Rank, Shoe, ShoeError, Suit};

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

#[test]
fn card_values_and_classes() {
    assert_eq!(card(Rank::Ace, Suit::Spades).value(), 11);
    assert_eq!(card(Rank::King, Suit::Hearts).value(), 10);
    assert_eq!(card(Rank::Seven, Suit::Clubs).value(), 7);

    assert!(card(Rank::Ace, Suit::Diamonds).is_ace());
    assert!(!card(Rank::Ace, Suit::Diamonds).is_ten_value());
    for rank in [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King] {
        assert!(card(rank, Suit::Hearts).is_ten_value());
    }
    assert!(!card(Rank::Nine, Suit::Hearts).is_ten_value());
}

#[test]
fn parse_short_hand() {
    assert_eq!(Card::from_string("AS"), Ok(card(Rank::Ace, Suit::Spades)));
    assert_eq!(Card::from_string("10H"), Ok(card(Rank::Ten, Suit::Hearts)));
    assert_eq!(Card::from_string("TH"), Ok(card(Rank::Ten, Suit::Hearts)));
    assert_eq!(Card::from_string("th"), Ok(card(Rank::Ten, Suit::Hearts)));
    assert_eq!(Card::from_string("K♦"), Ok(card(Rank::King, Suit::Diamonds)));
    assert_eq!(Card::from_string("q♧"), Ok(card(Rank::Queen, Suit::Clubs)));
    assert_eq!(Card::from_string("7♥\u{fe0f}"), Ok(card(Rank::Seven, Suit::Hearts)));
    assert_eq!("2c".parse::<Card>(), Ok(card(Rank::Two, Suit::Clubs)));
    assert_eq!(Card::try_from("js"), Ok(card(Rank::Jack, Suit::Spades)));
}

#[test]
fn parse_errors() {
    assert_eq!(Card::from_string(""), Err(ParseCardError::Empty));
    assert_eq!(Card::from_string("A"), Err(ParseCardError::InvalidLength(1)));
    assert_eq!(Card::from_string("10HS"), Err(ParseCardError::InvalidLength(4)));
    assert_eq!(
        Card::from_string("1H"),
        Err(ParseCardError::UnknownRank("1".to_string()))
    );
    assert_eq!(
        Card::from_string("11H"),
        Err(ParseCardError::UnknownRank("11".to_string()))
    );
    assert_eq!(Card::from_string("AX"), Err(ParseCardError::UnknownSuit('X')));
}

#[test]
fn display_round_trips_for_every_card() {
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let original = card(rank, suit);
            assert_eq!(Card::from_string(&original.to_string()), Ok(original));

            let lettered = format!("{}{}", rank.symbol(), suit.letter());
            assert_eq!(Card::from_string(&lettered), Ok(original));
        }
    }

    assert_eq!(card(Rank::Ten, Suit::Hearts).to_string(), "10♥");
    assert_eq!(card(Rank::Ace, Suit::Spades).to_string(), "A♠");
}

#[test]
fn new_deck_is_canonical() {
    let deck = Deck::new(1);
    assert_eq!(deck.len(), DECK_SIZE);
    assert_eq!(deck.cards()[0], card(Rank::Two, Suit::Hearts));
    assert_eq!(deck.cards()[12], card(Rank::Ace, Suit::Hearts));
    assert_eq!(deck.cards()[13], card(Rank::Two, Suit::Diamonds));
    assert_eq!(deck.cards()[51], card(Rank::Ace, Suit::Spades));
}

#[test]
fn drawing_a_whole_deck_yields_distinct_cards() {
    let mut deck = Deck::new(99);
    deck.shuffle();

    let mut seen = HashSet::new();
    for _ in 0..DECK_SIZE {
        assert!(seen.insert(deck.draw().unwrap()));
    }

    assert!(deck.is_empty());
    assert_eq!(deck.draw(), Err(DrawError::Empty));
    assert_eq!(deck.len(), 0);

    deck.reset();
    assert_eq!(deck.len(), DECK_SIZE);
}

#[test]
fn deck_shuffle_only_permutes_remaining_cards() {
    let mut deck = Deck::new(3);
    let drawn = deck.draw().unwrap();
    deck.shuffle();
    assert_eq!(deck.len(), DECK_SIZE - 1);
    assert!(deck.iter().all(|&c| c != drawn));
}

#[test]
fn seeded_shuffles_are_reproducible() {
    let mut a = Deck::new(5);
    let mut b = Deck::new(5);
    a.shuffle();
    b.shuffle();
    assert_eq!(a.cards(), b.cards());

    let a = Shoe::new(2, 0.8, 11).unwrap();
    let b = Shoe::new(2, 0.8, 11).unwrap();
    assert_eq!(a.cards(), b.cards());
}

#[test]
fn shoe_rejects_bad_configuration() {
    assert_eq!(
        Shoe::new(0, 0.75, 1).unwrap_err(),
        ShoeError::InvalidDecks(0)
    );
    assert_eq!(
        Shoe::new(6, 0.0, 1).unwrap_err(),
        ShoeError::InvalidPenetration(0.0)
    );
    assert_eq!(
        Shoe::new(6, 1.5, 1).unwrap_err(),
        ShoeError::InvalidPenetration(1.5)
    );
    assert!(matches!(
        Shoe::new(6, f64::NAN, 1),
        Err(ShoeError::InvalidPenetration(_))
    ));
    assert!(Shoe::new(1, 1.0, 1).is_ok());
}

#[test]
fn shoe_holds_every_card_once_per_deck() {
    let shoe = Shoe::new(2, 0.75, 4).unwrap();
    assert_eq!(shoe.cards_remaining(), 2 * DECK_SIZE);

    for suit in Suit::ALL {
        for rank in Rank::ALL {
            let copies = shoe.iter().filter(|&&c| c == card(rank, suit)).count();
            assert_eq!(copies, 2);
        }
    }
}

#[test]
fn shoe_cut_card_and_reshuffle() {
    let mut shoe = Shoe::new(1, 0.5, 8).unwrap();
    assert_eq!(shoe.cut_card(), 26);

    for _ in 0..25 {
        shoe.draw().unwrap();
    }
    assert!(!shoe.needs_shuffle());
    shoe.draw().unwrap();
    assert!(shoe.needs_shuffle());
    assert_eq!(shoe.cards_dealt(), 26);

    shoe.shuffle();
    assert_eq!(shoe.cards_remaining(), DECK_SIZE);
    assert!(!shoe.needs_shuffle());
}

#[test]
fn shoe_decks_remaining_is_continuous() {
    let mut shoe = Shoe::new(6, 0.75, 2).unwrap();
    assert_eq!(shoe.decks_remaining(), 6.0);

    shoe.draw_many(26).unwrap();
    assert_eq!(shoe.decks_remaining(), 5.5);

    shoe.draw_many(13).unwrap();
    assert_eq!(shoe.decks_remaining(), 5.25);
}

#[test]
fn shoe_draw_many_is_all_or_nothing() {
    let mut shoe = Shoe::new(1, 1.0, 6).unwrap();
    let expected: Vec<Card> = shoe.cards().iter().rev().take(3).copied().collect();
    assert_eq!(shoe.draw_many(3).unwrap(), expected);

    assert_eq!(shoe.draw_many(50), Err(DrawError::Empty));
    assert_eq!(shoe.cards_remaining(), 49);

    shoe.draw_many(49).unwrap();
    assert!(shoe.is_empty());
    assert_eq!(shoe.draw(), Err(DrawError::Empty));
    assert!(shoe.needs_shuffle());
}
