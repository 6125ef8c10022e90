//! Basic strategy tables.
//!
//! [`BasicStrategy::new`] builds three charts (hard totals, soft totals and
//! pairs) from a [`RuleSet`]. Cells may hold conditional actions such as
//! "double, otherwise hit"; [`BasicStrategy::get_action`] always resolves
//! them against what the hand is currently allowed to do.
//!
//! ```
//! use bjcount::{Action, Allowed, BasicStrategy, RuleSet, Situation};
//!
//! let strategy = BasicStrategy::new(RuleSet::default());
//! let action = strategy.get_action(&Situation::hard(11, 6), Allowed::ALL);
//! assert_eq!(action, Action::Double);
//! let action = strategy.get_action(&Situation::hard(11, 6), Allowed::NONE);
//! assert_eq!(action, Action::Hit);
//! ```

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::sync::Arc;
use core::ops::RangeInclusive;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::card::Card;
use crate::hand::Hand;
use crate::rules::{RuleSet, Surrender};
use crate::sync::Mutex;
use crate::trace::trace_event;

/// Dealer up cards covered by every chart (ace = 11).
pub const DEALER_UPCARDS: RangeInclusive<u8> = 2..=11;

/// A player decision.
///
/// The `*Or*` variants only appear inside strategy tables and index plays;
/// [`Action::resolve`] turns them into a primitive action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Take another card.
    Hit,
    /// Take no more cards.
    Stand,
    /// Double the bet and take one card.
    Double,
    /// Split the pair.
    Split,
    /// Forfeit half the bet.
    Surrender,
    /// Double if allowed, otherwise hit.
    DoubleOrHit,
    /// Double if allowed, otherwise stand.
    DoubleOrStand,
    /// Surrender if allowed, otherwise hit.
    SurrenderOrHit,
    /// Surrender if allowed, otherwise stand.
    SurrenderOrStand,
    /// Surrender if allowed, otherwise split.
    SurrenderOrSplit,
    /// Take insurance. Only used by the insurance index play.
    TakeInsurance,
    /// Decline insurance. Only used by the insurance index play.
    DeclineInsurance,
}

impl Action {
    /// Returns the chart code for the action.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Hit => "H",
            Self::Stand => "S",
            Self::Double => "D",
            Self::Split => "P",
            Self::Surrender => "R",
            Self::DoubleOrHit => "Dh",
            Self::DoubleOrStand => "Ds",
            Self::SurrenderOrHit => "Rh",
            Self::SurrenderOrStand => "Rs",
            Self::SurrenderOrSplit => "Rp",
            Self::TakeInsurance => "I",
            Self::DeclineInsurance => "NI",
        }
    }

    /// Returns whether the action depends on what is allowed.
    #[must_use]
    pub const fn is_conditional(self) -> bool {
        matches!(
            self,
            Self::DoubleOrHit
                | Self::DoubleOrStand
                | Self::SurrenderOrHit
                | Self::SurrenderOrStand
                | Self::SurrenderOrSplit
        )
    }

    /// Resolves the action to a primitive one given what is allowed.
    ///
    /// Conditional actions pick their preferred or fallback branch. A bare
    /// double, split or surrender that is not allowed becomes a hit.
    #[must_use]
    pub const fn resolve(self, allowed: Allowed) -> Self {
        match self {
            Self::DoubleOrHit if allowed.can_double => Self::Double,
            Self::DoubleOrStand if allowed.can_double => Self::Double,
            Self::SurrenderOrHit | Self::SurrenderOrStand | Self::SurrenderOrSplit
                if allowed.can_surrender =>
            {
                Self::Surrender
            }
            Self::DoubleOrStand | Self::SurrenderOrStand => Self::Stand,
            Self::SurrenderOrSplit | Self::Split if allowed.can_split => Self::Split,
            Self::Double if allowed.can_double => Self::Double,
            Self::Surrender if allowed.can_surrender => Self::Surrender,
            Self::DoubleOrHit
            | Self::SurrenderOrHit
            | Self::SurrenderOrSplit
            | Self::Split
            | Self::Double
            | Self::Surrender
            | Self::Hit => Self::Hit,
            Self::Stand => Self::Stand,
            Self::TakeInsurance => Self::TakeInsurance,
            Self::DeclineInsurance => Self::DeclineInsurance,
        }
    }
}

/// What the player may currently do with a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Allowed {
    /// Doubling is allowed.
    pub can_double: bool,
    /// Surrender is allowed.
    pub can_surrender: bool,
    /// Splitting is allowed.
    pub can_split: bool,
}

impl Allowed {
    /// Everything is allowed.
    pub const ALL: Self = Self {
        can_double: true,
        can_surrender: true,
        can_split: true,
    };

    /// Only hitting and standing are allowed.
    pub const NONE: Self = Self {
        can_double: false,
        can_surrender: false,
        can_split: false,
    };

    /// Derives the allowed options for `hand` under `rules`.
    ///
    /// Surrender is only available on the first two cards of an unsplit
    /// hand.
    #[must_use]
    pub fn for_hand(hand: &Hand, rules: &RuleSet, splits_so_far: u8) -> Self {
        Self {
            can_double: hand.can_double(rules),
            can_surrender: rules.surrender.is_offered()
                && hand.len() == 2
                && !hand.is_from_split()
                && !hand.is_doubled(),
            can_split: hand.can_split(rules, splits_so_far),
        }
    }
}

/// The player's position as seen by the strategy charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Situation {
    /// Player total. Zero for the insurance decision.
    pub total: u8,
    /// Dealer up card value, 2 through 11 (ace = 11).
    pub dealer_upcard: u8,
    /// Whether the total is soft.
    pub soft: bool,
    /// Value of the paired card (2 through 11) when the hand is a pair.
    pub pair: Option<u8>,
}

impl Situation {
    /// A hard total.
    #[must_use]
    pub const fn hard(total: u8, dealer_upcard: u8) -> Self {
        Self {
            total,
            dealer_upcard,
            soft: false,
            pair: None,
        }
    }

    /// A soft total.
    #[must_use]
    pub const fn soft(total: u8, dealer_upcard: u8) -> Self {
        Self {
            total,
            dealer_upcard,
            soft: true,
            pair: None,
        }
    }

    /// A pair of cards worth `value` each (ace = 11).
    #[must_use]
    pub const fn pair(value: u8, dealer_upcard: u8) -> Self {
        let aces = value == 11;
        Self {
            total: if aces { 12 } else { value * 2 },
            dealer_upcard,
            soft: aces,
            pair: Some(value),
        }
    }

    /// The insurance decision against a dealer ace.
    #[must_use]
    pub const fn insurance() -> Self {
        Self::hard(0, 11)
    }

    /// Describes `hand` against the dealer's up card.
    #[must_use]
    pub fn from_hand(hand: &Hand, dealer_upcard: Card) -> Self {
        Self {
            total: hand.value(),
            dealer_upcard: dealer_upcard.value(),
            soft: hand.is_soft(),
            pair: hand.pair_value(),
        }
    }

    /// Returns whether the hand is a pair.
    #[must_use]
    pub const fn is_pair(&self) -> bool {
        self.pair.is_some()
    }
}

/// One strategy chart, keyed by `(player row, dealer up card)`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StrategyTable {
    cells: BTreeMap<(u8, u8), Action>,
}

impl StrategyTable {
    fn set(&mut self, row: u8, dealer: RangeInclusive<u8>, action: Action) {
        for up in dealer {
            self.cells.insert((row, up), action);
        }
    }

    fn set_rows(&mut self, rows: RangeInclusive<u8>, dealer: RangeInclusive<u8>, action: Action) {
        for row in rows {
            self.set(row, dealer.clone(), action);
        }
    }

    /// Returns the unresolved action for a cell.
    #[must_use]
    pub fn get(&self, row: u8, dealer_upcard: u8) -> Option<Action> {
        self.cells.get(&(row, dealer_upcard)).copied()
    }

    /// Iterates over cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = ((u8, u8), Action)> + '_ {
        self.cells.iter().map(|(&key, &action)| (key, action))
    }

    /// Returns the number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns whether the chart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<'a> IntoIterator for &'a StrategyTable {
    type Item = (&'a (u8, u8), &'a Action);
    type IntoIter = btree_map::Iter<'a, (u8, u8), Action>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

fn build_hard(rules: &RuleSet) -> StrategyTable {
    use Action::{DoubleOrHit, Hit, Stand, SurrenderOrHit, SurrenderOrStand};

    let mut table = StrategyTable::default();

    table.set_rows(5..=8, DEALER_UPCARDS, Hit);

    table.set(9, DEALER_UPCARDS, Hit);
    table.set(9, 3..=6, DoubleOrHit);

    table.set(10, 2..=9, DoubleOrHit);
    table.set(10, 10..=11, Hit);

    table.set(11, DEALER_UPCARDS, DoubleOrHit);

    table.set(12, DEALER_UPCARDS, Hit);
    table.set(12, 4..=6, Stand);

    table.set_rows(13..=16, 2..=6, Stand);
    table.set_rows(13..=16, 7..=11, Hit);

    table.set_rows(17..=21, DEALER_UPCARDS, Stand);

    if rules.surrender.is_offered() {
        table.set(16, 9..=11, SurrenderOrHit);
        table.set(15, 10..=10, SurrenderOrHit);
        if rules.dealer_hits_soft_17 {
            table.set(15, 11..=11, SurrenderOrHit);
            table.set(17, 11..=11, SurrenderOrStand);
        }
    }

    if rules.surrender == Surrender::Early {
        table.set_rows(5..=7, 11..=11, SurrenderOrHit);
        table.set_rows(12..=16, 11..=11, SurrenderOrHit);
        table.set(17, 11..=11, SurrenderOrStand);
        table.set_rows(14..=16, 10..=10, SurrenderOrHit);
    }

    table
}

fn build_soft(rules: &RuleSet) -> StrategyTable {
    use Action::{DoubleOrHit, DoubleOrStand, Hit, Stand};

    let mut table = StrategyTable::default();

    table.set_rows(13..=14, DEALER_UPCARDS, Hit);
    table.set_rows(13..=14, 5..=6, DoubleOrHit);

    table.set_rows(15..=16, DEALER_UPCARDS, Hit);
    table.set_rows(15..=16, 4..=6, DoubleOrHit);

    table.set(17, DEALER_UPCARDS, Hit);
    table.set(17, 3..=6, DoubleOrHit);

    table.set(18, 2..=8, Stand);
    table.set(18, 3..=6, DoubleOrStand);
    table.set(18, 9..=11, Hit);

    table.set_rows(19..=21, DEALER_UPCARDS, Stand);

    if rules.dealer_hits_soft_17 {
        table.set(18, 2..=2, DoubleOrStand);
        table.set(19, 6..=6, DoubleOrStand);
    }

    table
}

fn build_pairs(rules: &RuleSet) -> StrategyTable {
    use Action::{DoubleOrHit, Hit, Split, Stand, SurrenderOrHit, SurrenderOrSplit};

    let mut table = StrategyTable::default();
    let das = rules.double_after_split;

    table.set_rows(2..=3, DEALER_UPCARDS, Hit);
    table.set_rows(2..=3, if das { 2..=7 } else { 4..=7 }, Split);

    table.set(4, DEALER_UPCARDS, Hit);
    if das {
        table.set(4, 5..=6, Split);
    }

    table.set(5, 2..=9, DoubleOrHit);
    table.set(5, 10..=11, Hit);

    table.set(6, DEALER_UPCARDS, Hit);
    table.set(6, if das { 2..=6 } else { 3..=6 }, Split);

    table.set(7, DEALER_UPCARDS, Hit);
    table.set(7, 2..=7, Split);

    table.set(8, DEALER_UPCARDS, Split);

    table.set(9, DEALER_UPCARDS, Split);
    table.set(9, 7..=7, Stand);
    table.set(9, 10..=11, Stand);

    table.set(10, DEALER_UPCARDS, Stand);

    table.set(11, DEALER_UPCARDS, Split);

    if rules.surrender.is_offered() && rules.dealer_hits_soft_17 {
        table.set(8, 11..=11, SurrenderOrSplit);
    }

    if rules.surrender == Surrender::Early {
        table.set(8, 11..=11, SurrenderOrSplit);
        table.set(3, 11..=11, SurrenderOrHit);
        table.set(6, 11..=11, SurrenderOrHit);
        table.set(7, 10..=11, SurrenderOrHit);
    }

    table
}

/// Basic strategy charts for one rule set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicStrategy {
    rules: RuleSet,
    hard: StrategyTable,
    soft: StrategyTable,
    pairs: StrategyTable,
}

impl BasicStrategy {
    /// Builds the charts for `rules`.
    #[must_use]
    pub fn new(rules: RuleSet) -> Self {
        trace_event!(
            decks = rules.decks,
            dealer_hits_soft_17 = rules.dealer_hits_soft_17,
            double_after_split = rules.double_after_split,
            "building strategy tables"
        );

        Self {
            hard: build_hard(&rules),
            soft: build_soft(&rules),
            pairs: build_pairs(&rules),
            rules,
        }
    }

    /// Returns the rule set the charts were built for.
    #[must_use]
    pub const fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Hard totals 5 through 21.
    #[must_use]
    pub const fn hard_table(&self) -> &StrategyTable {
        &self.hard
    }

    /// Soft totals 13 through 21.
    #[must_use]
    pub const fn soft_table(&self) -> &StrategyTable {
        &self.soft
    }

    /// Pairs, keyed by the value of one card (2 through 11).
    #[must_use]
    pub const fn pair_table(&self) -> &StrategyTable {
        &self.pairs
    }

    /// Returns the chart action for `situation`, before resolution.
    ///
    /// The pair chart is used when the hand is a pair and splitting is
    /// allowed; otherwise the soft or hard chart. Totals outside every chart
    /// stand on 17 or more and hit below.
    #[must_use]
    pub fn lookup(&self, situation: &Situation, allowed: Allowed) -> Action {
        let up = situation.dealer_upcard;

        let pair_action = match situation.pair {
            Some(value) if allowed.can_split => self.pairs.get(value, up),
            _ => None,
        };

        pair_action
            .or_else(|| {
                if situation.soft {
                    self.soft.get(situation.total, up)
                } else {
                    self.hard.get(situation.total, up)
                }
            })
            .unwrap_or(if situation.total >= 17 {
                Action::Stand
            } else {
                Action::Hit
            })
    }

    /// Returns the basic strategy action for `situation`, resolved to a
    /// primitive action.
    #[must_use]
    pub fn get_action(&self, situation: &Situation, allowed: Allowed) -> Action {
        self.lookup(situation, allowed).resolve(allowed)
    }

    /// Returns the basic strategy action for `hand` against `dealer_upcard`.
    #[must_use]
    pub fn action_for_hand(&self, hand: &Hand, dealer_upcard: Card, splits_so_far: u8) -> Action {
        let allowed = Allowed::for_hand(hand, &self.rules, splits_so_far);
        self.get_action(&Situation::from_hand(hand, dealer_upcard), allowed)
    }
}

/// Memoizes [`BasicStrategy`] per [`RuleSet`].
///
/// Built strategies are immutable and shared through [`Arc`], so the cache
/// can be used from several threads.
pub struct StrategyCache {
    tables: Mutex<HashMap<RuleSet, Arc<BasicStrategy>>>,
}

impl StrategyCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the strategy for `rules`, building it on first use.
    pub fn get(&self, rules: &RuleSet) -> Arc<BasicStrategy> {
        Arc::clone(
            self.tables
                .lock()
                .entry(*rules)
                .or_insert_with(|| Arc::new(BasicStrategy::new(*rules))),
        )
    }

    /// Returns the number of cached rule sets.
    pub fn len(&self) -> usize {
        self.tables.lock().len()
    }

    /// Returns whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.tables.lock().is_empty()
    }

    /// Drops every cached strategy.
    pub fn clear(&self) {
        self.tables.lock().clear();
    }
}

impl Default for StrategyCache {
    fn default() -> Self {
        Self::new()
    }
}
