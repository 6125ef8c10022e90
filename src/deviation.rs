//! Count-based deviations from basic strategy.
//!
//! [`ILLUSTRIOUS_18`] and [`FAB_4`] list the Hi-Lo index plays: each names a
//! situation, the basic strategy play, the play to make instead and the true
//! count at which to switch.
//!
//! ```
//! use bjcount::{Action, Situation, find_deviation};
//!
//! let play = find_deviation(&Situation::hard(16, 10), 0.0, false).unwrap();
//! assert_eq!(play.deviation_action, Action::Stand);
//! assert!(find_deviation(&Situation::hard(16, 10), -1.0, false).is_none());
//! ```

use crate::strategy::{Action, Allowed, BasicStrategy, Situation};

/// Which side of the index triggers the deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Deviate when the true count is at or above the index.
    AtOrAbove,
    /// Deviate when the true count is at or below the index.
    AtOrBelow,
}

/// One count-triggered override of basic strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IndexPlay {
    /// Player total. Zero for the insurance play.
    pub player_total: u8,
    /// Whether the total is soft.
    pub soft: bool,
    /// Whether the hand is a pair.
    pub pair: bool,
    /// Dealer up card value (ace = 11).
    pub dealer_upcard: u8,
    /// Play below the index.
    pub basic_action: Action,
    /// Play once the index is reached.
    pub deviation_action: Action,
    /// True count threshold.
    pub index: f64,
    /// Which side of the threshold triggers the deviation.
    pub direction: Direction,
    /// Human-readable summary.
    pub description: &'static str,
}

#[expect(clippy::too_many_arguments, reason = "one argument per catalogue column")]
const fn play(
    player_total: u8,
    pair: bool,
    dealer_upcard: u8,
    basic_action: Action,
    deviation_action: Action,
    index: f64,
    direction: Direction,
    description: &'static str,
) -> IndexPlay {
    IndexPlay {
        player_total,
        soft: false,
        pair,
        dealer_upcard,
        basic_action,
        deviation_action,
        index,
        direction,
        description,
    }
}

impl IndexPlay {
    /// Returns whether `true_count` triggers the deviation.
    #[must_use]
    pub fn should_deviate(&self, true_count: f64) -> bool {
        match self.direction {
            Direction::AtOrAbove => true_count >= self.index,
            Direction::AtOrBelow => true_count <= self.index,
        }
    }

    /// Returns the play to make at `true_count`.
    #[must_use]
    pub fn get_action(&self, true_count: f64) -> Action {
        if self.should_deviate(true_count) {
            self.deviation_action
        } else {
            self.basic_action
        }
    }

    /// Returns whether this is the insurance decision.
    #[must_use]
    pub const fn is_insurance(&self) -> bool {
        self.player_total == 0
    }

    /// Returns whether the play covers `situation` exactly.
    #[must_use]
    pub const fn matches(&self, situation: &Situation) -> bool {
        self.player_total == situation.total
            && self.soft == situation.soft
            && self.pair == situation.is_pair()
            && self.dealer_upcard == situation.dealer_upcard
    }
}

/// The eighteen most valuable Hi-Lo index plays, insurance first.
#[rustfmt::skip]
pub static ILLUSTRIOUS_18: [IndexPlay; 18] = {
    use Action::{DeclineInsurance, Double, Hit, Split, Stand, TakeInsurance};
    use Direction::{AtOrAbove, AtOrBelow};

    [
        play(0, false, 11, DeclineInsurance, TakeInsurance, 3.0, AtOrAbove, "Insurance: take at +3 or higher"),
        play(16, false, 10, Hit, Stand, 0.0, AtOrAbove, "16 vs 10: stand at 0 or higher"),
        play(15, false, 10, Hit, Stand, 4.0, AtOrAbove, "15 vs 10: stand at +4 or higher"),
        play(20, true, 5, Stand, Split, 5.0, AtOrAbove, "10,10 vs 5: split at +5 or higher"),
        play(20, true, 6, Stand, Split, 4.0, AtOrAbove, "10,10 vs 6: split at +4 or higher"),
        play(10, false, 10, Hit, Double, 4.0, AtOrAbove, "10 vs 10: double at +4 or higher"),
        play(12, false, 3, Hit, Stand, 2.0, AtOrAbove, "12 vs 3: stand at +2 or higher"),
        play(12, false, 2, Hit, Stand, 3.0, AtOrAbove, "12 vs 2: stand at +3 or higher"),
        // Published against a chart that hits 11 vs A; the chart here always
        // doubles it, so `recommend` keeps the double at every count.
        play(11, false, 11, Hit, Double, 1.0, AtOrAbove, "11 vs A: double at +1 or higher"),
        play(9, false, 2, Hit, Double, 1.0, AtOrAbove, "9 vs 2: double at +1 or higher"),
        play(10, false, 11, Hit, Double, 4.0, AtOrAbove, "10 vs A: double at +4 or higher"),
        play(9, false, 7, Hit, Double, 3.0, AtOrAbove, "9 vs 7: double at +3 or higher"),
        play(16, false, 9, Hit, Stand, 5.0, AtOrAbove, "16 vs 9: stand at +5 or higher"),
        play(13, false, 2, Stand, Hit, -1.0, AtOrBelow, "13 vs 2: hit at -1 or lower"),
        play(12, false, 4, Stand, Hit, 0.0, AtOrBelow, "12 vs 4: hit at 0 or lower"),
        play(12, false, 5, Stand, Hit, -2.0, AtOrBelow, "12 vs 5: hit at -2 or lower"),
        play(12, false, 6, Stand, Hit, -1.0, AtOrBelow, "12 vs 6: hit at -1 or lower"),
        play(13, false, 3, Stand, Hit, -2.0, AtOrBelow, "13 vs 3: hit at -2 or lower"),
    ]
};

/// The four Hi-Lo late-surrender index plays.
#[rustfmt::skip]
pub static FAB_4: [IndexPlay; 4] = {
    use Action::{Hit, Surrender};
    use Direction::AtOrAbove;

    [
        play(14, false, 10, Hit, Surrender, 3.0, AtOrAbove, "14 vs 10: surrender at +3 or higher"),
        play(15, false, 10, Hit, Surrender, 0.0, AtOrAbove, "15 vs 10: surrender at 0 or higher"),
        play(15, false, 9, Hit, Surrender, 2.0, AtOrAbove, "15 vs 9: surrender at +2 or higher"),
        play(15, false, 11, Hit, Surrender, 1.0, AtOrAbove, "15 vs A: surrender at +1 or higher"),
    ]
};

fn catalogue(include_surrender: bool) -> impl Iterator<Item = &'static IndexPlay> {
    let surrender: &'static [IndexPlay] = if include_surrender { &FAB_4 } else { &[] };
    ILLUSTRIOUS_18.iter().chain(surrender)
}

/// Returns the first index play that covers `situation` and is triggered at
/// `true_count`.
///
/// The Illustrious 18 are scanned in order, followed by the Fab 4 when
/// `include_surrender` is set. Only exact situation matches count.
///
/// Entries that are not triggered at `true_count` are skipped, so 16 vs 10
/// at -1 yields `None` here. Use [`find_index_play`] to get the entry for a
/// situation whatever the count, then [`IndexPlay::get_action`] to pick
/// between its two plays.
#[must_use]
pub fn find_deviation(
    situation: &Situation,
    true_count: f64,
    include_surrender: bool,
) -> Option<&'static IndexPlay> {
    catalogue(include_surrender)
        .find(|play| play.matches(situation) && play.should_deviate(true_count))
}

/// Returns the first index play that covers `situation`, whatever the count.
#[must_use]
pub fn find_index_play(
    situation: &Situation,
    include_surrender: bool,
) -> Option<&'static IndexPlay> {
    catalogue(include_surrender).find(|play| play.matches(situation))
}

/// Returns whether insurance should be taken at `true_count`.
#[must_use]
pub fn should_take_insurance(true_count: f64) -> bool {
    ILLUSTRIOUS_18[0].should_deviate(true_count)
}

/// Returns the play for `situation` at `true_count`: the basic strategy
/// action, overridden by a triggered index play.
///
/// An index play only overrides basic strategy when its `basic_action`
/// agrees with the chart's resolved action, so a chart surrender of 16 vs 10
/// is never turned into a stand. Surrender plays are considered before the
/// Illustrious 18 because surrender is decided first. An index play whose
/// action is not currently allowed (for example a split when the hand cannot
/// be split) is ignored.
///
/// ```
/// use bjcount::{Action, Allowed, BasicStrategy, RuleSet, Situation, recommend};
///
/// let strategy = BasicStrategy::new(RuleSet::default());
/// let tens = Situation::pair(10, 6);
/// assert_eq!(recommend(&strategy, &tens, Allowed::ALL, 1.0, false), Action::Stand);
/// assert_eq!(recommend(&strategy, &tens, Allowed::ALL, 4.5, false), Action::Split);
/// ```
#[must_use]
pub fn recommend(
    strategy: &BasicStrategy,
    situation: &Situation,
    allowed: Allowed,
    true_count: f64,
    include_surrender: bool,
) -> Action {
    let basic = strategy.get_action(situation, allowed);
    let surrender: &'static [IndexPlay] = if include_surrender { &FAB_4 } else { &[] };

    surrender
        .iter()
        .chain(&ILLUSTRIOUS_18)
        .filter(|play| !play.is_insurance())
        .filter(|play| play.matches(situation) && play.should_deviate(true_count))
        .filter(|play| play.basic_action.resolve(allowed) == basic)
        .map(|play| play.deviation_action)
        .find(|&deviation| deviation.resolve(allowed) == deviation)
        .unwrap_or(basic)
}
