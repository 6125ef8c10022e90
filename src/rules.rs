//! Table rule configuration.

/// Surrender policy offered by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surrender {
    /// Surrender is not offered.
    None,
    /// Surrender after the dealer checks for blackjack.
    #[default]
    Late,
    /// Surrender before the dealer checks for blackjack.
    Early,
}

impl Surrender {
    /// Returns whether any form of surrender is offered.
    #[must_use]
    pub const fn is_offered(self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Rounding mode for fractional payouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

#[cfg(feature = "std")]
pub(crate) fn round_amount(amount: f64, mode: RoundingMode) -> f64 {
    match mode {
        RoundingMode::Up => amount.ceil(),
        RoundingMode::Down => amount.floor(),
        RoundingMode::Nearest => amount.round(),
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
pub(crate) fn round_amount(amount: f64, mode: RoundingMode) -> f64 {
    match mode {
        RoundingMode::Up => libm::ceil(amount),
        RoundingMode::Down => libm::floor(amount),
        RoundingMode::Nearest => libm::round(amount),
    }
}

/// Blackjack payout expressed as an integer ratio, so rule sets stay
/// hashable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payout {
    /// Numerator of the ratio.
    pub numerator: u16,
    /// Denominator of the ratio.
    pub denominator: u16,
}

impl Payout {
    /// Pays 3:2.
    pub const THREE_TO_TWO: Self = Self::new(3, 2);
    /// Pays 6:5.
    pub const SIX_TO_FIVE: Self = Self::new(6, 5);
    /// Pays 1:1.
    pub const EVEN_MONEY: Self = Self::new(1, 1);

    /// Creates a payout ratio. A zero denominator is treated as one.
    #[must_use]
    pub const fn new(numerator: u16, denominator: u16) -> Self {
        Self {
            numerator,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    /// Returns the payout multiplier as a float (1.5 for 3:2).
    #[must_use]
    pub fn multiplier(self) -> f64 {
        f64::from(self.numerator) / f64::from(self.denominator)
    }
}

/// Rule configuration for a blackjack table.
///
/// The same rule set always produces the same strategy tables, and rule sets
/// are hashable so tables can be cached per configuration.
///
/// ```
/// use bjcount::{Payout, RuleSet, Surrender};
///
/// let rules = RuleSet::default()
///     .with_decks(8)
///     .with_dealer_hits_soft_17(true)
///     .with_blackjack_pays(Payout::SIX_TO_FIVE)
///     .with_surrender(Surrender::None);
/// assert_eq!(rules.decks, 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RuleSet {
    /// Number of decks in the shoe.
    pub decks: u8,
    /// Whether the dealer hits soft 17.
    pub dealer_hits_soft_17: bool,
    /// Blackjack payout ratio.
    pub blackjack_pays: Payout,
    /// Whether doubling is allowed after a split.
    pub double_after_split: bool,
    /// Surrender policy.
    pub surrender: Surrender,
    /// Whether split aces may be split again.
    pub resplit_aces: bool,
    /// Maximum number of splits per starting hand.
    pub max_splits: u8,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
    /// Rounding mode for the half bet lost on surrender.
    pub rounding_surrender: RoundingMode,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            decks: 6,
            dealer_hits_soft_17: false,
            blackjack_pays: Payout::THREE_TO_TWO,
            double_after_split: true,
            surrender: Surrender::Late,
            resplit_aces: false,
            max_splits: 3,
            rounding_blackjack: RoundingMode::Down,
            rounding_surrender: RoundingMode::Nearest,
        }
    }
}

impl RuleSet {
    /// Sets the number of decks.
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets whether the dealer hits soft 17.
    ///
    /// ```
    /// use bjcount::RuleSet;
    ///
    /// let rules = RuleSet::default().with_dealer_hits_soft_17(true);
    /// assert!(rules.dealer_hits_soft_17);
    /// ```
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the blackjack payout ratio.
    #[must_use]
    pub const fn with_blackjack_pays(mut self, payout: Payout) -> Self {
        self.blackjack_pays = payout;
        self
    }

    /// Sets whether doubling is allowed after a split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the surrender policy.
    #[must_use]
    pub const fn with_surrender(mut self, surrender: Surrender) -> Self {
        self.surrender = surrender;
        self
    }

    /// Sets whether split aces may be split again.
    #[must_use]
    pub const fn with_resplit_aces(mut self, allowed: bool) -> Self {
        self.resplit_aces = allowed;
        self
    }

    /// Sets the maximum number of splits per starting hand.
    #[must_use]
    pub const fn with_max_splits(mut self, max_splits: u8) -> Self {
        self.max_splits = max_splits;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }

    /// Sets the rounding mode for surrender losses.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }
}
