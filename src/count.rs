//! Card counting systems.
//!
//! Every system maps each [`Rank`] to a tag value and accumulates a running
//! count. Running counts are `f64` for all systems because Wong Halves uses
//! half-point tags; the other systems only ever produce whole numbers.
//!
//! ```
//! use bjcount::{Card, Counter, CountingSystem};
//!
//! let mut counter = Counter::from_name("hilo");
//! for s in ["2H", "5C", "KD"] {
//!     counter.count_card(s.parse::<Card>().unwrap());
//! }
//! assert_eq!(counter.running_count(), 1.0);
//! assert_eq!(counter.true_count(0.5), 2.0);
//! ```

use crate::card::{Card, Rank};
use crate::rules::{RoundingMode, round_amount};
use crate::trace::trace_event;

/// Tolerance for accepting a user-supplied count as correct.
pub const COUNT_EPSILON: f64 = 0.01;

#[cfg(feature = "std")]
fn abs(x: f64) -> f64 {
    x.abs()
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Returns whether `guess` is within [`COUNT_EPSILON`] of `actual`.
#[must_use]
pub fn count_matches(guess: f64, actual: f64) -> bool {
    abs(guess - actual) < COUNT_EPSILON
}

/// Rounds a count to `places` decimal places for display.
///
/// ```
/// use bjcount::round_count;
///
/// assert_eq!(round_count(7.0 / 3.0, 2), 2.33);
/// ```
#[must_use]
pub fn round_count(value: f64, places: u8) -> f64 {
    let factor = (0..places).fold(1.0, |acc, _| acc * 10.0);
    round_amount(value * factor, RoundingMode::Nearest) / factor
}

/// Running count and number of cards seen since the last reset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tally {
    running_count: f64,
    cards_seen: usize,
}

impl Tally {
    /// Creates an empty tally.
    #[must_use]
    pub const fn new() -> Self {
        Self::seeded(0.0)
    }

    /// Creates a tally whose running count starts at `start`.
    #[must_use]
    pub const fn seeded(start: f64) -> Self {
        Self {
            running_count: start,
            cards_seen: 0,
        }
    }

    /// Adds a tag value for one card.
    pub fn record(&mut self, tag: f64) {
        self.running_count += tag;
        self.cards_seen += 1;
    }

    /// Returns the running count.
    #[must_use]
    pub const fn running_count(&self) -> f64 {
        self.running_count
    }

    /// Returns the number of cards seen.
    #[must_use]
    pub const fn cards_seen(&self) -> usize {
        self.cards_seen
    }
}

/// A card counting system.
///
/// Implementors supply the tag mapping and access to their [`Tally`]; the
/// counting operations are provided.
pub trait CountingSystem {
    /// Display name of the system.
    fn name(&self) -> &'static str;

    /// Tag value of a rank.
    fn tag(&self, rank: Rank) -> f64;

    /// Current accumulator state.
    fn tally(&self) -> &Tally;

    /// Mutable accumulator state.
    fn tally_mut(&mut self) -> &mut Tally;

    /// Returns the running count.
    fn running_count(&self) -> f64 {
        self.tally().running_count()
    }

    /// Returns the number of cards counted since the last reset.
    fn cards_seen(&self) -> usize {
        self.tally().cards_seen()
    }

    /// Counts one card and returns its tag value.
    fn count_card(&mut self, card: Card) -> f64 {
        let tag = self.tag(card.rank);
        self.tally_mut().record(tag);
        tag
    }

    /// Counts a sequence of cards and returns the sum of their tags.
    fn count_cards(&mut self, cards: &[Card]) -> f64 {
        cards.iter().map(|&card| self.count_card(card)).sum()
    }

    /// Converts the running count to a true count.
    ///
    /// Returns 0 when `decks_remaining` is not positive. The result is not
    /// rounded.
    fn true_count(&self, decks_remaining: f64) -> f64 {
        if decks_remaining > 0.0 {
            self.running_count() / decks_remaining
        } else {
            0.0
        }
    }

    /// Sum of the tags over one full 52-card deck.
    fn full_deck_sum(&self) -> f64 {
        Rank::ALL.iter().map(|&rank| self.tag(rank) * 4.0).sum()
    }

    /// Returns whether the tags sum to zero over a full deck.
    fn is_balanced(&self) -> bool {
        self.full_deck_sum() == 0.0
    }

    /// Clears the running count and cards seen.
    fn reset(&mut self) {
        *self.tally_mut() = Tally::new();
    }

    /// Prepares the counter for a fresh shoe of `num_decks` decks.
    ///
    /// Balanced systems start from zero; unbalanced systems override this to
    /// seed their initial running count.
    fn reset_for_shoe(&mut self, num_decks: u8) {
        let _ = num_decks;
        self.reset();
    }
}

/// Hi-Lo: balanced, level one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HiLo {
    tally: Tally,
}

impl HiLo {
    /// Creates a Hi-Lo counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tally: Tally::new(),
        }
    }
}

impl CountingSystem for HiLo {
    fn name(&self) -> &'static str {
        "Hi-Lo"
    }

    fn tag(&self, rank: Rank) -> f64 {
        match rank {
            Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six => 1.0,
            Rank::Seven | Rank::Eight | Rank::Nine => 0.0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1.0,
        }
    }

    fn tally(&self) -> &Tally {
        &self.tally
    }

    fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }
}

/// Knock-Out: unbalanced, counts the seven as low.
///
/// A full deck sums to +4, so a shoe starts at
/// [`Ko::initial_running_count`] to put the key count at zero. Use
/// [`CountingSystem::reset_for_shoe`] at the start of each shoe; plain
/// [`CountingSystem::reset`] leaves the count unseeded at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ko {
    tally: Tally,
}

impl Ko {
    /// Creates a KO counter seeded for a shoe of `num_decks` decks.
    #[must_use]
    pub fn new(num_decks: u8) -> Self {
        Self {
            tally: Tally::seeded(Self::initial_running_count(num_decks)),
        }
    }

    /// Initial running count for a shoe of `num_decks` decks.
    ///
    /// ```
    /// use bjcount::Ko;
    ///
    /// assert_eq!(Ko::initial_running_count(6), -20.0);
    /// assert_eq!(Ko::initial_running_count(1), 0.0);
    /// ```
    #[must_use]
    pub fn initial_running_count(num_decks: u8) -> f64 {
        4.0 - 4.0 * f64::from(num_decks)
    }
}

impl CountingSystem for Ko {
    fn name(&self) -> &'static str {
        "KO"
    }

    fn tag(&self, rank: Rank) -> f64 {
        match rank {
            Rank::Two | Rank::Three | Rank::Four | Rank::Five | Rank::Six | Rank::Seven => 1.0,
            Rank::Eight | Rank::Nine => 0.0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1.0,
        }
    }

    fn tally(&self) -> &Tally {
        &self.tally
    }

    fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }

    fn reset_for_shoe(&mut self, num_decks: u8) {
        self.tally = Tally::seeded(Self::initial_running_count(num_decks));
        trace_event!(
            num_decks,
            running_count = self.tally.running_count(),
            "KO count seeded"
        );
    }
}

/// Omega II: balanced, level two, with an ace side count.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OmegaII {
    tally: Tally,
    aces_seen: usize,
}

impl OmegaII {
    /// Creates an Omega II counter at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tally: Tally::new(),
            aces_seen: 0,
        }
    }

    /// Returns the number of aces seen since the last reset.
    #[must_use]
    pub const fn aces_seen(&self) -> usize {
        self.aces_seen
    }

    /// Ratio of aces left to the aces a neutral shoe would have left.
    ///
    /// Values above 1.0 mean the remaining cards are ace rich. Returns 1.0
    /// when `decks_remaining` is not positive.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "f64 has sufficient precision for card counts"
    )]
    pub fn ace_richness(&self, num_decks: u8, decks_remaining: f64) -> f64 {
        if decks_remaining > 0.0 {
            let expected_aces = 4.0 * f64::from(num_decks);
            let expected_remaining = 4.0 * decks_remaining;
            (expected_aces - self.aces_seen as f64) / expected_remaining
        } else {
            1.0
        }
    }
}

impl CountingSystem for OmegaII {
    fn name(&self) -> &'static str {
        "Omega II"
    }

    fn tag(&self, rank: Rank) -> f64 {
        match rank {
            Rank::Two | Rank::Three | Rank::Seven => 1.0,
            Rank::Four | Rank::Five | Rank::Six => 2.0,
            Rank::Eight | Rank::Ace => 0.0,
            Rank::Nine => -1.0,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => -2.0,
        }
    }

    fn tally(&self) -> &Tally {
        &self.tally
    }

    fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }

    fn count_card(&mut self, card: Card) -> f64 {
        if card.is_ace() {
            self.aces_seen += 1;
        }
        let tag = self.tag(card.rank);
        self.tally.record(tag);
        tag
    }

    fn reset(&mut self) {
        self.tally = Tally::new();
        self.aces_seen = 0;
    }
}

/// Wong Halves: balanced, level three, with half-point tags.
///
/// The doubled variant multiplies every tag by two so counts stay integral.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WongHalves {
    tally: Tally,
    doubled: bool,
}

impl WongHalves {
    /// Creates a Wong Halves counter with fractional tags.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tally: Tally::new(),
            doubled: false,
        }
    }

    /// Creates a Wong Halves counter with every tag doubled.
    #[must_use]
    pub const fn doubled() -> Self {
        Self {
            tally: Tally::new(),
            doubled: true,
        }
    }

    /// Returns whether tags are doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }
}

impl CountingSystem for WongHalves {
    fn name(&self) -> &'static str {
        if self.doubled {
            "Wong Halves (doubled)"
        } else {
            "Wong Halves"
        }
    }

    fn tag(&self, rank: Rank) -> f64 {
        let tag = match rank {
            Rank::Two | Rank::Seven => 0.5,
            Rank::Three | Rank::Four | Rank::Six => 1.0,
            Rank::Five => 1.5,
            Rank::Eight => 0.0,
            Rank::Nine => -0.5,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => -1.0,
        };
        if self.doubled { tag * 2.0 } else { tag }
    }

    fn tally(&self) -> &Tally {
        &self.tally
    }

    fn tally_mut(&mut self) -> &mut Tally {
        &mut self.tally
    }
}

/// The counting systems known to [`Counter::from_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    /// Hi-Lo.
    HiLo,
    /// Knock-Out.
    Ko,
    /// Omega II.
    OmegaII,
    /// Wong Halves.
    WongHalves,
}

impl SystemKind {
    /// All systems, in registry order.
    pub const ALL: [Self; 4] = [Self::HiLo, Self::Ko, Self::OmegaII, Self::WongHalves];

    /// Registry key of the system.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HiLo => "hilo",
            Self::Ko => "ko",
            Self::OmegaII => "omega2",
            Self::WongHalves => "wong_halves",
        }
    }

    /// Looks up a system by registry key, ignoring ASCII case.
    ///
    /// Unrecognized names resolve to Hi-Lo.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.key().eq_ignore_ascii_case(name.trim()))
            .unwrap_or(Self::HiLo)
    }
}

/// Any of the supported counting systems.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Counter {
    /// Hi-Lo.
    HiLo(HiLo),
    /// Knock-Out.
    Ko(Ko),
    /// Omega II.
    OmegaII(OmegaII),
    /// Wong Halves.
    WongHalves(WongHalves),
}

macro_rules! dispatch {
    ($self:ident, $system:ident => $body:expr) => {
        match $self {
            Counter::HiLo($system) => $body,
            Counter::Ko($system) => $body,
            Counter::OmegaII($system) => $body,
            Counter::WongHalves($system) => $body,
        }
    };
}

impl Counter {
    /// Creates a fresh counter for `kind`. KO starts unseeded; call
    /// [`CountingSystem::reset_for_shoe`] before counting a shoe.
    #[must_use]
    pub const fn new(kind: SystemKind) -> Self {
        match kind {
            SystemKind::HiLo => Self::HiLo(HiLo::new()),
            SystemKind::Ko => Self::Ko(Ko {
                tally: Tally::new(),
            }),
            SystemKind::OmegaII => Self::OmegaII(OmegaII::new()),
            SystemKind::WongHalves => Self::WongHalves(WongHalves::new()),
        }
    }

    /// Creates a counter from a registry name such as `"ko"` or
    /// `"wong_halves"`. Unrecognized names fall back to Hi-Lo.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::new(SystemKind::from_name(name))
    }

    /// Returns which system this counter runs.
    #[must_use]
    pub const fn kind(&self) -> SystemKind {
        match self {
            Self::HiLo(_) => SystemKind::HiLo,
            Self::Ko(_) => SystemKind::Ko,
            Self::OmegaII(_) => SystemKind::OmegaII,
            Self::WongHalves(_) => SystemKind::WongHalves,
        }
    }
}

impl Default for Counter {
    fn default() -> Self {
        Self::new(SystemKind::HiLo)
    }
}

impl CountingSystem for Counter {
    fn name(&self) -> &'static str {
        dispatch!(self, system => system.name())
    }

    fn tag(&self, rank: Rank) -> f64 {
        dispatch!(self, system => system.tag(rank))
    }

    fn tally(&self) -> &Tally {
        dispatch!(self, system => system.tally())
    }

    fn tally_mut(&mut self) -> &mut Tally {
        dispatch!(self, system => system.tally_mut())
    }

    fn count_card(&mut self, card: Card) -> f64 {
        dispatch!(self, system => system.count_card(card))
    }

    fn reset(&mut self) {
        dispatch!(self, system => system.reset());
    }

    fn reset_for_shoe(&mut self, num_decks: u8) {
        dispatch!(self, system => system.reset_for_shoe(num_decks));
    }
}

impl From<HiLo> for Counter {
    fn from(system: HiLo) -> Self {
        Self::HiLo(system)
    }
}

impl From<Ko> for Counter {
    fn from(system: Ko) -> Self {
        Self::Ko(system)
    }
}

impl From<OmegaII> for Counter {
    fn from(system: OmegaII) -> Self {
        Self::OmegaII(system)
    }
}

impl From<WongHalves> for Counter {
    fn from(system: WongHalves) -> Self {
        Self::WongHalves(system)
    }
}
