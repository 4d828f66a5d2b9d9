//! The Season system: four seasons per year, and positions within it.

use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::iter::FusedIterator;
use std::num::NonZeroU32;

use crate::category::{Category, category_impls};
use crate::error::{ErrorKind, Result};

/// A year of the saga. Years are positive integers.
pub type Year = NonZeroU32;

/// The four seasons, in the order they occur within a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize, serde::Serialize),
    serde(try_from = "String", into = "String")
)]
pub enum Season {
    Spring,
    Summer,
    /// Also accepted as "fall".
    Autumn,
    Winter,
}
impl Season {
    /// Alias of [`Season::Autumn`].
    pub const FALL: Season = Season::Autumn;
}
impl Category for Season {
    const NAME: &'static str = "season";
    const ALL: &'static [Self] = &[Self::Spring, Self::Summer, Self::Autumn, Self::Winter];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }

    fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Autumn => &["fall"],
            _ => &[],
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Spring => 0,
            Self::Summer => 1,
            Self::Autumn => 2,
            Self::Winter => 3,
        }
    }
}
category_impls!(Season);

impl Ord for Season {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}
impl PartialOrd for Season {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A season of a specific year.
///
/// Ordered by year, then by season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct YearSeason {
    pub year: Year,
    pub season: Season,
}
impl YearSeason {
    pub fn new(year: Year, season: Season) -> Self {
        Self { year, season }
    }

    /// Build from a raw year, rejecting anything that isn't a positive integer.
    pub fn try_new(year: i64, season: Season) -> Result<Self> {
        match u32::try_from(year).ok().and_then(NonZeroU32::new) {
            Some(year) => Ok(Self::new(year, season)),
            None => exn::bail!(ErrorKind::InvalidYear(year)),
        }
    }

    /// Spring of `year`.
    pub fn start_of_year(year: Year) -> Self {
        Self::new(year, Season::Spring)
    }

    /// Winter of `year`.
    pub fn end_of_year(year: Year) -> Self {
        Self::new(year, Season::Winter)
    }

    /// The season immediately after this one, or `None` past the last
    /// representable year.
    pub fn successor(&self) -> Option<Self> {
        match Season::from_rank(self.season.rank() + 1) {
            Some(season) => Some(Self::new(self.year, season)),
            None => self.year.checked_add(1).map(Self::start_of_year),
        }
    }

    /// Every season from `start` to `end`, both inclusive, in ascending order.
    ///
    /// Empty when `end` comes before `start`. The returned iterator is lazy;
    /// clone it to walk the range again from the beginning.
    ///
    /// ```
    /// use arm5_models::times::{Season, YearSeason};
    ///
    /// let start = YearSeason::try_new(1220, Season::Winter).unwrap();
    /// let end = YearSeason::try_new(1221, Season::Spring).unwrap();
    /// let seasons: Vec<_> = YearSeason::iter_between(start, end).collect();
    /// assert_eq!(seasons, vec![start, end]);
    /// ```
    pub fn iter_between(start: Self, end: Self) -> Between {
        Between { next: (start <= end).then_some(start), end }
    }

    /// Number of seasons from `self` to `other`, both inclusive (zero when
    /// `other` comes first).
    fn seasons_until(&self, other: &Self) -> u64 {
        if other < self {
            return 0;
        }
        let years = u64::from(other.year.get() - self.year.get());
        years * 4 + u64::from(other.season.rank()) + 1 - u64::from(self.season.rank())
    }
}
impl Ord for YearSeason {
    fn cmp(&self, other: &Self) -> Ordering {
        self.year.cmp(&other.year).then_with(|| self.season.cmp(&other.season))
    }
}
impl PartialOrd for YearSeason {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Display for YearSeason {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{} {}", self.season, self.year)
    }
}

/// Iterator returned by [`YearSeason::iter_between`].
#[derive(Debug, Clone)]
pub struct Between {
    next: Option<YearSeason>,
    end: YearSeason,
}
impl Iterator for Between {
    type Item = YearSeason;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.successor().filter(|next| *next <= self.end);
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.next.map(|next| next.seasons_until(&self.end)).unwrap_or_default();
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for Between {}
impl FusedIterator for Between {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ys(year: i64, season: Season) -> YearSeason {
        YearSeason::try_new(year, season).unwrap()
    }

    #[rstest]
    #[case("spring", Season::Spring)]
    #[case("summer", Season::Summer)]
    #[case("autumn", Season::Autumn)]
    #[case("winter", Season::Winter)]
    #[case("Winter", Season::Winter)]
    #[case("SUMMER", Season::Summer)]
    #[case("fall", Season::Autumn)]
    #[case("Fall", Season::Autumn)]
    fn test_season_from_str(#[case] test: &str, #[case] expected: Season) {
        assert_eq!(test.parse::<Season>().unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("spr")]
    #[case("monsoon")]
    fn test_season_from_str_invalid(#[case] test: &str) {
        let err = test.parse::<Season>().unwrap_err();
        assert!(matches!(&*err, ErrorKind::UnknownCategoryValue { category: "season", .. }));
    }

    #[test]
    fn test_season_alias_constant() {
        assert_eq!(Season::FALL, Season::Autumn);
        assert_eq!(Season::FALL.to_string(), "autumn");
    }

    #[test]
    fn test_season_order() {
        assert_eq!(Season::Spring.rank(), 0);
        assert_eq!(Season::Summer.rank(), 1);
        assert_eq!(Season::Autumn.rank(), 2);
        assert_eq!(Season::Winter.rank(), 3);
        assert!(Season::Spring < Season::Summer);
        assert!(Season::Summer < Season::Autumn);
        assert!(Season::Autumn < Season::Winter);
        assert!(Season::Winter > Season::Autumn);

        let mut sorted = vec![Season::Winter, Season::Spring, Season::Autumn, Season::Summer];
        sorted.sort();
        assert_eq!(sorted, Season::ALL);
    }

    #[rstest]
    #[case(0, Some(Season::Spring))]
    #[case(2, Some(Season::Autumn))]
    #[case(4, None)]
    fn test_season_try_from_rank(#[case] rank: u8, #[case] expected: Option<Season>) {
        assert_eq!(Season::try_from(rank).ok(), expected);
    }

    #[test]
    fn test_year_season_factories() {
        let year = Year::new(1).unwrap();
        assert_eq!(YearSeason::start_of_year(year), ys(1, Season::Spring));
        assert_eq!(YearSeason::end_of_year(year), ys(1, Season::Winter));
    }

    #[rstest]
    #[case(0)]
    #[case(-4)]
    #[case(i64::from(u32::MAX) + 1)]
    fn test_year_must_be_positive(#[case] year: i64) {
        let err = YearSeason::try_new(year, Season::Spring).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidYear(year));
    }

    #[test]
    fn test_iter_between() {
        let start = ys(2, Season::Autumn);
        let end = ys(4, Season::Summer);
        assert!(start < end);
        assert!(!(end < start));
        let between = YearSeason::iter_between(start, end);
        assert_eq!(between.len(), 8);
        assert_eq!(
            between.collect::<Vec<_>>(),
            vec![
                ys(2, Season::Autumn),
                ys(2, Season::Winter),
                ys(3, Season::Spring),
                ys(3, Season::Summer),
                ys(3, Season::Autumn),
                ys(3, Season::Winter),
                ys(4, Season::Spring),
                ys(4, Season::Summer),
            ]
        );
    }

    #[rstest]
    #[case(ys(5, Season::Summer), ys(5, Season::Autumn), 2)]
    #[case(ys(5, Season::Spring), ys(5, Season::Winter), 4)]
    #[case(ys(5, Season::Winter), ys(6, Season::Spring), 2)]
    #[case(ys(1, Season::Spring), ys(10, Season::Winter), 40)]
    fn test_iter_between_same_or_adjacent_years(
        #[case] start: YearSeason,
        #[case] end: YearSeason,
        #[case] expected: usize,
    ) {
        let seasons: Vec<_> = YearSeason::iter_between(start, end).collect();
        assert_eq!(seasons.len(), expected);
        assert_eq!(seasons.first(), Some(&start));
        assert_eq!(seasons.last(), Some(&end));
        assert!(seasons.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_iter_between_single() {
        let at = ys(7, Season::Summer);
        assert_eq!(YearSeason::iter_between(at, at).collect::<Vec<_>>(), vec![at]);
    }

    #[test]
    fn test_iter_between_reversed_is_empty() {
        let start = ys(2, Season::Autumn);
        let end = ys(4, Season::Summer);
        let mut between = YearSeason::iter_between(end, start);
        assert_eq!(between.len(), 0);
        assert_eq!(between.next(), None);
    }

    #[test]
    fn test_iter_between_restartable() {
        let between = YearSeason::iter_between(ys(1, Season::Winter), ys(2, Season::Summer));
        let first: Vec<_> = between.clone().collect();
        let second: Vec<_> = between.collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_iter_between_len_of_every_season() {
        let between = YearSeason::iter_between(YearSeason::start_of_year(Year::MIN), YearSeason::end_of_year(Year::MAX));
        let expected = usize::try_from(4 * u64::from(u32::MAX)).unwrap_or(usize::MAX);
        assert_eq!(between.size_hint(), (expected, Some(expected)));
        assert_eq!(between.len(), expected);
    }

    #[test]
    fn test_iter_between_stops_at_last_year() {
        let last = YearSeason::end_of_year(Year::MAX);
        assert_eq!(last.successor(), None);
        let start = YearSeason::new(Year::MAX, Season::Autumn);
        assert_eq!(YearSeason::iter_between(start, last).count(), 2);
    }

    #[test]
    fn test_ordering_is_total() {
        let values = [
            ys(3, Season::Spring),
            ys(1, Season::Winter),
            ys(2, Season::Summer),
            ys(1, Season::Spring),
            ys(2, Season::Spring),
            ys(3, Season::Autumn),
        ];
        for a in &values {
            for b in &values {
                let holds = [a < b, a == b, a > b].into_iter().filter(|h| *h).count();
                assert_eq!(holds, 1, "{a} vs {b}");
            }
        }
        let mut shuffled = values.to_vec();
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                ys(1, Season::Spring),
                ys(1, Season::Winter),
                ys(2, Season::Spring),
                ys(2, Season::Summer),
                ys(3, Season::Spring),
                ys(3, Season::Autumn),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ys(1220, Season::Autumn).to_string(), "autumn 1220");
    }
}
