//! Accounting month (competência) identifier.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Error raised when a competência token is not a valid `YYYY-MM` month.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid competencia '{0}': expected YYYY-MM")]
pub struct CompetenciaError(pub String);

/// The accounting month an entry belongs to, independent of its calendar date.
///
/// Ordering follows the calendar: year first, then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Competencia {
    year: i32,
    month: u32,
}

impl Competencia {
    /// Creates a competência, checking the month range and rejecting year zero.
    ///
    /// # Errors
    ///
    /// Returns `CompetenciaError` if the year is outside `1..=9999` or the month
    /// outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, CompetenciaError> {
        if !(1..=9999).contains(&year) || !(1..=12).contains(&month) {
            return Err(CompetenciaError(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Calendar month, `1..=12`.
    #[must_use]
    pub const fn month(self) -> u32 {
        self.month
    }

    /// Zero-based absolute month index: `year * 12 + month - 1`.
    ///
    /// The difference of two indexes is the number of months between them.
    #[must_use]
    pub fn index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    /// Returns the competência `months` months later.
    #[must_use]
    pub fn plus_months(self, months: u32) -> Self {
        let index = self.index() + i64::from(months);
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: i32::try_from(year).unwrap_or(i32::MAX),
            month: u32::try_from(month).unwrap_or(12),
        }
    }
}

/// Parses a raw token and returns its absolute month index.
///
/// # Errors
///
/// Returns `CompetenciaError` instead of guessing when the token is malformed.
pub fn competencia_index(token: &str) -> Result<i64, CompetenciaError> {
    token.parse::<Competencia>().map(Competencia::index)
}

impl FromStr for Competencia {
    type Err = CompetenciaError;

    /// Accepts exactly `^\d{4}-(0[1-9]|1[0-2])$`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CompetenciaError(s.to_string());
        let bytes = s.as_bytes();
        if bytes.len() != 7 || bytes[4] != b'-' {
            return Err(invalid());
        }
        let (year, month) = (&s[..4], &s[5..]);
        if !year.bytes().chain(month.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl fmt::Display for Competencia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for Competencia {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Competencia {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("2026-01", 2026, 1)]
    #[case("2026-12", 2026, 12)]
    #[case("0001-06", 1, 6)]
    fn test_parses_valid_tokens(#[case] token: &str, #[case] year: i32, #[case] month: u32) {
        let competencia: Competencia = token.parse().unwrap();
        assert_eq!(competencia.year(), year);
        assert_eq!(competencia.month(), month);
        assert_eq!(competencia.to_string(), token);
    }

    #[rstest]
    #[case("2026-13")]
    #[case("2026-00")]
    #[case("2026-1")]
    #[case("26-01")]
    #[case("2026/01")]
    #[case("2026-01-15")]
    #[case("0000-01")]
    #[case("+202-01")]
    #[case("")]
    fn test_rejects_malformed_tokens(#[case] token: &str) {
        assert_eq!(
            token.parse::<Competencia>(),
            Err(CompetenciaError(token.to_string()))
        );
    }

    #[test]
    fn test_index_is_month_distance() {
        let jan = Competencia::new(2026, 1).unwrap();
        let mar = Competencia::new(2026, 3).unwrap();
        let dec_prev = Competencia::new(2025, 12).unwrap();

        assert_eq!(jan.index(), 2026 * 12);
        assert_eq!(mar.index() - jan.index(), 2);
        assert_eq!(jan.index() - dec_prev.index(), 1);
    }

    #[test]
    fn test_competencia_index_fails_loudly() {
        assert_eq!(competencia_index("2026-02"), Ok(2026 * 12 + 1));
        assert!(competencia_index("2026-2").is_err());
        assert!(competencia_index("fevereiro").is_err());
    }

    #[test]
    fn test_ordering_matches_calendar() {
        let a = Competencia::new(2025, 12).unwrap();
        let b = Competencia::new(2026, 1).unwrap();
        assert!(a < b);
        assert_eq!(a.plus_months(1), b);
        assert_eq!(b.plus_months(13).to_string(), "2027-02");
    }

    #[test]
    fn test_serde_as_string() {
        let competencia = Competencia::new(2026, 2).unwrap();
        let json = serde_json::to_string(&competencia).unwrap();
        assert_eq!(json, "\"2026-02\"");
        let back: Competencia = serde_json::from_str(&json).unwrap();
        assert_eq!(back, competencia);
        assert!(serde_json::from_str::<Competencia>("\"2026-13\"").is_err());
    }
}
