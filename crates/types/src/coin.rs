//! Multi-denomination coin amounts.
//!
//! `Coins` is the set type every fee, tax and ledger transfer is expressed in.
//! Arithmetic always produces a normalized set: sorted by denomination, one
//! entry per denomination, no zero amounts. Sets decoded from a transaction
//! are kept as-is (see [`Coins::from_raw`]) so validation can reject them at
//! the point where they would move funds.

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Integer amount of a single denomination.
pub type Amount = u128;

/// Minimum denomination length.
const DENOM_MIN_LEN: usize = 3;

/// Maximum denomination length.
const DENOM_MAX_LEN: usize = 128;

/// Check that a denomination matches `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`.
pub fn validate_denom(denom: &str) -> Result<(), CoinsError> {
    let len_ok = (DENOM_MIN_LEN..=DENOM_MAX_LEN).contains(&denom.len());
    let mut chars = denom.chars();
    let first_ok = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_ok =
        chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'));

    if len_ok && first_ok && rest_ok {
        Ok(())
    } else {
        Err(CoinsError::InvalidDenom(denom.to_string()))
    }
}

/// A single-denomination amount.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Coin {
    /// Denomination.
    pub denom: String,

    /// Amount in the smallest unit.
    pub amount: Amount,
}

impl Coin {
    /// Create a new coin.
    pub fn new(denom: impl Into<String>, amount: Amount) -> Self {
        Self {
            denom: denom.into(),
            amount,
        }
    }

    /// Whether the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for Coin {
    type Err = CoinsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let split = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or_else(|| CoinsError::Parse(s.to_string()))?;
        let (amount, denom) = s.split_at(split);
        if amount.is_empty() {
            return Err(CoinsError::Parse(s.to_string()));
        }
        let amount = amount
            .parse::<Amount>()
            .map_err(|_| CoinsError::Parse(s.to_string()))?;
        let denom = denom.trim_start();
        validate_denom(denom)?;
        Ok(Coin::new(denom, amount))
    }
}

/// A set of coins across denominations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Coins(Vec<Coin>);

impl Coins {
    /// The empty set.
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build a normalized set, rejecting invalid denominations and duplicates.
    ///
    /// Zero amounts are dropped and the result is sorted by denomination.
    pub fn new(coins: Vec<Coin>) -> Result<Self, CoinsError> {
        let mut coins: Vec<Coin> = coins.into_iter().filter(|c| !c.is_zero()).collect();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        for pair in coins.windows(2) {
            if pair[0].denom == pair[1].denom {
                return Err(CoinsError::DuplicateDenom(pair[1].denom.clone()));
            }
        }
        for coin in &coins {
            validate_denom(&coin.denom)?;
        }
        Ok(Self(coins))
    }

    /// Wrap coins exactly as given, without normalizing or validating.
    ///
    /// Used for amounts decoded off the wire; call [`Coins::validate`] before
    /// moving them.
    pub fn from_raw(coins: Vec<Coin>) -> Self {
        Self(coins)
    }

    /// A set holding a single denomination. A zero amount gives the empty set.
    pub fn single(denom: impl Into<String>, amount: Amount) -> Self {
        if amount == 0 {
            Self::empty()
        } else {
            Self(vec![Coin::new(denom, amount)])
        }
    }

    /// Check the set is valid for a ledger transfer.
    ///
    /// Valid means every denomination is well formed, every amount is
    /// positive and denominations are strictly ascending (hence unique).
    pub fn validate(&self) -> Result<(), CoinsError> {
        for coin in &self.0 {
            validate_denom(&coin.denom)?;
            if coin.is_zero() {
                return Err(CoinsError::ZeroAmount(coin.denom.clone()));
            }
        }
        for pair in self.0.windows(2) {
            if pair[0].denom == pair[1].denom {
                return Err(CoinsError::DuplicateDenom(pair[1].denom.clone()));
            }
            if pair[0].denom > pair[1].denom {
                return Err(CoinsError::Unsorted {
                    previous: pair[0].denom.clone(),
                    next: pair[1].denom.clone(),
                });
            }
        }
        Ok(())
    }

    /// Whether [`Coins::validate`] passes.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Whether every amount is zero. The empty set is zero.
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(Coin::is_zero)
    }

    /// Amount held in `denom`, zero if absent.
    pub fn amount_of(&self, denom: &str) -> Amount {
        self.0
            .iter()
            .find(|c| c.denom == denom)
            .map(|c| c.amount)
            .unwrap_or(0)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the entries in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, Coin> {
        self.0.iter()
    }

    /// A copy sorted by denomination.
    pub fn sorted(&self) -> Self {
        let mut coins = self.0.clone();
        coins.sort_by(|a, b| a.denom.cmp(&b.denom));
        Self(coins)
    }

    /// Denomination-wise sum.
    pub fn checked_add(&self, other: &Coins) -> Result<Coins, CoinsError> {
        let mut totals = self.to_map()?;
        for coin in &other.0 {
            let entry = totals.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or_else(|| CoinsError::Overflow(coin.denom.clone()))?;
        }
        Ok(Self::from_map(totals))
    }

    /// Denomination-wise sum, each amount clamped at [`Amount::MAX`].
    pub fn saturating_add(&self, other: &Coins) -> Coins {
        let mut totals: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in self.0.iter().chain(other.0.iter()) {
            let entry = totals.entry(coin.denom.clone()).or_insert(0);
            *entry = entry.saturating_add(coin.amount);
        }
        Self::from_map(totals)
    }

    /// Add a single coin.
    pub fn checked_add_coin(&self, coin: &Coin) -> Result<Coins, CoinsError> {
        self.checked_add(&Coins(vec![coin.clone()]))
    }

    /// Denomination-wise difference, floored at zero.
    ///
    /// Denominations only present in `other` contribute nothing; the result
    /// never holds a negative or zero amount.
    pub fn saturating_sub(&self, other: &Coins) -> Coins {
        let coins = self
            .0
            .iter()
            .map(|c| {
                let remaining = c.amount.saturating_sub(other.amount_of(&c.denom));
                Coin::new(c.denom.clone(), remaining)
            })
            .filter(|c| !c.is_zero())
            .collect::<Vec<_>>();
        Self(coins).sorted()
    }

    /// Denomination-wise maximum of two sets.
    pub fn max(&self, other: &Coins) -> Coins {
        let mut totals: BTreeMap<String, Amount> = BTreeMap::new();
        for coin in self.0.iter().chain(other.0.iter()) {
            let entry = totals.entry(coin.denom.clone()).or_insert(0);
            *entry = (*entry).max(coin.amount);
        }
        Self::from_map(totals)
    }

    /// True if any denomination of `self` meets or exceeds the non-zero
    /// requirement `other` holds for it.
    ///
    /// This is deliberately "any one denomination clears its bar", not "all
    /// denominations are covered". An empty requirement is never met.
    pub fn is_any_gte(&self, other: &Coins) -> bool {
        if other.is_empty() {
            return false;
        }
        self.0.iter().any(|coin| {
            let required = other.amount_of(&coin.denom);
            required != 0 && coin.amount >= required
        })
    }

    /// True if every denomination of `other` is covered by `self`.
    pub fn is_all_gte(&self, other: &Coins) -> bool {
        other.0.iter().all(|c| self.amount_of(&c.denom) >= c.amount)
    }

    fn to_map(&self) -> Result<BTreeMap<String, Amount>, CoinsError> {
        let mut totals = BTreeMap::new();
        for coin in &self.0 {
            let entry: &mut Amount = totals.entry(coin.denom.clone()).or_insert(0);
            *entry = entry
                .checked_add(coin.amount)
                .ok_or_else(|| CoinsError::Overflow(coin.denom.clone()))?;
        }
        Ok(totals)
    }

    fn from_map(totals: BTreeMap<String, Amount>) -> Self {
        Self(
            totals
                .into_iter()
                .filter(|(_, amount)| *amount != 0)
                .map(|(denom, amount)| Coin::new(denom, amount))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Coins {
    type Item = &'a Coin;
    type IntoIter = std::slice::Iter<'a, Coin>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl From<Coin> for Coins {
    fn from(coin: Coin) -> Self {
        Self::single(coin.denom, coin.amount)
    }
}

impl fmt::Display for Coins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, coin) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", coin)?;
        }
        Ok(())
    }
}

impl FromStr for Coins {
    type Err = CoinsError;

    /// Parse `"<amount><denom>,<amount><denom>"`, normalizing the result.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(Self::empty());
        }
        let coins = s
            .split(',')
            .map(str::parse::<Coin>)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(coins)
    }
}

impl Serialize for Coins {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coins {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Errors from building, parsing or combining coin sets.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoinsError {
    /// Denomination does not match the allowed pattern.
    #[error("Invalid denomination: {0:?}")]
    InvalidDenom(String),

    /// The same denomination appears twice.
    #[error("Duplicate denomination: {0}")]
    DuplicateDenom(String),

    /// Denominations are out of order.
    #[error("Coins are not sorted: {previous} before {next}")]
    Unsorted {
        /// Earlier denomination.
        previous: String,
        /// Later denomination that should have come first.
        next: String,
    },

    /// A transferable set holds a zero amount.
    #[error("Zero amount for denomination {0}")]
    ZeroAmount(String),

    /// Sum exceeds the representable amount.
    #[error("Amount overflow in denomination {0}")]
    Overflow(String),

    /// Malformed coin expression.
    #[error("Invalid coin expression: {0:?}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coins(s: &str) -> Coins {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let parsed = coins("20uusd, 100uluna");
        assert_eq!(parsed.to_string(), "100uluna,20uusd");
        assert_eq!(parsed.amount_of("uluna"), 100);
        assert_eq!(parsed.amount_of("uusd"), 20);
        assert_eq!(parsed.amount_of("ukrw"), 0);
        assert_eq!(coins(""), Coins::empty());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!("uluna".parse::<Coins>(), Err(CoinsError::Parse(_))));
        assert!(matches!("100".parse::<Coins>(), Err(CoinsError::Parse(_))));
        assert!(matches!("100u".parse::<Coins>(), Err(CoinsError::InvalidDenom(_))));
        assert!(matches!(
            "1uluna,2uluna".parse::<Coins>(),
            Err(CoinsError::DuplicateDenom(_))
        ));
    }

    #[test]
    fn test_new_normalizes() {
        let set = Coins::new(vec![
            Coin::new("uusd", 5),
            Coin::new("ukrw", 0),
            Coin::new("uluna", 7),
        ])
        .unwrap();
        assert_eq!(set.to_string(), "7uluna,5uusd");
        assert!(set.is_valid());
    }

    #[test]
    fn test_validate_raw_sets() {
        let dup = Coins::from_raw(vec![Coin::new("uluna", 1), Coin::new("uluna", 2)]);
        assert_eq!(dup.validate(), Err(CoinsError::DuplicateDenom("uluna".into())));

        let zero = Coins::from_raw(vec![Coin::new("uluna", 0)]);
        assert_eq!(zero.validate(), Err(CoinsError::ZeroAmount("uluna".into())));

        let unsorted = Coins::from_raw(vec![Coin::new("uusd", 1), Coin::new("uluna", 2)]);
        assert!(matches!(unsorted.validate(), Err(CoinsError::Unsorted { .. })));
        assert!(unsorted.sorted().is_valid());

        let bad_denom = Coins::from_raw(vec![Coin::new("1abc", 1)]);
        assert!(matches!(bad_denom.validate(), Err(CoinsError::InvalidDenom(_))));
    }

    #[test]
    fn test_is_zero() {
        assert!(Coins::empty().is_zero());
        assert!(Coins::from_raw(vec![Coin::new("uluna", 0)]).is_zero());
        assert!(!coins("1uluna").is_zero());
        assert!(Coins::single("uluna", 0).is_empty());
    }

    #[test]
    fn test_checked_add_merges_denoms() {
        let sum = coins("100uluna,5uusd").checked_add(&coins("50uluna,3ukrw")).unwrap();
        assert_eq!(sum.to_string(), "3ukrw,150uluna,5uusd");
        assert!(sum.is_valid());

        let overflow = Coins::single("uluna", Amount::MAX).checked_add(&coins("1uluna"));
        assert_eq!(overflow, Err(CoinsError::Overflow("uluna".into())));
    }

    #[test]
    fn test_saturating_add_clamps() {
        let sum = coins("100uluna").saturating_add(&coins("50uluna,3ukrw"));
        assert_eq!(sum, coins("3ukrw,150uluna"));

        let clamped = Coins::single("uluna", Amount::MAX).saturating_add(&coins("1uluna,2uusd"));
        assert_eq!(clamped.amount_of("uluna"), Amount::MAX);
        assert_eq!(clamped.amount_of("uusd"), 2);
    }

    #[test]
    fn test_saturating_sub_never_negative() {
        let a = coins("100uluna,5uusd");
        let b = coins("150uluna,2uusd,9ukrw");
        let diff = a.saturating_sub(&b);
        assert_eq!(diff, coins("3uusd"));

        let pairs = [
            ("150uluna", "100uluna"),
            ("1uluna", "1uluna"),
            ("", "7uusd"),
            ("9ukrw,3uusd", "10ukrw"),
        ];
        for (lhs, rhs) in pairs {
            let diff = coins(lhs).saturating_sub(&coins(rhs));
            assert!(diff.is_valid(), "{lhs} - {rhs} = {diff} should be valid");
            for coin in &diff {
                assert!(coin.amount <= coins(lhs).amount_of(&coin.denom));
            }
        }
    }

    #[test]
    fn test_max() {
        let m = coins("100uluna,5uusd").max(&coins("150uluna,9ukrw"));
        assert_eq!(m, coins("9ukrw,150uluna,5uusd"));
    }

    #[test]
    fn test_is_any_gte() {
        let fee = coins("200000uluna");
        assert!(fee.is_any_gte(&coins("200000uluna")));
        assert!(!fee.is_any_gte(&coins("200001uluna")));

        // One sufficient denomination is enough, even if another falls short.
        let mixed = coins("10uluna,500uusd");
        assert!(mixed.is_any_gte(&coins("100uluna,500uusd")));

        // Denominations the requirement does not mention do not count.
        assert!(!coins("1000ukrw").is_any_gte(&coins("1uluna")));

        // An empty requirement is never met.
        assert!(!fee.is_any_gte(&Coins::empty()));
    }

    #[test]
    fn test_is_all_gte() {
        assert!(coins("10uluna,5uusd").is_all_gte(&coins("10uluna")));
        assert!(!coins("10uluna").is_all_gte(&coins("10uluna,1uusd")));
        assert!(coins("1uluna").is_all_gte(&Coins::empty()));
    }

    #[test]
    fn test_serde_as_string() {
        let set = coins("100uluna,5uusd");
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "\"100uluna,5uusd\"");
        let back: Coins = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
