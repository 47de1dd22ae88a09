//! Feed report data model.
//!
//! A feed report is a dated, monetary record owned by exactly one user. Reports
//! are created from the "new report" form and are read-only afterwards.

use std::fmt;
use std::str::FromStr;

use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::{Error, UserId};

/// Maximum allowed length for a feed name.
pub const FEED_NAME_MAX: usize = 200;
/// Maximum allowed length for a feed code.
pub const FEED_CODE_MAX: usize = 100;

/// Identifier of a stored report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportId(Uuid);

impl ReportId {
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ReportId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Reasons a submitted amount could not be used as given.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount {raw:?} is not a decimal number")]
    Unparseable { raw: String },
    #[error("amount {raw:?} does not fit NUMERIC(12,2)")]
    OutOfRange { raw: String },
}

/// Monetary amount with two fractional digits, at most ten integral digits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(BigDecimal);

impl Amount {
    /// Exclusive upper bound of the absolute value (10^10).
    const LIMIT: i64 = 10_000_000_000;
    /// Integral digits below [`Self::LIMIT`].
    const INTEGRAL_DIGITS: i64 = 10;
    const SCALE: i64 = 2;

    #[must_use]
    pub fn zero() -> Self {
        Self(BigDecimal::new(0.into(), Self::SCALE))
    }

    /// Parse user input, rounding to two decimal places.
    ///
    /// # Examples
    /// ```
    /// use feedeyes::domain::Amount;
    ///
    /// assert_eq!(Amount::parse(" 100 ").unwrap().to_string(), "100.00");
    /// assert_eq!(Amount::parse("2.346").unwrap().to_string(), "2.35");
    /// assert!(Amount::parse("ten").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        let value = BigDecimal::from_str(trimmed).map_err(|_| AmountError::Unparseable {
            raw: trimmed.to_owned(),
        })?;
        Self::from_decimal(value).ok_or_else(|| AmountError::OutOfRange {
            raw: trimmed.to_owned(),
        })
    }

    /// Accept a decimal read back from storage or built in code.
    ///
    /// Returns `None` when the rounded value does not fit NUMERIC(12,2).
    /// The magnitude is bounded from the digit count and exponent before any
    /// rescaling, so inputs like `1e40000000` are rejected without arithmetic.
    #[must_use]
    pub fn from_decimal(value: BigDecimal) -> Option<Self> {
        if value.is_zero() {
            return Some(Self::zero());
        }
        let (_, exponent) = value.as_bigint_and_exponent();
        let digits = i64::try_from(value.digits()).ok()?;
        let magnitude = digits.checked_sub(exponent)?;
        if magnitude > Self::INTEGRAL_DIGITS {
            return None;
        }
        // |value| < 10^-3 rounds to zero at two places.
        if magnitude < -Self::SCALE {
            return Some(Self::zero());
        }
        let rounded = value.round(Self::SCALE).with_scale(Self::SCALE);
        if rounded.abs() >= BigDecimal::from(Self::LIMIT) {
            return None;
        }
        Some(Self(rounded))
    }

    #[must_use]
    pub fn as_decimal(&self) -> &BigDecimal {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validation errors for report form input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportValidationError {
    #[error("feed name must be at most {max} characters")]
    FeedNameTooLong { max: usize },
    #[error("feed code must be at most {max} characters")]
    FeedCodeTooLong { max: usize },
}

impl From<ReportValidationError> for Error {
    fn from(value: ReportValidationError) -> Self {
        Self::invalid_request(value.to_string())
    }
}

/// Validated "new report" submission, not yet dated or owned.
///
/// ## Invariants
/// - `feed_name`/`feed_code` are trimmed; blank input becomes `None`.
/// - `amount` is zero whenever the submitted amount was absent or unusable;
///   [`ReportDraft::rejected_amount`] then explains why (absent input is not
///   an error).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDraft {
    feed_name: Option<String>,
    feed_code: Option<String>,
    amount: Amount,
    rejected_amount: Option<AmountError>,
}

impl ReportDraft {
    pub fn try_from_parts(
        feed_name: Option<&str>,
        feed_code: Option<&str>,
        amount: Option<&str>,
    ) -> Result<Self, ReportValidationError> {
        let feed_name = optional_text(feed_name);
        if feed_name
            .as_ref()
            .is_some_and(|name| name.chars().count() > FEED_NAME_MAX)
        {
            return Err(ReportValidationError::FeedNameTooLong { max: FEED_NAME_MAX });
        }
        let feed_code = optional_text(feed_code);
        if feed_code
            .as_ref()
            .is_some_and(|code| code.chars().count() > FEED_CODE_MAX)
        {
            return Err(ReportValidationError::FeedCodeTooLong { max: FEED_CODE_MAX });
        }

        let (amount, rejected_amount) = match amount.map(str::trim).filter(|raw| !raw.is_empty()) {
            None => (Amount::zero(), None),
            Some(raw) => match Amount::parse(raw) {
                Ok(parsed) => (parsed, None),
                Err(err) => (Amount::zero(), Some(err)),
            },
        };

        Ok(Self {
            feed_name,
            feed_code,
            amount,
            rejected_amount,
        })
    }

    pub fn feed_name(&self) -> Option<&str> {
        self.feed_name.as_deref()
    }

    pub fn feed_code(&self) -> Option<&str> {
        self.feed_code.as_deref()
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Why the submitted amount was replaced with zero, if it was.
    pub fn rejected_amount(&self) -> Option<&AmountError> {
        self.rejected_amount.as_ref()
    }
}

fn optional_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
}

/// Fully-specified report ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFeedReport {
    pub id: ReportId,
    pub owner: UserId,
    pub feed_name: Option<String>,
    pub feed_code: Option<String>,
    pub report_date: NaiveDate,
    pub amount: Amount,
    pub data: Value,
}

impl NewFeedReport {
    /// Date and own a draft. The payload starts as an empty JSON object.
    #[must_use]
    pub fn from_draft(owner: UserId, draft: ReportDraft, report_date: NaiveDate) -> Self {
        let ReportDraft {
            feed_name,
            feed_code,
            amount,
            ..
        } = draft;
        Self {
            id: ReportId::random(),
            owner,
            feed_name,
            feed_code,
            report_date,
            amount,
            data: Value::Object(serde_json::Map::new()),
        }
    }
}

/// Stored feed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedReport {
    id: ReportId,
    owner: UserId,
    feed_name: Option<String>,
    feed_code: Option<String>,
    report_date: NaiveDate,
    amount: Amount,
    data: Value,
    created_at: DateTime<Utc>,
}

impl FeedReport {
    /// Attach the storage timestamp to an inserted report.
    #[must_use]
    pub fn from_new(report: NewFeedReport, created_at: DateTime<Utc>) -> Self {
        let NewFeedReport {
            id,
            owner,
            feed_name,
            feed_code,
            report_date,
            amount,
            data,
        } = report;
        Self {
            id,
            owner,
            feed_name,
            feed_code,
            report_date,
            amount,
            data,
            created_at,
        }
    }

    pub fn id(&self) -> &ReportId {
        &self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    pub fn feed_name(&self) -> Option<&str> {
        self.feed_name.as_deref()
    }

    pub fn feed_code(&self) -> Option<&str> {
        self.feed_code.as_deref()
    }

    pub fn report_date(&self) -> NaiveDate {
        self.report_date
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    /// Free-form JSON payload.
    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
