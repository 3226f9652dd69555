use serde::Deserialize;

use super::error::ApiError;

// ============================================================================
// Request Parameters
// ============================================================================
//
// Raw query strings are captured as optional strings, then checked into typed
// values before any SQL is built. Integers are parsed leniently: a leading
// sign and digits are read and anything after is ignored; a missing,
// unparsable or zero value falls back to the default.
//
// ============================================================================

pub const DEFAULT_PAGE_LIMIT: i64 = 20;
pub const MAX_PAGE_LIMIT: i64 = 100;
pub const DEFAULT_RECENT_LIMIT: i64 = 10;
pub const MAX_RECENT_LIMIT: i64 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
}

impl Page {
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl PageQuery {
    pub fn validate(&self) -> Page {
        let page = lenient_int(self.page.as_deref()).unwrap_or(1).max(1);
        let limit = lenient_int(self.limit.as_deref())
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        Page { page, limit }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct EmailSearchQuery {
    pub email: Option<String>,
}

impl EmailSearchQuery {
    pub fn validate(&self) -> Result<&str, ApiError> {
        required(self.email.as_deref()).ok_or_else(|| ApiError::validation("Email parameter is required"))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct RecentOrdersQuery {
    pub limit: Option<String>,
}

impl RecentOrdersQuery {
    pub fn validate(&self) -> i64 {
        lenient_int(self.limit.as_deref())
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

/// `q` is the documented name; `term` is accepted for older clients
#[derive(Debug, Default, Deserialize)]
pub struct ProductSearchQuery {
    pub q: Option<String>,
    pub term: Option<String>,
}

impl ProductSearchQuery {
    pub fn validate(&self) -> Result<&str, ApiError> {
        required(self.q.as_deref())
            .or_else(|| required(self.term.as_deref()))
            .ok_or_else(|| ApiError::validation("Search term is required"))
    }
}

pub fn parse_order_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::validation("Order id must be an integer"))
}

fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Leading-digits integer parse; zero counts as absent and digits past the
/// range of `i64` saturate
fn lenient_int(raw: Option<&str>) -> Option<i64> {
    let raw = raw?.trim_start();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);

    match sign * value {
        0 => None,
        n => Some(n),
    }
}
