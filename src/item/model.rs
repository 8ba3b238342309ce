use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// An inventory record, keyed by its client-assigned code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, ToSchema, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[schema(example = 101)]
    pub icode: i32,
    #[schema(example = "Wheat")]
    pub title: String,
    #[schema(example = 2025)]
    pub price: i64,
    /// Defaults to the current date when omitted from a request body.
    #[serde(default = "today")]
    #[schema(example = "2025-11-05")]
    pub package_date: NaiveDate,
}

impl Item {
    pub fn new(icode: i32, title: impl Into<String>, price: i64, package_date: NaiveDate) -> Self {
        Self {
            icode,
            title: title.into(),
            price,
            package_date,
        }
    }

    /// Checks the business rules the database schema does not carry.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title must not be blank".to_string());
        }
        if self.price < 0 {
            return Err(format!("price must be non-negative, got {}", self.price));
        }
        Ok(())
    }
}

/// Classification of the `{key}` segment in `GET /items/{key}`.
///
/// A segment that parses as an integer is a code, one that parses as an ISO
/// calendar date is a package date, and anything else is a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Code(i32),
    PackageDate(NaiveDate),
    Title(String),
}

impl LookupKey {
    pub fn parse(raw: &str) -> Self {
        if let Ok(code) = raw.parse::<i32>() {
            return LookupKey::Code(code);
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT) {
            return LookupKey::PackageDate(date);
        }
        LookupKey::Title(raw.to_string())
    }
}
