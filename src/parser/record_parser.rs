use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;

use crate::models::{ParseOutcome, RowError, RowErrorKind, SalesRecord};
use crate::parser::{Field, HeaderMap};
use crate::types::{parse_non_negative, Quantity};

pub const DEFAULT_DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m"];

const DAY_SPECIFIERS: [&str; 6] = ["%d", "%e", "%j", "%F", "%D", "%x"];

/// Turns raw CSV rows into validated sales records.
#[derive(Debug, Clone)]
pub struct RecordParser {
    date_formats: Vec<String>
}

impl Default for RecordParser {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMATS.iter().map(|format| format.to_string()).collect())
    }
}

impl RecordParser {
    pub fn new(date_formats: Vec<String>) -> Self {
        Self { date_formats }
    }

    pub fn date_formats(&self) -> &[String] {
        &self.date_formats
    }

    /// Parses one data row.
    ///
    /// Fields are checked in a fixed order (product, quantity, unit price, date)
    /// whatever the column order, and the first problem found is reported.
    pub fn parse(&self, line: u64, row: &StringRecord, headers: &HeaderMap) -> ParseOutcome {
        let raw = row.iter().collect::<Vec<_>>().join(",");

        let product = required(row, headers, Field::Product)
            .ok_or_else(|| RowError::missing_field(line, &raw, Field::Product.name()))?;
        let quantity = required(row, headers, Field::Quantity)
            .ok_or_else(|| RowError::missing_field(line, &raw, Field::Quantity.name()))?;
        let unit_price = required(row, headers, Field::UnitPrice)
            .ok_or_else(|| RowError::missing_field(line, &raw, Field::UnitPrice.name()))?;
        let date = required(row, headers, Field::Date)
            .ok_or_else(|| RowError::missing_field(line, &raw, Field::Date.name()))?;

        let quantity: Quantity = quantity.parse()
            .map_err(|_| RowError::invalid_quantity(line, &raw))?;
        let unit_price = parse_non_negative(unit_price)
            .map_err(|_| RowError::invalid_price(line, &raw))?;
        let date = self.parse_date(date)
            .ok_or_else(|| RowError::invalid_date(line, &raw))?;

        SalesRecord::try_new(product, quantity, unit_price, date).map_err(|kind| match kind {
            RowErrorKind::MissingField(field) => RowError::missing_field(line, &raw, field),
            RowErrorKind::InvalidQuantity => RowError::invalid_quantity(line, &raw),
            RowErrorKind::InvalidDate => RowError::invalid_date(line, &raw),
            RowErrorKind::InvalidPrice => RowError::invalid_price(line, &raw),
            RowErrorKind::Malformed(detail) => RowError::malformed(line, &raw, detail)
        })
    }

    /// Tries every configured format, accepting date-time formats by keeping only the date.
    ///
    /// Formats without a day (such as `%Y-%m`) resolve to the first of the month.
    pub fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        self.date_formats.iter().find_map(|format| {
            NaiveDate::parse_from_str(value, format).ok()
                .or_else(|| NaiveDateTime::parse_from_str(value, format).ok().map(|timestamp| timestamp.date()))
                .or_else(|| first_of_month(value, format))
        })
    }
}

fn first_of_month(value: &str, format: &str) -> Option<NaiveDate> {
    if DAY_SPECIFIERS.iter().any(|specifier| format.contains(specifier)) {
        return None;
    }

    NaiveDate::parse_from_str(&format!("{value} 01"), &format!("{format} %d")).ok()
}

fn required<'r>(row: &'r StringRecord, headers: &HeaderMap, field: Field) -> Option<&'r str> {
    headers.index(field)
        .and_then(|index| row.get(index))
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
