use chrono::NaiveDate;

use crate::models::RowErrorKind;
use crate::types::{line_total, Money, Period, ProductId, Quantity};

/// One validated sales transaction.
///
/// Records can only be built through [`SalesRecord::try_new`], which rejects
/// empty product identifiers and computes the line total with decimal
/// arithmetic. Quantity and price are non-negative by construction of their
/// types and the price parser.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SalesRecord {
    product: ProductId,
    quantity: Quantity,
    unit_price: Money,
    date: NaiveDate,
    line_total: Money
}

impl SalesRecord {
    pub fn try_new(product: &str, quantity: Quantity, unit_price: Money, date: NaiveDate) -> Result<Self, RowErrorKind> {
        let product = product.trim();

        if product.is_empty() {
            return Err(RowErrorKind::MissingField("product"));
        }

        if unit_price.is_sign_negative() && !unit_price.is_zero() {
            return Err(RowErrorKind::InvalidPrice);
        }

        let line_total = line_total(unit_price, quantity).map_err(|_| RowErrorKind::InvalidPrice)?;

        Ok(Self {
            product: product.to_string(),
            quantity,
            unit_price,
            date,
            line_total
        })
    }

    pub fn product(&self) -> &str {
        &self.product
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn period(&self) -> Period {
        Period::from(self.date)
    }

    pub fn line_total(&self) -> Money {
        self.line_total
    }
}
