mod errors;
mod monetary;
mod period;

pub use errors::MonetaryError;
pub use monetary::{format_money, line_total, parse_non_negative, serialize_money, Money};
pub use period::Period;

pub type ProductId = String;
pub type Quantity = u64;
