use csv::StringRecord;

/// The columns every sales file has to provide.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Field {
    Product,
    Quantity,
    UnitPrice,
    Date
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Product, Field::Quantity, Field::UnitPrice, Field::Date];

    pub fn name(self) -> &'static str {
        match self {
            Field::Product => "product",
            Field::Quantity => "quantity",
            Field::UnitPrice => "unit_price",
            Field::Date => "date"
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Product => &["product", "product_id", "product_name", "sku", "item"],
            Field::Quantity => &["quantity", "qty", "units"],
            Field::UnitPrice => &["unit_price", "price", "price_each"],
            Field::Date => &["date", "sale_date", "order_date", "timestamp", "period"]
        }
    }
}

/// Column positions of the required fields within one file.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct HeaderMap {
    product: Option<usize>,
    quantity: Option<usize>,
    unit_price: Option<usize>,
    date: Option<usize>
}

impl HeaderMap {
    /// Resolves the required fields from a header row.
    ///
    /// Matching ignores case and surrounding whitespace, treats spaces and hyphens
    /// as underscores and accepts a handful of common aliases. The first matching
    /// column wins.
    pub fn from_headers(headers: &StringRecord) -> Self {
        let normalized: Vec<String> = headers.iter().map(normalize).collect();
        let locate = |field: Field| {
            normalized.iter().position(|column| field.aliases().contains(&column.as_str()))
        };

        Self {
            product: locate(Field::Product),
            quantity: locate(Field::Quantity),
            unit_price: locate(Field::UnitPrice),
            date: locate(Field::Date)
        }
    }

    pub fn index(&self, field: Field) -> Option<usize> {
        match field {
            Field::Product => self.product,
            Field::Quantity => self.quantity,
            Field::UnitPrice => self.unit_price,
            Field::Date => self.date
        }
    }

    /// Required fields the header does not provide.
    pub fn missing(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|field| self.index(*field).is_none()).collect()
    }
}

fn normalize(column: &str) -> String {
    column.trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace([' ', '-'], "_")
}
