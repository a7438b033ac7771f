use serde::Serialize;

/// A single catalog entry, keyed by `isbn`.
///
/// Field order matters: it is the key order of the emitted JSON result line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub isbn: String,
    pub name: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    pub quantity: i64,
}

impl BookRecord {
    pub fn new(isbn: impl Into<String>, name: impl Into<String>) -> Self {
        BookRecord {
            isbn: isbn.into(),
            name: name.into(),
            author: String::new(),
            category: String::new(),
            price: 0.0,
            quantity: 0,
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Both the key and the searchable name must be present.
    pub fn is_storable(&self) -> bool {
        !self.isbn.is_empty() && !self.name.is_empty()
    }
}

/// One parsed load instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Insert(BookRecord),
    /// Any tag other than `INSERT`. Carried so the loader can count it.
    Ignored(String),
}

/// One parsed lookup request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    pub name: String,
}

impl Query {
    pub fn new(name: impl Into<String>) -> Self {
        Query { name: name.into() }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }
}
