use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Target audience of a shoe model.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl Default for Gender {
    fn default() -> Self {
        Self::Unisex
    }
}

impl From<&str> for Gender {
    fn from(value: &str) -> Self {
        match value {
            "MEN" => Self::Men,
            "WOMEN" => Self::Women,
            _ => Self::Unisex,
        }
    }
}

impl From<Gender> for &'static str {
    fn from(value: Gender) -> Self {
        match value {
            Gender::Men => "MEN",
            Gender::Women => "WOMEN",
            Gender::Unisex => "UNISEX",
        }
    }
}

/// Remaining inventory for one size of a product.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SizeStock {
    /// Shoe size in millimetres (e.g. 250, 255).
    pub size: i32,
    /// Units left in stock, never negative.
    pub stock: i32,
}

/// Effective unit price after applying `discount_rate` percent to
/// `base_price`, rounded half-up to a whole currency unit.
///
/// The sale window is advisory only: a non-zero rate is applied regardless of
/// `sale_start`/`sale_end`.
pub fn sale_price(base_price: i64, discount_rate: i32) -> i64 {
    if discount_rate <= 0 {
        return base_price;
    }
    let rate = i64::from(discount_rate.min(100));
    (base_price * (100 - rate) + 50) / 100
}

/// Domain representation of a shoe model in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Product {
    /// Unique identifier of the product.
    pub id: i32,
    /// Human-readable name of the model.
    pub name: String,
    /// One-line tagline shown on listing cards.
    pub short: String,
    /// Optional longer description shown on the detail page.
    pub description: Option<String>,
    /// Target audience.
    pub gender: Gender,
    /// List price in whole currency units.
    pub base_price: i64,
    /// Discount percentage in `[0, 100]`; `0` means no sale.
    pub discount_rate: i32,
    /// Advertised start of the sale window.
    pub sale_start: Option<NaiveDateTime>,
    /// Advertised end of the sale window.
    pub sale_end: Option<NaiveDateTime>,
    /// Cumulative units sold, maintained by stock reservations.
    pub sales_count: i64,
    /// Per-size inventory, ordered by size ascending.
    pub sizes: Vec<SizeStock>,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Effective unit price for this product.
    pub fn sale_price(&self) -> i64 {
        sale_price(self.base_price, self.discount_rate)
    }

    /// Sizes that can currently be bought (stock > 0). Derived, never stored.
    pub fn available_sizes(&self) -> Vec<i32> {
        self.sizes
            .iter()
            .filter(|entry| entry.stock > 0)
            .map(|entry| entry.size)
            .collect()
    }
}

/// Result of a non-mutating stock lookup for one `(product, size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeAvailability {
    /// The product id does not resolve.
    ProductNotFound,
    /// The product exists but has no entry for the requested size.
    SizeNotOffered,
    /// The size is carried; `stock` may be zero (sold out).
    Available { stock: i32 },
}

/// Result of an atomic reservation attempt against the stock ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReserveOutcome {
    /// Stock was decremented; `remaining` is the level after the decrement.
    Reserved { remaining: i32 },
    /// The product id does not resolve.
    ProductNotFound,
    /// The product exists but has no entry for the requested size.
    SizeNotOffered,
    /// Not enough stock; `available` is the untouched current level.
    Insufficient { available: i32 },
}

/// Payload required to insert a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    /// Human-readable name of the model.
    pub name: String,
    /// One-line tagline shown on listing cards.
    pub short: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Target audience.
    pub gender: Gender,
    /// List price in whole currency units.
    pub base_price: i64,
    /// Discount percentage in `[0, 100]`.
    pub discount_rate: i32,
    /// Advertised start of the sale window.
    pub sale_start: Option<NaiveDateTime>,
    /// Advertised end of the sale window.
    pub sale_end: Option<NaiveDateTime>,
    /// Initial per-size inventory.
    pub sizes: Vec<SizeStock>,
    /// Timestamp captured when the payload was created.
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new product payload with the supplied details and current timestamp.
    pub fn new(name: impl Into<String>, short: impl Into<String>, base_price: i64) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            short: short.into(),
            description: None,
            gender: Gender::default(),
            base_price,
            discount_rate: 0,
            sale_start: None,
            sale_end: None,
            sizes: Vec::new(),
            updated_at: now,
        }
    }

    /// Attach a descriptive text to the product payload.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the default audience.
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    /// Attach a discount policy to the product payload.
    pub fn with_discount(
        mut self,
        discount_rate: i32,
        sale_start: Option<NaiveDateTime>,
        sale_end: Option<NaiveDateTime>,
    ) -> Self {
        self.discount_rate = discount_rate;
        self.sale_start = sale_start;
        self.sale_end = sale_end;
        self
    }

    /// Attach initial per-size inventory to the product payload.
    pub fn with_sizes(mut self, sizes: Vec<SizeStock>) -> Self {
        self.sizes = sizes;
        self
    }
}

/// Patch data applied when updating an existing product.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    /// Optional name update.
    pub name: Option<String>,
    /// Optional tagline update.
    pub short: Option<String>,
    /// Optional description update, using inner `None` to clear it.
    pub description: Option<Option<String>>,
    /// Optional audience update.
    pub gender: Option<Gender>,
    /// Optional list price update.
    pub base_price: Option<i64>,
    /// Optional discount percentage update.
    pub discount_rate: Option<i32>,
    /// Optional sale window start update, using inner `None` to clear it.
    pub sale_start: Option<Option<NaiveDateTime>>,
    /// Optional sale window end update, using inner `None` to clear it.
    pub sale_end: Option<Option<NaiveDateTime>>,
    /// Timestamp captured when the patch was created.
    pub updated_at: NaiveDateTime,
}

impl Default for UpdateProduct {
    fn default() -> Self {
        Self::new()
    }
}

impl UpdateProduct {
    /// Create a new patch object with no changes applied yet.
    pub fn new() -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: None,
            short: None,
            description: None,
            gender: None,
            base_price: None,
            discount_rate: None,
            sale_start: None,
            sale_end: None,
            updated_at: now,
        }
    }

    /// Update the product name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Update the tagline.
    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    /// Update the description, using `None` to clear an existing value.
    pub fn description(mut self, description: Option<impl Into<String>>) -> Self {
        self.description = Some(description.map(|value| value.into()));
        self
    }

    /// Update the target audience.
    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    /// Update the list price.
    pub fn base_price(mut self, base_price: i64) -> Self {
        self.base_price = Some(base_price);
        self
    }

    /// Update the discount policy; `None` dates clear the sale window.
    pub fn discount(
        mut self,
        discount_rate: i32,
        sale_start: Option<NaiveDateTime>,
        sale_end: Option<NaiveDateTime>,
    ) -> Self {
        self.discount_rate = Some(discount_rate);
        self.sale_start = Some(sale_start);
        self.sale_end = Some(sale_end);
        self
    }
}

/// Ordering applied when listing the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductOrdering {
    /// Most recently created first.
    Newest,
    /// Highest cumulative sales first.
    BestSelling,
}

/// Query definition used to list catalog products.
#[derive(Debug, Clone)]
pub struct ProductListQuery {
    /// Ordering applied to the results.
    pub ordering: ProductOrdering,
    /// Optional cap on the number of rows returned.
    pub limit: Option<i64>,
}

impl Default for ProductListQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductListQuery {
    /// Construct a query returning the whole catalog, newest first.
    pub fn new() -> Self {
        Self {
            ordering: ProductOrdering::Newest,
            limit: None,
        }
    }

    /// Order the results by cumulative sales instead.
    pub fn best_selling(mut self) -> Self {
        self.ordering = ProductOrdering::BestSelling;
        self
    }

    /// Cap the number of returned rows.
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }
}
