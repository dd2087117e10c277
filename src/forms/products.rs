use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{Gender, NewProduct, SizeStock, UpdateProduct};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 128;

/// Maximum allowed length for the tagline.
const SHORT_MAX_LEN: u64 = 200;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product forms.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided tagline is empty after sanitization.
    #[error("product tagline cannot be empty")]
    EmptyShort,
    /// A sizes entry could not be parsed.
    #[error("invalid size entry `{value}`")]
    InvalidSizeEntry { value: String },
    /// A size appeared more than once.
    #[error("duplicate size {size}")]
    DuplicateSize { size: i32 },
    /// A size is zero or negative.
    #[error("size must be positive, got {size}")]
    NonPositiveSize { size: i32 },
    /// A stock level is negative.
    #[error("stock cannot be negative for size {size}")]
    NegativeStock { size: i32 },
}

/// One `{size, stock}` entry of the JSON sizes payload.
#[derive(Debug, Clone, Deserialize)]
pub struct SizeStockEntry {
    pub size: i32,
    pub stock: i32,
}

/// Per-size inventory payload as the admin console sends it: either a JSON
/// array of `{size, stock}` entries or the compact `"250:10,260:0"` string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SizesInput {
    Entries(Vec<SizeStockEntry>),
    Compact(String),
}

impl SizesInput {
    /// Parse and normalize into domain entries: positive sizes, non-negative
    /// stock, unique by size, sorted ascending.
    pub fn into_entries(self) -> ProductFormResult<Vec<SizeStock>> {
        let raw = match self {
            SizesInput::Entries(entries) => entries
                .into_iter()
                .map(|entry| SizeStock {
                    size: entry.size,
                    stock: entry.stock,
                })
                .collect(),
            SizesInput::Compact(value) => parse_compact_sizes(&value)?,
        };

        let mut entries: Vec<SizeStock> = Vec::with_capacity(raw.len());
        for entry in raw {
            if entry.size <= 0 {
                return Err(ProductFormError::NonPositiveSize { size: entry.size });
            }
            if entry.stock < 0 {
                return Err(ProductFormError::NegativeStock { size: entry.size });
            }
            if entries.iter().any(|existing| existing.size == entry.size) {
                return Err(ProductFormError::DuplicateSize { size: entry.size });
            }
            entries.push(entry);
        }

        entries.sort_by_key(|entry| entry.size);
        Ok(entries)
    }
}

fn parse_compact_sizes(value: &str) -> ProductFormResult<Vec<SizeStock>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let Some((size, stock)) = pair.split_once(':') else {
                return Err(ProductFormError::InvalidSizeEntry {
                    value: pair.to_string(),
                });
            };

            let size = size.trim().parse::<i32>();
            let stock = stock.trim().parse::<i32>();

            match (size, stock) {
                (Ok(size), Ok(stock)) => Ok(SizeStock { size, stock }),
                _ => Err(ProductFormError::InvalidSizeEntry {
                    value: pair.to_string(),
                }),
            }
        })
        .collect()
}

/// JSON payload for creating a product.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    /// Name entered by the admin.
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    /// Tagline shown on listing cards.
    #[validate(length(min = 1, max = SHORT_MAX_LEN))]
    pub short: String,
    /// Optional longer description.
    pub description: Option<String>,
    /// Optional target audience, defaults to unisex.
    pub gender: Option<Gender>,
    /// List price in whole currency units.
    #[validate(range(min = 1))]
    pub base_price: i64,
    /// Optional discount percentage, defaults to 0.
    #[validate(range(min = 0, max = 100))]
    pub discount_rate: Option<i32>,
    /// Optional advertised sale window start.
    pub sale_start: Option<NaiveDateTime>,
    /// Optional advertised sale window end.
    pub sale_end: Option<NaiveDateTime>,
    /// Optional initial per-size inventory.
    pub sizes: Option<SizesInput>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let sanitized_name = sanitize_inline_text(&self.name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let sanitized_short = sanitize_inline_text(&self.short);
        if sanitized_short.is_empty() {
            return Err(ProductFormError::EmptyShort);
        }

        let sizes = match self.sizes {
            Some(input) => input.into_entries()?,
            None => Vec::new(),
        };

        let mut new_product = NewProduct::new(sanitized_name, sanitized_short, self.base_price)
            .with_discount(
                self.discount_rate.unwrap_or(0),
                self.sale_start,
                self.sale_end,
            )
            .with_sizes(sizes);

        if let Some(gender) = self.gender {
            new_product = new_product.with_gender(gender);
        }

        if let Some(description) = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
        {
            new_product = new_product.with_description(description);
        }

        Ok(new_product)
    }
}

/// JSON payload for replacing the per-size inventory of a product.
#[derive(Debug, Deserialize)]
pub struct UpdateSizesForm {
    /// New inventory, hybrid format.
    pub sizes: SizesInput,
}

impl UpdateSizesForm {
    /// Parse the payload into normalized domain entries.
    pub fn into_entries(self) -> ProductFormResult<Vec<SizeStock>> {
        self.sizes.into_entries()
    }
}

/// JSON payload for updating the discount policy of a product.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDiscountForm {
    /// New discount percentage; 0 switches the sale off.
    #[validate(range(min = 0, max = 100))]
    pub discount_rate: i32,
    /// New sale window start; omitting it clears the stored value.
    pub sale_start: Option<NaiveDateTime>,
    /// New sale window end; omitting it clears the stored value.
    pub sale_end: Option<NaiveDateTime>,
}

impl UpdateDiscountForm {
    /// Validates the payload into a domain `UpdateProduct` patch.
    pub fn into_update_product(self) -> ProductFormResult<UpdateProduct> {
        self.validate()?;

        Ok(UpdateProduct::new().discount(self.discount_rate, self.sale_start, self.sale_end))
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_input_parses_compact_pairs() {
        let input = SizesInput::Compact("260:5, 250:10 ,255:0".to_string());

        let entries = input.into_entries().expect("expected success");

        assert_eq!(
            entries,
            vec![
                SizeStock {
                    size: 250,
                    stock: 10,
                },
                SizeStock {
                    size: 255,
                    stock: 0,
                },
                SizeStock {
                    size: 260,
                    stock: 5,
                },
            ]
        );
    }

    #[test]
    fn sizes_input_parses_json_entries() {
        let input = SizesInput::Entries(vec![
            SizeStockEntry {
                size: 250,
                stock: 3,
            },
            SizeStockEntry {
                size: 270,
                stock: 1,
            },
        ]);

        let entries = input.into_entries().expect("expected success");

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].size, 270);
    }

    #[test]
    fn sizes_input_rejects_malformed_pair() {
        let input = SizesInput::Compact("250:10,260".to_string());

        let result = input.into_entries();

        assert!(matches!(
            result,
            Err(ProductFormError::InvalidSizeEntry { value }) if value == "260"
        ));
    }

    #[test]
    fn sizes_input_rejects_duplicate_sizes() {
        let input = SizesInput::Compact("250:10,250:3".to_string());

        let result = input.into_entries();

        assert!(matches!(
            result,
            Err(ProductFormError::DuplicateSize { size: 250 })
        ));
    }

    #[test]
    fn sizes_input_rejects_negative_stock() {
        let input = SizesInput::Entries(vec![SizeStockEntry {
            size: 250,
            stock: -1,
        }]);

        let result = input.into_entries();

        assert!(matches!(
            result,
            Err(ProductFormError::NegativeStock { size: 250 })
        ));
    }

    #[test]
    fn add_product_form_converts_successfully() {
        let form = AddProductForm {
            name: "  Tree  Runner  ".to_string(),
            short: " Everyday sneaker ".to_string(),
            description: Some("  Knit upper.  ".to_string()),
            gender: Some(Gender::Men),
            base_price: 10000,
            discount_rate: Some(20),
            sale_start: None,
            sale_end: None,
            sizes: Some(SizesInput::Compact("250:10".to_string())),
        };

        let payload = form.into_new_product().expect("expected success");

        assert_eq!(payload.name, "Tree Runner");
        assert_eq!(payload.short, "Everyday sneaker");
        assert_eq!(payload.description.as_deref(), Some("Knit upper."));
        assert_eq!(payload.gender, Gender::Men);
        assert_eq!(payload.discount_rate, 20);
        assert_eq!(payload.sizes.len(), 1);
    }

    #[test]
    fn add_product_form_rejects_empty_name() {
        let form = AddProductForm {
            name: "  ".to_string(),
            short: "Everyday sneaker".to_string(),
            description: None,
            gender: None,
            base_price: 10000,
            discount_rate: None,
            sale_start: None,
            sale_end: None,
            sizes: None,
        };

        let result = form.into_new_product();

        assert!(matches!(result, Err(ProductFormError::EmptyName)));
    }

    #[test]
    fn add_product_form_rejects_out_of_range_discount() {
        let form = AddProductForm {
            name: "Tree Runner".to_string(),
            short: "Everyday sneaker".to_string(),
            description: None,
            gender: None,
            base_price: 10000,
            discount_rate: Some(120),
            sale_start: None,
            sale_end: None,
            sizes: None,
        };

        let result = form.into_new_product();

        assert!(matches!(result, Err(ProductFormError::Validation(_))));
    }

    #[test]
    fn update_discount_form_builds_patch() {
        let form = UpdateDiscountForm {
            discount_rate: 30,
            sale_start: None,
            sale_end: None,
        };

        let updates = form.into_update_product().expect("expected success");

        assert_eq!(updates.discount_rate, Some(30));
        assert!(matches!(updates.sale_start, Some(None)));
        assert!(matches!(updates.sale_end, Some(None)));
        assert!(updates.name.is_none());
    }
}
