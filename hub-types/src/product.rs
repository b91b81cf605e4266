use derive_more::{Display, Error};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

pub const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    pub rating: Decimal,
    pub reviews: u32,
    pub category: String,
    pub image: String,
    pub affiliate_link: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[display("empty id")]
    EmptyId,
    #[display("negative price {price}")]
    NegativePrice { price: Decimal },
    #[display("original price {original} is lower than price {price}")]
    OriginalBelowPrice { original: Decimal, price: Decimal },
    #[display("rating {rating} is outside 0..=5")]
    RatingOutOfRange { rating: Decimal },
}

impl Product {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.price.is_sign_negative() && !self.price.is_zero() {
            return Err(ValidationError::NegativePrice { price: self.price });
        }
        if let Some(original) = self.original_price {
            if original < self.price {
                return Err(ValidationError::OriginalBelowPrice {
                    original,
                    price: self.price,
                });
            }
        }
        if self.rating < Decimal::ZERO || self.rating > MAX_RATING {
            return Err(ValidationError::RatingOutOfRange {
                rating: self.rating,
            });
        }
        Ok(())
    }

    /// Whole percent saved against `original_price`, half away from zero.
    /// Zero when there is no original price.
    pub fn discount_percent(&self) -> i64 {
        let Some(original) = self.original_price else {
            return 0;
        };
        if original.is_zero() {
            return 0;
        }
        ((original - self.price) / original * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or_default()
    }
}
