use crate::{format_price, product_url, Product, ViewMode};
use askama::Template;
use hub_types::product::MAX_RATING;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Star {
    Full,
    Half,
    Empty,
}

impl Star {
    pub fn class(&self) -> &'static str {
        match self {
            Star::Full => "fas fa-star",
            Star::Half => "fas fa-star-half-alt",
            Star::Empty => "far fa-star",
        }
    }
}

/// Five-unit rating indicator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stars([Star; 5]);

impl Stars {
    pub fn glyphs(&self) -> &[Star; 5] {
        &self.0
    }

    pub fn count(&self, star: Star) -> usize {
        self.0.iter().filter(|s| **s == star).count()
    }
}

impl fmt::Display for Stars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for star in self.0 {
            write!(
                f,
                r#"<i class="{}" style="color: var(--accent-gold);"></i>"#,
                star.class()
            )?;
        }
        Ok(())
    }
}

/// Full stars for the whole part, a half star when the fraction is at least .5,
/// empty for the rest. Ratings outside 0..=5 are clamped.
pub fn generate_stars(rating: Decimal) -> Stars {
    let rating = rating.clamp(Decimal::ZERO, MAX_RATING);
    let full = rating.floor().to_usize().unwrap_or_default();
    let half = full < 5 && rating.fract() >= Decimal::new(5, 1);
    let mut glyphs = [Star::Empty; 5];
    for (i, glyph) in glyphs.iter_mut().enumerate() {
        if i < full {
            *glyph = Star::Full;
        } else if i == full && half {
            *glyph = Star::Half;
        }
    }
    Stars(glyphs)
}

pub fn image_id(product: &Product) -> String {
    format!("img-{}", product.id)
}

#[derive(Template)]
#[template(path = "partials/card.html")]
pub struct ProductCard<'a> {
    product: &'a Product,
    list: bool,
    url: String,
    image_id: String,
    stars: Stars,
    price: String,
    original_price: Option<String>,
    discount: i64,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product, view: ViewMode) -> Self {
        ProductCard {
            product,
            list: !view.is_grid(),
            url: product_url(&product.id),
            image_id: image_id(product),
            stars: generate_stars(product.rating),
            price: format_price(&product.price),
            original_price: product.original_price.as_ref().map(format_price),
            discount: product.discount_percent(),
        }
    }

    pub fn description(&self) -> &str {
        if self.list {
            &self.product.description
        } else {
            &self.product.short_description
        }
    }
}

pub fn product_card(product: &Product, view: ViewMode) -> Result<String, askama::Error> {
    ProductCard::new(product, view).render()
}

/// Cards in the given order, plus the ids of the deferred images they contain.
pub fn product_cards<'a, I>(
    products: I,
    view: ViewMode,
) -> Result<(String, Vec<String>), askama::Error>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut html = String::new();
    let mut images = vec![];
    for product in products {
        html.push_str(&product_card(product, view)?);
        images.push(image_id(product));
    }
    Ok((html, images))
}
