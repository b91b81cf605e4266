use crate::data_source::CatalogSource;
use crate::dom::Document;
use crate::meta::update_meta_tags;
use crate::render::{generate_stars, product_cards};
use crate::{format_price, Product, ViewMode};
use askama::Template;
use url::Url;

pub const PRODUCT_DETAIL: &str = "productDetail";
pub const PRODUCT_IMAGE: &str = "productImage";
pub const PRODUCT_TITLE: &str = "productTitle";
pub const PRODUCT_RATING: &str = "productRating";
pub const CURRENT_PRICE: &str = "currentPrice";
pub const ORIGINAL_PRICE: &str = "originalPrice";
pub const PRODUCT_DISCOUNT: &str = "productDiscount";
pub const PRODUCT_DESCRIPTION: &str = "productDescription";
pub const PRODUCT_TAGS: &str = "productTags";
pub const AFFILIATE_LINK: &str = "affiliateLink";
pub const RELATED_PRODUCTS: &str = "relatedProducts";

pub const MAX_RELATED: usize = 4;

pub const NOT_FOUND: &str =
    r#"<div class="col-12"><p class="text-center text-danger">Product not found.</p></div>"#;
pub const LOAD_ERROR: &str = r#"<div class="col-12"><p class="text-center text-danger">Error loading product. Please try again later.</p></div>"#;
pub const NO_RELATED: &str =
    r#"<p class="text-center text-muted">No related products found.</p>"#;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailOutcome {
    Rendered(Product),
    NotFound,
    LoadFailed,
}

#[derive(Template)]
#[template(path = "partials/tags.html")]
struct TagList<'a> {
    tags: &'a [String],
}

pub fn detail_document(site_name: &str) -> Document {
    let mut doc = Document::new(
        site_name,
        &[
            PRODUCT_DETAIL,
            PRODUCT_IMAGE,
            PRODUCT_TITLE,
            PRODUCT_RATING,
            CURRENT_PRICE,
            ORIGINAL_PRICE,
            PRODUCT_DISCOUNT,
            PRODUCT_DESCRIPTION,
            PRODUCT_TAGS,
            AFFILIATE_LINK,
            RELATED_PRODUCTS,
        ],
    );
    doc.el(ORIGINAL_PRICE).hide();
    doc.el(PRODUCT_DISCOUNT).hide();
    doc
}

/// Same-category products other than `current`, source order, at most [`MAX_RELATED`].
pub fn related_products<'a>(products: &'a [Product], current: &Product) -> Vec<&'a Product> {
    products
        .iter()
        .filter(|p| p.category == current.category && p.id != current.id)
        .take(MAX_RELATED)
        .collect()
}

pub fn display_product_details(
    product: &Product,
    site_name: &str,
    doc: &mut Document,
) -> Result<(), askama::Error> {
    doc.set_title(format!("{} - {site_name}", product.title));
    doc.el(PRODUCT_IMAGE)
        .set_attr("src", product.image.as_str())
        .set_attr("alt", product.title.as_str());
    doc.el(PRODUCT_TITLE).set_text(&product.title);

    let rating = format!(
        r#"{} <span class="rating-value">{} ({} reviews)</span>"#,
        generate_stars(product.rating),
        product.rating.normalize(),
        product.reviews
    );
    doc.el(PRODUCT_RATING).set_html(rating);

    doc.el(CURRENT_PRICE).set_text(format_price(&product.price));
    match &product.original_price {
        Some(original) => {
            doc.el(ORIGINAL_PRICE).set_text(format_price(original)).show();
            let discount = product.discount_percent();
            if discount > 0 {
                doc.el(PRODUCT_DISCOUNT)
                    .set_text(format!("Save {discount}%"))
                    .show();
            } else {
                doc.el(PRODUCT_DISCOUNT).set_html("").hide();
            }
        }
        None => {
            doc.el(ORIGINAL_PRICE).set_html("").hide();
            doc.el(PRODUCT_DISCOUNT).set_html("").hide();
        }
    }

    doc.el(PRODUCT_DESCRIPTION).set_text(&product.description);
    doc.el(PRODUCT_TAGS).set_html(
        TagList {
            tags: &product.tags,
        }
        .render()?,
    );
    doc.el(AFFILIATE_LINK)
        .set_attr("href", product.affiliate_link.as_str());
    Ok(())
}

pub fn load_related_products(
    products: &[Product],
    current: &Product,
    doc: &mut Document,
) -> Result<(), askama::Error> {
    let related = related_products(products, current);
    if related.is_empty() {
        doc.el(RELATED_PRODUCTS).set_html(NO_RELATED);
        return Ok(());
    }
    let (html, images) = product_cards(related, ViewMode::Grid)?;
    doc.el(RELATED_PRODUCTS)
        .set_class("product-grid")
        .set_html_with_images(html, images);
    doc.lazy_load_images();
    Ok(())
}

/// Detail page load for the product `id`.
///
/// A missing id fails before fetching. Not-found and fetch failures replace the
/// detail region with a message and leave every other field untouched.
pub async fn load(
    id: Option<&str>,
    source: &dyn CatalogSource,
    site_name: &str,
    origin: &Url,
    page_url: &Url,
    doc: &mut Document,
) -> Result<DetailOutcome, askama::Error> {
    let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
        log::info!("Product page requested without id");
        doc.el(PRODUCT_DETAIL).set_html(NOT_FOUND);
        return Ok(DetailOutcome::NotFound);
    };

    let catalog = match source.fetch().await {
        Ok(catalog) => catalog,
        Err(err) => {
            log::error!("Error loading product {id:?} from {}: {err}", source.location());
            doc.el(PRODUCT_DETAIL).set_html(LOAD_ERROR);
            return Ok(DetailOutcome::LoadFailed);
        }
    };

    let Some(product) = catalog.find(id) else {
        log::info!("Product {id:?} not found");
        doc.el(PRODUCT_DETAIL).set_html(NOT_FOUND);
        return Ok(DetailOutcome::NotFound);
    };

    display_product_details(product, site_name, doc)?;
    load_related_products(catalog.products(), product, doc)?;
    update_meta_tags(doc, product, origin, page_url);
    Ok(DetailOutcome::Rendered(product.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::tests::{StubSource, SAMPLE};
    use crate::dom::MetaKey;
    use rust_decimal_macros::dec;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: format!("Description {id}"),
            short_description: format!("Short {id}"),
            price: dec!(10),
            original_price: None,
            rating: dec!(4),
            reviews: 3,
            category: category.to_string(),
            image: format!("{id}.jpg"),
            affiliate_link: format!("https://shop.example.com/{id}"),
            tags: vec![],
        }
    }

    fn origin() -> Url {
        Url::parse("https://finds.example.com").unwrap()
    }

    async fn load_sample(id: Option<&str>, doc: &mut Document) -> DetailOutcome {
        let page = origin().join("product.html?id=p1").unwrap();
        load(
            id,
            &StubSource(Some(SAMPLE.to_string())),
            "Beauty finds hub",
            &origin(),
            &page,
            doc,
        )
        .await
        .unwrap()
    }

    #[test]
    fn related_caps_at_four_in_source_order() {
        let mut products = vec![product("x", "makeup")];
        products.extend((1..=6).map(|i| product(&format!("s{i}"), "skincare")));
        products.insert(3, product("current", "skincare"));
        let current = products[3].clone();

        let related: Vec<_> = related_products(&products, &current)
            .into_iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(related, vec!["s1", "s2", "s3", "s4"]);
    }

    #[test]
    fn no_related_products_shows_message() {
        let products = vec![product("a", "skincare"), product("b", "makeup")];
        let mut doc = detail_document("Shop");
        load_related_products(&products, &products[0], &mut doc).unwrap();
        assert!(doc.html(RELATED_PRODUCTS).contains("No related products found."));
        assert!(doc.lazy().pending().next().is_none());
    }

    #[test]
    fn rating_drops_trailing_zeros() {
        let mut doc = detail_document("Shop");
        let mut p = product("a", "skincare");
        p.rating = dec!(4.0);
        display_product_details(&p, "Shop", &mut doc).unwrap();
        assert!(doc
            .html(PRODUCT_RATING)
            .contains(r#"<span class="rating-value">4 (3 reviews)</span>"#));

        p.rating = dec!(3.50);
        display_product_details(&p, "Shop", &mut doc).unwrap();
        assert!(doc.html(PRODUCT_RATING).contains("3.5 (3 reviews)"));
    }

    #[actix_web::test]
    async fn populates_fields_for_found_product() {
        let mut doc = detail_document("Beauty finds hub");
        let outcome = load_sample(Some("p1"), &mut doc).await;
        assert!(matches!(outcome, DetailOutcome::Rendered(ref p) if p.id == "p1"));

        assert_eq!(doc.title(), "Glow Serum - Beauty finds hub");
        assert_eq!(doc.html(PRODUCT_TITLE), "Glow Serum");
        assert_eq!(doc.attr(PRODUCT_IMAGE, "alt"), "Glow Serum");
        assert_eq!(doc.html(CURRENT_PRICE), "$24.99");
        assert_eq!(doc.html(ORIGINAL_PRICE), "$34.99");
        assert!(!doc.is_hidden(ORIGINAL_PRICE));
        assert_eq!(doc.html(PRODUCT_DISCOUNT), "Save 29%");
        assert!(doc.html(PRODUCT_RATING).contains("4.5 (120 reviews)"));
        assert_eq!(doc.html(PRODUCT_RATING).matches("<i class=").count(), 5);
        let tags = doc.html(PRODUCT_TAGS);
        assert!(tags.find("vegan").unwrap() < tags.find("bestseller").unwrap());
        assert_eq!(doc.attr(AFFILIATE_LINK, "href"), "https://shop.example.com/p1");
        assert!(!doc.has_content(PRODUCT_DETAIL));

        assert!(doc.html(RELATED_PRODUCTS).contains("Aloe Cleanser"));
        assert!(doc.lazy().is_pending("img-p3"));
        assert_eq!(doc.meta(&MetaKey::property("og:type")), Some("product"));
        assert_eq!(
            doc.meta(&MetaKey::property("og:image")),
            Some("https://finds.example.com/static/images/p1.jpg")
        );
    }

    #[actix_web::test]
    async fn hides_original_price_and_savings_when_not_discounted() {
        let mut doc = detail_document("Beauty finds hub");
        load_sample(Some("p2"), &mut doc).await;
        assert!(doc.is_hidden(ORIGINAL_PRICE));
        assert!(doc.is_hidden(PRODUCT_DISCOUNT));
        assert!(doc.html(RELATED_PRODUCTS).contains("No related products found."));

        let mut doc = detail_document("Beauty finds hub");
        load_sample(Some("p3"), &mut doc).await;
        assert!(!doc.is_hidden(ORIGINAL_PRICE));
        assert!(doc.is_hidden(PRODUCT_DISCOUNT));
    }

    #[actix_web::test]
    async fn unknown_id_renders_not_found_only() {
        let mut doc = detail_document("Beauty finds hub");
        let outcome = load_sample(Some("nope"), &mut doc).await;
        assert_eq!(outcome, DetailOutcome::NotFound);
        assert!(doc.html(PRODUCT_DETAIL).contains("Product not found."));
        assert!(!doc.has_content(PRODUCT_TITLE));
        assert!(!doc.has_content(RELATED_PRODUCTS));
        assert!(doc.meta_tags().is_empty());
        assert_eq!(doc.title(), "Beauty finds hub");
    }

    #[actix_web::test]
    async fn missing_id_fails_before_fetching() {
        let mut doc = detail_document("Beauty finds hub");
        let page = origin();
        let outcome = load(Some("  "), &StubSource(None), "Shop", &origin(), &page, &mut doc)
            .await
            .unwrap();
        assert_eq!(outcome, DetailOutcome::NotFound);
        assert!(doc.html(PRODUCT_DETAIL).contains("Product not found."));
    }

    #[actix_web::test]
    async fn fetch_failure_renders_error() {
        let mut doc = detail_document("Beauty finds hub");
        let page = origin();
        let outcome = load(Some("p1"), &StubSource(None), "Shop", &origin(), &page, &mut doc)
            .await
            .unwrap();
        assert_eq!(outcome, DetailOutcome::LoadFailed);
        assert!(doc.html(PRODUCT_DETAIL).contains("Error loading product"));
        assert!(!doc.has_content(PRODUCT_TITLE));
    }
}
