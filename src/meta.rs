use crate::dom::{Document, MetaKey};
use crate::Product;
use url::Url;

/// Absolute form of `image`, resolved against the site origin.
pub fn resolve_image(origin: &Url, image: &str) -> String {
    match origin.join(image) {
        Ok(url) => url.to_string(),
        Err(err) => {
            log::warn!("Unable to resolve image {image:?} against {origin}: {err}");
            image.to_string()
        }
    }
}

/// Description, Open Graph and Pinterest tags for a product page.
pub fn product_meta_tags(
    product: &Product,
    origin: &Url,
    page_url: &Url,
) -> Vec<(MetaKey, String)> {
    let image = resolve_image(origin, &product.image);
    vec![
        (MetaKey::name("description"), product.short_description.clone()),
        (MetaKey::property("og:title"), product.title.clone()),
        (MetaKey::property("og:description"), product.short_description.clone()),
        (MetaKey::property("og:image"), image.clone()),
        (MetaKey::property("og:url"), page_url.to_string()),
        (MetaKey::property("og:type"), "product".to_string()),
        (MetaKey::name("pinterest:description"), product.short_description.clone()),
        (MetaKey::name("pinterest:image"), image),
    ]
}

pub fn update_meta_tags(doc: &mut Document, product: &Product, origin: &Url, page_url: &Url) {
    for (key, content) in product_meta_tags(product, origin, page_url) {
        doc.upsert_meta(key, content);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn product(id: &str, image: &str) -> Product {
        Product {
            id: id.to_string(),
            title: format!("Title {id}"),
            description: String::new(),
            short_description: format!("Short {id}"),
            price: dec!(10),
            original_price: None,
            rating: dec!(4),
            reviews: 1,
            category: "skincare".to_string(),
            image: image.to_string(),
            affiliate_link: String::new(),
            tags: vec![],
        }
    }

    fn origin() -> Url {
        Url::parse("https://finds.example.com").unwrap()
    }

    #[test]
    fn resolves_relative_and_keeps_absolute_images() {
        assert_eq!(
            resolve_image(&origin(), "static/images/p1.jpg"),
            "https://finds.example.com/static/images/p1.jpg"
        );
        assert_eq!(
            resolve_image(&origin(), "/img/p1.jpg"),
            "https://finds.example.com/img/p1.jpg"
        );
        assert_eq!(
            resolve_image(&origin(), "https://cdn.example.com/p1.jpg"),
            "https://cdn.example.com/p1.jpg"
        );
    }

    #[test]
    fn builds_full_tag_set() {
        let page = origin().join("product.html?id=p1").unwrap();
        let tags = product_meta_tags(&product("p1", "p1.jpg"), &origin(), &page);
        assert_eq!(tags.len(), 8);
        assert!(tags.contains(&(MetaKey::property("og:type"), "product".to_string())));
        assert!(tags.contains(&(
            MetaKey::property("og:url"),
            "https://finds.example.com/product.html?id=p1".to_string()
        )));
        assert!(tags.contains(&(
            MetaKey::name("pinterest:image"),
            "https://finds.example.com/p1.jpg".to_string()
        )));
    }

    #[test]
    fn second_update_overwrites_without_duplicates() {
        let mut doc = Document::default();
        let page = origin().join("product.html?id=p1").unwrap();
        update_meta_tags(&mut doc, &product("p1", "p1.jpg"), &origin(), &page);
        let page = origin().join("product.html?id=p2").unwrap();
        update_meta_tags(&mut doc, &product("p2", "p2.jpg"), &origin(), &page);

        assert_eq!(doc.meta_tags().len(), 8);
        for tag in doc.meta_tags() {
            let same = doc
                .meta_tags()
                .iter()
                .filter(|t| t.key() == tag.key())
                .count();
            assert_eq!(same, 1, "{} duplicated", tag.identifier());
        }
        assert_eq!(doc.meta(&MetaKey::property("og:title")), Some("Title p2"));
        assert_eq!(doc.meta(&MetaKey::name("description")), Some("Short p2"));
        assert_eq!(
            doc.meta(&MetaKey::property("og:image")),
            Some("https://finds.example.com/p2.jpg")
        );
    }
}
