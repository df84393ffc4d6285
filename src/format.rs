//! Markdown rendering for CLI output

use crate::catalog::{Product, Subcategory, SubcategoryInfo};
use crate::listing::ActiveFilter;
use crate::pagination::Pagination;
use std::collections::BTreeMap;

/// Price with thousands separators, e.g. `KSh 2,000`. Whole amounts drop the
/// decimals; anything else is shown to the cent.
pub fn format_price(amount: f64, label: &str) -> String {
    let cents = (amount * 100.0).round();
    let whole = (cents / 100.0).trunc() as u64;
    let fraction = (cents % 100.0) as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if fraction == 0 {
        format!("{} {}", label, grouped)
    } else {
        format!("{} {}.{:02}", label, grouped, fraction)
    }
}

/// Wrap case-insensitive occurrences of each query word in `**bold**`,
/// merging overlapping and adjacent ranges.
pub fn highlight(text: &str, query: &str) -> String {
    if query.trim().is_empty() {
        return text.to_string();
    }

    // Lowercasing can change a character's byte length, so every byte of
    // the lowered text remembers the span of the character it came from.
    let mut lower = String::with_capacity(text.len());
    let mut origin: Vec<(usize, usize)> = Vec::with_capacity(text.len());
    for (start, c) in text.char_indices() {
        let span = (start, start + c.len_utf8());
        for lc in c.to_lowercase() {
            lower.push(lc);
            origin.resize(lower.len(), span);
        }
    }

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for term in query.split_whitespace() {
        let term = term.to_lowercase();
        let mut idx = 0usize;
        while let Some(pos) = lower[idx..].find(&term) {
            let start = idx + pos;
            let end = start + term.len();
            ranges.push((origin[start].0, origin[end - 1].1));
            idx = end;
        }
    }

    if ranges.is_empty() {
        return text.to_string();
    }

    ranges.sort_by_key(|r| r.0);
    let mut merged: Vec<(usize, usize)> = Vec::new();
    for (s, e) in ranges {
        match merged.last_mut() {
            Some(last) if s <= last.1 => last.1 = last.1.max(e),
            _ => merged.push((s, e)),
        }
    }

    let mut res = String::with_capacity(text.len() + merged.len() * 4);
    let mut last_idx = 0usize;
    for (s, e) in merged {
        res.push_str(&text[last_idx..s]);
        res.push_str("**");
        res.push_str(&text[s..e]);
        res.push_str("**");
        last_idx = e;
    }
    res.push_str(&text[last_idx..]);
    res
}

fn push_product_card(md: &mut String, product: &Product, currency: &str, query: &str) {
    md.push_str(&format!(
        "## {} `{}`\n\n",
        highlight(&product.name, query),
        product.id
    ));
    md.push_str(&format!(
        "{} · {} · {} · {}\n\n",
        product.category.badge(),
        product.subcategory.title(),
        format_price(product.price, currency),
        product.availability()
    ));
}

/// Product list with the shopper-visible window and filter chips
pub fn format_product_list(
    heading: &str,
    products: &[&Product],
    pagination: &Pagination,
    filters: &[ActiveFilter],
    currency: &str,
    query: &str,
) -> String {
    let shown = pagination.window(products);

    let mut md = String::new();
    md.push_str(&format!(
        "# {} · {} of {} products\n\n",
        heading,
        shown.len(),
        products.len()
    ));

    if !filters.is_empty() {
        let chips: Vec<String> = filters
            .iter()
            .map(|filter| match filter {
                ActiveFilter::Search { value } => format!("search: \"{}\"", value),
                ActiveFilter::Subcategory { label, .. } => format!("subcategory: {}", label),
                ActiveFilter::Brand { value } => format!("brand: {}", value),
            })
            .collect();
        md.push_str(&format!("Filters: {}\n\n", chips.join(" | ")));
    }

    if products.is_empty() {
        md.push_str("No products found.\n");
        return md;
    }

    for product in shown {
        push_product_card(&mut md, product, currency, query);
    }

    if pagination.has_more(products.len()) {
        md.push_str(&format!(
            "---\n\n{} more; use --page to load more.\n",
            products.len() - shown.len()
        ));
    }

    md
}

/// Full product page with its related products
pub fn format_product_detail(product: &Product, related: &[&Product], currency: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", product.name));
    md.push_str(&format!(
        "`{}` · {} · {}\n\n",
        product.id,
        product.category.badge(),
        product.subcategory.title()
    ));
    md.push_str(&format!("**{}**\n\n", format_price(product.price, currency)));
    md.push_str(&format!("{}\n\n", product.availability()));
    md.push_str(&format!("Brand: {}\n\n", product.brand));

    if !product.description.is_empty() {
        md.push_str(&format!("> {}\n\n", product.description));
    }

    if !product.features.is_empty() {
        md.push_str("## Features\n\n");
        for feature in &product.features {
            md.push_str(&format!("- {}\n", feature));
        }
        md.push('\n');
    }

    if !related.is_empty() {
        md.push_str("## Related Products\n\n");
        for p in related {
            md.push_str(&format!(
                "- {} `{}` · {}\n",
                p.name,
                p.id,
                format_price(p.price, currency)
            ));
        }
    }

    md
}

pub fn format_brands(brands: &[&str]) -> String {
    let mut md = format!("# Brands · {}\n\n", brands.len());
    for brand in brands {
        md.push_str(&format!("- {}\n", brand));
    }
    md
}

pub fn format_subcategories(subcategories: &BTreeMap<Subcategory, SubcategoryInfo>) -> String {
    let mut md = format!("# Subcategories · {}\n\n", subcategories.len());
    for (key, info) in subcategories {
        md.push_str(&format!("- `{}` {}\n", key, info.title));
    }
    md
}

/// Search overlay: suggestions for a query, or quick picks when there is none
pub fn format_suggestions(products: &[&Product], quick_picks: &[&str], currency: &str) -> String {
    if products.is_empty() {
        let mut md = String::from("# Quick Picks\n\n");
        for pick in quick_picks {
            md.push_str(&format!("- {}\n", pick));
        }
        return md;
    }

    let mut md = String::from("# Suggestions\n\n");
    for p in products {
        md.push_str(&format!(
            "- {} `{}` · {}\n",
            p.name,
            p.id,
            format_price(p.price, currency)
        ));
    }
    md
}

pub fn format_recent(entries: &[String]) -> String {
    if entries.is_empty() {
        return "No recent searches.\n".to_string();
    }

    let mut md = String::from("# Recent Searches\n\n");
    for (i, entry) in entries.iter().enumerate() {
        md.push_str(&format!("{}. {}\n", i + 1, entry));
    }
    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{subcategories, Category};

    fn part(id: &str, name: &str, price: f64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: "Fits most saloons".to_string(),
            price,
            image: String::new(),
            category: Category::ExJapan,
            brand: "in stock".to_string(),
            features: vec!["Tested".to_string()],
            stock: 3,
            subcategory: Subcategory::SuspensionBody,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(2000.0, "KSh"), "KSh 2,000");
        assert_eq!(format_price(0.0, "KSh"), "KSh 0");
        assert_eq!(format_price(999.0, "KSh"), "KSh 999");
        assert_eq!(format_price(1234567.0, "KSh"), "KSh 1,234,567");
        assert_eq!(format_price(1500.5, "$"), "$ 1,500.50");
    }

    #[test]
    fn test_highlight() {
        assert_eq!(highlight("Ball Joint", "joint"), "Ball **Joint**");
        assert_eq!(highlight("Ball Joint", "ball joint"), "**Ball** **Joint**");
        assert_eq!(highlight("Ball Joint", "all ball"), "**Ball** Joint");
        assert_eq!(highlight("Ball Joint", ""), "Ball Joint");
        assert_eq!(highlight("Ball Joint", "xyz"), "Ball Joint");
    }

    #[test]
    fn test_highlight_when_lowercase_changes_byte_length() {
        // U+0130 grows to three bytes when lowercased, U+1E9E shrinks to two
        assert_eq!(
            highlight("\u{130}\u{1E9E} Pads", "\u{df}"),
            "\u{130}**\u{1E9E}** Pads"
        );
        assert_eq!(highlight("\u{130}\u{1E9E} Pads", "pads"), "\u{130}\u{1E9E} **Pads**");
        assert_eq!(highlight("\u{130}stanbul", "i"), "**\u{130}**stanbul");
    }

    #[test]
    fn test_product_list() {
        let a = part("ej-010", "Ball Joint", 2000.0);
        let b = part("ej-011", "Tie Rod End", 1500.0);
        let products = vec![&a, &b];
        let filters = vec![ActiveFilter::Brand {
            value: "in stock".to_string(),
        }];

        let md = format_product_list("Ex-Japan", &products, &Pagination::new(1), &filters, "KSh", "joint");
        assert!(md.starts_with("# Ex-Japan · 1 of 2 products"));
        assert!(md.contains("Filters: brand: in stock"));
        assert!(md.contains("## Ball **Joint** `ej-010`"));
        assert!(md.contains("EX-JAPAN · Suspension & Body · KSh 2,000 · In Stock (3 available)"));
        assert!(!md.contains("Tie Rod End"));
        assert!(md.contains("1 more"));
    }

    #[test]
    fn test_empty_product_list() {
        let md = format_product_list("Search", &[], &Pagination::default(), &[], "KSh", "");
        assert!(md.contains("No products found."));
    }

    #[test]
    fn test_product_detail() {
        let product = part("ej-010", "Ball Joint", 2000.0);
        let related = part("ej-011", "Tie Rod End", 1500.0);
        let md = format_product_detail(&product, &[&related], "KSh");
        assert!(md.starts_with("# Ball Joint\n"));
        assert!(md.contains("**KSh 2,000**"));
        assert!(md.contains("- Tested"));
        assert!(md.contains("## Related Products"));
        assert!(md.contains("- Tie Rod End `ej-011` · KSh 1,500"));
    }

    #[test]
    fn test_subcategories_and_brands() {
        let md = format_subcategories(&subcategories());
        assert!(md.contains("- `brake-steering` Brake & Steering"));
        assert_eq!(format_brands(&["in stock"]), "# Brands · 1\n\n- in stock\n");
    }

    #[test]
    fn test_suggestions_fall_back_to_quick_picks() {
        let md = format_suggestions(&[], &["Engine"], "KSh");
        assert!(md.starts_with("# Quick Picks"));
        assert!(md.contains("- Engine"));
    }

    #[test]
    fn test_recent() {
        assert_eq!(format_recent(&[]), "No recent searches.\n");
        let md = format_recent(&["555".to_string()]);
        assert!(md.contains("1. 555"));
    }
}
