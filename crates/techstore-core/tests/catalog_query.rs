//! Catalog lookups and filters.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;

use techstore_core::catalog::{Catalog, Product, ProductQuery};

#[test]
fn builtin_ids_are_unique() {
    let catalog = Catalog::builtin();
    assert!(!catalog.is_empty());
    let ids: HashSet<u32> = catalog.all().iter().map(|p| p.id).collect();
    assert_eq!(ids.len(), catalog.len());
}

#[test]
fn get_unknown_is_none() {
    assert!(Catalog::builtin().get(999).is_none());
}

#[test]
fn category_filter_is_exact() {
    let catalog = Catalog::builtin();
    let q = ProductQuery {
        category: Some("laptops".into()),
        ..Default::default()
    };
    let hits = catalog.filter(&q);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|p| p.category == "laptops"));

    let q = ProductQuery {
        category: Some("Laptops".into()),
        ..Default::default()
    };
    assert!(catalog.filter(&q).is_empty());
}

#[test]
fn search_is_case_insensitive_over_name_and_description() {
    let catalog = Catalog::builtin();

    let by_name = catalog.filter(&ProductQuery {
        search: Some("QUIETWAVE".into()),
        ..Default::default()
    });
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, 5);

    let by_description = catalog.filter(&ProductQuery {
        search: Some("noise cancelling".into()),
        ..Default::default()
    });
    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].id, 5);
}

#[test]
fn filters_combine() {
    let catalog = Catalog::builtin();
    let hits = catalog.filter(&ProductQuery {
        category: Some("audio".into()),
        search: Some("wireless".into()),
    });
    assert!(!hits.is_empty());
    assert!(hits
        .iter()
        .all(|p| p.category == "audio" && p.description.to_lowercase().contains("wireless")));
}

#[test]
fn empty_query_returns_everything_in_order() {
    let catalog = Catalog::builtin();
    let ids: Vec<u32> = catalog
        .filter(&ProductQuery::default())
        .iter()
        .map(|p| p.id)
        .collect();
    let expected: Vec<u32> = catalog.all().iter().map(|p| p.id).collect();
    assert_eq!(ids, expected);
}

#[test]
fn categories_first_seen_order() {
    let cats = Catalog::builtin().categories().join(",");
    assert_eq!(cats, "laptops,phones,audio,tablets,accessories");
}

#[test]
fn specs_serialize_as_ordered_object() {
    let catalog = Catalog::builtin();
    let json = serde_json::to_string(catalog.get(1).unwrap()).unwrap();
    let cpu = json.find("\"CPU\"").unwrap();
    let ram = json.find("\"RAM\"").unwrap();
    assert!(cpu < ram);
}

fn product(id: u32, name: &str, category: &str) -> Product {
    Product {
        id,
        name: name.into(),
        price: 10.0,
        category: category.into(),
        description: String::new(),
        image: String::new(),
        specs: Vec::new(),
    }
}

#[test]
fn custom_catalog_keeps_given_order() {
    let catalog = Catalog::from_products(vec![
        product(7, "Dock", "accessories"),
        product(3, "Slate", "tablets"),
        product(9, "Hub", "accessories"),
    ]);
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.categories(), vec!["accessories", "tablets"]);
    let ids: Vec<u32> = catalog
        .filter(&ProductQuery {
            category: Some("accessories".into()),
            ..Default::default()
        })
        .iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, vec![7, 9]);
    assert!(catalog.get(1).is_none());
}
