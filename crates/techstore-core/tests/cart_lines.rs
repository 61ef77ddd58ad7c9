//! Cart line-item behaviour.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use techstore_core::cart::Cart;
use techstore_core::catalog::Catalog;
use techstore_core::error::StoreError;

#[test]
fn repeated_add_merges_into_one_line() {
    let catalog = Catalog::builtin();
    let laptop = catalog.get(1).unwrap();

    let mut cart = Cart::new();
    cart.add(laptop, 1).unwrap();
    cart.add(laptop, 2).unwrap();

    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].product_id, 1);
    assert_eq!(cart.items()[0].quantity, 3);
}

#[test]
fn quantity_is_sum_of_adds() {
    let catalog = Catalog::builtin();
    let phone = catalog.get(3).unwrap();

    let mut cart = Cart::new();
    let adds = [1u32, 4, 2, 7, 1];
    for q in adds {
        cart.add(phone, q).unwrap();
    }
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.items()[0].quantity, adds.iter().sum::<u32>());
}

#[test]
fn lines_keep_insertion_order_and_snapshot_product() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.get(5).unwrap(), 1).unwrap();
    cart.add(catalog.get(2).unwrap(), 1).unwrap();
    cart.add(catalog.get(5).unwrap(), 1).unwrap();

    let ids: Vec<u32> = cart.items().iter().map(|i| i.product_id).collect();
    assert_eq!(ids, vec![5, 2]);

    let headphones = &cart.items()[0];
    let product = catalog.get(5).unwrap();
    assert_eq!(headphones.name, product.name);
    assert_eq!(headphones.price, product.price);
    assert_eq!(headphones.image, product.image);
}

#[test]
fn remove_drops_whole_line_regardless_of_quantity() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.get(1).unwrap(), 5).unwrap();
    cart.add(catalog.get(8).unwrap(), 1).unwrap();

    assert!(cart.remove(1));
    assert!(cart.items().iter().all(|i| i.product_id != 1));
    assert_eq!(cart.items().len(), 1);
}

#[test]
fn remove_missing_is_noop() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.get(1).unwrap(), 1).unwrap();
    let before = cart.clone();

    assert!(!cart.remove(42));
    assert_eq!(cart, before);
}

#[test]
fn totals() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.get(6).unwrap(), 2).unwrap(); // 129.00
    cart.add(catalog.get(9).unwrap(), 1).unwrap(); // 79.00

    assert_eq!(cart.item_count(), 3);
    assert!((cart.total() - 337.0).abs() < 1e-9);
}

#[test]
fn line_item_json_is_camel_case() {
    let catalog = Catalog::builtin();
    let mut cart = Cart::new();
    cart.add(catalog.get(4).unwrap(), 2).unwrap();

    let v = serde_json::to_value(cart.items()).unwrap();
    assert_eq!(v[0]["productId"], 4);
    assert_eq!(v[0]["quantity"], 2);
    assert!(v[0].get("product_id").is_none());
}

#[test]
fn overflowing_quantity_is_rejected_and_line_kept() {
    let catalog = Catalog::builtin();
    let laptop = catalog.get(1).unwrap();
    let mut cart = Cart::new();
    cart.add(laptop, u32::MAX - 1).unwrap();
    let before = cart.clone();

    let err = cart.add(laptop, 2).expect_err("must overflow");
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(err.client_code().as_str(), "VALIDATION_ERROR");
    assert_eq!(cart, before);

    cart.add(laptop, 1).unwrap();
    assert_eq!(cart.items()[0].quantity, u32::MAX);
}
