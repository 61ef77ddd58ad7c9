#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use techstore_core::catalog::Catalog;
use techstore_core::error::StoreError;
use techstore_gateway::store::CartStore;

fn store() -> CartStore {
    CartStore::new(Arc::new(Catalog::builtin()))
}

#[test]
fn unknown_session_has_empty_cart() {
    assert!(store().get_cart("nobody").is_empty());
}

#[test]
fn add_twice_merges_quantity() {
    let s = store();
    s.add_item("s1", 1, 1).unwrap();
    let cart = s.add_item("s1", 1, 2).unwrap();
    assert_eq!(cart, s.get_cart("s1"));

    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].product_id, 1);
    assert_eq!(cart[0].quantity, 3);
}

#[test]
fn unknown_product_leaves_cart_unchanged() {
    let s = store();
    s.add_item("s1", 2, 1).unwrap();
    let before = s.get_cart("s1");

    let err = s.add_item("s1", 999, 1).expect_err("must fail");
    assert!(matches!(err, StoreError::ProductNotFound(999)));
    assert_eq!(s.get_cart("s1"), before);
}

#[test]
fn unknown_product_does_not_create_a_cart() {
    let s = store();
    assert!(s.add_item("fresh", 999, 1).is_err());
    assert_eq!(s.sessions(), 0);
}

#[test]
fn overflowing_add_is_rejected_and_cart_unchanged() {
    let s = store();
    s.add_item("s1", 1, u32::MAX).unwrap();
    let before = s.get_cart("s1");

    let err = s.add_item("s1", 1, 5).expect_err("must fail");
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(s.get_cart("s1"), before);
    assert_eq!(s.get_cart("s1")[0].quantity, u32::MAX);
}

#[test]
fn remove_drops_product_regardless_of_quantity() {
    let s = store();
    s.add_item("s1", 1, 7).unwrap();
    s.add_item("s1", 3, 1).unwrap();

    let cart = s.remove_item("s1", 1);
    assert!(cart.iter().all(|i| i.product_id != 1));
    assert!(s.get_cart("s1").iter().all(|i| i.product_id != 1));
    assert_eq!(cart.len(), 1);
}

#[test]
fn remove_absent_is_noop() {
    let s = store();
    assert!(s.remove_item("ghost", 1).is_empty());
    s.add_item("s1", 3, 1).unwrap();
    assert_eq!(s.remove_item("s1", 4).len(), 1);
}

#[test]
fn sessions_are_isolated() {
    let s = store();
    s.add_item("a", 1, 1).unwrap();
    s.add_item("b", 2, 5).unwrap();
    assert_eq!(s.get_cart("a")[0].product_id, 1);
    assert_eq!(s.get_cart("b")[0].quantity, 5);
}

#[test]
fn clear_returns_and_empties() {
    let s = store();
    s.add_item("s1", 1, 2).unwrap();
    let cart = s.clear("s1");
    assert_eq!(cart.item_count(), 2);
    assert!(s.get_cart("s1").is_empty());
    assert!(s.clear("s1").is_empty());
}

#[test]
fn concurrent_adds_do_not_lose_increments() {
    let s = Arc::new(store());
    let threads = 8;
    let per_thread = 250;

    thread::scope(|scope| {
        for _ in 0..threads {
            let s = Arc::clone(&s);
            scope.spawn(move || {
                for _ in 0..per_thread {
                    s.add_item("shared", 5, 1).unwrap();
                }
            });
        }
    });

    let cart = s.get_cart("shared");
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].quantity, threads * per_thread);
}
