use std::thread;
use std::time::Duration;

use solestore::domain::product::{NewProduct, SizeStock, UpdateProduct};
use solestore::repository::{
    CartReader, CartWriter, CheckoutError, CheckoutWriter, DieselRepository, OrderReader,
    ProductReader, ProductWriter,
};

mod common;

fn seed_product(repo: &DieselRepository, name: &str, discount_rate: i32, sizes: Vec<SizeStock>) -> i32 {
    let payload = NewProduct::new(name, "Everyday sneaker", 10000)
        .with_discount(discount_rate, None, None)
        .with_sizes(sizes);
    repo.create_product(&payload).unwrap().id
}

#[test]
fn checkout_converts_cart_into_order() {
    let test_db = common::TestDb::new("checkout_converts_cart_into_order.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        20,
        vec![SizeStock {
            size: 260,
            stock: 2,
        }],
    );

    repo.set_cart_line(1, product_id, 260, 2).unwrap();

    let order = repo.checkout(1).expect("expected checkout to succeed");

    assert_eq!(order.user_id, 1);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].name_snapshot, "Tree Runner");
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.items[0].unit_price, 8000);
    assert_eq!(order.items[0].line_total, 16000);
    assert_eq!(order.total_amount, 16000);

    // Stock is consumed, the sales counter moves, the cart is empty.
    let product = repo.get_product_by_id(product_id).unwrap().unwrap();
    assert_eq!(product.sizes[0].stock, 0);
    assert_eq!(product.sales_count, 2);
    assert!(product.available_sizes().is_empty());

    let cart = repo.get_cart(1).unwrap().unwrap();
    assert!(cart.is_empty());

    let orders = repo.list_orders(1).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, order.id);
}

#[test]
fn checkout_fails_when_stock_is_short_and_changes_nothing() {
    let test_db = common::TestDb::new("checkout_fails_when_stock_is_short.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        0,
        vec![SizeStock {
            size: 260,
            stock: 2,
        }],
    );

    repo.set_cart_line(1, product_id, 260, 3).unwrap();

    let err = repo.checkout(1).expect_err("expected checkout to fail");
    assert!(matches!(err, CheckoutError::OutOfStock));

    // Nothing moved: stock, sales counter, cart and ledger are untouched.
    let product = repo.get_product_by_id(product_id).unwrap().unwrap();
    assert_eq!(product.sizes[0].stock, 2);
    assert_eq!(product.sales_count, 0);

    let cart = repo.get_cart(1).unwrap().unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 3);

    assert!(repo.list_orders(1).unwrap().is_empty());
}

#[test]
fn checkout_rolls_back_earlier_lines_when_a_later_line_fails() {
    let test_db = common::TestDb::new("checkout_rolls_back_earlier_lines.db");
    let repo = DieselRepository::new(test_db.pool());

    let plenty = seed_product(
        &repo,
        "Tree Runner",
        0,
        vec![SizeStock {
            size: 250,
            stock: 5,
        }],
    );
    let scarce = seed_product(
        &repo,
        "Wool Runner",
        0,
        vec![SizeStock {
            size: 260,
            stock: 1,
        }],
    );

    repo.set_cart_line(1, plenty, 250, 2).unwrap();
    repo.set_cart_line(1, scarce, 260, 2).unwrap();

    let err = repo.checkout(1).expect_err("expected checkout to fail");
    assert!(matches!(err, CheckoutError::OutOfStock));

    // The first line had already been reserved inside the transaction; the
    // rollback must restore it.
    let plenty_product = repo.get_product_by_id(plenty).unwrap().unwrap();
    assert_eq!(plenty_product.sizes[0].stock, 5);
    assert_eq!(plenty_product.sales_count, 0);

    let scarce_product = repo.get_product_by_id(scarce).unwrap().unwrap();
    assert_eq!(scarce_product.sizes[0].stock, 1);
    assert_eq!(scarce_product.sales_count, 0);

    assert!(repo.list_orders(1).unwrap().is_empty());
}

#[test]
fn checkout_twice_without_cart_mutation_yields_empty_cart() {
    let test_db = common::TestDb::new("checkout_twice_yields_empty_cart.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        0,
        vec![SizeStock {
            size: 260,
            stock: 2,
        }],
    );

    repo.set_cart_line(1, product_id, 260, 2).unwrap();

    repo.checkout(1).expect("expected first checkout to succeed");

    let err = repo
        .checkout(1)
        .expect_err("expected resubmission to fail");
    assert!(matches!(err, CheckoutError::EmptyCart));

    // A user who never had a cart gets the same answer.
    let err = repo.checkout(42).expect_err("expected checkout to fail");
    assert!(matches!(err, CheckoutError::EmptyCart));
}

#[test]
fn order_snapshots_survive_product_edits_and_deletion() {
    let test_db = common::TestDb::new("order_snapshots_survive_product_edits.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        20,
        vec![SizeStock {
            size: 260,
            stock: 3,
        }],
    );

    repo.set_cart_line(1, product_id, 260, 1).unwrap();
    let order = repo.checkout(1).unwrap();
    assert_eq!(order.items[0].unit_price, 8000);

    // Rename and reprice the product after the sale.
    repo.update_product(
        product_id,
        &UpdateProduct::new()
            .name("Tree Runner v2")
            .base_price(99000)
            .discount(0, None, None),
    )
    .unwrap();

    let orders = repo.list_orders(1).unwrap();
    assert_eq!(orders[0].items[0].name_snapshot, "Tree Runner");
    assert_eq!(orders[0].items[0].unit_price, 8000);
    assert_eq!(orders[0].total_amount, 8000);

    // Even deleting the product leaves the ledger intact.
    repo.delete_product(product_id).unwrap();

    let orders = repo.list_orders(1).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].items[0].product_id, None);
    assert_eq!(orders[0].items[0].name_snapshot, "Tree Runner");
    assert_eq!(orders[0].items[0].line_total, 8000);
}

#[test]
fn orders_list_newest_first_per_user() {
    let test_db = common::TestDb::new("orders_list_newest_first_per_user.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        0,
        vec![SizeStock {
            size: 260,
            stock: 10,
        }],
    );

    repo.set_cart_line(1, product_id, 260, 1).unwrap();
    let first = repo.checkout(1).unwrap();

    thread::sleep(Duration::from_millis(20));

    repo.set_cart_line(1, product_id, 260, 2).unwrap();
    let second = repo.checkout(1).unwrap();

    let orders = repo.list_orders(1).unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second.id);
    assert_eq!(orders[1].id, first.id);

    // Another user's history is separate.
    assert!(repo.list_orders(2).unwrap().is_empty());

    assert!(repo.user_has_purchased(1, product_id).unwrap());
    assert!(!repo.user_has_purchased(2, product_id).unwrap());
}

#[test]
fn concurrent_checkouts_cannot_oversell_one_size() {
    let test_db = common::TestDb::new("concurrent_checkouts_cannot_oversell.db");
    let repo = DieselRepository::new(test_db.pool());

    let product_id = seed_product(
        &repo,
        "Tree Runner",
        0,
        vec![SizeStock {
            size: 260,
            stock: 3,
        }],
    );

    // Two users race for three units, asking for two each.
    repo.set_cart_line(1, product_id, 260, 2).unwrap();
    repo.set_cart_line(2, product_id, 260, 2).unwrap();

    let handles: Vec<_> = [1, 2]
        .into_iter()
        .map(|user_id| {
            let repo = repo.clone();
            thread::spawn(move || repo.checkout(user_id))
        })
        .collect();

    let results: Vec<_> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    let successes = results.iter().filter(|result| result.is_ok()).count();
    let conflicts = results
        .iter()
        .filter(|result| matches!(result, Err(CheckoutError::OutOfStock)))
        .count();

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 1);

    let product = repo.get_product_by_id(product_id).unwrap().unwrap();
    assert_eq!(product.sizes[0].stock, 1);
    assert_eq!(product.sales_count, 2);
}
