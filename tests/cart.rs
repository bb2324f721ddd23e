use community_pharmacy_api::{
    core::cart::{Cart, line_total},
    error::AppError,
    models::{OrderProduct, Product},
    seed::reference_data,
};

fn product(catalog: &[Product], id: &str) -> Product {
    catalog.iter().find(|p| p.id == id).cloned().expect("seeded product")
}

#[test]
fn adding_the_same_product_merges_lines() -> anyhow::Result<()> {
    let catalog = reference_data().products;
    let paracetamol = product(&catalog, "prod-001");
    let mut cart = Cart::new();

    cart.add(&paracetamol, 2)?;
    cart.add(&paracetamol, 3)?;
    cart.add(&product(&catalog, "prod-004"), 1)?;

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.quantity_of("prod-001"), Some(5));
    assert_eq!(cart.unit_count(), 6);
    assert_eq!(cart.total(&catalog), 5 * 150 + 500);
    Ok(())
}

#[test]
fn non_positive_quantities_are_rejected_on_add() -> anyhow::Result<()> {
    let catalog = reference_data().products;
    let mut cart = Cart::new();

    assert!(matches!(
        cart.add(&product(&catalog, "prod-002"), 0),
        Err(AppError::InvalidQuantity)
    ));
    assert!(matches!(
        cart.add(&product(&catalog, "prod-002"), -4),
        Err(AppError::InvalidQuantity)
    ));
    assert!(cart.is_empty());
    Ok(())
}

#[test]
fn updating_to_zero_drops_the_line() -> anyhow::Result<()> {
    let catalog = reference_data().products;
    let mut cart = Cart::new();
    cart.add(&product(&catalog, "prod-003"), 2)?;
    cart.add(&product(&catalog, "prod-005"), 1)?;

    cart.update_quantity("prod-003", 7)?;
    assert_eq!(cart.quantity_of("prod-003"), Some(7));

    cart.update_quantity("prod-003", 0)?;
    assert_eq!(cart.quantity_of("prod-003"), None);

    // A product that was never added stays absent.
    cart.update_quantity("prod-006", 4)?;
    assert_eq!(cart.quantity_of("prod-006"), None);
    assert_eq!(cart.len(), 1);
    Ok(())
}

#[test]
fn remove_and_clear_are_idempotent() -> anyhow::Result<()> {
    let catalog = reference_data().products;
    let mut cart = Cart::new();
    cart.add(&product(&catalog, "prod-001"), 1)?;

    cart.remove("prod-001");
    cart.remove("prod-001");
    assert!(cart.is_empty());

    cart.clear();
    assert!(cart.is_empty());
    assert_eq!(cart.total(&catalog), 0);
    Ok(())
}

#[test]
fn restored_lines_merge_with_later_additions() -> anyhow::Result<()> {
    let catalog = reference_data().products;
    let mut cart = Cart::new();
    cart.add(&product(&catalog, "prod-001"), 1)?;
    cart.add(&product(&catalog, "prod-002"), 3)?;

    cart.restore(vec![
        OrderProduct {
            product_id: "prod-004".into(),
            quantity: 2,
        },
        OrderProduct {
            product_id: "prod-001".into(),
            quantity: 4,
        },
    ]);

    let ids: Vec<&str> = cart.items().iter().map(|i| i.product_id.as_str()).collect();
    assert_eq!(ids, ["prod-004", "prod-001", "prod-002"]);
    assert_eq!(cart.quantity_of("prod-001"), Some(5));
    assert_eq!(cart.unit_count(), 10);
    Ok(())
}

#[test]
fn totals_skip_products_missing_from_the_catalog() {
    let catalog = reference_data().products;
    let lines = vec![
        OrderProduct {
            product_id: "prod-006".into(),
            quantity: 2,
        },
        OrderProduct {
            product_id: "prod-retired".into(),
            quantity: 10,
        },
    ];

    assert_eq!(line_total(&lines, &catalog), 1300);
}
