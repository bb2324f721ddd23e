use community_pharmacy_api::{
    core::notification::{format_money, order_summary, parse_line_quantities},
    models::OrderProduct,
    seed::{initial_snapshot, reference_data},
};

#[test]
fn money_is_rendered_with_two_decimals() {
    assert_eq!(format_money(0), "$0.00");
    assert_eq!(format_money(150), "$1.50");
    assert_eq!(format_money(123456), "$1234.56");
    assert_eq!(format_money(-5), "-$0.05");
}

#[test]
fn summary_quantities_match_the_order() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let order = snapshot
        .orders
        .iter()
        .find(|o| o.id == "ord-006")
        .expect("seeded order");

    let text = order_summary(order, &reference.products, reference.community("com-c"));
    assert!(text.contains("*Fecha:* 2024-07-22"));
    assert!(text.contains("- Alcohol en Gel 250ml (x1): $3.10"));
    assert!(text.ends_with("Gracias por su compra,\n*Farmacia Digital Comunitaria*"));

    let parsed = parse_line_quantities(&text);
    assert_eq!(
        parsed,
        [
            ("Ibuprofeno 400mg".to_string(), 2),
            ("Alcohol en Gel 250ml".to_string(), 1)
        ]
    );
    Ok(())
}

#[test]
fn unknown_products_and_communities_are_tolerated() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let mut order = snapshot.orders[0].clone();
    order.products.push(OrderProduct {
        product_id: "prod-retired".into(),
        quantity: 4,
    });

    let text = order_summary(&order, &reference.products, None);
    assert!(text.contains("*Comunidad:* N/A"));
    assert!(text.contains("*Total a Pagar: $8.00*"));
    assert_eq!(parse_line_quantities(&text).len(), 2);
    Ok(())
}
