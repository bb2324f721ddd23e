use std::fmt::Write;

use crate::{
    core::cart::line_total,
    models::{Community, Order, Product},
};

const RULE: &str = "---------------------------";

/// Formats cents as `$<units>.<cents>`.
pub fn format_money(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    format!("{sign}${}.{:02}", cents / 100, cents % 100)
}

/// Shareable order text for an external messaging channel. Lines whose
/// product is missing from the catalog are left out.
pub fn order_summary(order: &Order, catalog: &[Product], community: Option<&Community>) -> String {
    let mut lines = String::new();
    for item in &order.products {
        let Some(product) = catalog.iter().find(|p| p.id == item.product_id) else {
            continue;
        };
        let _ = writeln!(
            lines,
            "- {} (x{}): {}",
            product.name,
            item.quantity,
            format_money(product.price * i64::from(item.quantity))
        );
    }

    format!(
        "*Factura de Pedido*\n\
         {RULE}\n\
         *Pedido N°:* {id}\n\
         *Cliente:* {client}\n\
         *Fecha:* {date}\n\
         *Comunidad:* {community}\n\
         {RULE}\n\
         *Productos:*\n\
         {lines}\
         {RULE}\n\
         *Total a Pagar: {total}*\n\
         \n\
         Gracias por su compra,\n\
         *Farmacia Digital Comunitaria*",
        id = order.id,
        client = order.user_full_name,
        date = order.order_date.format("%Y-%m-%d"),
        community = community.map_or("N/A", |c| c.name.as_str()),
        total = format_money(line_total(&order.products, catalog)),
    )
}

/// Reads `(product name, quantity)` pairs back out of an order summary.
pub fn parse_line_quantities(text: &str) -> Vec<(String, u32)> {
    text.lines()
        .filter_map(|line| line.strip_prefix("- "))
        .filter_map(|line| {
            let split = line.rfind(" (x")?;
            let (name, rest) = line.split_at(split);
            let quantity = rest.strip_prefix(" (x")?.split_once("):")?.0;
            Some((name.to_string(), quantity.parse().ok()?))
        })
        .collect()
}
