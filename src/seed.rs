//! Demo data for a fresh process: two zones, three communities, the
//! pharmacy catalog and an initial set of users, orders and stock.

use chrono::NaiveDate;

use crate::{
    core::auth::hash_password,
    error::{AppError, AppResult},
    models::{
        Community, InventoryItem, Order, OrderProduct, OrderStatus, Product, ReferenceData, Role,
        Snapshot, User, Zone,
    },
};

pub fn reference_data() -> ReferenceData {
    let zones = vec![
        zone("zona-norte", "Zona Norte", 10.0, 10.0),
        zone("zona-sur", "Zona Sur", 60.0, 50.0),
    ];
    let communities = vec![
        community("com-a", "Comunidad A", "zona-norte", 20.0, 30.0),
        community("com-b", "Comunidad B", "zona-norte", 45.0, 20.0),
        community("com-c", "Comunidad C", "zona-sur", 75.0, 70.0),
    ];
    let products = vec![
        product("prod-001", "Paracetamol 500mg", "Caja de 20 comprimidos", "Analgésicos", 150, "paracetamol"),
        product("prod-002", "Ibuprofeno 400mg", "Caja de 24 comprimidos", "Antiinflamatorios", 220, "ibuprofeno"),
        product("prod-003", "Amoxicilina 500mg", "Caja de 12 cápsulas", "Antibióticos", 480, "amoxicilina"),
        product("prod-004", "Mascarillas Quirúrgicas", "Caja de 50 unidades", "Protección", 500, "mascarillas"),
        product("prod-005", "Alcohol en Gel 250ml", "Botella de 250ml", "Higiene", 310, "alcoholgel"),
        product("prod-006", "Vitamina C 1000mg", "Tubo con 20 tabletas efervescentes", "Vitaminas", 650, "vitaminaC"),
    ];
    ReferenceData {
        zones,
        communities,
        products,
    }
}

/// Initial users, orders and inventory. Every seeded user gets `password`.
pub fn initial_snapshot(password: &str) -> AppResult<Snapshot> {
    let password_hash = hash_password(password)?;
    let user = |id: &str,
                name: &str,
                username: &str,
                email: &str,
                role: Role,
                community_id: Option<&str>,
                zone_id: Option<&str>,
                approved: bool| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        password_hash: password_hash.clone(),
        role,
        approved,
        community_id: community_id.map(str::to_string),
        zone_id: zone_id.map(str::to_string),
    };

    let users = vec![
        user("admin-01", "Antiguo Admin", "admin", "admin@farmacia.com", Role::CommunityManager, Some("com-a"), Some("zona-norte"), true),
        user("zmanager-norte", "Gerente Zona Norte", "gnorte", "gnorte@farmacia.com", Role::ZoneManager, None, Some("zona-norte"), true),
        user("zmanager-sur", "Gerente Zona Sur", "gsur", "gsur@farmacia.com", Role::ZoneManager, None, Some("zona-sur"), true),
        user("cmanager-a", "Roble (Admin General)", "roble", "ca@farmacia.com", Role::Administrator, None, None, true),
        user("cmanager-b", "Encargado Comunidad B", "cb", "cb@farmacia.com", Role::CommunityManager, Some("com-b"), Some("zona-norte"), true),
        user("cmanager-c", "Encargado Comunidad C", "cc", "cc@farmacia.com", Role::CommunityManager, Some("com-c"), Some("zona-sur"), false),
        user("driver-a", "Chofer Alpha", "da", "da@farmacia.com", Role::Driver, Some("com-a"), Some("zona-norte"), true),
    ];

    let inventory = [
        ("com-a", "prod-001", 100),
        ("com-a", "prod-002", 80),
        ("com-a", "prod-004", 200),
        ("com-b", "prod-001", 120),
        ("com-b", "prod-003", 50),
        ("com-b", "prod-005", 150),
        ("com-c", "prod-002", 90),
        ("com-c", "prod-005", 110),
        ("com-c", "prod-006", 70),
        ("com-a", "prod-006", 20),
    ]
    .into_iter()
    .map(|(community_id, product_id, stock)| InventoryItem {
        community_id: community_id.to_string(),
        product_id: product_id.to_string(),
        stock,
    })
    .collect();

    let orders = vec![
        Order {
            id: "ord-001".into(),
            user_full_name: "Juan Pérez".into(),
            community_id: "com-a".into(),
            products: lines(&[("prod-001", 2), ("prod-004", 1)]),
            status: OrderStatus::Pending,
            order_date: date("2024-07-20")?,
            dispatch_date: None,
            comments: "Dejar en conserjería.".into(),
            carrier_name: None,
            phone: Some("123456789".into()),
        },
        Order {
            id: "ord-002".into(),
            user_full_name: "Maria Gonzalez".into(),
            community_id: "com-a".into(),
            products: lines(&[("prod-002", 1)]),
            status: OrderStatus::Confirmed,
            order_date: date("2024-07-21")?,
            dispatch_date: Some(date("2024-07-23")?),
            comments: String::new(),
            carrier_name: Some("Servientrega".into()),
            phone: None,
        },
        Order {
            id: "ord-003".into(),
            user_full_name: "Carlos Silva".into(),
            community_id: "com-b".into(),
            products: lines(&[("prod-005", 3)]),
            status: OrderStatus::ReadyForPickup,
            order_date: date("2024-07-19")?,
            dispatch_date: Some(date("2024-07-21")?),
            comments: "Pasaré por la tarde.".into(),
            carrier_name: None,
            phone: Some("987654321".into()),
        },
        Order {
            id: "ord-004".into(),
            user_full_name: "Ana Torres".into(),
            community_id: "com-c".into(),
            products: lines(&[("prod-006", 1)]),
            status: OrderStatus::Delivered,
            order_date: date("2024-07-18")?,
            dispatch_date: Some(date("2024-07-20")?),
            comments: String::new(),
            carrier_name: Some("DHL".into()),
            phone: None,
        },
        Order {
            id: "ord-005".into(),
            user_full_name: "Luis Rojas".into(),
            community_id: "com-a".into(),
            products: lines(&[("prod-001", 1)]),
            status: OrderStatus::Pending,
            order_date: date("2024-07-22")?,
            dispatch_date: None,
            comments: "Urgente.".into(),
            carrier_name: None,
            phone: None,
        },
        Order {
            id: "ord-006".into(),
            user_full_name: "Sofia Castro".into(),
            community_id: "com-c".into(),
            products: lines(&[("prod-002", 2), ("prod-005", 1)]),
            status: OrderStatus::Pending,
            order_date: date("2024-07-22")?,
            dispatch_date: Some(date("2024-07-25")?),
            comments: String::new(),
            carrier_name: None,
            phone: Some("555555555".into()),
        },
    ];

    Ok(Snapshot {
        users,
        orders,
        inventory,
    })
}

fn zone(id: &str, name: &str, x: f64, y: f64) -> Zone {
    Zone {
        id: id.into(),
        name: name.into(),
        x,
        y,
    }
}

fn community(id: &str, name: &str, zone_id: &str, x: f64, y: f64) -> Community {
    Community {
        id: id.into(),
        name: name.into(),
        zone_id: zone_id.into(),
        x,
        y,
    }
}

fn product(id: &str, name: &str, description: &str, category: &str, price: i64, seed: &str) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: category.into(),
        price,
        image_url: format!("https://picsum.photos/seed/{seed}/200/200"),
    }
}

fn lines(items: &[(&str, u32)]) -> Vec<OrderProduct> {
    items
        .iter()
        .map(|(product_id, quantity)| OrderProduct {
            product_id: (*product_id).to_string(),
            quantity: *quantity,
        })
        .collect()
}

fn date(value: &str) -> AppResult<NaiveDate> {
    value
        .parse()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("invalid seed date {value}: {e}")))
}
