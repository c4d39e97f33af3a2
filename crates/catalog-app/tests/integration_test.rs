use catalog_app::actor::CatalogActor;
use catalog_app::lifecycle::CatalogSystem;
use catalog_app::loader::{load_customers, load_orders, load_products, load_reviews};
use catalog_app::menu::Menu;
use catalog_app::message::IdKind;
use catalog_app::ServiceError;
use catalog_store::{
    Catalog, CatalogError, Customer, Order, OrderStatus, Product, ProductUpdate, Rating, Review,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

const CUSTOMERS: &str = "customer_id,name,email\n\
    201,Ada Lovelace,ada@example.com\n\
    202,Grace Hopper,grace@example.com\n";

const PRODUCTS: &str = "product_id,name,price,stock\n\
    101,Desk Lamp,25.00,3\n\
    102,Office Chair,89.90,0\n\
    103,Standing Desk,199.00,10\n";

const REVIEWS: &str = "review_id,product_id,customer_id,rating,comment\n\
    1,101,201,5,\"Bright, and quiet\"\n\
    2,101,202,5,Great lamp\n\
    3,103,201,3,Wobbly\n";

const ORDERS: &str = "order_id,customer_id,product_ids,total_price,order_date,status\n\
    401,201,101;103,224.00,2025-01-05,delivered\n\
    402,202,103,199.00,2025-02-10,pending\n";

fn loaded_catalog() -> Catalog {
    let mut catalog = Catalog::new();
    load_customers(&mut catalog, CUSTOMERS.as_bytes()).unwrap();
    load_products(&mut catalog, PRODUCTS.as_bytes()).unwrap();
    load_reviews(&mut catalog, REVIEWS.as_bytes()).unwrap();
    load_orders(&mut catalog, ORDERS.as_bytes()).unwrap();
    catalog
}

/// Full end-to-end run through the actor.
#[tokio::test]
async fn test_full_catalog_system_integration() {
    let system = CatalogSystem::new(loaded_catalog(), 8);
    let client = &system.client;

    // Loaded data is visible through the client
    assert_eq!(client.list_products().await.unwrap().len(), 3);
    let top = client.top_rated().await.unwrap();
    let names: Vec<_> = top.iter().map(|p| p.name()).collect();
    assert_eq!(names, vec!["Desk Lamp", "Standing Desk", "Office Chair"]);

    // Register a customer with a generated ID
    let customer_id = client.next_id(IdKind::Customer).await.unwrap();
    assert_eq!(customer_id, "231");
    client
        .register_customer(Customer::new(&customer_id, "Linus", "linus@example.com"))
        .await
        .unwrap();

    // Build an order through stock reservations
    let order_id = client.next_id(IdKind::Order).await.unwrap();
    let mut order = Order::new(&order_id, &customer_id, NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    order.add_item(&client.reserve_item("101").await.unwrap());
    order.add_item(&client.reserve_item("101").await.unwrap());
    client.place_order(&customer_id, order).await.unwrap();

    let lamp = client.find_product("101").await.unwrap().unwrap();
    assert_eq!(lamp.stock(), 1);

    let history = client.order_history(&customer_id).await.unwrap().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].total_price(), Decimal::new(5000, 2));

    // Out of stock is rejected without touching the stock
    assert_eq!(
        client.reserve_item("102").await,
        Err(ServiceError::InsufficientStock {
            product_id: "102".into()
        })
    );

    // Review edits and status changes
    client
        .edit_review("103", "201", "Fixed the legs", Rating::new(5).unwrap())
        .await
        .unwrap();
    let common = client.common_reviewed("201", "202").await.unwrap();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0].id(), "101");

    let canceled = client.cancel_order("402").await.unwrap();
    assert_eq!(canceled.status(), &OrderStatus::Canceled);
    assert_eq!(
        client.cancel_order("999").await,
        Err(ServiceError::Catalog(CatalogError::OrderNotFound("999".into())))
    );

    // The final catalog comes back on shutdown
    let catalog = system.shutdown().await.unwrap();
    assert_eq!(catalog.orders().len(), 3);
    assert_eq!(catalog.customers().len(), 3);
}

/// Concurrent reservations never oversell.
#[tokio::test]
async fn test_concurrent_reservations() {
    let mut catalog = Catalog::new();
    catalog.add_product(Product::new("P1", "Limited Widget", Decimal::TEN, 5));
    let system = CatalogSystem::new(catalog, 4);

    let mut handles = vec![];
    for _ in 0..12 {
        let client = system.client.clone();
        handles.push(tokio::spawn(async move { client.reserve_item("P1").await }));
    }

    let mut reserved = 0;
    let mut rejected = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => reserved += 1,
            Err(ServiceError::InsufficientStock { .. }) => rejected += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(reserved, 5, "Exactly the available stock is reserved");
    assert_eq!(rejected, 7);
    let product = system.client.find_product("P1").await.unwrap().unwrap();
    assert_eq!(product.stock(), 0);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_update_product_through_actor() {
    let system = CatalogSystem::new(loaded_catalog(), 4);
    let client = &system.client;

    let update = ProductUpdate {
        price: Some(Decimal::new(2999, 2)),
        stock: Some(7),
        ..Default::default()
    };
    let updated = client.update_product("102", update).await.unwrap();
    assert_eq!(updated.name(), "Office Chair");
    assert_eq!(updated.price(), Decimal::new(2999, 2));
    assert_eq!(updated.stock(), 7);

    // The change is stored, not just echoed back
    let chair = client.find_product("102").await.unwrap().unwrap();
    assert_eq!(chair, updated);
    assert!(client.out_of_stock().await.unwrap().is_empty());

    assert_eq!(
        client.update_product("999", ProductUpdate::default()).await,
        Err(ServiceError::Catalog(CatalogError::ProductNotFound("999".into())))
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_client_without_actor_reports_closed() {
    let (actor, client) = CatalogActor::new(Catalog::new(), 1);
    drop(actor);

    assert_eq!(client.list_orders().await, Err(ServiceError::ActorClosed));
}

/// Scripted menu session: add a review, place an order, list the history.
#[tokio::test]
async fn test_menu_session_against_real_actor() {
    let system = CatalogSystem::new(loaded_catalog(), 8);
    let script = "\
        4\n103\n202\n9\n4\nSturdy enough\n\
        3\n202\n7\n1\n2\n0\n\
        12\n202\n\
        19\n102\n201\n2\nnever reviewed\n\
        0\n";

    let out = Menu::new(&system.client, script.as_bytes(), Vec::new())
        .run()
        .await
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Error: Rating must be between 1 and 5."));
    assert!(text.contains("SUCCESS: Your review for 'Standing Desk' has been added."));
    assert!(text.contains("ERROR: Invalid number. Please choose from the list."));
    assert!(text.contains("ERROR: Sorry, 'Office Chair' is out of stock."));
    assert!(text.contains("Added 'Desk Lamp' to cart. Current Total: 25.00"));
    assert!(text.contains("SUCCESS: Order placed! Your final total is: 25.00"));
    assert!(text.contains("Found 2 total orders."));
    assert!(text.contains("ERROR: No review from customer 201 was found for this product."));

    let catalog = system.shutdown().await.unwrap();
    assert_eq!(catalog.find_product_by_id("101").unwrap().stock(), 2);
    let desk = catalog.find_product_by_id("103").unwrap();
    assert_eq!(desk.reviews().len(), 2);
    assert_eq!(desk.average_rating(), 3.5);

    // Quoted commas survive the load
    let review = catalog.find_product_by_id("101").unwrap().reviews().get(0).unwrap();
    assert_eq!(review, &Review::new("201", Rating::new(5).unwrap(), "Bright, and quiet"));
}
