use bigdecimal::BigDecimal;
use bookstore_server_lib::data::database::Database;
use bookstore_server_lib::data::models::book::NewBook;
use bookstore_server_lib::services::book_service::{BookQuery, BookService};
use diesel::result;
use diesel_async::RunQueryDsl;
use std::str::FromStr;

async fn setup() -> Result<(), result::Error> {
    let db = Database::new().await;

    let mut conn = db
        .get_connection()
        .await
        .expect("Failed to get a database connection");

    use bookstore_server_lib::data::models::schema::books::dsl::books;
    use bookstore_server_lib::data::models::schema::cart_items::dsl::cart_items;
    use bookstore_server_lib::data::models::schema::order_items::dsl::order_items;
    use bookstore_server_lib::data::models::schema::orders::dsl::orders;
    use bookstore_server_lib::data::models::schema::reviews::dsl::reviews;
    use bookstore_server_lib::data::models::schema::users::dsl::users;

    diesel::delete(reviews).execute(&mut conn).await?;
    diesel::delete(order_items).execute(&mut conn).await?;
    diesel::delete(orders).execute(&mut conn).await?;
    diesel::delete(cart_items).execute(&mut conn).await?;
    diesel::delete(books).execute(&mut conn).await?;
    diesel::delete(users).execute(&mut conn).await?;

    Ok(())
}

fn money(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("Invalid decimal literal")
}

/// Four books spanning two categories and two authors, inserted in this
/// order so "Dune Messiah" is the newest row.
async fn seed_catalog(service: &BookService) {
    let seed = [
        (
            "The Rust Programming Language",
            "Steve Klabnik",
            "Programming",
            "29.99",
            Some("A guide to systems programming in Rust"),
        ),
        (
            "Database Internals",
            "Alex Petrov",
            "Programming",
            "49.99",
            Some("A deep dive into how distributed data systems work"),
        ),
        ("Dune", "Frank Herbert", "Science Fiction", "9.99", None),
        (
            "Dune Messiah",
            "Frank Herbert",
            "Science Fiction",
            "12.99",
            None,
        ),
    ];

    for (title, author, category, price, description) in seed {
        service
            .create_book(NewBook {
                title,
                author,
                isbn: None,
                description,
                price: money(price),
                stock_quantity: 10,
                category,
                publication_year: None,
                publisher: None,
                cover_image_url: None,
            })
            .await
            .expect("Failed to seed book");
    }
}

#[tokio::test]
#[serial_test::serial]
async fn test_free_text_matches_title_and_description() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    let by_title = service
        .search_books(BookQuery {
            query: Some("dune".into()),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    let titles: Vec<&str> = by_title.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(by_title.len(), 2);
    assert!(titles.contains(&"Dune"));
    assert!(titles.contains(&"Dune Messiah"));

    // "distributed" only appears in a description.
    let by_description = service
        .search_books(BookQuery {
            query: Some("distributed".into()),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(by_description.len(), 1);
    assert_eq!(by_description[0].title, "Database Internals");
}

#[tokio::test]
#[serial_test::serial]
async fn test_category_and_author_filters() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    let programming = service
        .search_books(BookQuery {
            category: Some("Programming".into()),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(programming.len(), 2);
    assert!(programming.iter().all(|b| b.category == "Programming"));

    let herbert = service
        .search_books(BookQuery {
            author: Some("Herbert".into()),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(herbert.len(), 2);
    assert!(herbert.iter().all(|b| b.author == "Frank Herbert"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_price_range_filter() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    let mid_range = service
        .search_books(BookQuery {
            min_price: Some(money("10.00")),
            max_price: Some(money("30.00")),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    let titles: Vec<&str> = mid_range.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(mid_range.len(), 2);
    assert!(titles.contains(&"The Rust Programming Language"));
    assert!(titles.contains(&"Dune Messiah"));
}

#[tokio::test]
#[serial_test::serial]
async fn test_combined_filters_intersect() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    // Free text alone matches two books; the price cap narrows it to one.
    let narrowed = service
        .search_books(BookQuery {
            query: Some("dune".into()),
            max_price: Some(money("10.00")),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].title, "Dune");

    // Each result satisfies every supplied predicate.
    let cross = service
        .search_books(BookQuery {
            category: Some("Science Fiction".into()),
            author: Some("Herbert".into()),
            min_price: Some(money("12.00")),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(cross.len(), 1);
    assert_eq!(cross[0].title, "Dune Messiah");
}

#[tokio::test]
#[serial_test::serial]
async fn test_newest_first_ordering_and_pagination() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    let all = service
        .search_books(BookQuery::default())
        .await
        .expect("Search failed");

    assert_eq!(all.len(), 4);
    assert_eq!(all[0].title, "Dune Messiah");

    let first_page = service
        .search_books(BookQuery {
            limit: Some(2),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    let second_page = service
        .search_books(BookQuery {
            limit: Some(2),
            offset: Some(2),
            ..Default::default()
        })
        .await
        .expect("Search failed");

    assert_eq!(first_page.len(), 2);
    assert_eq!(second_page.len(), 2);

    // Pages partition the full listing in order.
    let paged: Vec<i32> = first_page
        .iter()
        .chain(second_page.iter())
        .map(|b| b.book_id)
        .collect();
    let full: Vec<i32> = all.iter().map(|b| b.book_id).collect();
    assert_eq!(paged, full);
}

#[tokio::test]
#[serial_test::serial]
async fn test_paging_bounds_are_clamped() {
    setup().await.expect("Setup failed");

    let service = BookService::new();
    seed_catalog(&service).await;

    // Zero and negative limits collapse to a single row.
    let clamped_low = service
        .search_books(BookQuery {
            limit: Some(0),
            ..Default::default()
        })
        .await
        .expect("Search failed");
    assert_eq!(clamped_low.len(), 1);

    // An oversized limit is capped, not an error.
    let clamped_high = service
        .search_books(BookQuery {
            limit: Some(100_000),
            ..Default::default()
        })
        .await
        .expect("Search failed");
    assert_eq!(clamped_high.len(), 4);

    // Negative offsets read from the start.
    let negative_offset = service
        .search_books(BookQuery {
            offset: Some(-5),
            ..Default::default()
        })
        .await
        .expect("Search failed");
    assert_eq!(negative_offset.len(), 4);
}
