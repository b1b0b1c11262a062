use axum_bookstore_api::routes::params::{
    BookSortField, Pagination, SortOrder, parse_book_sort,
};

#[test]
fn pagination_defaults_and_bounds() {
    let defaults = Pagination {
        page: None,
        size: None,
    };
    assert_eq!(defaults.normalize(), (1, 10, 0));

    let clamped = Pagination {
        page: Some(0),
        size: Some(1000),
    };
    assert_eq!(clamped.normalize(), (1, 100, 0));

    let offset = Pagination {
        page: Some(3),
        size: Some(20),
    };
    assert_eq!(offset.normalize(), (3, 20, 40));
}

#[test]
fn sort_parses_allow_listed_fields() {
    assert_eq!(
        parse_book_sort(Some("price,asc")),
        (BookSortField::Price, SortOrder::Asc)
    );
    assert_eq!(
        parse_book_sort(Some("title,desc")),
        (BookSortField::Title, SortOrder::Desc)
    );
    assert_eq!(
        parse_book_sort(Some("id,asc")),
        (BookSortField::Id, SortOrder::Asc)
    );
    // Direction is case-insensitive.
    assert_eq!(
        parse_book_sort(Some("price,ASC")),
        (BookSortField::Price, SortOrder::Asc)
    );
}

#[test]
fn sort_falls_back_to_created_at_desc() {
    let fallback = (BookSortField::CreatedAt, SortOrder::Desc);

    assert_eq!(parse_book_sort(None), fallback);
    // Field outside the allow-list.
    assert_eq!(parse_book_sort(Some("isbn,asc")), fallback);
    // Malformed expressions.
    assert_eq!(parse_book_sort(Some("price")), fallback);
    assert_eq!(parse_book_sort(Some("price,sideways")), fallback);
    assert_eq!(parse_book_sort(Some("")), fallback);
}
