use b2b_orders_api::routes::params::Pagination;

#[test]
fn defaults_and_bounds() {
    assert_eq!(Pagination::default().normalize(), (1, 20, 0));

    let p = Pagination {
        page: Some(-3),
        per_page: Some(1_000),
    };
    assert_eq!(p.normalize(), (1, 100, 0));

    let p = Pagination {
        page: Some(3),
        per_page: Some(10),
    };
    assert_eq!(p.normalize(), (3, 10, 20));
}

#[test]
fn huge_page_does_not_overflow_the_offset() {
    let p = Pagination {
        page: Some(i64::MAX),
        per_page: Some(100),
    };
    let (page, per_page, offset) = p.normalize();
    assert_eq!(per_page, 100);
    assert!(page > 1);
    assert!(offset >= 0);
    assert_eq!(offset, (page - 1) * per_page);
}
