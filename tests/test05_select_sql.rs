mod common;

use common::{MockDriver, adapter, registry};
use oracle_adapter::prelude::*;

#[test]
fn limit_without_offset_wraps_once() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users");
    adapter.limit(&mut query, 10, None);
    assert_eq!(
        adapter.get_select_sql(&query),
        "select * from (select * from \"users\") where rownum <= 10"
    );
}

#[test]
fn limit_with_offset_filters_row_number() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users");
    adapter.limit(&mut query, 10, Some(31));
    assert_eq!(
        adapter.get_select_sql(&query),
        "select * from (select tmp.*, rownum \"_rn\" from (select * from \"users\") tmp where rownum <= 41) where \"_rn\" > 31"
    );
}

#[test]
fn random_orders_by_dbms_random() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users").order_by("\"name\"");
    adapter.random(&mut query);
    assert_eq!(
        adapter.get_select_sql(&query),
        "select * from \"users\" order by dbms_random.value()"
    );
}

#[test]
fn random_page_keeps_order_inside_pagination() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users").where_clause("\"age\" > :param0");
    adapter.limit(adapter.random(&mut query), 5, Some(5));
    assert_eq!(
        adapter.get_select_sql(&query),
        "select * from (select tmp.*, rownum \"_rn\" from (select * from \"users\" where \"age\" > :param0 order by dbms_random.value()) tmp where rownum <= 10) where \"_rn\" > 5"
    );
}

#[test]
fn join_replaces_table_and_union_follows_pagination() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users")
        .select("\"users\".\"name\"")
        .join("\"users\" left join \"posts\" on \"posts\".\"user_id\" = \"users\".\"id\"")
        .union("select \"name\" from \"admins\"");
    adapter.limit(&mut query, 3, None);
    assert_eq!(
        adapter.get_select_sql(&query),
        "select * from (select \"users\".\"name\" from \"users\" left join \"posts\" on \"posts\".\"user_id\" = \"users\".\"id\") where rownum <= 3 union select \"name\" from \"admins\""
    );
}

#[test]
fn zero_length_means_no_limit() {
    let driver = MockDriver::new();
    let registry = registry(&driver);
    let adapter = adapter(&registry);

    let mut query = QueryDescriptor::new("users");
    adapter.limit(&mut query, 0, None);
    assert_eq!(adapter.get_select_sql(&query), "select * from \"users\"");
}
