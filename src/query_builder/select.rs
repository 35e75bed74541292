use std::sync::LazyLock;

use regex::Regex;

use super::{Limit, QueryDescriptor};
use crate::dialect::backquote;
use crate::results::ROW_NUMBER_COLUMN;

static COUNT_DISTINCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)count\(distinct\s\S+\)").expect("valid count regex"));

/// Assemble the final select statement, emulating limit/offset with `rownum`.
///
/// `rownum` can only be bounded from above where it is produced, so an offset needs the
/// row number materialized in an inner query and filtered in an outer one. Pagination is
/// only stable when the query carries a deterministic `order by`.
#[must_use]
pub fn build_select_statement(query: &QueryDescriptor) -> String {
    let distinct = if query.distinct && !COUNT_DISTINCT.is_match(&query.selects) {
        "distinct "
    } else {
        ""
    };

    let mut sql = format!("select {distinct}{} from ", query.selects);
    if query.join.is_empty() {
        sql.push_str(&backquote(&query.table));
    } else {
        sql.push_str(&query.join);
    }
    push_clause(&mut sql, "where", &query.where_clause);
    push_clause(&mut sql, "order by", &query.order_by);
    push_clause(&mut sql, "group by", &query.group_by);
    push_clause(&mut sql, "having", &query.having);

    match query.limit {
        Some(Limit::Rows(length)) if length > 0 => {
            sql = format!("select * from ({sql}) where rownum <= {length}");
        }
        Some(Limit::Page { offset, length }) => {
            let rn = ROW_NUMBER_COLUMN;
            let upper = offset.saturating_add(length);
            sql = format!(
                "select * from (select tmp.*, rownum \"{rn}\" from ({sql}) tmp where rownum <= {upper}) where \"{rn}\" > {offset}"
            );
        }
        _ => {}
    }

    push_clause(&mut sql, "union", &query.union);
    sql
}

fn push_clause(sql: &mut String, keyword: &str, fragment: &str) {
    if !fragment.is_empty() {
        sql.push(' ');
        sql.push_str(keyword);
        sql.push(' ');
        sql.push_str(fragment);
    }
}
