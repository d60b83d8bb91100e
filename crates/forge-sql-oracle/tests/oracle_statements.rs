//! Statement text rendered for Oracle.

mod common;

use common::{apply_rownum_filter, delete, insert, select, update};
use forge_sql_core::{Builder, DataSourceConfig, Value};

fn inner_select() -> String {
    let mut s = select();
    s.column("id", None)
        .unwrap()
        .from("emp", None)
        .unwrap()
        .order_by("id", "ASC", "")
        .unwrap();
    s.statement(false).unwrap()
}

#[test]
fn test_pagination_matches_limit_offset() {
    let rows: Vec<u32> = (1..=57).collect();
    for (limit, offset) in [(10_usize, 20_usize), (10, 0), (0, 20), (1, 56), (5, 55), (30, 40), (3, 100)] {
        let mut s = select();
        s.column("id", None)
            .unwrap()
            .from("emp", None)
            .unwrap()
            .order_by("id", "ASC", "")
            .unwrap()
            .page(i64::try_from(offset).unwrap(), i64::try_from(limit).unwrap());
        let sql = s.statement(false).unwrap();

        let take = if limit == 0 { usize::MAX } else { limit };
        let expected: Vec<u32> = rows.iter().copied().skip(offset).take(take).collect();
        assert_eq!(
            apply_rownum_filter(&sql, &rows),
            expected,
            "LIMIT {limit} OFFSET {offset} differs for: {sql}"
        );
    }
}

#[test]
fn test_pagination_wraps_whole_statement() {
    let mut s = select();
    s.column("id", None)
        .unwrap()
        .from("emp", None)
        .unwrap()
        .order_by("id", "ASC", "")
        .unwrap()
        .page(20, 10);

    assert_eq!(
        s.statement(true).unwrap(),
        format!(
            "SELECT * FROM (SELECT \"t0\".*, ROWNUM - 1 AS \"__row\" FROM ({}) \"t0\") \
             WHERE \"__row\" BETWEEN 20 AND 29;",
            inner_select()
        )
    );
}

#[test]
fn test_aliases_and_minus() {
    let mut archived = select();
    archived.column("a.empno", None).unwrap().from("emp_archive", Some("a")).unwrap();

    let mut s = select();
    s.column("e.empno", None)
        .unwrap()
        .from("emp", Some("e"))
        .unwrap()
        .join("dept", Some("d"), Some("full outer"))
        .unwrap()
        .on("d.deptno", "=", "e.deptno")
        .unwrap()
        .combine("except", &archived)
        .unwrap();

    assert_eq!(
        s.statement(false).unwrap(),
        "SELECT \"e\".\"empno\" FROM \"emp\" \"e\" \
         FULL OUTER JOIN \"dept\" \"d\" ON \"d\".\"deptno\" = \"e\".\"deptno\" \
         MINUS SELECT \"a\".\"empno\" FROM \"emp_archive\" \"a\""
    );
}

#[test]
fn test_multi_row_insert() {
    let mut i = insert();
    i.table("tokens")
        .unwrap()
        .row([("id", Value::Int(1)), ("hash", Value::Bytes(vec![0x0A, 0xFF]))])
        .unwrap()
        .row([("id", Value::Int(2))])
        .unwrap();

    assert_eq!(
        i.statement(false).unwrap(),
        "INSERT ALL INTO \"tokens\" (\"id\", \"hash\") VALUES (1, HEXTORAW('0AFF')) \
         INTO \"tokens\" (\"id\", \"hash\") VALUES (2, NULL) SELECT * FROM dual"
    );
}

#[test]
fn test_update_with_alias() {
    let mut u = update();
    u.table("emp", Some("e"))
        .unwrap()
        .set("e.sal", 1250.5)
        .unwrap()
        .where_clause("e.deptno", "IN", [10, 20], "AND")
        .unwrap();

    assert_eq!(
        u.statement(false).unwrap(),
        "UPDATE \"emp\" \"e\" SET \"e\".\"sal\" = 1250.500000 WHERE \"e\".\"deptno\" IN (10, 20)"
    );
}

#[test]
fn test_mutation_limits_rejected() {
    assert!(update().limit(1).unwrap_err().is_invalid_argument());
    assert!(delete().order_by("id", "ASC", "").unwrap_err().is_invalid_argument());
}

#[test]
fn test_dialect_specific_operators_rejected() {
    let mut s = select();
    assert!(s.where_clause("ename", "REGEXP", "^A", "AND").is_err());
    assert!(s.join("dept", None, Some("straight")).is_err());
}

#[test]
fn test_hash_is_not_a_comment() {
    let source = forge_sql_oracle::data_source(DataSourceConfig::new("oracle")).unwrap();
    let sql = "SELECT 1 FROM dual # no comment";
    let tokens = source.tokenizer(sql).tokenize();
    let rebuilt: String = tokens.iter().map(|t| t.lexeme.as_str()).collect();
    assert_eq!(rebuilt, sql);
    assert!(tokens.iter().any(|t| t.lexeme == "comment"));
}

#[test]
fn test_insert_without_columns_rejected() {
    let mut i = insert();
    i.table("audit").unwrap();
    assert!(i.statement(false).unwrap_err().is_invalid_argument());
}
