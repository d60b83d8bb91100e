//! Integration tests for compiled statement text.

mod common;

use common::{delete, insert, precompiler, select, update};
use forge_sql_core::{Builder, Expression, Operand, OperatorGroup, Precompiler, Value};

#[test]
fn test_clause_order() {
    let mut s = select();
    s.distinct(true)
        .column("p.team", None)
        .unwrap()
        .column(Expression::new("COUNT(*)"), Some("members"))
        .unwrap()
        .from("people", Some("p"))
        .unwrap()
        .join("teams", Some("t"), Some("inner"))
        .unwrap()
        .on("t.name", "=", "p.team")
        .unwrap()
        .where_clause("p.age", ">=", 18, "AND")
        .unwrap()
        .group_by("p.team")
        .unwrap()
        .having(Expression::new("COUNT(*)"), ">", 1, "AND")
        .unwrap()
        .order_by("p.team", "ASC", "")
        .unwrap()
        .page(5, 10);

    assert_eq!(
        s.statement(true).unwrap(),
        "SELECT DISTINCT \"p\".\"team\", (COUNT(*)) AS \"members\" \
         FROM \"people\" AS \"p\" \
         INNER JOIN \"teams\" AS \"t\" ON \"t\".\"name\" = \"p\".\"team\" \
         WHERE \"p\".\"age\" >= 18 \
         GROUP BY \"p\".\"team\" \
         HAVING (COUNT(*)) > 1 \
         ORDER BY \"p\".\"team\" ASC \
         LIMIT 10 OFFSET 5;"
    );
}

#[test]
fn test_expression_parameters_in_where() {
    let mut s = select();
    s.from("events", None)
        .unwrap()
        .where_clause(
            "created",
            ">",
            Expression::new("DATE :day - INTERVAL 1 DAY").param("day", "2024-03-01"),
            "AND",
        )
        .unwrap();
    assert_eq!(
        s.statement(false).unwrap(),
        "SELECT * FROM \"events\" WHERE \"created\" > DATE '2024-03-01' - INTERVAL 1 DAY"
    );
}

#[test]
fn test_literal_subselect_identifier() {
    let mut s = select();
    s.from("SELECT id FROM people;", Some("sub")).unwrap();
    assert_eq!(
        s.statement(false).unwrap(),
        "SELECT * FROM (SELECT id FROM people) AS \"sub\""
    );
}

#[test]
fn test_invalid_arguments_echo_token() {
    let p = precompiler();
    let err = p
        .prepare_operator("frobnicate", OperatorGroup::Comparison)
        .unwrap_err();
    assert!(err.to_string().contains("frobnicate"));
    let err = p
        .prepare_identifier(&Operand::Value(Value::Double(1.0)))
        .unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_reset_matches_fresh_builders() {
    let mut reused = update();
    reused
        .table("a", None)
        .unwrap()
        .set("x", 1)
        .unwrap()
        .where_clause("y", "=", 2, "AND")
        .unwrap();
    let _ = reused.command(true).unwrap();
    reused.reset().table("b", None).unwrap().set("z", 3).unwrap();

    let mut fresh = update();
    fresh.table("b", None).unwrap().set("z", 3).unwrap();
    assert_eq!(reused.command(true).unwrap(), fresh.command(true).unwrap());

    let mut reused = insert();
    reused.table("a").unwrap().row([("x", 1)]).unwrap();
    reused.reset().table("b").unwrap().column("y", 2).unwrap();
    let mut fresh = insert();
    fresh.table("b").unwrap().column("y", 2).unwrap();
    assert_eq!(reused.statement(false).unwrap(), fresh.statement(false).unwrap());

    let mut reused = delete();
    reused.from("a").unwrap().where_clause("x", "=", 1, "OR").unwrap();
    reused.reset().from("b").unwrap();
    let mut fresh = delete();
    fresh.from("b").unwrap();
    assert_eq!(reused.statement(false).unwrap(), fresh.statement(false).unwrap());
}

#[test]
fn test_select_as_subquery_value() {
    let mut adults = select();
    adults
        .column("id", None)
        .unwrap()
        .from("people", None)
        .unwrap()
        .where_clause("age", ">=", 18, "AND")
        .unwrap();

    let mut d = delete();
    d.from("sessions")
        .unwrap()
        .where_clause("person_id", "NOT IN", &adults, "AND")
        .unwrap();
    assert_eq!(
        d.statement(false).unwrap(),
        "DELETE FROM \"sessions\" WHERE \"person_id\" NOT IN \
         (SELECT \"id\" FROM \"people\" WHERE \"age\" >= 18)"
    );
}
