use super::*;
use crate::ast::{DeleteStatement, Expr, InsertStatement, JoinKind, SelectQuery, UpdateStatement};
use crate::value::Value;

fn format(statement: impl Into<Statement>) -> SqlResult<FormattedSql> {
    format_statement(
        &GenericFormatter,
        &statement.into(),
        FormatOptions::default(),
    )
}

fn format_beautified(statement: impl Into<Statement>) -> FormattedSql {
    format_statement(
        &GenericFormatter,
        &statement.into(),
        FormatOptions::beautified(),
    )
    .unwrap()
}

/// Collapse every whitespace run to a single space.
fn collapse_whitespace(sql: &str) -> String {
    sql.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[test]
fn select_all() {
    let out = format(SelectQuery::from("t_employee")).unwrap();
    assert_eq!(out.sql, "select * from t_employee");
    assert!(out.params.is_empty());
}

#[test]
fn select_with_filter_binds_one_param() {
    let query = SelectQuery::from("t_employee").filter(Expr::column("salary").gt(5000));
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select * from t_employee where salary > ?");
    assert_eq!(out.params, vec![Value::Int(5000)]);
}

#[test]
fn select_projection_and_aliases() {
    let query = SelectQuery::from(TableRef::new("t_employee").alias("e"))
        .item(Expr::qualified("e", "name"))
        .item_as(Expr::column("salary"), "pay");
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select e.name, salary as pay from t_employee e");
}

#[test]
fn select_distinct() {
    let query = SelectQuery::from("t_employee")
        .distinct()
        .item(Expr::column("department_id"));
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select distinct department_id from t_employee");
}

#[test]
fn select_with_join() {
    let query = SelectQuery::from("t_employee").join(
        JoinKind::Left,
        "t_department",
        Expr::qualified("t_employee", "department_id").eq(Expr::qualified("t_department", "id")),
    );
    let out = format(query).unwrap();
    assert_eq!(
        out.sql,
        "select * from t_employee \
         left join t_department on t_employee.department_id = t_department.id"
    );
    assert!(out.params.is_empty());
}

#[test]
fn select_group_having_order() {
    let query = SelectQuery::from("t_employee")
        .item(Expr::column("department_id"))
        .item(Expr::function("count", vec![Expr::column("id")]))
        .group_by(Expr::column("department_id"))
        .having(Expr::function("count", vec![Expr::column("id")]).gt(3))
        .order_by(Expr::column("department_id").desc());
    let out = format(query).unwrap();
    assert_eq!(
        out.sql,
        "select department_id, count(id) from t_employee \
         group by department_id having count(id) > ? order by department_id desc"
    );
    assert_eq!(out.params, vec![Value::Int(3)]);
}

#[test]
fn clause_order_is_fixed_regardless_of_construction_order() {
    // Fields set in reverse clause order still format in standard order.
    let mut query = SelectQuery::default();
    query.order_by.push(Expr::column("salary").desc());
    query.having = Some(Expr::function("count", vec![Expr::column("id")]).gt(1));
    query.group_by.push(Expr::column("salary"));
    query.filter = Some(Expr::column("active").eq(true));
    query.from = Some("t_employee".into());
    let out = format(query).unwrap();
    assert_eq!(
        out.sql,
        "select * from t_employee where active = ? \
         group by salary having count(id) > ? order by salary desc"
    );
}

#[test]
fn subquery_in_from() {
    let inner = SelectQuery::from("t_employee").item(Expr::column("name"));
    let query = SelectQuery::from_source(TableSource::Subquery {
        query: Box::new(inner),
        alias: "t".into(),
    });
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select * from (select name from t_employee) t");
}

#[test]
fn scalar_subquery_in_filter() {
    let inner = SelectQuery::from("t_department").item(Expr::column("id"));
    let query =
        SelectQuery::from("t_employee").filter(Expr::column("department_id").in_list(vec![
            Expr::value(1),
            Expr::value(2),
        ]).and(Expr::column("id").eq(Expr::subquery(inner))));
    let out = format(query).unwrap();
    assert_eq!(
        out.sql,
        "select * from t_employee where department_id in (?, ?) \
         and id = (select id from t_department)"
    );
    assert_eq!(out.params, vec![Value::Int(1), Value::Int(2)]);
}

#[test]
fn insert_statement() {
    let insert = InsertStatement::new("t_employee")
        .set("name", "tom")
        .set("salary", 5000i64);
    let out = format(insert).unwrap();
    assert_eq!(
        out.sql,
        "insert into t_employee (name, salary) values (?, ?)"
    );
    assert_eq!(
        out.params,
        vec![Value::Text("tom".into()), Value::BigInt(5000)]
    );
}

#[test]
fn update_statement() {
    let update = UpdateStatement::new("t_employee")
        .set("salary", 6000i64)
        .filter(Expr::column("id").eq(1));
    let out = format(update).unwrap();
    assert_eq!(out.sql, "update t_employee set salary = ? where id = ?");
    assert_eq!(out.params, vec![Value::BigInt(6000), Value::Int(1)]);
}

#[test]
fn delete_statement() {
    let delete = DeleteStatement::new("t_employee").filter(Expr::column("id").eq(1));
    let out = format(delete).unwrap();
    assert_eq!(out.sql, "delete from t_employee where id = ?");
    assert_eq!(out.params, vec![Value::Int(1)]);
}

#[test]
fn precedence_parenthesizes_looser_operands() {
    let condition = Expr::column("a")
        .eq(1)
        .or(Expr::column("b").eq(2))
        .and(Expr::column("c").eq(3));
    let out = format(SelectQuery::from("t").filter(condition)).unwrap();
    assert_eq!(
        out.sql,
        "select * from t where (a = ? or b = ?) and c = ?"
    );
    assert_eq!(
        out.params,
        vec![Value::Int(1), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn precedence_arithmetic() {
    let expr = Expr::column("salary").add(Expr::column("bonus")).mul(2);
    let out = format(SelectQuery::from("t_employee").item(expr)).unwrap();
    assert_eq!(out.sql, "select (salary + bonus) * ? from t_employee");
}

#[test]
fn not_wraps_binary_operand() {
    let out = format(SelectQuery::from("t").filter(Expr::column("banned").eq(true).not()))
        .unwrap();
    assert_eq!(out.sql, "select * from t where not (banned = ?)");
}

#[test]
fn double_negation_never_forms_a_line_comment() {
    let query = SelectQuery::from("t_employee").item(Expr::column("salary").neg().neg());
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select -(-salary) from t_employee");
    assert!(!out.sql.contains("--"));
}

#[test]
fn nested_not_wraps_inner_not() {
    let out = format(SelectQuery::from("t").filter(Expr::column("active").not().not())).unwrap();
    assert_eq!(out.sql, "select * from t where not (not active)");
}

#[test]
fn null_checks_and_between() {
    let condition = Expr::column("deleted_at")
        .is_null()
        .and(Expr::column("age").between(18, 65));
    let out = format(SelectQuery::from("t_user").filter(condition)).unwrap();
    assert_eq!(
        out.sql,
        "select * from t_user where deleted_at is null and age between ? and ?"
    );
    assert_eq!(out.params, vec![Value::Int(18), Value::Int(65)]);
}

#[test]
fn params_preserve_emission_order_across_clauses() {
    let query = SelectQuery::from("t_employee")
        .item(Expr::column("salary").add(100))
        .filter(Expr::column("status").eq("active"))
        .having(Expr::function("count", vec![Expr::column("id")]).gt(7))
        .group_by(Expr::column("salary"));
    let out = format(query).unwrap();
    let placeholders = out.sql.matches('?').count();
    assert_eq!(placeholders, out.params.len());
    assert_eq!(
        out.params,
        vec![
            Value::Int(100),
            Value::Text("active".into()),
            Value::Int(7)
        ]
    );
}

#[test]
fn formatting_is_deterministic() {
    let query = SelectQuery::from("t_employee")
        .item(Expr::column("name"))
        .filter(Expr::column("salary").gt(5000).and(Expr::column("active").eq(true)))
        .order_by(Expr::column("salary").desc());
    let statement = Statement::from(query);
    let first = format_statement(&GenericFormatter, &statement, FormatOptions::default()).unwrap();
    let second = format_statement(&GenericFormatter, &statement, FormatOptions::default()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn beautify_changes_only_whitespace() {
    let query = SelectQuery::from("t_employee")
        .item(Expr::column("name"))
        .filter(Expr::column("salary").gt(5000))
        .order_by(Expr::column("salary").desc());
    let statement = Statement::from(query);
    let plain = format_statement(&GenericFormatter, &statement, FormatOptions::default()).unwrap();
    let pretty = format_beautified(statement);
    assert_eq!(collapse_whitespace(&pretty.sql), plain.sql);
    assert_eq!(pretty.params, plain.params);
}

#[test]
fn beautified_select_layout() {
    let query = SelectQuery::from("t_employee").filter(Expr::column("salary").gt(5000));
    let pretty = format_beautified(query);
    assert_eq!(
        pretty.sql,
        "select *\nfrom t_employee\nwhere salary > ?"
    );
}

#[test]
fn beautified_subquery_indents_nested_clauses() {
    let inner = SelectQuery::from("t_employee")
        .item(Expr::column("name"))
        .filter(Expr::column("active").eq(true));
    let query = SelectQuery::from_source(TableSource::Subquery {
        query: Box::new(inner),
        alias: "t".into(),
    });
    let pretty = format_beautified(query);
    assert_eq!(
        pretty.sql,
        "select *\nfrom (select name\n  from t_employee\n  where active = ?) t"
    );
}

#[test]
fn generic_dialect_has_no_pagination() {
    let err = format(SelectQuery::from("t_employee").limit(10)).unwrap_err();
    assert!(err.is_unsupported());
    match err {
        SqlError::Unsupported { feature, dialect } => {
            assert_eq!(dialect, "generic");
            assert!(feature.contains("limit/offset"));
        }
        other => panic!("expected Unsupported, got {other:?}"),
    }
}

#[test]
fn insert_without_assignments_is_malformed() {
    let err = format(InsertStatement::new("t_employee")).unwrap_err();
    assert!(err.is_malformed_tree());
}

#[test]
fn update_without_assignments_is_malformed() {
    let err = format(UpdateStatement::new("t_employee").filter(Expr::column("id").eq(1)))
        .unwrap_err();
    assert!(err.is_malformed_tree());
}

#[test]
fn empty_in_list_is_malformed() {
    let err = format(SelectQuery::from("t").filter(Expr::column("id").in_list(vec![])))
        .unwrap_err();
    assert!(err.is_malformed_tree());
}

#[test]
fn empty_function_name_is_malformed() {
    let err = format(SelectQuery::from("t").item(Expr::function("", vec![]))).unwrap_err();
    assert!(err.is_malformed_tree());
}

#[test]
fn schema_qualified_table() {
    let query = SelectQuery::from(TableRef::new("t_employee").schema("hr"));
    let out = format(query).unwrap();
    assert_eq!(out.sql, "select * from hr.t_employee");
}
