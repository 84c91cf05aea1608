//! SQL text for row-level statements.
//!
//! Identifiers are double-quoted; parameters are numbered `$1..$n` in the
//! order their values are bound.

pub(crate) fn quote(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

pub(crate) fn column_list(columns: &[&str]) -> String {
    columns.iter().map(|c| quote(c)).collect::<Vec<_>>().join(",")
}

/// `$start,$start+1,...` for `count` parameters.
pub(crate) fn placeholders(start: usize, count: usize) -> String {
    (start..start + count)
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// `"a"=$start AND "b"=$start+1`
pub(crate) fn where_clause(columns: &[&str], start: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}=${}", quote(c), start + i))
        .collect::<Vec<_>>()
        .join(" AND ")
}

/// `("a","b") IN (($start,$start+1),...)` for `rows` tuples.
pub(crate) fn where_in_clause(columns: &[&str], start: usize, rows: usize) -> String {
    let width = columns.len();
    let tuples = (0..rows)
        .map(|r| format!("({})", placeholders(start + r * width, width)))
        .collect::<Vec<_>>()
        .join(",");
    format!("({}) IN ({})", column_list(columns), tuples)
}

fn set_clause(columns: &[&str], start: usize) -> String {
    columns
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}=${}", quote(c), start + i))
        .collect::<Vec<_>>()
        .join(",")
}

fn returning_clause(returning: &[&str]) -> String {
    if returning.is_empty() {
        String::new()
    } else {
        format!(" RETURNING {}", column_list(returning))
    }
}

fn insert_head(table: &str, columns: &[&str]) -> String {
    if columns.is_empty() {
        format!("INSERT INTO {} DEFAULT VALUES", quote(table))
    } else {
        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            quote(table),
            column_list(columns),
            placeholders(1, columns.len())
        )
    }
}

pub(crate) fn insert(table: &str, columns: &[&str], returning: &[&str]) -> String {
    format!("{}{}", insert_head(table, columns), returning_clause(returning))
}

pub(crate) fn update(table: &str, set: &[&str], primary_key: &[&str]) -> String {
    format!(
        "UPDATE {} SET {} WHERE {}",
        quote(table),
        set_clause(set, 1),
        where_clause(primary_key, set.len() + 1)
    )
}

pub(crate) fn upsert(
    table: &str,
    update_on_conflict: bool,
    insert: &[&str],
    update: &[&str],
    conflict: &[&str],
    returning: &[&str],
) -> String {
    let mut sql = insert_head(table, insert);
    if !update_on_conflict || update.is_empty() {
        sql.push_str(" ON CONFLICT DO NOTHING");
    } else {
        let sets = update
            .iter()
            .map(|c| format!("{} = EXCLUDED.{}", quote(c), quote(c)))
            .collect::<Vec<_>>()
            .join(",");
        sql.push_str(&format!(
            " ON CONFLICT ({}) DO UPDATE SET {}",
            column_list(conflict),
            sets
        ));
    }
    sql.push_str(&returning_clause(returning));
    sql
}

pub(crate) fn delete(table: &str, primary_key: &[&str]) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        quote(table),
        where_clause(primary_key, 1)
    )
}

pub(crate) fn delete_in(table: &str, primary_key: &[&str], rows: usize) -> String {
    format!(
        "DELETE FROM {} WHERE {}",
        quote(table),
        where_in_clause(primary_key, 1, rows)
    )
}

pub(crate) fn update_in(table: &str, set: &[&str], primary_key: &[&str], rows: usize) -> String {
    format!(
        "UPDATE {} SET {} WHERE {}",
        quote(table),
        set_clause(set, 1),
        where_in_clause(primary_key, set.len() + 1, rows)
    )
}

pub(crate) fn select_in(
    table: &str,
    columns: &[&str],
    primary_key: &[&str],
    rows: usize,
) -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        column_list(columns),
        quote(table),
        where_in_clause(primary_key, 1, rows)
    )
}

pub(crate) fn find(table: &str, columns: &[&str], primary_key: &[&str]) -> String {
    format!(
        "SELECT {} FROM {} WHERE {}",
        column_list(columns),
        quote(table),
        where_clause(primary_key, 1)
    )
}

pub(crate) fn exists(table: &str, primary_key: &[&str]) -> String {
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE {} LIMIT 1)",
        quote(table),
        where_clause(primary_key, 1)
    )
}

/// Rows of `table` joined through `join_table`, with the join's local key appended.
pub(crate) fn select_through(
    table: &str,
    columns: &[&str],
    foreign_column: &str,
    join_table: &str,
    join_foreign: &str,
    join_local: &str,
    keys: usize,
) -> String {
    let selected = columns
        .iter()
        .map(|c| format!("\"a\".{}", quote(c)))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "SELECT {selected},\"b\".{} FROM {} AS \"a\" INNER JOIN {} AS \"b\" ON \"a\".{}=\"b\".{} WHERE \"b\".{} IN ({})",
        quote(join_local),
        quote(table),
        quote(join_table),
        quote(foreign_column),
        quote(join_foreign),
        quote(join_local),
        placeholders(1, keys)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_in_composite() {
        assert_eq!(
            where_in_clause(&["source_id", "language"], 1, 2),
            r#"("source_id","language") IN (($1,$2),($3,$4))"#
        );
    }

    #[test]
    fn test_insert_default_values() {
        assert_eq!(
            insert("operation_types", &[], &["id"]),
            r#"INSERT INTO "operation_types" DEFAULT VALUES RETURNING "id""#
        );
    }

    #[test]
    fn test_upsert_without_update_columns_does_nothing() {
        assert_eq!(
            upsert(
                "authors_sources",
                true,
                &["author_id", "source_id"],
                &[],
                &["author_id", "source_id"],
                &[]
            ),
            r#"INSERT INTO "authors_sources" ("author_id","source_id") VALUES ($1,$2) ON CONFLICT DO NOTHING"#
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("type"), r#""type""#);
        assert_eq!(quote(r#"we"ird"#), r#""we""ird""#);
    }
}
