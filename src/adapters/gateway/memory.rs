//! In-memory DataGateway. Same filter/order/embed semantics as the remote store.
//!
//! Backs the `--demo` mode and the use-case tests. Store-default order is
//! insertion order. Embedded resources `table(cols)` resolve through the
//! `<singular table>_id` column, e.g. `legacy_profiles(name)` via `legacy_profile_id`.

use crate::adapters::gateway::single_row;
use crate::domain::DomainError;
use crate::ports::{DataGateway, Direction, Query, Row, SelectItem};
use chrono::DateTime;
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<HashMap<String, Vec<Row>>>,
    failing: RwLock<HashSet<String>>,
    next_id: AtomicU64,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Gateway pre-filled with `(table, rows)` pairs.
    pub fn with_tables(tables: impl IntoIterator<Item = (&'static str, Vec<Row>)>) -> Self {
        let map = tables
            .into_iter()
            .map(|(name, rows)| (name.to_string(), rows))
            .collect();
        Self {
            tables: RwLock::new(map),
            ..Self::default()
        }
    }

    /// Make every request against `table` fail, as a network error would.
    pub async fn set_failing(&self, table: &str, failing: bool) {
        let mut set = self.failing.write().await;
        if failing {
            set.insert(table.to_string());
        } else {
            set.remove(table);
        }
    }

    /// Raw copy of a table, for assertions.
    pub async fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .read()
            .await
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    async fn check_failing(&self, table: &str) -> Result<(), DomainError> {
        if self.failing.read().await.contains(table) {
            return Err(DomainError::Gateway(format!(
                "simulated failure for '{}'",
                table
            )));
        }
        Ok(())
    }

    fn project(tables: &HashMap<String, Vec<Row>>, row: &Row, items: &[SelectItem]) -> Row {
        let mut out = Map::new();
        for item in items {
            match item {
                SelectItem::Column(c) if c == "*" => {
                    if let Some(obj) = row.as_object() {
                        out.extend(obj.clone());
                    }
                }
                SelectItem::Column(c) => {
                    out.insert(c.clone(), row.get(c).cloned().unwrap_or(Value::Null));
                }
                SelectItem::Embed { table, columns } => {
                    let fk = format!("{}_id", table.trim_end_matches('s'));
                    let target = row.get(&fk).and_then(|key| {
                        tables
                            .get(table)?
                            .iter()
                            .find(|r| r.get("id").map(value_text) == Some(value_text(key)))
                    });
                    let embedded = match target {
                        Some(t) => {
                            let cols: Vec<SelectItem> =
                                columns.iter().cloned().map(SelectItem::Column).collect();
                            Self::project(tables, t, &cols)
                        }
                        None => Value::Null,
                    };
                    out.insert(table.clone(), embedded);
                }
            }
        }
        Value::Object(out)
    }
}

/// Text form used for equality filters, as in `col=eq.value`.
fn value_text(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

/// Nulls sort last ascending and first descending, like Postgres.
fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => {
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                // Timestamps order by instant, whatever their offsets.
                (Ok(dx), Ok(dy)) => dx.cmp(&dy),
                _ => x.cmp(y),
            }
        }
        _ => value_text(a).cmp(&value_text(b)),
    }
}

#[async_trait::async_trait]
impl DataGateway for MemoryGateway {
    async fn select(&self, query: &Query) -> Result<Vec<Row>, DomainError> {
        self.check_failing(&query.table).await?;
        let tables = self.tables.read().await;
        let source = tables.get(&query.table).ok_or_else(|| {
            DomainError::Gateway(format!("relation '{}' does not exist", query.table))
        })?;

        let mut rows: Vec<&Row> = source
            .iter()
            .filter(|row| {
                query.filters.iter().all(|(col, want)| {
                    row.get(col).map(value_text).as_deref() == Some(want.as_str())
                })
            })
            .collect();

        if let Some(order) = &query.order {
            let null = Value::Null;
            rows.sort_by(|a, b| {
                let ord = compare_values(
                    a.get(&order.column).unwrap_or(&null),
                    b.get(&order.column).unwrap_or(&null),
                );
                match order.direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        let items = query.columns();
        debug!(table = %query.table, count = rows.len(), "memory select");
        Ok(rows
            .into_iter()
            .map(|row| Self::project(&tables, row, &items))
            .collect())
    }

    async fn select_single(&self, query: &Query) -> Result<Row, DomainError> {
        let rows = self.select(query).await?;
        single_row(&query.table, rows)
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), DomainError> {
        self.check_failing(table).await?;
        let mut tables = self.tables.write().await;
        let target = tables.entry(table.to_string()).or_default();
        for row in rows {
            let Value::Object(mut obj) = row else {
                return Err(DomainError::Validation(format!(
                    "insert into '{}' expects JSON objects",
                    table
                )));
            };
            // Column defaults the remote schema provides.
            obj.entry("id").or_insert_with(|| {
                let n = self.next_id.fetch_add(1, AtomicOrdering::Relaxed) + 1;
                Value::String(format!("{}-{}", table, n))
            });
            obj.entry("created_at")
                .or_insert_with(|| Value::String(chrono::Utc::now().to_rfc3339()));
            target.push(Value::Object(obj));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn gateway() -> MemoryGateway {
        MemoryGateway::with_tables([
            (
                "legacy_profiles",
                vec![
                    json!({"id": "p1", "name": "Ada", "tenure_start": "1990-01-01"}),
                    json!({"id": "p2", "name": "Bo", "tenure_start": "1980-01-01"}),
                ],
            ),
            (
                "forum_posts",
                vec![
                    json!({"id": "f1", "title": "old", "created_at": "2024-01-01T00:00:00+00:00", "legacy_profile_id": "p1"}),
                    json!({"id": "f2", "title": "new", "created_at": "2024-02-01T00:00:00+00:00", "legacy_profile_id": "p2"}),
                ],
            ),
        ])
    }

    #[tokio::test]
    async fn test_select_orders_and_embeds() {
        let gw = gateway();
        let q = Query::table("forum_posts")
            .select("*, legacy_profiles(name)")
            .order("created_at", Direction::Descending);
        let rows = gw.select(&q).await.unwrap();
        assert_eq!(rows[0]["id"], "f2");
        assert_eq!(rows[0]["legacy_profiles"], json!({"name": "Bo"}));
        assert_eq!(rows[1]["legacy_profiles"]["name"], "Ada");
    }

    #[tokio::test]
    async fn test_timestamps_with_mixed_offsets_order_by_instant() {
        let gw = MemoryGateway::with_tables([(
            "forum_posts",
            vec![
                // 05:00Z
                json!({"id": "a", "created_at": "2024-01-01T10:00:00+05:00"}),
                // 06:00Z
                json!({"id": "b", "created_at": "2024-01-01T06:00:00+00:00"}),
            ],
        )]);
        let q = Query::table("forum_posts").order("created_at", Direction::Descending);
        let ids: Vec<Value> = gw
            .select(&q)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r["id"].clone())
            .collect();
        assert_eq!(ids, vec![json!("b"), json!("a")]);
    }

    #[tokio::test]
    async fn test_select_single_rejects_zero_and_many() {
        let gw = gateway();
        let none = gw
            .select_single(&Query::table("legacy_profiles").eq("id", "nope"))
            .await;
        assert!(matches!(none, Err(DomainError::NotSingle { found: 0, .. })));

        let many = gw.select_single(&Query::table("legacy_profiles")).await;
        assert!(matches!(many, Err(DomainError::NotSingle { found: 2, .. })));
    }

    #[tokio::test]
    async fn test_insert_fills_id_and_timestamp() {
        let gw = gateway();
        gw.insert("forum_posts", vec![json!({"title": "x", "legacy_profile_id": "p1"})])
            .await
            .unwrap();
        let rows = gw.rows("forum_posts").await;
        let last = rows.last().unwrap();
        assert!(last["id"].as_str().unwrap().starts_with("forum_posts-"));
        assert!(last["created_at"].is_string());
    }

    #[tokio::test]
    async fn test_failing_table_errors() {
        let gw = gateway();
        gw.set_failing("legacy_profiles", true).await;
        assert!(gw.select(&Query::table("legacy_profiles")).await.is_err());
        gw.set_failing("legacy_profiles", false).await;
        assert_eq!(gw.select(&Query::table("legacy_profiles")).await.unwrap().len(), 2);
    }
}
