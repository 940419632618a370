//! Table-scoped query description passed to the data gateway.
//!
//! Mirrors the subset of PostgREST we use: column selection with embedded
//! resources, equality filters and a single ordering column.

/// Sort direction for `Query::order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub direction: Direction,
}

/// Read query against one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub select: String,
    pub filters: Vec<(String, String)>,
    pub order: Option<Order>,
}

impl Query {
    /// `select *` on `table`, no filters, store-default order.
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            select: "*".to_string(),
            filters: Vec::new(),
            order: None,
        }
    }

    pub fn select(mut self, columns: impl Into<String>) -> Self {
        self.select = columns.into();
        self
    }

    pub fn eq(mut self, column: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((column.into(), value.into()));
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(Order {
            column: column.into(),
            direction,
        });
        self
    }

    /// Select list split into plain columns and embedded resources.
    pub fn columns(&self) -> Vec<SelectItem> {
        split_top_level(&self.select)
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|item| match item.find('(') {
                Some(open) if item.ends_with(')') => SelectItem::Embed {
                    table: item[..open].trim().to_string(),
                    columns: item[open + 1..item.len() - 1]
                        .split(',')
                        .map(|c| c.trim().to_string())
                        .filter(|c| !c.is_empty())
                        .collect(),
                },
                _ => SelectItem::Column(item),
            })
            .collect()
    }

    /// URL query parameters in PostgREST syntax.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let select: String = self.select.chars().filter(|c| !c.is_whitespace()).collect();
        let mut params = vec![("select".to_string(), select)];
        for (column, value) in &self.filters {
            params.push((column.clone(), format!("eq.{}", value)));
        }
        if let Some(order) = &self.order {
            params.push((
                "order".to_string(),
                format!("{}.{}", order.column, order.direction.as_str()),
            ));
        }
        params
    }
}

/// One entry of a select list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    /// `*` or a column name.
    Column(String),
    /// `table(col, ...)`.
    Embed { table: String, columns: Vec<String> },
}

fn split_top_level(select: &str) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();
    for ch in select.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => items.push(std::mem::take(&mut current).trim().to_string()),
            _ => current.push(ch),
        }
    }
    items.push(current.trim().to_string());
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_use_postgrest_operators() {
        let q = Query::table("forum_posts")
            .select("*, legacy_profiles(name)")
            .eq("legacy_profile_id", "p1")
            .order("created_at", Direction::Descending);

        assert_eq!(
            q.to_params(),
            vec![
                ("select".to_string(), "*,legacy_profiles(name)".to_string()),
                ("legacy_profile_id".to_string(), "eq.p1".to_string()),
                ("order".to_string(), "created_at.desc".to_string()),
            ]
        );
    }

    #[test]
    fn test_columns_split_embeds() {
        let q = Query::table("blogs").select("*, legacy_profiles(name, id)");
        assert_eq!(
            q.columns(),
            vec![
                SelectItem::Column("*".into()),
                SelectItem::Embed {
                    table: "legacy_profiles".into(),
                    columns: vec!["name".into(), "id".into()],
                },
            ]
        );
    }
}
