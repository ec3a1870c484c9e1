//! Filter normalization
//!
//! Turns the optional fields of a filter bag into one `Condition`. Absent
//! fields add nothing, so an empty bag yields an empty `Condition::all()`
//! that matches every row. Building never fails: enumerated labels the code
//! table does not know are dropped.

use sea_orm::sea_query::{Expr, Func, IntoCondition, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition, Value};

use crate::shared::types::LabelCodec;

/// `LOWER(table.col) LIKE '%needle%'`, with LIKE wildcards in `needle`
/// matched literally.
pub fn contains_expr<C: ColumnTrait>(column: C, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));
    Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
        .like(LikeExpr::new(pattern).escape('\\'))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone)]
pub struct ConditionBuilder {
    condition: Condition,
}

impl Default for ConditionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionBuilder {
    pub fn new() -> Self {
        Self {
            condition: Condition::all(),
        }
    }

    pub fn add<E: IntoCondition>(mut self, expr: E) -> Self {
        self.condition = self.condition.add(expr.into_condition());
        self
    }

    /// Add the clause built from `value`, if present.
    pub fn add_opt<T, E>(self, value: Option<T>, clause: impl FnOnce(T) -> E) -> Self
    where
        E: IntoCondition,
    {
        match value {
            Some(v) => self.add(clause(v)),
            None => self,
        }
    }

    /// Case-insensitive substring match on any of `columns`.
    pub fn search<C: ColumnTrait>(self, columns: &[C], needle: Option<&str>) -> Self {
        self.add_opt(needle, |needle| {
            columns
                .iter()
                .fold(Condition::any(), |any, col| any.add(contains_expr(*col, needle)))
        })
    }

    pub fn eq<C, V>(self, column: C, value: Option<V>) -> Self
    where
        C: ColumnTrait,
        V: Into<Value>,
    {
        self.add_opt(value, |v| column.eq(v))
    }

    pub fn eq_ignore_case<C: ColumnTrait>(self, column: C, value: Option<&str>) -> Self {
        self.add_opt(value, |v| {
            Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
                .eq(v.to_lowercase())
        })
    }

    /// Equality on a coded column; labels `codec` cannot map are ignored.
    pub fn mapped<C: ColumnTrait>(self, column: C, codec: &LabelCodec, label: Option<&str>) -> Self {
        self.eq(column, label.and_then(|l| codec.code_of(l)))
    }

    /// Inclusive bounds, each optional.
    pub fn range<C, V>(self, column: C, from: Option<V>, to: Option<V>) -> Self
    where
        C: ColumnTrait,
        V: Into<Value>,
    {
        self.add_opt(from, |v| column.gte(v))
            .add_opt(to, |v| column.lte(v))
    }

    pub fn build(self) -> Condition {
        self.condition
    }
}
