//! Connector geometry for relationship lines.
//!
//! Pure computation over the table list: no DOM access, no layout system.
//! Row metrics are injected by the caller - when real measurements are not
//! available yet, [`TableMetrics::default`] applies and the caller simply
//! re-resolves once layout has settled. Resolving with defaults is never
//! an error; it only affects visual precision.

use std::cmp::Ordering;

use super::schema::{Relationship, Table};

pub const DEFAULT_HEADER_HEIGHT: f64 = 36.0;
pub const DEFAULT_ROW_HEIGHT: f64 = 32.0;
pub const DEFAULT_TABLE_WIDTH: f64 = 200.0;

/// Measured (or default) visual metrics of a rendered table box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TableMetrics {
    pub header_height: f64,
    pub row_height: f64,
    pub table_width: f64,
}

impl Default for TableMetrics {
    fn default() -> Self {
        Self {
            header_height: DEFAULT_HEADER_HEIGHT,
            row_height: DEFAULT_ROW_HEIGHT,
            table_width: DEFAULT_TABLE_WIDTH,
        }
    }
}

impl TableMetrics {
    /// Metrics built from live layout measurements.
    pub fn measured(header_height: f64, row_height: f64) -> Self {
        Self {
            header_height,
            row_height,
            ..Self::default()
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Which edge of a table box a connector attaches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Drawing primitives for one relationship line.
#[derive(Clone, Debug, PartialEq)]
pub struct Connector {
    /// Anchor on the source table's edge, at the source column's row.
    pub from: Point,
    /// Anchor on the target table's edge, at the target column's row.
    pub to: Point,
    /// Edge of the source table the line exits.
    pub from_side: Side,
    /// Edge of the target table the line enters.
    pub to_side: Side,
    /// Cubic SVG path between the anchors, control points at the
    /// horizontal midpoint.
    pub path: String,
    /// Where to draw the cardinality label.
    pub label: Point,
    /// "1:1", "1:N" or "N:M".
    pub label_text: String,
    /// Source column name, for the caption at the `from` anchor.
    pub from_column: String,
    /// Target column name, for the caption at the `to` anchor.
    pub to_column: String,
}

/// Computes the connector for one relationship against the live table
/// list. Returns `None` when either table or either column cannot be
/// resolved; the caller skips drawing that line.
pub fn resolve_connector(
    relationship: &Relationship,
    tables: &[Table],
    metrics: &TableMetrics,
) -> Option<Connector> {
    let from_table = tables.iter().find(|t| t.id == relationship.from_table_id)?;
    let to_table = tables.iter().find(|t| t.id == relationship.to_table_id)?;

    let from_index = from_table.column_index(relationship.from_column_id)?;
    let to_index = to_table.column_index(relationship.to_column_id)?;

    let from_y = row_center_y(from_table.y, from_index, metrics);
    let to_y = row_center_y(to_table.y, to_index, metrics);

    // The left table exits its right edge and enters the other's left
    // edge. Equal x coordinates break the tie by id so the routing stays
    // stable across re-renders.
    let from_is_left = match from_table.x.partial_cmp(&to_table.x) {
        Some(Ordering::Less) => true,
        Some(Ordering::Greater) => false,
        _ => from_table.id < to_table.id,
    };

    let (from_x, to_x) = if from_is_left {
        (from_table.x + metrics.table_width, to_table.x)
    } else {
        (from_table.x, to_table.x + metrics.table_width)
    };

    let mid_x = from_x + (to_x - from_x) / 2.0;
    let path = format!(
        "M {} {} C {} {}, {} {}, {} {}",
        from_x, from_y, mid_x, from_y, mid_x, to_y, to_x, to_y
    );

    Some(Connector {
        from: Point {
            x: from_x,
            y: from_y,
        },
        to: Point { x: to_x, y: to_y },
        from_side: if from_is_left { Side::Right } else { Side::Left },
        to_side: if from_is_left { Side::Left } else { Side::Right },
        path,
        label: Point {
            x: mid_x,
            y: from_y + (to_y - from_y) / 2.0 - 5.0,
        },
        label_text: relationship.relationship_type.to_string(),
        from_column: from_table.column(relationship.from_column_id)?.name.clone(),
        to_column: to_table.column(relationship.to_column_id)?.name.clone(),
    })
}

/// Vertical center of a column row: header, then `index` full rows, then
/// half a row.
fn row_center_y(table_y: f64, column_index: usize, metrics: &TableMetrics) -> f64 {
    table_y + metrics.header_height + column_index as f64 * metrics.row_height
        + metrics.row_height / 2.0
}
