//! Entity types for the schema diagram graph.
//!
//! The serde shapes here define the on-disk project format: camelCase
//! keys, `type` for the column and relationship type fields, optional
//! fields omitted when absent.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SQL-like type names offered by column editors. Advisory only: the
/// `data_type` field itself accepts any string.
pub const COLUMN_TYPES: [&str; 12] = [
    "VARCHAR",
    "INT",
    "BIGINT",
    "DECIMAL",
    "FLOAT",
    "DOUBLE",
    "BOOLEAN",
    "DATE",
    "DATETIME",
    "TIMESTAMP",
    "TEXT",
    "BLOB",
];

/// Reference from a column to the table/column it points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKeyRef {
    pub table_id: Uuid,
    pub column_id: Uuid,
}

/// A column owned by exactly one [`Table`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl Column {
    /// Materializes a template as a column with a fresh identity.
    pub fn from_spec(spec: &ColumnSpec) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: spec.name.clone(),
            data_type: spec.data_type.clone(),
            nullable: spec.nullable,
            primary_key: spec.primary_key,
            foreign_key: spec.foreign_key,
        }
    }
}

/// Identity-less column template: the `addColumn` payload and the element
/// type of a [`BaseTable`]'s column list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

impl ColumnSpec {
    /// New nullable, non-key column template.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            nullable: true,
            primary_key: false,
            foreign_key: None,
        }
    }

    /// Marks the column as part of the primary key. Implies NOT NULL.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Points the column at another table's column.
    pub fn references(mut self, table_id: Uuid, column_id: Uuid) -> Self {
        self.foreign_key = Some(ForeignKeyRef {
            table_id,
            column_id,
        });
        self
    }
}

/// A table on the canvas: name, position and an ordered column list.
/// Column order is meaningful - it drives display order and the row index
/// used by connector geometry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: Uuid,
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn column(&self, column_id: Uuid) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == column_id)
    }

    /// Position of the column in display order.
    pub fn column_index(&self, column_id: Uuid) -> Option<usize> {
        self.columns.iter().position(|c| c.id == column_id)
    }
}

/// Reusable column template. Only a stamp for creating new tables:
/// instantiated copies get fresh column ids and keep no back-reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTable {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub columns: Vec<ColumnSpec>,
}

/// Cardinality of a relationship.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelationshipType {
    OneToOne,
    OneToMany,
    ManyToMany,
}

impl std::fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipType::OneToOne => write!(f, "1:1"),
            RelationshipType::OneToMany => write!(f, "1:N"),
            RelationshipType::ManyToMany => write!(f, "N:M"),
        }
    }
}

/// A typed directed link between a source column and a target column.
/// Owned by the [`Schema`]; removed whenever either endpoint disappears.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: Uuid,
    pub from_table_id: Uuid,
    pub from_column_id: Uuid,
    pub to_table_id: Uuid,
    pub to_column_id: Uuid,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

/// The aggregate root: the whole in-memory design, serialized as a unit.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    pub tables: Vec<Table>,
    pub relationships: Vec<Relationship>,
    pub base_tables: Vec<BaseTable>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, table_id: Uuid) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub(crate) fn table_mut(&mut self, table_id: Uuid) -> Option<&mut Table> {
        self.tables.iter_mut().find(|t| t.id == table_id)
    }

    pub fn base_table(&self, base_table_id: Uuid) -> Option<&BaseTable> {
        self.base_tables.iter().find(|b| b.id == base_table_id)
    }

    pub(crate) fn base_table_mut(&mut self, base_table_id: Uuid) -> Option<&mut BaseTable> {
        self.base_tables.iter_mut().find(|b| b.id == base_table_id)
    }

    pub fn relationship(&self, relationship_id: Uuid) -> Option<&Relationship> {
        self.relationships.iter().find(|r| r.id == relationship_id)
    }
}
