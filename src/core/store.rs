//! Command reducer for the schema graph.
//!
//! Every edit arrives as a [`SchemaCommand`] and goes through
//! [`apply`], which returns the next fully consistent [`Schema`] value.
//! Prior snapshots are never mutated. Invalid commands (unknown ids,
//! out-of-range indices, blank names) degrade to no-ops: a rejected UI
//! action is cheap, a partially applied edit is not.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::schema::{
    BaseTable, Column, ColumnSpec, Relationship, RelationshipType, Schema, Table,
};
use super::validation::normalize_name;

/// Region for the randomized initial placement of a new table.
const PLACEMENT_X: std::ops::Range<f64> = 100.0..500.0;
const PLACEMENT_Y: std::ops::Range<f64> = 100.0..400.0;

/// Endpoints and cardinality for a relationship to be created.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipSpec {
    pub from_table_id: Uuid,
    pub from_column_id: Uuid,
    pub to_table_id: Uuid,
    pub to_column_id: Uuid,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

/// A discrete edit to the schema graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SchemaCommand {
    /// Create a table, optionally stamped from a base-table template.
    CreateTable {
        name: String,
        base_table_id: Option<Uuid>,
    },
    /// Delete a table and every relationship touching it.
    DeleteTable { table_id: Uuid },
    RenameTable { table_id: Uuid, new_name: String },
    /// Update a table's canvas position. Coordinates are unconstrained.
    MoveTable { table_id: Uuid, x: f64, y: f64 },
    AddColumn { table_id: Uuid, column: ColumnSpec },
    /// Delete a column and every relationship touching it.
    DeleteColumn { table_id: Uuid, column_id: Uuid },
    RenameColumn {
        table_id: Uuid,
        column_id: Uuid,
        new_name: String,
    },
    /// Move the column at `from_index` to `to_index`, shifting the others
    /// (remove-then-insert, not a swap).
    ReorderColumns {
        table_id: Uuid,
        from_index: usize,
        to_index: usize,
    },
    CreateBaseTable {
        name: String,
        description: Option<String>,
    },
    /// Delete a template. Tables already stamped from it are unaffected.
    DeleteBaseTable { base_table_id: Uuid },
    AddColumnToBaseTable {
        base_table_id: Uuid,
        column: ColumnSpec,
    },
    DeleteColumnFromBaseTable {
        base_table_id: Uuid,
        index: usize,
    },
    AddRelationship { spec: RelationshipSpec },
    DeleteRelationship { relationship_id: Uuid },
}

/// Applies one command and returns the next schema snapshot.
///
/// Total over all inputs: the result is always a consistent schema, and
/// the input value is left untouched.
pub fn apply(schema: &Schema, command: SchemaCommand) -> Schema {
    let mut next = schema.clone();
    match command {
        SchemaCommand::CreateTable {
            name,
            base_table_id,
        } => {
            let Some(name) = normalize_name(&name) else {
                return next;
            };
            let columns: Vec<Column> = base_table_id
                .and_then(|id| next.base_table(id))
                .map(|base| base.columns.iter().map(Column::from_spec).collect())
                .unwrap_or_default();
            let mut rng = rand::thread_rng();
            next.tables.push(Table {
                id: Uuid::new_v4(),
                name,
                x: rng.gen_range(PLACEMENT_X),
                y: rng.gen_range(PLACEMENT_Y),
                columns,
            });
        }
        SchemaCommand::DeleteTable { table_id } => {
            next.tables.retain(|t| t.id != table_id);
            next.relationships
                .retain(|r| r.from_table_id != table_id && r.to_table_id != table_id);
        }
        SchemaCommand::RenameTable { table_id, new_name } => {
            let Some(name) = normalize_name(&new_name) else {
                return next;
            };
            if let Some(table) = next.table_mut(table_id) {
                table.name = name;
            }
        }
        SchemaCommand::MoveTable { table_id, x, y } => {
            if let Some(table) = next.table_mut(table_id) {
                table.x = x;
                table.y = y;
            }
        }
        SchemaCommand::AddColumn { table_id, column } => {
            if let Some(table) = next.table_mut(table_id) {
                table.columns.push(Column::from_spec(&column));
            }
        }
        SchemaCommand::DeleteColumn {
            table_id,
            column_id,
        } => {
            let mut removed = false;
            if let Some(table) = next.table_mut(table_id) {
                let before = table.columns.len();
                table.columns.retain(|c| c.id != column_id);
                removed = table.columns.len() < before;
            }
            if removed {
                next.relationships
                    .retain(|r| r.from_column_id != column_id && r.to_column_id != column_id);
            }
        }
        SchemaCommand::RenameColumn {
            table_id,
            column_id,
            new_name,
        } => {
            let Some(name) = normalize_name(&new_name) else {
                return next;
            };
            if let Some(table) = next.table_mut(table_id)
                && let Some(column) = table.columns.iter_mut().find(|c| c.id == column_id)
            {
                column.name = name;
            }
        }
        SchemaCommand::ReorderColumns {
            table_id,
            from_index,
            to_index,
        } => {
            if let Some(table) = next.table_mut(table_id)
                && from_index < table.columns.len()
                && to_index < table.columns.len()
            {
                let column = table.columns.remove(from_index);
                table.columns.insert(to_index, column);
            }
        }
        SchemaCommand::CreateBaseTable { name, description } => {
            let Some(name) = normalize_name(&name) else {
                return next;
            };
            next.base_tables.push(BaseTable {
                id: Uuid::new_v4(),
                name,
                description: description.and_then(|d| normalize_name(&d)),
                columns: Vec::new(),
            });
        }
        SchemaCommand::DeleteBaseTable { base_table_id } => {
            next.base_tables.retain(|b| b.id != base_table_id);
        }
        SchemaCommand::AddColumnToBaseTable {
            base_table_id,
            column,
        } => {
            if let Some(base) = next.base_table_mut(base_table_id) {
                base.columns.push(column);
            }
        }
        SchemaCommand::DeleteColumnFromBaseTable {
            base_table_id,
            index,
        } => {
            if let Some(base) = next.base_table_mut(base_table_id)
                && index < base.columns.len()
            {
                base.columns.remove(index);
            }
        }
        SchemaCommand::AddRelationship { spec } => {
            // A column cannot relate to itself, whatever the UI submitted.
            if spec.from_table_id == spec.to_table_id
                && spec.from_column_id == spec.to_column_id
            {
                return next;
            }
            next.relationships.push(Relationship {
                id: Uuid::new_v4(),
                from_table_id: spec.from_table_id,
                from_column_id: spec.from_column_id,
                to_table_id: spec.to_table_id,
                to_column_id: spec.to_column_id,
                relationship_type: spec.relationship_type,
            });
        }
        SchemaCommand::DeleteRelationship { relationship_id } => {
            next.relationships.retain(|r| r.id != relationship_id);
        }
    }
    next
}

/// Holds the current schema snapshot and replaces it on every dispatch.
#[derive(Clone, Debug, Default)]
pub struct SchemaStore {
    schema: Schema,
}

impl SchemaStore {
    /// Empty store for a fresh session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schema(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Applies a command and returns the new snapshot.
    pub fn dispatch(&mut self, command: SchemaCommand) -> &Schema {
        debug!(?command, "applying schema command");
        self.schema = apply(&self.schema, command);
        &self.schema
    }

    /// Wholesale replacement, used when a project file is opened.
    pub fn replace(&mut self, schema: Schema) {
        self.schema = schema;
    }
}

/// Builds the blog-shaped demo design (users, posts, comments).
pub fn create_demo_schema() -> Schema {
    let mut store = SchemaStore::new();

    for name in ["users", "posts", "comments"] {
        store.dispatch(SchemaCommand::CreateTable {
            name: name.to_string(),
            base_table_id: None,
        });
    }

    let table_id = |store: &SchemaStore, name: &str| {
        store
            .schema()
            .tables
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id)
            .expect("demo table")
    };
    let users = table_id(&store, "users");
    let posts = table_id(&store, "posts");
    let comments = table_id(&store, "comments");

    for (id, x, y) in [
        (users, 100.0, 100.0),
        (posts, 400.0, 100.0),
        (comments, 400.0, 400.0),
    ] {
        store.dispatch(SchemaCommand::MoveTable {
            table_id: id,
            x,
            y,
        });
    }

    for (table, column) in [
        (users, ColumnSpec::new("id", "INT").primary_key()),
        (users, ColumnSpec::new("username", "VARCHAR").not_null()),
        (users, ColumnSpec::new("email", "VARCHAR").not_null()),
        (users, ColumnSpec::new("created_at", "TIMESTAMP").not_null()),
        (posts, ColumnSpec::new("id", "INT").primary_key()),
        (posts, ColumnSpec::new("title", "VARCHAR").not_null()),
        (posts, ColumnSpec::new("content", "TEXT")),
        (comments, ColumnSpec::new("id", "INT").primary_key()),
        (comments, ColumnSpec::new("content", "TEXT").not_null()),
    ] {
        store.dispatch(SchemaCommand::AddColumn {
            table_id: table,
            column,
        });
    }

    let column_id = |store: &SchemaStore, table: Uuid, name: &str| {
        store
            .schema()
            .table(table)
            .and_then(|t| t.columns.iter().find(|c| c.name == name))
            .map(|c| c.id)
            .expect("demo column")
    };
    let users_pk = column_id(&store, users, "id");
    let posts_pk = column_id(&store, posts, "id");

    // Foreign key columns reference the parent tables created above.
    store.dispatch(SchemaCommand::AddColumn {
        table_id: posts,
        column: ColumnSpec::new("user_id", "INT")
            .not_null()
            .references(users, users_pk),
    });
    store.dispatch(SchemaCommand::AddColumn {
        table_id: comments,
        column: ColumnSpec::new("post_id", "INT")
            .not_null()
            .references(posts, posts_pk),
    });
    store.dispatch(SchemaCommand::AddColumn {
        table_id: comments,
        column: ColumnSpec::new("user_id", "INT")
            .not_null()
            .references(users, users_pk),
    });

    for (from_table, from_column, to_table, to_column) in [
        (users, users_pk, posts, column_id(&store, posts, "user_id")),
        (posts, posts_pk, comments, column_id(&store, comments, "post_id")),
        (users, users_pk, comments, column_id(&store, comments, "user_id")),
    ] {
        store.dispatch(SchemaCommand::AddRelationship {
            spec: RelationshipSpec {
                from_table_id: from_table,
                from_column_id: from_column,
                to_table_id: to_table,
                to_column_id: to_column,
                relationship_type: RelationshipType::OneToMany,
            },
        });
    }

    store.schema().clone()
}
