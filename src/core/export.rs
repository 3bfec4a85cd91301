//! Lossy "clean" export: the schema description without internal ids or
//! canvas positions.
//!
//! Relationship endpoints are resolved to table/column names against the
//! live schema at export time. A reference that no longer resolves exports
//! with its name keys omitted rather than failing the whole export.

use serde::{Deserialize, Serialize};

use super::schema::{ForeignKeyRef, RelationshipType, Schema};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanSchema {
    pub tables: Vec<CleanTable>,
    pub relationships: Vec<CleanRelationship>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanTable {
    pub name: String,
    pub columns: Vec<CleanColumn>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanColumn {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanEndpoint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRelationship {
    pub from: CleanEndpoint,
    pub to: CleanEndpoint,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
}

/// Projects the schema onto the clean export shape.
pub fn clean_schema(schema: &Schema) -> CleanSchema {
    let tables = schema
        .tables
        .iter()
        .map(|table| CleanTable {
            name: table.name.clone(),
            columns: table
                .columns
                .iter()
                .map(|column| CleanColumn {
                    name: column.name.clone(),
                    data_type: column.data_type.clone(),
                    nullable: column.nullable,
                    primary_key: column.primary_key,
                    foreign_key: column.foreign_key,
                })
                .collect(),
        })
        .collect();

    let relationships = schema
        .relationships
        .iter()
        .map(|relationship| {
            let from_table = schema.table(relationship.from_table_id);
            let to_table = schema.table(relationship.to_table_id);
            CleanRelationship {
                from: CleanEndpoint {
                    table: from_table.map(|t| t.name.clone()),
                    column: from_table
                        .and_then(|t| t.column(relationship.from_column_id))
                        .map(|c| c.name.clone()),
                },
                to: CleanEndpoint {
                    table: to_table.map(|t| t.name.clone()),
                    column: to_table
                        .and_then(|t| t.column(relationship.to_column_id))
                        .map(|c| c.name.clone()),
                },
                relationship_type: relationship.relationship_type,
            }
        })
        .collect();

    CleanSchema {
        tables,
        relationships,
    }
}

/// Pretty-printed JSON of the clean export.
pub fn export_json(schema: &Schema) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&clean_schema(schema))
}
