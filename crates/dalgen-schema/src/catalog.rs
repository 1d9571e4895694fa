//! One-shot catalog loading.
//!
//! A [`Source`] is materialized from a [`SchemaProvider`] in a single pass:
//! every database, table, view, field, and constraint is validated and
//! frozen up front, and the reverse foreign-key index is built once at the
//! end. All accessors afterwards are pure lookups, so repeated reads are
//! idempotent by construction and the provider is never consulted again.

use std::collections::{HashMap, HashSet};

use crate::constraint::{Constraint, ConstraintKind};
use crate::data::{FieldId, Table, TableField, TableId, View, ViewField, ViewId};
use crate::error::{Result, SchemaError};
use crate::ident::{Ident, QualifiedName};
use crate::provider::{ConstraintKindDef, DatabaseDef, SchemaProvider, TableDef, ViewDef};
use crate::types::Credential;

/// A server and its fully materialized databases.
#[derive(Debug, Clone)]
pub struct Source {
    name: Ident,
    credential: Credential,
    databases: Vec<Database>,
}

impl Source {
    /// Loads every database of the named source through the provider.
    ///
    /// # Errors
    ///
    /// Returns the provider's error, or the first structural violation
    /// found while freezing the metadata.
    pub fn load(
        provider: &dyn SchemaProvider,
        name: impl Into<Ident>,
        credential: Credential,
    ) -> Result<Self> {
        let name = name.into();
        let mut databases = Vec::new();
        for db_name in provider.database_names(name.as_str())? {
            let def = provider.describe_database(name.as_str(), &db_name)?;
            databases.push(Database::from_def(&def)?);
        }
        Ok(Self {
            name,
            credential,
            databases,
        })
    }

    /// Returns the server name.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Returns the login credential.
    #[must_use]
    pub const fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Returns the materialized databases.
    #[must_use]
    pub fn databases(&self) -> &[Database] {
        &self.databases
    }

    /// Returns the database with the given name (case-insensitive).
    #[must_use]
    pub fn database(&self, name: &str) -> Option<&Database> {
        self.databases.iter().find(|db| db.name == *name)
    }
}

/// A fully materialized database: table and view arenas plus the derived
/// reverse foreign-key index.
#[derive(Debug, Clone)]
pub struct Database {
    name: Ident,
    tables: Vec<Table>,
    views: Vec<View>,
    referencing: HashMap<FieldId, Vec<FieldId>>,
}

impl Database {
    /// Validates and freezes one database description.
    ///
    /// # Errors
    ///
    /// Fails fast on the first violation: unnamed or duplicate objects,
    /// constraints with no fields, unresolved column or table references,
    /// mismatched foreign-key arity, or more than one primary key.
    pub fn from_def(def: &DatabaseDef) -> Result<Self> {
        if def.name.is_empty() {
            return Err(SchemaError::Unnamed {
                kind: "database",
                owner: String::from("source"),
            });
        }

        let mut entity_names: HashSet<Ident> = HashSet::new();
        let mut tables = Vec::with_capacity(def.tables.len());
        for (position, tdef) in def.tables.iter().enumerate() {
            claim_name(&mut entity_names, "table", &tdef.name, &def.name)?;
            tables.push(build_table(TableId(position), tdef)?);
        }

        let mut views = Vec::with_capacity(def.views.len());
        for (position, vdef) in def.views.iter().enumerate() {
            claim_name(&mut entity_names, "view", &vdef.name, &def.name)?;
            views.push(build_view(ViewId(position), vdef)?);
        }

        let table_ids: HashMap<Ident, TableId> = tables
            .iter()
            .map(|t| (t.name().name.clone(), t.id()))
            .collect();

        let resolved = resolve_constraints(def, &tables, &table_ids)?;
        apply_constraints(&mut tables, resolved);

        let mut referencing: HashMap<FieldId, Vec<FieldId>> = HashMap::new();
        for table in &tables {
            for field in table.fields() {
                if let Some(target) = field.references() {
                    referencing.entry(target).or_default().push(field.id());
                }
            }
        }

        Ok(Self {
            name: Ident::new(def.name.clone()),
            tables,
            views,
            referencing,
        })
    }

    /// Returns the database name.
    #[must_use]
    pub fn name(&self) -> &Ident {
        &self.name
    }

    /// Returns all tables.
    #[must_use]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Returns all views.
    #[must_use]
    pub fn views(&self) -> &[View] {
        &self.views
    }

    /// Returns the table with the given arena id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not originate from this database.
    #[must_use]
    pub fn table(&self, id: TableId) -> &Table {
        &self.tables[id.0]
    }

    /// Returns the view with the given arena id.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not originate from this database.
    #[must_use]
    pub fn view(&self, id: ViewId) -> &View {
        &self.views[id.0]
    }

    /// Returns the table with the given name (case-insensitive).
    #[must_use]
    pub fn table_by_name(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name().name == *name)
    }

    /// Returns the view with the given name (case-insensitive).
    #[must_use]
    pub fn view_by_name(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name().name == *name)
    }

    /// Returns the field with the given identity.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not originate from this database.
    #[must_use]
    pub fn field(&self, id: FieldId) -> &TableField {
        &self.tables[id.table.0].fields()[id.index]
    }

    /// Returns the fields that reference the given field through a foreign
    /// key — the derived inverse of [`TableField::references`].
    #[must_use]
    pub fn referencing_fields(&self, id: FieldId) -> &[FieldId] {
        self.referencing.get(&id).map_or(&[], Vec::as_slice)
    }
}

fn claim_name(
    names: &mut HashSet<Ident>,
    kind: &'static str,
    name: &str,
    owner: &str,
) -> Result<()> {
    if name.is_empty() {
        return Err(SchemaError::Unnamed {
            kind,
            owner: owner.to_string(),
        });
    }
    if !names.insert(Ident::new(name)) {
        return Err(SchemaError::DuplicateName {
            kind,
            name: name.to_string(),
        });
    }
    Ok(())
}

fn build_table(id: TableId, def: &TableDef) -> Result<Table> {
    let mut field_names: HashSet<Ident> = HashSet::new();
    let mut fields = Vec::with_capacity(def.columns.len());
    for (index, col) in def.columns.iter().enumerate() {
        claim_name(&mut field_names, "field", &col.name, &def.name)?;
        fields.push(TableField {
            id: FieldId { table: id, index },
            name: Ident::new(col.name.clone()),
            value_type: col.value_type,
            native_type: col.native_type.clone(),
            max_length: col.max_length,
            nullable: col.nullable,
            identity: col.identity,
            read_only: col.read_only,
            has_default: col.has_default,
            references: None,
            constraints: Vec::new(),
        });
    }

    let name = match &def.schema {
        Some(schema) => QualifiedName::with_schema(schema.as_str(), def.name.as_str()),
        None => QualifiedName::new(def.name.as_str()),
    };
    Ok(Table {
        id,
        name,
        fields,
        constraints: Vec::new(),
        primary_key: None,
    })
}

fn build_view(id: ViewId, def: &ViewDef) -> Result<View> {
    let mut field_names: HashSet<Ident> = HashSet::new();
    let mut fields = Vec::with_capacity(def.columns.len());
    for (index, col) in def.columns.iter().enumerate() {
        claim_name(&mut field_names, "field", &col.name, &def.name)?;
        fields.push(ViewField {
            index,
            name: Ident::new(col.name.clone()),
            value_type: col.value_type,
            native_type: col.native_type.clone(),
            max_length: col.max_length,
            nullable: col.nullable,
        });
    }

    let name = match &def.schema {
        Some(schema) => QualifiedName::with_schema(schema.as_str(), def.name.as_str()),
        None => QualifiedName::new(def.name.as_str()),
    };
    Ok(View { id, name, fields })
}

/// A constraint resolved against the table arenas, plus the foreign-key
/// links (local field index, referenced field) it establishes.
struct ResolvedConstraint {
    table: usize,
    constraint: Constraint,
    links: Vec<(usize, FieldId)>,
}

fn resolve_constraints(
    def: &DatabaseDef,
    tables: &[Table],
    table_ids: &HashMap<Ident, TableId>,
) -> Result<Vec<ResolvedConstraint>> {
    let mut resolved = Vec::new();
    for (ti, tdef) in def.tables.iter().enumerate() {
        let table = &tables[ti];
        let mut constraint_names: HashSet<Ident> = HashSet::new();
        let mut saw_primary_key = false;
        for cdef in &tdef.constraints {
            claim_name(&mut constraint_names, "constraint", &cdef.name, &tdef.name)?;
            if cdef.columns.is_empty() {
                return Err(SchemaError::EmptyConstraint(cdef.name.clone()));
            }

            let field_indexes = resolve_columns(table, &cdef.name, &cdef.columns)?;

            let kind = match cdef.kind {
                ConstraintKindDef::PrimaryKey => {
                    if saw_primary_key {
                        return Err(SchemaError::MultiplePrimaryKeys(tdef.name.clone()));
                    }
                    saw_primary_key = true;
                    ConstraintKind::PrimaryKey
                }
                ConstraintKindDef::UniqueKey => ConstraintKind::UniqueKey,
                ConstraintKindDef::ForeignKey => ConstraintKind::ForeignKey,
            };

            let (references, links) = match (&cdef.references, kind) {
                (Some(fref), ConstraintKind::ForeignKey) => {
                    let target_id = *table_ids.get(&Ident::new(fref.table.as_str())).ok_or_else(
                        || SchemaError::UnknownTable {
                            constraint: cdef.name.clone(),
                            table: fref.table.clone(),
                        },
                    )?;
                    if fref.columns.len() != field_indexes.len() {
                        return Err(SchemaError::ReferenceArityMismatch {
                            constraint: cdef.name.clone(),
                            local: field_indexes.len(),
                            referenced: fref.columns.len(),
                        });
                    }
                    let target = &tables[target_id.0];
                    let target_indexes = resolve_columns(target, &cdef.name, &fref.columns)?;
                    let links = field_indexes
                        .iter()
                        .zip(&target_indexes)
                        .map(|(&local, &index)| {
                            (
                                local,
                                FieldId {
                                    table: target_id,
                                    index,
                                },
                            )
                        })
                        .collect();
                    (Some(target_id), links)
                }
                (None, ConstraintKind::ForeignKey) => {
                    return Err(SchemaError::MissingReferenceTable(cdef.name.clone()));
                }
                // Reference targets on non-FK constraints are ignored.
                (_, _) => (None, Vec::new()),
            };

            resolved.push(ResolvedConstraint {
                table: ti,
                constraint: Constraint::new(
                    cdef.name.as_str(),
                    kind,
                    table.id(),
                    field_indexes,
                    references,
                ),
                links,
            });
        }
    }
    Ok(resolved)
}

fn resolve_columns(table: &Table, constraint: &str, columns: &[String]) -> Result<Vec<usize>> {
    columns
        .iter()
        .map(|name| {
            table
                .field_by_name(name)
                .map(TableField::index)
                .ok_or_else(|| SchemaError::UnknownField {
                    constraint: constraint.to_string(),
                    table: table.name().to_string(),
                    field: name.clone(),
                })
        })
        .collect()
}

fn apply_constraints(tables: &mut [Table], resolved: Vec<ResolvedConstraint>) {
    for entry in resolved {
        let table = &mut tables[entry.table];
        let position = table.constraints.len();
        if entry.constraint.is_primary_key() {
            table.primary_key = Some(position);
        }
        for &field_index in entry.constraint.fields() {
            table.fields[field_index].constraints.push(position);
        }
        for (field_index, target) in entry.links {
            table.fields[field_index].references = Some(target);
        }
        table.constraints.push(entry.constraint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{ColumnDef, ConstraintDef, ForeignRefDef};
    use crate::types::ValueType;

    fn id_column() -> ColumnDef {
        ColumnDef::new("id", ValueType::Int64).identity()
    }

    fn pk(name: &str) -> ConstraintDef {
        ConstraintDef {
            name: format!("pk_{name}"),
            kind: ConstraintKindDef::PrimaryKey,
            columns: vec![String::from("id")],
            references: None,
        }
    }

    fn fk(name: &str, column: &str, target: &str) -> ConstraintDef {
        ConstraintDef {
            name: name.to_string(),
            kind: ConstraintKindDef::ForeignKey,
            columns: vec![column.to_string()],
            references: Some(ForeignRefDef {
                table: target.to_string(),
                columns: vec![String::from("id")],
            }),
        }
    }

    fn shop_def() -> DatabaseDef {
        DatabaseDef {
            name: String::from("shop"),
            tables: vec![
                TableDef {
                    name: String::from("customers"),
                    schema: Some(String::from("dbo")),
                    columns: vec![id_column(), ColumnDef::new("name", ValueType::Text)],
                    constraints: vec![pk("customers")],
                },
                TableDef {
                    name: String::from("orders"),
                    schema: Some(String::from("dbo")),
                    columns: vec![
                        id_column(),
                        ColumnDef::new("customer_id", ValueType::Int64),
                    ],
                    constraints: vec![
                        pk("orders"),
                        fk("fk_orders_customers", "customer_id", "customers"),
                    ],
                },
            ],
            views: vec![],
        }
    }

    #[test]
    fn test_load_resolves_foreign_keys() {
        let db = Database::from_def(&shop_def()).unwrap();
        let customers = db.table_by_name("customers").unwrap();
        let orders = db.table_by_name("orders").unwrap();

        let customer_id = orders.field_by_name("customer_id").unwrap();
        assert_eq!(
            customer_id.references(),
            Some(FieldId {
                table: customers.id(),
                index: 0
            })
        );

        let fk = orders
            .constraints()
            .iter()
            .find(|c| c.kind() == ConstraintKind::ForeignKey)
            .unwrap();
        assert_eq!(fk.references(), Some(customers.id()));
    }

    #[test]
    fn test_reverse_index_is_derived_inverse() {
        let db = Database::from_def(&shop_def()).unwrap();
        let customers = db.table_by_name("customers").unwrap();
        let orders = db.table_by_name("orders").unwrap();

        let referenced = FieldId {
            table: customers.id(),
            index: 0,
        };
        assert_eq!(
            db.referencing_fields(referenced),
            &[FieldId {
                table: orders.id(),
                index: 1
            }]
        );

        // A field with no dependents yields the empty slice.
        let leaf = FieldId {
            table: orders.id(),
            index: 0,
        };
        assert!(db.referencing_fields(leaf).is_empty());
    }

    #[test]
    fn test_primary_key_lookup() {
        let db = Database::from_def(&shop_def()).unwrap();
        let customers = db.table_by_name("customers").unwrap();
        assert_eq!(customers.primary_key().unwrap().fields(), &[0]);
        assert_eq!(customers.single_key_field(), Some(0));
    }

    #[test]
    fn test_field_constraint_membership() {
        let db = Database::from_def(&shop_def()).unwrap();
        let orders = db.table_by_name("orders").unwrap();
        let customer_id = orders.field_by_name("customer_id").unwrap();
        let kinds: Vec<_> = customer_id
            .constraint_positions()
            .iter()
            .map(|&p| orders.constraints()[p].kind())
            .collect();
        assert_eq!(kinds, vec![ConstraintKind::ForeignKey]);
    }

    #[test]
    fn test_unknown_reference_table_fails() {
        let mut def = shop_def();
        def.tables[1].constraints[1] = fk("fk_bad", "customer_id", "nonexistent");
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::UnknownTable { table, .. }) if table == "nonexistent"
        ));
    }

    #[test]
    fn test_empty_constraint_fails() {
        let mut def = shop_def();
        def.tables[0].constraints[0].columns.clear();
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::EmptyConstraint(_))
        ));
    }

    #[test]
    fn test_foreign_key_without_target_fails() {
        let mut def = shop_def();
        def.tables[1].constraints[1].references = None;
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::MissingReferenceTable(_))
        ));
    }

    #[test]
    fn test_arity_mismatch_fails() {
        let mut def = shop_def();
        def.tables[1].constraints[1]
            .references
            .as_mut()
            .unwrap()
            .columns
            .push(String::from("name"));
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::ReferenceArityMismatch { local: 1, referenced: 2, .. })
        ));
    }

    #[test]
    fn test_duplicate_field_name_fails() {
        let mut def = shop_def();
        def.tables[0]
            .columns
            .push(ColumnDef::new("NAME", ValueType::Text));
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::DuplicateName { kind: "field", .. })
        ));
    }

    #[test]
    fn test_multiple_primary_keys_fail() {
        let mut def = shop_def();
        def.tables[0].constraints.push(ConstraintDef {
            name: String::from("pk_again"),
            kind: ConstraintKindDef::PrimaryKey,
            columns: vec![String::from("name")],
            references: None,
        });
        assert!(matches!(
            Database::from_def(&def),
            Err(SchemaError::MultiplePrimaryKeys(_))
        ));
    }

    struct FixtureProvider(DatabaseDef);

    impl SchemaProvider for FixtureProvider {
        fn database_names(&self, _source: &str) -> crate::error::Result<Vec<String>> {
            Ok(vec![self.0.name.clone()])
        }

        fn describe_database(
            &self,
            _source: &str,
            _database: &str,
        ) -> crate::error::Result<DatabaseDef> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_source_load_through_provider() {
        let provider = FixtureProvider(shop_def());
        let source = Source::load(&provider, "primary", Credential::Integrated).unwrap();
        assert_eq!(source.name(), &Ident::new("primary"));
        assert!(source.credential().is_integrated());
        assert_eq!(source.databases().len(), 1);
        assert!(source.database("SHOP").is_some());
    }
}
