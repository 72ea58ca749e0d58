//! Schema document merge.
//!
//! [`SchemaRegistry::merge`] parses each SDL document in order and folds it
//! into a single type registry. Later documents may add new types, extend
//! existing ones additively, and override descriptions, but may never change
//! the shape of a type declared earlier: a kind mismatch or a field
//! redeclared with a different shape aborts the merge with a conflict naming
//! both origins.
//!
//! The registry is an intermediate form only. It carries enough structure
//! for [`ResolverBindings::bind`](crate::schema::ResolverBindings::bind) to
//! compile it into an executable schema, and nothing more.

use async_graphql::Value as ConstValue;
use async_graphql::indexmap::IndexMap;
use async_graphql::indexmap::map::Entry;
use async_graphql_parser::parse_schema;
use async_graphql_parser::types as ast;
use tracing::debug;

use crate::error::GraphQLError;
use crate::schema::documents::SchemaDocument;

/// Fallback root query type name when no document declares `schema { ... }`.
pub const DEFAULT_QUERY_ROOT: &str = "Query";

/// A field on an object, interface, or input object.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Field name.
    pub name: String,
    /// Description, if the document carried one.
    pub description: Option<String>,
    /// The field's type shape as parsed from the document.
    pub ty: ast::Type,
    /// Declared arguments, empty for input object fields.
    pub arguments: Vec<ArgumentDef>,
}

/// A declared field argument or input object field.
#[derive(Debug, Clone)]
pub struct ArgumentDef {
    /// Argument name.
    pub name: String,
    /// Description, if the document carried one.
    pub description: Option<String>,
    /// The argument's type shape.
    pub ty: ast::Type,
    /// Declared default value, if any.
    pub default: Option<ConstValue>,
}

/// The shape of one registered type.
#[derive(Debug, Clone)]
pub enum TypeShape {
    /// A scalar declaration; coercions are attached during binding.
    Scalar,
    /// An output object with its fields and implemented interfaces.
    Object {
        /// Field definitions in declaration order.
        fields: Vec<FieldDef>,
        /// Names of implemented interfaces.
        implements: Vec<String>,
    },
    /// An interface with its declared fields.
    Interface {
        /// Field definitions in declaration order.
        fields: Vec<FieldDef>,
    },
    /// A union over named member types.
    Union {
        /// Member type names.
        members: Vec<String>,
    },
    /// An enum with its value names.
    Enum {
        /// Value names in declaration order.
        values: Vec<String>,
    },
    /// An input object with its fields.
    InputObject {
        /// Input field definitions in declaration order.
        fields: Vec<ArgumentDef>,
    },
}

impl TypeShape {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Object { .. } => "object",
            Self::Interface { .. } => "interface",
            Self::Union { .. } => "union",
            Self::Enum { .. } => "enum",
            Self::InputObject { .. } => "input object",
        }
    }
}

/// One registered type: its shape plus merge provenance.
#[derive(Debug, Clone)]
pub struct TypeEntry {
    /// Type name.
    pub name: String,
    /// Description; later documents override earlier ones.
    pub description: Option<String>,
    /// The type's shape.
    pub shape: TypeShape,
    /// Origin of the document that first declared the type.
    pub origin: String,
}

/// The merged view over all schema documents.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    types: IndexMap<String, TypeEntry>,
    query_root: String,
}

impl SchemaRegistry {
    /// Merges the documents in order into a single registry.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaResource` when a document fails to
    /// parse, and `GraphQLError::SchemaConflict` when two documents declare
    /// the same type with incompatible shapes. Both are fatal to startup.
    pub fn merge(documents: &[SchemaDocument]) -> Result<Self, GraphQLError> {
        let mut registry = Self {
            types: IndexMap::new(),
            query_root: String::new(),
        };

        for document in documents {
            let parsed =
                parse_schema(&document.source).map_err(|e| GraphQLError::SchemaResource {
                    origin: document.origin.clone(),
                    message: e.to_string(),
                })?;

            for definition in parsed.definitions {
                match definition {
                    ast::TypeSystemDefinition::Schema(schema_def) => {
                        registry.merge_schema_definition(&schema_def.node, &document.origin)?;
                    }
                    ast::TypeSystemDefinition::Type(type_def) => {
                        registry.merge_type_definition(type_def.node, &document.origin)?;
                    }
                    ast::TypeSystemDefinition::Directive(_) => {}
                }
            }

            debug!(
                origin = %document.origin,
                types = registry.types.len(),
                "merged schema document"
            );
        }

        if registry.query_root.is_empty() {
            registry.query_root = DEFAULT_QUERY_ROOT.to_string();
        }

        if !registry.types.contains_key(&registry.query_root) {
            return Err(GraphQLError::SchemaBuildFailed(format!(
                "root query type `{}` is not declared by any document",
                registry.query_root
            )));
        }

        Ok(registry)
    }

    /// The root query type name.
    #[must_use]
    pub fn query_root(&self) -> &str {
        &self.query_root
    }

    /// Looks up a registered type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.types.get(name)
    }

    /// Iterates over all registered types in merge order.
    pub fn types(&self) -> impl Iterator<Item = &TypeEntry> {
        self.types.values()
    }

    fn merge_schema_definition(
        &mut self,
        def: &ast::SchemaDefinition,
        origin: &str,
    ) -> Result<(), GraphQLError> {
        let Some(query) = &def.query else {
            return Ok(());
        };
        let query = query.node.to_string();

        if !self.query_root.is_empty() && self.query_root != query {
            return Err(GraphQLError::SchemaConflict {
                type_name: "schema".to_string(),
                first_origin: self.query_root_origin(),
                second_origin: origin.to_string(),
                detail: format!(
                    "root query redeclared as `{query}`, previously `{}`",
                    self.query_root
                ),
            });
        }

        self.query_root = query;
        Ok(())
    }

    fn query_root_origin(&self) -> String {
        self.types
            .get(&self.query_root)
            .map(|e| e.origin.clone())
            .unwrap_or_else(|| "<earlier document>".to_string())
    }

    fn merge_type_definition(
        &mut self,
        def: ast::TypeDefinition,
        origin: &str,
    ) -> Result<(), GraphQLError> {
        let name = def.name.node.to_string();
        let description = def.description.map(|d| d.node);
        let shape = convert_shape(def.kind);

        let existing = match self.types.entry(name.clone()) {
            Entry::Vacant(slot) => {
                if def.extend {
                    return Err(GraphQLError::SchemaConflict {
                        type_name: name,
                        first_origin: origin.to_string(),
                        second_origin: origin.to_string(),
                        detail: "extension of a type no document declares".to_string(),
                    });
                }
                slot.insert(TypeEntry {
                    name,
                    description,
                    shape,
                    origin: origin.to_string(),
                });
                return Ok(());
            }
            Entry::Occupied(slot) => slot.into_mut(),
        };

        let existing_name = existing.name.clone();
        let existing_origin = existing.origin.clone();
        let conflict = move |detail: String| GraphQLError::SchemaConflict {
            type_name: existing_name.clone(),
            first_origin: existing_origin.clone(),
            second_origin: origin.to_string(),
            detail,
        };

        if std::mem::discriminant(&existing.shape) != std::mem::discriminant(&shape) {
            return Err(conflict(format!(
                "declared as {} here, {} earlier",
                shape.kind_name(),
                existing.shape.kind_name()
            )));
        }

        match (&mut existing.shape, shape) {
            (
                TypeShape::Object {
                    fields: existing_fields,
                    implements: existing_impls,
                },
                TypeShape::Object { fields, implements },
            ) => {
                merge_fields(existing_fields, fields, &conflict)?;
                for implemented in implements {
                    if !existing_impls.contains(&implemented) {
                        existing_impls.push(implemented);
                    }
                }
            }
            (
                TypeShape::Interface {
                    fields: existing_fields,
                },
                TypeShape::Interface { fields },
            ) => {
                merge_fields(existing_fields, fields, &conflict)?;
            }
            (
                TypeShape::InputObject {
                    fields: existing_fields,
                },
                TypeShape::InputObject { fields },
            ) => {
                for field in fields {
                    match existing_fields.iter().find(|f| f.name == field.name) {
                        None => existing_fields.push(field),
                        Some(prior) if prior.ty == field.ty => {}
                        Some(prior) => {
                            return Err(conflict(format!(
                                "input field `{}` redeclared as `{}`, previously `{}`",
                                field.name, field.ty, prior.ty
                            )));
                        }
                    }
                }
            }
            (
                TypeShape::Union {
                    members: existing_members,
                },
                TypeShape::Union { members },
            ) => {
                for member in members {
                    if !existing_members.contains(&member) {
                        existing_members.push(member);
                    }
                }
            }
            (
                TypeShape::Enum {
                    values: existing_values,
                },
                TypeShape::Enum { values },
            ) => {
                for value in values {
                    if !existing_values.contains(&value) {
                        existing_values.push(value);
                    }
                }
            }
            (TypeShape::Scalar, TypeShape::Scalar) => {}
            _ => unreachable!("kind mismatch rejected above"),
        }

        if description.is_some() {
            existing.description = description;
        }

        Ok(())
    }
}

/// Folds new fields into an existing field list. Extensions and identical
/// redeclarations are additive; a field redeclared with a different shape is
/// a conflict.
fn merge_fields(
    existing: &mut Vec<FieldDef>,
    incoming: Vec<FieldDef>,
    conflict: &impl Fn(String) -> GraphQLError,
) -> Result<(), GraphQLError> {
    for field in incoming {
        match existing.iter().find(|f| f.name == field.name) {
            None => existing.push(field),
            Some(prior) if field_shapes_match(prior, &field) => {}
            Some(prior) => {
                return Err(conflict(format!(
                    "field `{}` redeclared as `{}`, previously `{}`",
                    field.name, field.ty, prior.ty
                )));
            }
        }
    }
    Ok(())
}

fn field_shapes_match(a: &FieldDef, b: &FieldDef) -> bool {
    a.ty == b.ty
        && a.arguments.len() == b.arguments.len()
        && a.arguments
            .iter()
            .zip(&b.arguments)
            .all(|(x, y)| x.name == y.name && x.ty == y.ty)
}

fn convert_shape(kind: ast::TypeKind) -> TypeShape {
    match kind {
        ast::TypeKind::Scalar => TypeShape::Scalar,
        ast::TypeKind::Object(object) => TypeShape::Object {
            fields: object.fields.into_iter().map(convert_field).collect(),
            implements: object
                .implements
                .into_iter()
                .map(|n| n.node.to_string())
                .collect(),
        },
        ast::TypeKind::Interface(interface) => TypeShape::Interface {
            fields: interface.fields.into_iter().map(convert_field).collect(),
        },
        ast::TypeKind::Union(union) => TypeShape::Union {
            members: union
                .members
                .into_iter()
                .map(|n| n.node.to_string())
                .collect(),
        },
        ast::TypeKind::Enum(enumeration) => TypeShape::Enum {
            values: enumeration
                .values
                .into_iter()
                .map(|v| v.node.value.node.to_string())
                .collect(),
        },
        ast::TypeKind::InputObject(input) => TypeShape::InputObject {
            fields: input.fields.into_iter().map(|f| convert_argument(f.node)).collect(),
        },
    }
}

fn convert_field(field: async_graphql_parser::Positioned<ast::FieldDefinition>) -> FieldDef {
    let field = field.node;
    FieldDef {
        name: field.name.node.to_string(),
        description: field.description.map(|d| d.node),
        ty: field.ty.node,
        arguments: field
            .arguments
            .into_iter()
            .map(|a| convert_argument(a.node))
            .collect(),
    }
}

fn convert_argument(arg: ast::InputValueDefinition) -> ArgumentDef {
    ArgumentDef {
        name: arg.name.node.to_string(),
        description: arg.description.map(|d| d.node),
        ty: arg.ty.node,
        default: arg.default_value.map(|v| v.node),
    }
}
