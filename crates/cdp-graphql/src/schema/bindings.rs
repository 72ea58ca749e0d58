//! Resolver bindings and schema compilation.
//!
//! [`ResolverBindings`] collects the runtime behavior attached to the merged
//! type registry: scalar coercions, interface type resolvers, and explicit
//! field resolvers. [`ResolverBindings::bind`] compiles registry plus
//! bindings into an executable schema using async-graphql's dynamic API.
//!
//! Fields without an explicit resolver get a generated default property
//! resolver: it projects the identically-named property off the parent
//! value, applies the scalar coercion when the field's type has one, and
//! performs concrete-type dispatch when the field's type is an interface or
//! union. Querying an abstract-typed field whose interface has no registered
//! type resolver yields a field error scoped to that field, never a crash.

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::Value;
use async_graphql::dynamic::{
    Enum, Field, FieldFuture, FieldValue, InputObject, InputValue, Interface, InterfaceField,
    Object, Scalar, Schema, SchemaBuilder, TypeRef, Union,
};
use async_graphql_parser::types as ast;
use tracing::debug;

use crate::config::GraphQLConfig;
use crate::error::GraphQLError;
use crate::schema::registry::{ArgumentDef, FieldDef, SchemaRegistry, TypeEntry, TypeShape};
use crate::types::ScalarCoercion;

/// Resolves a node value to the concrete type name it should be treated as.
pub type TypeResolverFn = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// An explicit field resolver, keyed by `(type name, field name)`.
pub type BoxFieldResolver =
    Arc<dyn for<'a> Fn(async_graphql::dynamic::ResolverContext<'a>) -> FieldFuture<'a> + Send + Sync>;

/// Runtime behavior to attach to a merged type registry.
#[derive(Default)]
pub struct ResolverBindings {
    coercions: HashMap<String, ScalarCoercion>,
    type_resolvers: HashMap<String, TypeResolverFn>,
    field_resolvers: HashMap<(String, String), BoxFieldResolver>,
}

impl ResolverBindings {
    /// Creates an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scalar coercion, keyed by the coercion's type name.
    #[must_use]
    pub fn scalar(mut self, coercion: ScalarCoercion) -> Self {
        self.coercions.insert(coercion.name.clone(), coercion);
        self
    }

    /// Registers several scalar coercions at once.
    #[must_use]
    pub fn scalars(mut self, coercions: impl IntoIterator<Item = ScalarCoercion>) -> Self {
        for coercion in coercions {
            self.coercions.insert(coercion.name.clone(), coercion);
        }
        self
    }

    /// Registers a type resolver for an interface or union.
    #[must_use]
    pub fn type_resolver(
        mut self,
        abstract_type: impl Into<String>,
        resolver: impl Fn(&Value) -> String + Send + Sync + 'static,
    ) -> Self {
        self.type_resolvers
            .insert(abstract_type.into(), Arc::new(resolver));
        self
    }

    /// Registers an explicit field resolver.
    #[must_use]
    pub fn field(
        mut self,
        type_name: impl Into<String>,
        field_name: impl Into<String>,
        resolver: impl for<'a> Fn(async_graphql::dynamic::ResolverContext<'a>) -> FieldFuture<'a>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        self.field_resolvers
            .insert((type_name.into(), field_name.into()), Arc::new(resolver));
        self
    }

    /// Compiles the registry plus these bindings into an executable schema.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the dynamic schema
    /// rejects the registered types; fatal to startup.
    pub fn bind(
        self,
        registry: &SchemaRegistry,
        config: &GraphQLConfig,
    ) -> Result<Schema, GraphQLError> {
        debug!(query_root = registry.query_root(), "compiling executable schema");

        let mut builder = Schema::build(registry.query_root(), None, None);

        for entry in registry.types() {
            builder = self.register_type(builder, entry, registry);
        }

        let mut builder = builder
            .limit_depth(config.max_depth)
            .limit_complexity(config.max_complexity);

        if !config.introspection {
            builder = builder.disable_introspection();
        }

        builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))
    }

    fn register_type(
        &self,
        builder: SchemaBuilder,
        entry: &TypeEntry,
        registry: &SchemaRegistry,
    ) -> SchemaBuilder {
        match &entry.shape {
            TypeShape::Scalar => {
                let mut scalar = Scalar::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    scalar = scalar.description(description.clone());
                }
                if let Some(coercion) = self.coercions.get(&entry.name) {
                    let coercion = coercion.clone();
                    scalar = scalar.validator(move |value| coercion.parse_value(value).is_ok());
                }
                builder.register(scalar)
            }
            TypeShape::Object { fields, implements } => {
                let mut object = Object::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    object = object.description(description.clone());
                }
                for interface in implements {
                    object = object.implement(interface.clone());
                }
                for field_def in fields {
                    object = object.field(self.build_field(&entry.name, field_def, registry));
                }
                builder.register(object)
            }
            TypeShape::Interface { fields } => {
                let mut interface = Interface::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    interface = interface.description(description.clone());
                }
                for field_def in fields {
                    let mut field =
                        InterfaceField::new(field_def.name.clone(), type_ref(&field_def.ty));
                    if let Some(description) = &field_def.description {
                        field = field.description(description.clone());
                    }
                    for arg in &field_def.arguments {
                        field = field.argument(input_value(arg));
                    }
                    interface = interface.field(field);
                }
                builder.register(interface)
            }
            TypeShape::Union { members } => {
                let mut union = Union::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    union = union.description(description.clone());
                }
                for member in members {
                    union = union.possible_type(member.clone());
                }
                builder.register(union)
            }
            TypeShape::Enum { values } => {
                let mut enumeration = Enum::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    enumeration = enumeration.description(description.clone());
                }
                for value in values {
                    enumeration = enumeration.item(value.clone());
                }
                builder.register(enumeration)
            }
            TypeShape::InputObject { fields } => {
                let mut input = InputObject::new(entry.name.clone());
                if let Some(description) = &entry.description {
                    input = input.description(description.clone());
                }
                for field_def in fields {
                    input = input.field(input_value(field_def));
                }
                builder.register(input)
            }
        }
    }

    fn build_field(
        &self,
        type_name: &str,
        field_def: &FieldDef,
        registry: &SchemaRegistry,
    ) -> Field {
        let projection = self.projection_for(type_name, field_def, registry);
        let field_name: Arc<str> = Arc::from(field_def.name.as_str());

        let mut field = Field::new(
            field_def.name.clone(),
            type_ref(&field_def.ty),
            move |ctx| match projection.as_ref() {
                Projection::Custom(resolver) => resolver(ctx),
                _ => {
                    let projection = projection.clone();
                    let field_name = field_name.clone();
                    FieldFuture::new(async move {
                        resolve_property(&ctx, &projection, &field_name)
                    })
                }
            },
        );

        if let Some(description) = &field_def.description {
            field = field.description(description.clone());
        }
        for arg in &field_def.arguments {
            field = field.argument(input_value(arg));
        }
        field
    }

    fn projection_for(
        &self,
        type_name: &str,
        field_def: &FieldDef,
        registry: &SchemaRegistry,
    ) -> Arc<Projection> {
        let key = (type_name.to_string(), field_def.name.clone());
        if let Some(resolver) = self.field_resolvers.get(&key) {
            return Arc::new(Projection::Custom(resolver.clone()));
        }

        let base = base_type_name(&field_def.ty);
        match registry.get(base).map(|e| &e.shape) {
            Some(TypeShape::Scalar) => {
                if let Some(coercion) = self.coercions.get(base) {
                    return Arc::new(Projection::Scalar(coercion.clone()));
                }
                Arc::new(Projection::Plain)
            }
            Some(TypeShape::Interface { .. }) | Some(TypeShape::Union { .. }) => {
                Arc::new(Projection::Abstract {
                    abstract_type: base.to_string(),
                    resolver: self.type_resolvers.get(base).cloned(),
                    list: is_list(&field_def.ty),
                })
            }
            _ => Arc::new(Projection::Plain),
        }
    }
}

/// How the default property resolver treats one field.
enum Projection {
    /// An explicitly registered resolver.
    Custom(BoxFieldResolver),
    /// A coerced scalar field.
    Scalar(ScalarCoercion),
    /// An interface- or union-typed field needing concrete-type dispatch.
    Abstract {
        abstract_type: String,
        resolver: Option<TypeResolverFn>,
        list: bool,
    },
    /// A plain projection of the identically-named parent property.
    Plain,
}

/// The generated default property resolver body.
fn resolve_property<'a>(
    ctx: &async_graphql::dynamic::ResolverContext<'a>,
    projection: &Projection,
    field_name: &str,
) -> Result<Option<FieldValue<'a>>, async_graphql::Error> {
    let child = ctx
        .parent_value
        .as_value()
        .and_then(|parent| match parent {
            Value::Object(fields) => fields.get(field_name).cloned(),
            _ => None,
        })
        .unwrap_or(Value::Null);

    match projection {
        Projection::Custom(_) => unreachable!("custom resolvers are dispatched eagerly"),
        Projection::Scalar(coercion) => {
            let serialized = coercion.serialize(&child);
            if serialized == Value::Null {
                Ok(None)
            } else {
                Ok(Some(FieldValue::value(serialized)))
            }
        }
        Projection::Abstract {
            abstract_type,
            resolver,
            list,
        } => {
            let Some(resolver) = resolver else {
                let err = GraphQLError::MissingTypeResolver {
                    interface: abstract_type.clone(),
                };
                return Err(async_graphql::Error::new(err.to_string()));
            };
            if child == Value::Null {
                return Ok(None);
            }
            if *list {
                let Value::List(items) = child else {
                    return Ok(None);
                };
                let values: Vec<FieldValue> = items
                    .into_iter()
                    .map(|item| {
                        let concrete = resolver(&item);
                        FieldValue::value(item).with_type(concrete)
                    })
                    .collect();
                Ok(Some(FieldValue::list(values)))
            } else {
                let concrete = resolver(&child);
                Ok(Some(FieldValue::value(child).with_type(concrete)))
            }
        }
        Projection::Plain => {
            if child == Value::Null {
                Ok(None)
            } else {
                Ok(Some(FieldValue::value(child)))
            }
        }
    }
}

/// Translates a parsed type shape into a dynamic type reference.
fn type_ref(ty: &ast::Type) -> TypeRef {
    let base = match &ty.base {
        ast::BaseType::Named(name) => TypeRef::named(name.to_string()),
        ast::BaseType::List(inner) => TypeRef::List(Box::new(type_ref(inner))),
    };
    if ty.nullable {
        base
    } else {
        TypeRef::NonNull(Box::new(base))
    }
}

fn input_value(arg: &ArgumentDef) -> InputValue {
    let mut input = InputValue::new(arg.name.clone(), type_ref(&arg.ty));
    if let Some(description) = &arg.description {
        input = input.description(description.clone());
    }
    if let Some(default) = &arg.default {
        input = input.default_value(default.clone());
    }
    input
}

fn base_type_name(ty: &ast::Type) -> &str {
    match &ty.base {
        ast::BaseType::Named(name) => name.as_str(),
        ast::BaseType::List(inner) => base_type_name(inner),
    }
}

fn is_list(ty: &ast::Type) -> bool {
    match &ty.base {
        ast::BaseType::Named(_) => false,
        ast::BaseType::List(_) => true,
    }
}
