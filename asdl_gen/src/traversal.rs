//! Schema traversal shared by every emitter.
//!
//! `walk_module` visits each definition once, in declaration order, and
//! routes it by `TypeShape`. Field types are resolved through an explicit
//! `TypeContext` that is fully built before the walk starts.

use asdl_types::{BuiltinType, Field, Module, Product, Sum, TypeBody, TypeDef};
use indexmap::IndexMap;
use thiserror::Error;

/// Closed classification of a definition as seen by generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape<'a> {
    /* Every constructor is field-less: an enumeration only */
    SimpleSum(&'a Sum),
    /* At least one constructor has fields: tagged classes */
    CompoundSum(&'a Sum),
    Product(&'a Product),
}

impl<'a> TypeShape<'a> {
    pub fn of(typedef: &'a TypeDef) -> Self {
        match &typedef.body {
            TypeBody::Sum(sum) if sum.is_simple() => TypeShape::SimpleSum(sum),
            TypeBody::Sum(sum) => TypeShape::CompoundSum(sum),
            TypeBody::Product(product) => TypeShape::Product(product),
        }
    }

    /* Compound sums and products are emitted as classes */
    pub fn is_class(&self) -> bool {
        !matches!(self, TypeShape::SimpleSum(_))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("type '{type_name}' is defined more than once")]
    DuplicateType { type_name: String },
    #[error("unknown type '{type_name}' for field '{field}' of '{owner}'")]
    UnknownType {
        owner: String,
        field: String,
        type_name: String,
    },
}

/// What a field's declared type name refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKind<'a> {
    Builtin(BuiltinType),
    /* A simple sum, used through its enumeration */
    Enum(&'a TypeDef),
    /* A compound sum or product, used through an object reference */
    Class(&'a TypeDef),
}

/// Immutable name -> definition table for one module.
#[derive(Debug)]
pub struct TypeContext<'a> {
    module: &'a Module,
    types: IndexMap<&'a str, &'a TypeDef>,
}

impl<'a> TypeContext<'a> {
    pub fn new(module: &'a Module) -> Result<Self, ResolveError> {
        let mut types = IndexMap::with_capacity(module.types.len());
        for typedef in &module.types {
            if types.insert(typedef.name.as_str(), typedef).is_some() {
                return Err(ResolveError::DuplicateType {
                    type_name: typedef.name.clone(),
                });
            }
        }
        Ok(Self { module, types })
    }

    pub fn module(&self) -> &'a Module {
        self.module
    }

    pub fn get(&self, name: &str) -> Option<&'a TypeDef> {
        self.types.get(name).copied()
    }

    /* Definitions in declaration order */
    pub fn definitions(&self) -> impl Iterator<Item = &'a TypeDef> + '_ {
        self.types.values().copied()
    }

    /// Resolve a field's type name. Builtin names take precedence over
    /// schema definitions with the same name.
    pub fn resolve(&self, owner: &str, field: &Field) -> Result<ResolvedKind<'a>, ResolveError> {
        if let Some(builtin) = field.builtin() {
            return Ok(ResolvedKind::Builtin(builtin));
        }
        let typedef = self
            .get(&field.type_name)
            .ok_or_else(|| ResolveError::UnknownType {
                owner: owner.to_string(),
                field: field.name.clone(),
                type_name: field.type_name.clone(),
            })?;
        Ok(if TypeShape::of(typedef).is_class() {
            ResolvedKind::Class(typedef)
        } else {
            ResolvedKind::Enum(typedef)
        })
    }
}

/// Per-shape callbacks for `walk_module`. Every hook defaults to a no-op so
/// an emitter only implements the shapes it cares about.
pub trait SchemaVisitor {
    type Error;

    fn visit_simple_sum(
        &mut self,
        _ctx: &TypeContext<'_>,
        _name: &str,
        _sum: &Sum,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_compound_sum(
        &mut self,
        _ctx: &TypeContext<'_>,
        _name: &str,
        _sum: &Sum,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    fn visit_product(
        &mut self,
        _ctx: &TypeContext<'_>,
        _name: &str,
        _product: &Product,
    ) -> Result<(), Self::Error> {
        Ok(())
    }

    /* Called once after the last definition */
    fn finish(&mut self, _ctx: &TypeContext<'_>) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk_module<V: SchemaVisitor>(ctx: &TypeContext<'_>, visitor: &mut V) -> Result<(), V::Error> {
    for typedef in ctx.definitions() {
        let name = typedef.name.as_str();
        match TypeShape::of(typedef) {
            TypeShape::SimpleSum(sum) => visitor.visit_simple_sum(ctx, name, sum)?,
            TypeShape::CompoundSum(sum) => visitor.visit_compound_sum(ctx, name, sum)?,
            TypeShape::Product(product) => visitor.visit_product(ctx, name, product)?,
        }
    }
    visitor.finish(ctx)
}
