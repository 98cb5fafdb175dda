use super::ir::*;
use crate::encoding::EncodingParams;
use crate::traversal::{walk_module, ResolveError, ResolvedKind, SchemaVisitor, TypeContext};
use asdl_types::{BuiltinType, Constructor, Field, Product, Sum};
use thiserror::Error;

/* Tag values are a byte and 0 is reserved */
pub const MAX_CONSTRUCTORS: usize = u8::MAX as usize;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    #[error("attribute '{attribute}' of '{owner}' has type '{type_name}', but attributes must be builtin scalars")]
    NonBuiltinAttribute {
        owner: String,
        attribute: String,
        type_name: String,
    },
    #[error("sum '{type_name}' has {count} constructors; at most 255 fit in a tag byte")]
    TooManyConstructors { type_name: String, count: usize },
    #[error("field '{field}' of '{owner}' cannot be both optional and repeated")]
    OptionalSequence { owner: String, field: String },
}

/// Collects the names that need an opaque forward declaration: every
/// compound sum and every product, in declaration order.
#[derive(Debug, Default)]
pub struct ForwardDeclCollector {
    names: Vec<String>,
}

impl ForwardDeclCollector {
    pub fn into_names(self) -> Vec<String> {
        self.names
    }
}

impl SchemaVisitor for ForwardDeclCollector {
    type Error = BuildError;

    fn visit_compound_sum(&mut self, _: &TypeContext<'_>, name: &str, _: &Sum) -> Result<(), BuildError> {
        self.names.push(name.to_string());
        Ok(())
    }

    fn visit_product(&mut self, _: &TypeContext<'_>, name: &str, _: &Product) -> Result<(), BuildError> {
        self.names.push(name.to_string());
        Ok(())
    }
}

/// Builds enumerations, tagged bases and accessor classes. Accessors whose
/// body downcasts are also queued for the deferred section; the queue is
/// only handed out after the walk has finished.
pub struct ClassDefBuilder {
    params: EncodingParams,
    declarations: Vec<DeclIr>,
    deferred: Vec<DeferredAccessor>,
}

impl ClassDefBuilder {
    pub fn new(params: EncodingParams) -> Self {
        Self {
            params,
            declarations: Vec::new(),
            deferred: Vec::new(),
        }
    }

    pub fn into_parts(self) -> (Vec<DeclIr>, Vec<DeferredAccessor>) {
        (self.declarations, self.deferred)
    }

    fn build_enum(&self, name: &str, sum: &Sum) -> Result<EnumIr, BuildError> {
        if sum.variants.len() > MAX_CONSTRUCTORS {
            return Err(BuildError::TooManyConstructors {
                type_name: name.to_string(),
                count: sum.variants.len(),
            });
        }
        let variants = sum
            .variants
            .iter()
            .zip(1..=u8::MAX)
            .map(|(variant, value)| EnumVariantIr {
                name: variant.name.clone(),
                value,
            })
            .collect();
        Ok(EnumIr {
            type_name: name.to_string(),
            variants,
        })
    }

    fn build_attributes(&self, owner: &str, attributes: &[Field]) -> Result<Vec<AttributeIr>, BuildError> {
        attributes
            .iter()
            .map(|attr| match attr.builtin() {
                Some(builtin) => Ok(AttributeIr {
                    name: attr.name.clone(),
                    builtin,
                }),
                None => Err(BuildError::NonBuiltinAttribute {
                    owner: owner.to_string(),
                    attribute: attr.name.clone(),
                    type_name: attr.type_name.clone(),
                }),
            })
            .collect()
    }

    fn build_accessor(
        &self,
        ctx: &TypeContext<'_>,
        owner: &str,
        field: &Field,
        offset: u32,
    ) -> Result<AccessorIr, BuildError> {
        if field.is_sequence && field.is_optional {
            return Err(BuildError::OptionalSequence {
                owner: owner.to_string(),
                field: field.name.clone(),
            });
        }
        let value = match ctx.resolve(owner, field)? {
            ResolvedKind::Builtin(BuiltinType::Int) => ValueKind::Int,
            ResolvedKind::Builtin(BuiltinType::Bool) => ValueKind::Bool,
            ResolvedKind::Builtin(BuiltinType::String) => ValueKind::Str,
            ResolvedKind::Builtin(BuiltinType::Id) => ValueKind::Id,
            ResolvedKind::Enum(typedef) => ValueKind::Enum {
                type_name: typedef.name.clone(),
            },
            ResolvedKind::Class(typedef) => ValueKind::Object {
                type_name: typedef.name.clone(),
                optional: field.is_optional,
            },
        };
        let cardinality = if field.is_sequence {
            Cardinality::Repeated {
                stride: self.params.array_stride,
            }
        } else {
            Cardinality::Single
        };
        Ok(AccessorIr {
            field: field.name.clone(),
            offset,
            value,
            cardinality,
        })
    }

    /* Lay out fields one slot apart starting at `first_offset` */
    fn build_class(
        &mut self,
        ctx: &TypeContext<'_>,
        owner: &str,
        class: ClassRef,
        fields: &[Field],
        first_offset: u32,
        attributes: Vec<AttributeIr>,
    ) -> Result<ClassIr, BuildError> {
        let mut accessors = Vec::with_capacity(fields.len());
        let mut offset = first_offset;
        for field in fields {
            let accessor = self.build_accessor(ctx, owner, field, offset)?;
            if accessor.is_deferred() {
                self.deferred.push(DeferredAccessor {
                    owner: class.clone(),
                    accessor: accessor.clone(),
                });
            }
            accessors.push(accessor);
            offset += self.params.ref_width;
        }
        tracing::debug!(
            owner,
            accessors = accessors.len(),
            deferred = self.deferred.len(),
            "built class"
        );
        Ok(ClassIr {
            class,
            accessors,
            attributes,
        })
    }

    fn build_variant(
        &mut self,
        ctx: &TypeContext<'_>,
        sum_name: &str,
        constructor: &Constructor,
    ) -> Result<Option<ClassIr>, BuildError> {
        /* Field-less constructors are represented by their tag alone */
        if constructor.fields.is_empty() {
            return Ok(None);
        }
        let class = ClassRef::Variant {
            sum_name: sum_name.to_string(),
            constructor: constructor.name.clone(),
        };
        /* offset 0 holds the tag byte */
        self.build_class(ctx, &constructor.name, class, &constructor.fields, 1, Vec::new())
            .map(Some)
    }
}

impl SchemaVisitor for ClassDefBuilder {
    type Error = BuildError;

    fn visit_simple_sum(&mut self, _: &TypeContext<'_>, name: &str, sum: &Sum) -> Result<(), BuildError> {
        let enum_ir = self.build_enum(name, sum)?;
        /* an enum has nowhere to store attributes, but they must still be builtin */
        self.build_attributes(name, &sum.attributes)?;
        self.declarations.push(DeclIr::Enum(enum_ir));
        Ok(())
    }

    fn visit_compound_sum(&mut self, ctx: &TypeContext<'_>, name: &str, sum: &Sum) -> Result<(), BuildError> {
        let enum_ir = self.build_enum(name, sum)?;
        let attributes = self.build_attributes(name, &sum.attributes)?;
        self.declarations.push(DeclIr::Enum(enum_ir));
        self.declarations.push(DeclIr::TaggedBase(TaggedBaseIr {
            type_name: name.to_string(),
            attributes,
        }));
        for constructor in &sum.variants {
            if let Some(class) = self.build_variant(ctx, name, constructor)? {
                self.declarations.push(DeclIr::Class(class));
            }
        }
        Ok(())
    }

    fn visit_product(&mut self, ctx: &TypeContext<'_>, name: &str, product: &Product) -> Result<(), BuildError> {
        let attributes = self.build_attributes(name, &product.attributes)?;
        let class = ClassRef::Product {
            type_name: name.to_string(),
        };
        let class = self.build_class(ctx, name, class, &product.fields, 0, attributes)?;
        self.declarations.push(DeclIr::Class(class));
        Ok(())
    }
}

/// Run both visitors over the module and assemble the IR.
pub fn build_module(ctx: &TypeContext<'_>, params: EncodingParams) -> Result<ModuleIr, BuildError> {
    let mut forward = ForwardDeclCollector::default();
    walk_module(ctx, &mut forward)?;

    let mut classes = ClassDefBuilder::new(params);
    walk_module(ctx, &mut classes)?;

    let mut ir = ModuleIr::new(ctx.module().name.clone(), params);
    ir.forward_decls = forward.into_names();
    (ir.declarations, ir.deferred) = classes.into_parts();

    tracing::debug!(
        module = %ir.module_name,
        forward_decls = ir.forward_decls.len(),
        declarations = ir.declarations.len(),
        deferred = ir.deferred.len(),
        "built module IR"
    );
    Ok(ir)
}
