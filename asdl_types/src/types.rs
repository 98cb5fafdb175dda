use serde_derive::{Deserialize, Serialize};

/* Scalar types every schema can reference without declaring them */
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum BuiltinType {
    String,
    Int,
    Bool,
    /* Application token id; treated as an enumeration by generators */
    Id,
}

impl BuiltinType {
    pub const ALL: [BuiltinType; 4] = [
        BuiltinType::String,
        BuiltinType::Int,
        BuiltinType::Bool,
        BuiltinType::Id,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|builtin| builtin.name() == name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinType::String => "string",
            BuiltinType::Int => "int",
            BuiltinType::Bool => "bool",
            BuiltinType::Id => "id",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Field {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub is_sequence: bool,
    #[serde(default)]
    pub is_optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            is_sequence: false,
            is_optional: false,
        }
    }

    /* Mark the field as repeated (`type* name`) */
    pub fn repeated(mut self) -> Self {
        self.is_sequence = true;
        self
    }

    /* Mark the field as optional (`type? name`) */
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /* Builtin scalar this field refers to, if any */
    pub fn builtin(&self) -> Option<BuiltinType> {
        BuiltinType::from_name(&self.type_name)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Constructor {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Constructor {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Sum {
    pub variants: Vec<Constructor>,
    #[serde(default)]
    pub attributes: Vec<Field>,
}

impl Sum {
    /// A sum is simple when no constructor carries fields; it then maps to a
    /// plain enumeration.
    pub fn is_simple(&self) -> bool {
        self.variants.iter().all(|variant| variant.fields.is_empty())
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct Product {
    pub fields: Vec<Field>,
    #[serde(default)]
    pub attributes: Vec<Field>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub enum TypeBody {
    Sum(Sum),
    Product(Product),
}

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone)]
#[serde(rename_all = "kebab-case")]
pub struct TypeDef {
    pub name: String,
    #[serde(with = "serde_yml::with::singleton_map_recursive")]
    pub body: TypeBody,
}

impl TypeDef {
    pub fn sum(name: impl Into<String>, variants: Vec<Constructor>) -> Self {
        Self {
            name: name.into(),
            body: TypeBody::Sum(Sum {
                variants,
                attributes: Vec::new(),
            }),
        }
    }

    pub fn product(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            body: TypeBody::Product(Product {
                fields,
                attributes: Vec::new(),
            }),
        }
    }

    /* Attach attributes to either body kind */
    pub fn with_attributes(mut self, attributes: Vec<Field>) -> Self {
        match &mut self.body {
            TypeBody::Sum(sum) => sum.attributes = attributes,
            TypeBody::Product(product) => product.attributes = attributes,
        }
        self
    }
}

/// An ordered set of type definitions. Declaration order is significant:
/// generators visit definitions in this order and enumeration numbering
/// follows constructor order.
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Module {
    pub name: String,
    #[serde(default)]
    pub types: Vec<TypeDef>,
}

impl Module {
    pub fn new(name: impl Into<String>, types: Vec<TypeDef>) -> Self {
        Self {
            name: name.into(),
            types,
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|typedef| typedef.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_names_round_trip() {
        for builtin in BuiltinType::ALL {
            assert_eq!(BuiltinType::from_name(builtin.name()), Some(builtin));
        }
        assert_eq!(BuiltinType::from_name("word"), None);
        assert_eq!(BuiltinType::from_name("String"), None);
        assert_eq!(BuiltinType::from_name("id"), Some(BuiltinType::Id));
    }

    #[test]
    fn sum_without_fields_is_simple() {
        let def = TypeDef::sum(
            "bool_op",
            vec![Constructor::new("And", vec![]), Constructor::new("Or", vec![])],
        );
        match &def.body {
            TypeBody::Sum(sum) => assert!(sum.is_simple()),
            TypeBody::Product(_) => panic!("expected a sum"),
        }
    }

    #[test]
    fn sum_with_any_field_is_compound() {
        let def = TypeDef::sum(
            "expr",
            vec![
                Constructor::new("Empty", vec![]),
                Constructor::new("Const", vec![Field::new("value", "int")]),
            ],
        );
        match &def.body {
            TypeBody::Sum(sum) => assert!(!sum.is_simple()),
            TypeBody::Product(_) => panic!("expected a sum"),
        }
    }

    #[test]
    fn field_builders_set_flags() {
        let field = Field::new("children", "node").repeated();
        assert!(field.is_sequence);
        assert!(!field.is_optional);
        assert_eq!(field.builtin(), None);

        let field = Field::new("label", "string").optional();
        assert!(field.is_optional);
        assert_eq!(field.builtin(), Some(BuiltinType::String));
    }

    #[test]
    fn attributes_attach_to_products() {
        let def = TypeDef::product("token", vec![Field::new("id", "id")])
            .with_attributes(vec![Field::new("span", "int")]);
        match def.body {
            TypeBody::Product(product) => {
                assert_eq!(product.attributes.len(), 1);
                assert_eq!(product.attributes[0].name, "span");
            }
            TypeBody::Sum(_) => panic!("expected a product"),
        }
    }

    #[test]
    fn module_yaml_uses_singleton_maps() {
        let yaml = r#"
name: demo
types:
  - name: color
    body:
      sum:
        variants:
          - name: Red
          - name: Green
  - name: point
    body:
      product:
        fields:
          - name: x
            type: int
          - name: tags
            type: string
            is-sequence: true
"#;
        let module: Module = serde_yml::from_str(yaml).expect("module should parse");
        assert_eq!(module.name, "demo");
        assert_eq!(module.types.len(), 2);
        match &module.get("point").expect("point defined").body {
            TypeBody::Product(product) => {
                assert_eq!(product.fields[1].name, "tags");
                assert!(product.fields[1].is_sequence);
            }
            TypeBody::Sum(_) => panic!("expected a product"),
        }
    }
}
