use serde::Serialize;

/// Extracted struct record.
///
/// Registered structs carry their package path and name; inline (anonymous) structs leave
/// both empty and only ever live inside a [`ValueKind::InlineStruct`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Struct {
	/// Declared type name.
	pub name: Box<str>,
	/// Fully qualified package path.
	pub package: Box<str>,
	/// Exported fields in declaration order.
	pub fields: Vec<Field>,
}

/// One exported struct member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
	/// Field identifier as declared.
	pub name: Box<str>,
	/// Field type.
	pub value: Value,
	/// Serialization annotation, when the field carries one.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub json_info: Option<JsonInfo>,
}

/// Canonical field type.
///
/// `is_ptr` and `go_type` are orthogonal to the variant and never take part in equality.
#[derive(Debug, Clone, Serialize)]
pub struct Value {
	/// Shape of the value.
	#[serde(flatten)]
	pub kind: ValueKind,
	/// Whether the declaration went through a pointer.
	pub is_ptr: bool,
	/// Source keyword of a scalar, e.g. `int64` or `uint8`.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub go_type: Option<Box<str>>,
}

/// Value shapes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
	/// Builtin scalar.
	Scalar(ScalarType),
	/// Reference to a named struct by qualified name.
	StructRef(StructType),
	/// Anonymous struct embedded by value.
	InlineStruct(Struct),
	/// Slice or array.
	Array(Box<Value>),
	/// Map keyed by a scalar.
	Map {
		/// Key scalar, [`ScalarType::None`] for non-scalar keys.
		key: ScalarType,
		/// Element type.
		value: Box<Value>,
	},
}

/// Primitive value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
	/// Text.
	String,
	/// Boolean.
	Bool,
	/// Any integer or float.
	Number,
	/// Not a scalar.
	None,
}

/// Qualified reference to a struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StructType {
	/// Referenced type name.
	pub name: Box<str>,
	/// Package path of the referenced type.
	pub package: Box<str>,
}

/// Parsed serialization annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsonInfo {
	/// Wire name override; empty keeps the field name.
	pub name: Box<str>,
	/// Omit the field when it holds its zero value.
	pub omit_empty: bool,
	/// Never serialize the field.
	pub ignore: bool,
	/// Encode the value as a JSON string.
	pub force_string_type: bool,
}

impl Struct {
	/// Create an empty registered struct.
	pub fn new(package: &str, name: &str) -> Self {
		Self {
			name: name.into(),
			package: package.into(),
			fields: Vec::new(),
		}
	}

	/// Create an anonymous struct from already extracted fields.
	pub fn inline(fields: Vec<Field>) -> Self {
		Self {
			name: "".into(),
			package: "".into(),
			fields,
		}
	}

	/// Registry key, `package.Name`.
	pub fn key(&self) -> String {
		qualified_key(&self.package, &self.name)
	}

	/// Whether this is an anonymous struct without registry identity.
	pub fn is_inline(&self) -> bool {
		self.name.is_empty()
	}

	/// Find a field by declared name.
	pub fn field(&self, name: &str) -> Option<&Field> {
		self.fields.iter().find(|field| &*field.name == name)
	}
}

impl StructType {
	/// Build a qualified reference.
	pub fn new(package: &str, name: &str) -> Self {
		Self {
			name: name.into(),
			package: package.into(),
		}
	}

	/// Registry key of the referenced struct.
	pub fn key(&self) -> String {
		qualified_key(&self.package, &self.name)
	}
}

impl Value {
	/// Wrap a shape as a non-pointer value.
	pub fn new(kind: ValueKind) -> Self {
		Self {
			kind,
			is_ptr: false,
			go_type: None,
		}
	}

	/// Scalar value.
	pub fn scalar(scalar: ScalarType) -> Self {
		Self::new(ValueKind::Scalar(scalar))
	}

	/// Scalar value remembering the keyword it was declared with.
	pub fn keyword(scalar: ScalarType, keyword: &str) -> Self {
		Self {
			go_type: Some(keyword.into()),
			..Self::scalar(scalar)
		}
	}

	/// Struct reference value.
	pub fn struct_ref(package: &str, name: &str) -> Self {
		Self::new(ValueKind::StructRef(StructType::new(package, name)))
	}

	/// Slice value.
	pub fn array(elem: Value) -> Self {
		Self::new(ValueKind::Array(Box::new(elem)))
	}

	/// Map value.
	pub fn map(key: ScalarType, value: Value) -> Self {
		Self::new(ValueKind::Map { key, value: Box::new(value) })
	}

	/// Mark as pointer. Never cleared once set.
	pub fn pointer(mut self) -> Self {
		self.is_ptr = true;
		self
	}

	/// Scalar type, if this is a scalar.
	pub fn as_scalar(&self) -> Option<ScalarType> {
		match self.kind {
			ValueKind::Scalar(scalar) => Some(scalar),
			_ => None,
		}
	}

	/// Referenced struct, if this is a struct reference.
	pub fn as_struct_ref(&self) -> Option<&StructType> {
		match &self.kind {
			ValueKind::StructRef(item) => Some(item),
			_ => None,
		}
	}

	/// Element type of arrays and maps.
	pub fn elem(&self) -> Option<&Value> {
		match &self.kind {
			ValueKind::Array(elem) | ValueKind::Map { value: elem, .. } => Some(elem),
			_ => None,
		}
	}
}

impl PartialEq for Value {
	fn eq(&self, other: &Self) -> bool {
		self.kind == other.kind
	}
}

fn qualified_key(package: &str, name: &str) -> String {
	format!("{package}.{name}")
}
