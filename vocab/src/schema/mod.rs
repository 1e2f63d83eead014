#[cfg(feature = "activitystreams")]
mod activitystreams;

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use crate::{Cardinality, ValueKind};

/// names every object carries, which can't be redeclared as properties
pub const RESERVED: [&str; 2] = ["id", "type"];

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
	#[error("type '{0}' declared twice")]
	DuplicateType(String),

	#[error("type '{type_tag}' declares property '{property}' twice")]
	DuplicateProperty {
		type_tag: String,
		property: String,
	},

	#[error("type '{type_tag}' cannot declare reserved property '{property}'")]
	ReservedProperty {
		type_tag: String,
		property: String,
	},

	#[error("type '{type_tag}' extends undeclared type '{parent}'")]
	UnknownParent {
		type_tag: String,
		parent: String,
	},

	#[error("type '{0}' extends itself")]
	InheritanceCycle(String),

	#[error("invalid schema file: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("could not read schema file: {0}")]
	Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PropertyDecl {
	pub name: String,
	pub cardinality: Cardinality,
	pub kinds: Vec<ValueKind>,
}

impl PropertyDecl {
	pub fn allows(&self, kind: ValueKind) -> bool {
		self.kinds.contains(&kind)
	}
}

/// declaration of a type tag and its property slots
///
/// once part of a built [Schema], `properties` also lists everything inherited, ancestors first
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TypeDecl {
	pub name: String,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub extends: Option<String>,

	#[serde(default)]
	pub properties: Vec<PropertyDecl>,
}

impl TypeDecl {
	pub fn new(name: impl ToString) -> Self {
		TypeDecl {
			name: name.to_string(),
			extends: None,
			properties: Vec::new(),
		}
	}

	pub fn extends(mut self, parent: impl ToString) -> Self {
		self.extends = Some(parent.to_string());
		self
	}

	pub fn property(mut self, name: impl ToString, cardinality: Cardinality, kinds: &[ValueKind]) -> Self {
		self.properties.push(PropertyDecl { name: name.to_string(), cardinality, kinds: kinds.to_vec() });
		self
	}

	pub fn functional(self, name: impl ToString, kinds: &[ValueKind]) -> Self {
		self.property(name, Cardinality::Functional, kinds)
	}

	pub fn non_functional(self, name: impl ToString, kinds: &[ValueKind]) -> Self {
		self.property(name, Cardinality::NonFunctional, kinds)
	}

	pub fn get(&self, name: &str) -> Option<&PropertyDecl> {
		self.properties.iter().find(|p| p.name == name)
	}
}

#[derive(Debug, Default)]
pub struct SchemaBuilder {
	decls: Vec<TypeDecl>,
}

impl SchemaBuilder {
	pub fn declare(mut self, decl: TypeDecl) -> Self {
		self.decls.push(decl);
		self
	}

	pub fn build(self) -> Result<Schema, SchemaError> {
		let mut own : BTreeMap<String, TypeDecl> = BTreeMap::new();
		for decl in self.decls {
			let mut seen = HashSet::new();
			for prop in &decl.properties {
				if RESERVED.contains(&prop.name.as_str()) {
					return Err(SchemaError::ReservedProperty { type_tag: decl.name.clone(), property: prop.name.clone() });
				}
				if !seen.insert(prop.name.as_str()) {
					return Err(SchemaError::DuplicateProperty { type_tag: decl.name.clone(), property: prop.name.clone() });
				}
			}
			if own.contains_key(&decl.name) {
				return Err(SchemaError::DuplicateType(decl.name));
			}
			own.insert(decl.name.clone(), decl);
		}

		let mut types = BTreeMap::new();
		for (name, decl) in own.iter() {
			// walk up to the root, then apply declarations root first
			let mut chain = vec![decl];
			let mut visited = HashSet::from([name.as_str()]);
			let mut cursor = decl;
			while let Some(parent) = &cursor.extends {
				let Some(parent_decl) = own.get(parent) else {
					return Err(SchemaError::UnknownParent { type_tag: cursor.name.clone(), parent: parent.clone() });
				};
				if !visited.insert(parent.as_str()) {
					return Err(SchemaError::InheritanceCycle(name.clone()));
				}
				chain.push(parent_decl);
				cursor = parent_decl;
			}

			let mut properties : Vec<PropertyDecl> = Vec::new();
			for layer in chain.into_iter().rev() {
				for prop in &layer.properties {
					match properties.iter_mut().find(|p| p.name == prop.name) {
						Some(inherited) => *inherited = prop.clone(),
						None => properties.push(prop.clone()),
					}
				}
			}

			types.insert(
				name.clone(),
				Arc::new(TypeDecl { name: name.clone(), extends: decl.extends.clone(), properties }),
			);
		}

		tracing::debug!("built schema with {} types", types.len());
		Ok(Schema { types })
	}
}

#[derive(serde::Deserialize)]
struct SchemaFile {
	#[serde(rename = "type", default)]
	types: Vec<TypeDecl>,
}

/// process-wide declaration of known types, read-only once built
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
	types: BTreeMap<String, Arc<TypeDecl>>,
}

impl Schema {
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder::default()
	}

	/// parse `[[type]]` tables, see [TypeDecl] for fields
	pub fn from_toml(raw: &str) -> Result<Self, SchemaError> {
		let file : SchemaFile = toml::from_str(raw)?;
		file.types
			.into_iter()
			.fold(Schema::builder(), SchemaBuilder::declare)
			.build()
	}

	pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, SchemaError> {
		let raw = std::fs::read_to_string(path)?;
		Self::from_toml(&raw)
	}

	pub fn contains(&self, type_tag: &str) -> bool {
		self.types.contains_key(type_tag)
	}

	pub fn get(&self, type_tag: &str) -> Option<&TypeDecl> {
		self.types.get(type_tag).map(|x| x.as_ref())
	}

	pub(crate) fn decl(&self, type_tag: &str) -> Option<Arc<TypeDecl>> {
		self.types.get(type_tag).cloned()
	}

	pub fn types(&self) -> impl Iterator<Item = &TypeDecl> {
		self.types.values().map(|x| x.as_ref())
	}

	pub fn len(&self) -> usize {
		self.types.len()
	}

	pub fn is_empty(&self) -> bool {
		self.types.is_empty()
	}

	/// parent chain of given type, closest first, not including the type itself
	pub fn ancestors(&self, type_tag: &str) -> Vec<&str> {
		let mut out = Vec::new();
		let mut cursor = self.get(type_tag);
		while let Some(parent) = cursor.and_then(|d| d.extends.as_deref()) {
			out.push(parent);
			cursor = self.get(parent);
		}
		out
	}

	/// true if type is given parent or inherits from it
	pub fn is_a(&self, type_tag: &str, parent: &str) -> bool {
		self.contains(type_tag) && (type_tag == parent || self.ancestors(type_tag).contains(&parent))
	}
}

#[cfg(test)]
pub(crate) fn test_schema() -> Schema {
	const TEXT : &[ValueKind] = &[ValueKind::String];
	const NODE : &[ValueKind] = &[ValueKind::Link, ValueKind::Object];
	Schema::builder()
		.declare(
			TypeDecl::new("Object")
				.functional("name", TEXT)
				.non_functional("to", NODE)
				.non_functional("attributedTo", NODE)
		)
		.declare(
			TypeDecl::new("Note")
				.extends("Object")
				.functional("content", TEXT)
				.functional("published", &[ValueKind::DateTime, ValueKind::Link])
				.non_functional("object", &[ValueKind::Link, ValueKind::Object])
				.non_functional("tag", &[ValueKind::String, ValueKind::Link])
		)
		.declare(
			TypeDecl::new("Person")
				.extends("Object")
				.functional("inbox", &[ValueKind::Link])
				.functional("outbox", &[ValueKind::Link])
				.non_functional("url", &[ValueKind::Link])
				.functional("discoverable", &[ValueKind::Boolean])
		)
		.declare(
			TypeDecl::new("Collection")
				.extends("Object")
				.functional("totalItems", &[ValueKind::Number])
				.non_functional("items", NODE)
		)
		.build()
		.expect("test schema is valid")
}
