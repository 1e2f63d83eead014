use std::collections::BTreeMap;
use std::sync::Arc;

use crate::{Functional, Link, NonFunctional, Property, Schema, TypeDecl, Value, VocabError, VocabResult};

/// named aggregate of property slots, shaped by its [TypeDecl]
///
/// every slot declared for the type exists from construction, empty until set. slots are handed
/// out as borrows into the object: mutating a slot obtained with [TypedObject::property_mut]
/// mutates the object itself, there is no copy to store back
#[derive(Debug, Clone, PartialEq)]
pub struct TypedObject {
	decl: Arc<TypeDecl>,
	id: Option<Link>,
	properties: BTreeMap<String, Property>,
	extensions: serde_json::Map<String, serde_json::Value>,
}

impl TypedObject {
	pub fn new(type_tag: &str, schema: &Schema) -> VocabResult<Self> {
		let decl = schema.decl(type_tag)
			.ok_or_else(|| VocabError::UnknownType(type_tag.to_string()))?;
		Ok(Self::from_decl(decl))
	}

	pub(crate) fn from_decl(decl: Arc<TypeDecl>) -> Self {
		let properties = decl.properties
			.iter()
			.map(|p| (p.name.clone(), Property::empty(p.cardinality)))
			.collect();
		TypedObject {
			decl,
			properties,
			id: None,
			extensions: serde_json::Map::new(),
		}
	}

	pub fn type_tag(&self) -> &str {
		&self.decl.name
	}

	pub fn decl(&self) -> &TypeDecl {
		&self.decl
	}

	pub fn id(&self) -> Option<&Link> {
		self.id.as_ref()
	}

	pub fn set_id(&mut self, id: Option<Link>) -> &mut Self {
		self.id = id;
		self
	}

	/// slot for given name, None if the type doesn't declare it (not an error)
	pub fn property(&self, name: &str) -> Option<&Property> {
		self.properties.get(name)
	}

	pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
		self.properties.get_mut(name)
	}

	pub fn functional(&self, name: &str) -> Option<&Functional> {
		self.property(name)?.as_functional()
	}

	pub fn functional_mut(&mut self, name: &str) -> Option<&mut Functional> {
		self.property_mut(name)?.as_functional_mut()
	}

	pub fn non_functional(&self, name: &str) -> Option<&NonFunctional> {
		self.property(name)?.as_non_functional()
	}

	pub fn non_functional_mut(&mut self, name: &str) -> Option<&mut NonFunctional> {
		self.property_mut(name)?.as_non_functional_mut()
	}

	/// replace whatever the slot holds with given value
	///
	/// non functional slots end up holding exactly this one value
	pub fn set_property(&mut self, name: &str, value: impl Into<Value>) -> VocabResult<&mut Self> {
		let type_tag = self.decl.name.clone();
		match self.properties.get_mut(name) {
			Some(Property::Functional(f)) => f.set(value),
			Some(Property::NonFunctional(n)) => {
				n.clear();
				n.append(value);
			},
			None => return Err(VocabError::UndeclaredProperty { type_tag, property: name.to_string() }),
		}
		Ok(self)
	}

	/// first value held by given slot, if any
	pub fn value(&self, name: &str) -> Option<&Value> {
		self.property(name)?.values().next()
	}

	/// all slots in declaration order, empty ones included
	pub fn properties(&self) -> impl Iterator<Item = (&str, &Property)> {
		self.decl.properties
			.iter()
			.filter_map(|p| Some((p.name.as_str(), self.properties.get(&p.name)?)))
	}

	/// wire fields not declared by the schema, kept verbatim
	pub fn extensions(&self) -> &serde_json::Map<String, serde_json::Value> {
		&self.extensions
	}

	pub fn extensions_mut(&mut self) -> &mut serde_json::Map<String, serde_json::Value> {
		&mut self.extensions
	}

	pub fn extension(&self, key: &str) -> Option<&serde_json::Value> {
		self.extensions.get(key)
	}

	pub fn set_extension(&mut self, key: impl ToString, value: serde_json::Value) -> &mut Self {
		self.extensions.insert(key.to_string(), value);
		self
	}
}
