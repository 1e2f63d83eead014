use chrono::{DateTime, Utc};

use crate::{accessors, strenum, Link, TypedObject};

strenum! {
	pub enum ValueKind {
		String,
		DateTime,
		Number,
		Boolean,
		Link,
		Object
	};
}

/// simple scalar carried by a property
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
	String(String),
	DateTime(DateTime<Utc>),
	Number(serde_json::Number),
	Boolean(bool),
}

impl Literal {
	pub fn kind(&self) -> ValueKind {
		match self {
			Literal::String(_) => ValueKind::String,
			Literal::DateTime(_) => ValueKind::DateTime,
			Literal::Number(_) => ValueKind::Number,
			Literal::Boolean(_) => ValueKind::Boolean,
		}
	}
}

impl std::fmt::Display for Literal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Literal::String(x) => f.write_str(x),
			Literal::DateTime(x) => f.write_str(&x.to_rfc3339()),
			Literal::Number(x) => write!(f, "{x}"),
			Literal::Boolean(x) => write!(f, "{x}"),
		}
	}
}

/// anything a property slot can hold: a literal, a link to something, or something embedded
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
	Literal(Literal),
	Link(Link),
	Object(Box<TypedObject>),
}

impl Value {
	pub fn kind(&self) -> ValueKind {
		match self {
			Value::Literal(l) => l.kind(),
			Value::Link(_) => ValueKind::Link,
			Value::Object(_) => ValueKind::Object,
		}
	}

	accessors! {
		string -> &str { Value::Literal(Literal::String(x)) => x.as_str() }
		datetime -> DateTime<Utc> { Value::Literal(Literal::DateTime(x)) => *x }
		number -> &serde_json::Number { Value::Literal(Literal::Number(x)) => x }
		boolean -> bool { Value::Literal(Literal::Boolean(x)) => *x }
		link -> &Link { Value::Link(x) => x }
		object -> &TypedObject { Value::Object(x) => x.as_ref() }
	}

	pub fn as_object_mut(&mut self) -> Option<&mut TypedObject> {
		match self {
			Value::Object(x) => Some(x.as_mut()),
			_ => None,
		}
	}

	pub fn into_object(self) -> Option<TypedObject> {
		match self {
			Value::Object(x) => Some(*x),
			_ => None,
		}
	}

	/// link itself, or id of embedded object; literals have no id
	pub fn id(&self) -> Option<&Link> {
		match self {
			Value::Literal(_) => None,
			Value::Link(l) => Some(l),
			Value::Object(o) => o.id(),
		}
	}
}

impl std::fmt::Display for Value {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Literal(l) => write!(f, "{l}"),
			Value::Link(l) => write!(f, "{l}"),
			Value::Object(o) => match o.id() {
				Some(id) => write!(f, "{}({id})", o.type_tag()),
				None => write!(f, "{}(anonymous)", o.type_tag()),
			},
		}
	}
}

impl From<Literal> for Value {
	fn from(value: Literal) -> Self {
		Value::Literal(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Literal(Literal::String(value.to_string()))
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Literal(Literal::String(value))
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::Literal(Literal::DateTime(value))
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Literal(Literal::Boolean(value))
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::Literal(Literal::Number(value.into()))
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Literal(Literal::Number(value.into()))
	}
}

impl From<serde_json::Number> for Value {
	fn from(value: serde_json::Number) -> Self {
		Value::Literal(Literal::Number(value))
	}
}

impl From<Link> for Value {
	fn from(value: Link) -> Self {
		Value::Link(value)
	}
}

impl From<TypedObject> for Value {
	fn from(value: TypedObject) -> Self {
		Value::Object(Box::new(value))
	}
}
