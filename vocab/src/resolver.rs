use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value as Json};

use crate::{codec, Schema, TypedObject, VocabError, VocabResult};

/// something that can process a decoded object of one specific type
pub trait Handler<T, E> : Send + Sync {
	fn handle(&self, object: TypedObject) -> Result<T, E>;
}

impl<T, E, F> Handler<T, E> for F
where
	F : Fn(TypedObject) -> Result<T, E> + Send + Sync,
{
	fn handle(&self, object: TypedObject) -> Result<T, E> {
		self(object)
	}
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError<E = VocabError> {
	#[error(transparent)]
	Vocab(#[from] VocabError),

	#[error("handler failed: {0}")]
	Handler(E),
}

impl<E> ResolveError<E> {
	/// schema knows the type but no handler was registered for it
	pub fn is_unmatched(&self) -> bool {
		matches!(self, ResolveError::Vocab(e) if e.is_unmatched())
	}

	/// type is foreign to the schema
	pub fn is_unhandled(&self) -> bool {
		matches!(self, ResolveError::Vocab(e) if e.is_unhandled())
	}

	pub fn into_handler_error(self) -> Option<E> {
		match self {
			ResolveError::Handler(e) => Some(e),
			ResolveError::Vocab(_) => None,
		}
	}
}

/// dispatches objects to the one handler registered for their exact type tag
///
/// there is no fallback to parent types: a handler for `Object` will not receive a `Note`.
/// registering requires `&mut self` while resolving only needs `&self`, so once shared the set
/// of handlers is frozen
pub struct Resolver<T = (), E = VocabError> {
	schema: Arc<Schema>,
	handlers: HashMap<String, Box<dyn Handler<T, E>>>,
}

impl<T, E> Resolver<T, E> {
	pub fn new(schema: Arc<Schema>) -> Self {
		Resolver {
			schema,
			handlers: HashMap::new(),
		}
	}

	pub fn schema(&self) -> &Schema {
		&self.schema
	}

	pub fn register<F>(&mut self, type_tag: impl ToString, handler: F) -> VocabResult<&mut Self>
	where
		F : Fn(TypedObject) -> Result<T, E> + Send + Sync + 'static,
	{
		self.register_handler(type_tag, handler)
	}

	pub fn register_handler<H>(&mut self, type_tag: impl ToString, handler: H) -> VocabResult<&mut Self>
	where
		H : Handler<T, E> + 'static,
	{
		let type_tag = type_tag.to_string();
		if !self.schema.contains(&type_tag) {
			// would never fire
			return Err(VocabError::UnknownType(type_tag));
		}
		if self.handlers.contains_key(&type_tag) {
			return Err(VocabError::DuplicateHandler(type_tag));
		}
		tracing::debug!("registered handler for {type_tag}");
		self.handlers.insert(type_tag, Box::new(handler));
		Ok(self)
	}

	/// builder flavor of [Resolver::register]
	pub fn with<F>(mut self, type_tag: impl ToString, handler: F) -> VocabResult<Self>
	where
		F : Fn(TypedObject) -> Result<T, E> + Send + Sync + 'static,
	{
		self.register(type_tag, handler)?;
		Ok(self)
	}

	pub fn handles(&self, type_tag: &str) -> bool {
		self.handlers.contains_key(type_tag)
	}

	pub fn registered_types(&self) -> Vec<&str> {
		let mut out : Vec<&str> = self.handlers.keys().map(|x| x.as_str()).collect();
		out.sort();
		out
	}

	/// dispatch an already built object
	pub fn resolve(&self, object: TypedObject) -> Result<T, ResolveError<E>> {
		let handler = self.lookup(object.type_tag())?;
		tracing::debug!("dispatching {} to its handler", object.type_tag());
		handler.handle(object).map_err(ResolveError::Handler)
	}

	/// classify, decode and dispatch a wire object
	pub fn resolve_json(&self, value: Json) -> Result<T, ResolveError<E>> {
		match value {
			Json::Object(map) => self.resolve_map(map),
			_ => Err(VocabError::malformed("type", "expected an object").into()),
		}
	}

	pub fn resolve_map(&self, map: Map<String, Json>) -> Result<T, ResolveError<E>> {
		// classify before decoding: foreign or unwanted objects shouldn't need to be valid
		let handler = self.lookup(codec::type_of(&map)?)?;
		let object = codec::decode_map(&self.schema, map)?;
		tracing::debug!("dispatching {} to its handler", object.type_tag());
		handler.handle(object).map_err(ResolveError::Handler)
	}

	fn lookup(&self, type_tag: &str) -> VocabResult<&dyn Handler<T, E>> {
		if !self.schema.contains(type_tag) {
			return Err(VocabError::UnhandledType(type_tag.to_string()));
		}
		self.handlers
			.get(type_tag)
			.map(|h| h.as_ref())
			.ok_or_else(|| VocabError::NoCallbackMatch(type_tag.to_string()))
	}
}
