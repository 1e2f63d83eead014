#[derive(Debug, thiserror::Error)]
pub enum VocabError {
	#[error("type '{0}' is not declared in schema")]
	UnknownType(String),

	#[error("object has no 'type' field")]
	MissingType,

	#[error("functional property '{property}' of '{type_tag}' received {count} values")]
	CardinalityViolation {
		type_tag: String,
		property: String,
		count: usize,
	},

	#[error("malformed value for '{property}': {reason}")]
	MalformedValue {
		property: String,
		reason: String,
	},

	#[error("index {index} out of range for sequence of length {len}")]
	IndexOutOfRange {
		index: usize,
		len: usize,
	},

	#[error("type '{0}' already has a registered handler")]
	DuplicateHandler(String),

	#[error("no handler registered for type '{0}'")]
	NoCallbackMatch(String),

	#[error("type '{0}' is unknown to this system")]
	UnhandledType(String),

	#[error("type '{type_tag}' does not declare property '{property}'")]
	UndeclaredProperty {
		type_tag: String,
		property: String,
	},

	#[error("invalid json: {0}")]
	Json(#[from] serde_json::Error),
}

impl VocabError {
	pub(crate) fn malformed(property: &str, reason: impl ToString) -> Self {
		Self::MalformedValue {
			property: property.to_string(),
			reason: reason.to_string(),
		}
	}

	/// type is known but nobody registered a handler for it: usually a programming mistake
	pub fn is_unmatched(&self) -> bool {
		matches!(self, Self::NoCallbackMatch(_))
	}

	/// type is foreign to the schema: usually safe to skip
	pub fn is_unhandled(&self) -> bool {
		matches!(self, Self::UnhandledType(_))
	}
}

pub type VocabResult<T> = Result<T, VocabError>;
