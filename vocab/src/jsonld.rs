pub const ACTIVITYSTREAMS_CONTEXT : &str = "https://www.w3.org/ns/activitystreams";

/// attach a JSON-LD `@context` to encoded documents, no expansion or compaction is done
pub trait LD {
	fn ld_context(self) -> Self;
}

impl LD for serde_json::Map<String, serde_json::Value> {
	fn ld_context(mut self) -> Self {
		if !self.contains_key("@context") {
			self.insert(
				"@context".to_string(),
				serde_json::Value::String(ACTIVITYSTREAMS_CONTEXT.to_string()),
			);
		}
		self
	}
}

impl LD for serde_json::Value {
	fn ld_context(self) -> Self {
		match self {
			serde_json::Value::Object(map) => serde_json::Value::Object(map.ld_context()),
			other => {
				tracing::warn!("cannot add @context to json value different than object");
				other
			},
		}
	}
}
