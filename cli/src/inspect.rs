use crate::Context;

pub fn inspect(ctx: &Context, docs: Vec<serde_json::Value>) -> Result<(), Box<dyn std::error::Error>> {
	for doc in docs {
		println!("{}", normalize(ctx, doc)?);
	}
	Ok(())
}

/// decode and encode back, which leaves the document in canonical shape for the schema
pub fn normalize(ctx: &Context, doc: serde_json::Value) -> Result<String, Box<dyn std::error::Error>> {
	let object = vocab::decode(&ctx.schema, doc)?;
	tracing::info!(
		"decoded {} {}",
		object.type_tag(),
		object.id().map(|x| x.as_str()).unwrap_or("(anonymous)"),
	);
	Ok(ctx.emit(vocab::encode(&object)?)?)
}

#[cfg(test)]
mod test {
	use serde_json::json;

	#[test]
	fn normalized_documents_carry_sequences_for_non_functional_properties() {
		let ctx = crate::test_context();
		let out = super::normalize(&ctx, json!({
			"type": "Note",
			"content": "hello",
			"to": "https://www.w3.org/ns/activitystreams#Public",
		})).unwrap();
		let out : serde_json::Value = serde_json::from_str(&out).unwrap();
		assert_eq!(out, json!({
			"type": "Note",
			"content": "hello",
			"to": ["https://www.w3.org/ns/activitystreams#Public"],
		}));
	}

	#[test]
	fn invalid_documents_are_reported() {
		let ctx = crate::test_context();
		assert!(super::normalize(&ctx, json!({ "type": "Note", "published": "someday" })).is_err());
	}
}
