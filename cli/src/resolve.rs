use vocab::{ResolveError, Resolver, TypedObject, VocabResult};

use crate::{Context, SkipUnresolved};

pub fn resolve(ctx: &Context, docs: Vec<serde_json::Value>, handle: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
	let types = if handle.is_empty() { ctx.config.resolver.handle.clone() } else { handle };
	let resolver = build_resolver(ctx, types)?;
	let total = docs.len();
	let mut skipped = 0;
	for doc in docs {
		match dispatch(&resolver, doc)? {
			Some(line) => println!("{line}"),
			None => skipped += 1,
		}
	}
	tracing::info!("resolved {} documents, skipped {skipped}", total - skipped);
	Ok(())
}

pub fn build_resolver(ctx: &Context, types: Vec<String>) -> VocabResult<Resolver<String>> {
	let mut resolver : Resolver<String> = Resolver::new(ctx.schema.clone());
	for tag in types {
		resolver.register(tag, |object: TypedObject| {
			tracing::debug!("handling {}", object.type_tag());
			Ok(summary(&object))
		})?;
	}
	Ok(resolver)
}

/// unknown and unwanted documents are skipped, anything else is a failure
fn dispatch(resolver: &Resolver<String>, doc: serde_json::Value) -> Result<Option<String>, ResolveError> {
	resolver.resolve_json(doc).skip_unresolved()
}

/// one line description of an object: type, id and which properties are set
pub fn summary(object: &TypedObject) -> String {
	let set : Vec<&str> = object
		.properties()
		.filter(|(_, p)| !p.is_empty())
		.map(|(name, _)| name)
		.collect();
	let mut out = format!(
		"{} {} [{}]",
		object.type_tag(),
		object.id().map(|x| x.as_str()).unwrap_or("(anonymous)"),
		set.join(", "),
	);
	if !object.extensions().is_empty() {
		out.push_str(&format!(" +{} extensions", object.extensions().len()));
	}
	out
}

#[cfg(test)]
mod test {
	use serde_json::json;

	#[test]
	fn handled_documents_are_summarized() {
		let ctx = crate::test_context();
		let resolver = super::build_resolver(&ctx, vec!["Note".to_string()]).unwrap();
		let line = super::dispatch(&resolver, json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"id": "https://example.com/notes/1",
			"type": "Note",
			"content": "hi",
			"to": ["https://example.com/users/alice"],
		})).unwrap();
		assert_eq!(line.as_deref(), Some("Note https://example.com/notes/1 [content, to] +1 extensions"));
	}

	#[test]
	fn foreign_and_unwanted_documents_are_skipped() {
		let ctx = crate::test_context();
		let resolver = super::build_resolver(&ctx, vec!["Note".to_string()]).unwrap();
		assert_eq!(super::dispatch(&resolver, json!({ "type": "Person" })).unwrap(), None);
		assert_eq!(super::dispatch(&resolver, json!({ "type": "ChatMessage" })).unwrap(), None);
		assert!(super::dispatch(&resolver, json!({ "type": "Note", "content": ["a", "b"] })).is_err());
		assert!(super::dispatch(&resolver, json!({ "content": "typeless" })).is_err());
	}

	#[test]
	fn registering_unknown_types_fails() {
		let ctx = crate::test_context();
		assert!(super::build_resolver(&ctx, vec!["ChatMessage".to_string()]).is_err());
		assert!(super::build_resolver(&ctx, vec!["Note".to_string(), "Note".to_string()]).is_err());
	}
}
