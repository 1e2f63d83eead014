use chrono::Utc;
use vocab::{Functional, Link, NonFunctional, Resolver, TypedObject, Value, VocabResult};

use crate::{Context, LoggableError};

const PERSON : &str = r#"{
	"@context": "https://www.w3.org/ns/activitystreams",
	"id": "https://go-fed.org/foo",
	"name": "Foo Bar",
	"inbox": "https://go-fed.org/foo/inbox",
	"outbox": "https://go-fed.org/foo/outbox",
	"type": "Person",
	"url": "https://go-fed.org/foo"
}"#;

pub fn demo(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
	let note = build_note(ctx)?;
	println!("{}", ctx.emit(vocab::encode(&note)?)?);

	// functional: at most one value, which may be a time or a link
	let mut published = Functional::default();
	published.set(Utc::now());
	match published.get() {
		Some(Value::Link(iri)) => println!("published at {iri}"),
		Some(when) => println!("published on {when}"),
		None => println!("not published"),
	}

	// non functional: many values, embedded objects and links mixed
	let mut object = NonFunctional::default();
	object.append(note.clone());
	object.prepend(TypedObject::new("Article", &ctx.schema)?);
	object.append(Link::parse("https://go-fed.org/foo")?);
	for (i, value) in object.iter().enumerate() {
		println!("object[{i}] is {}: {value}", value.kind());
	}

	let mut create = TypedObject::new("Create", &ctx.schema)?;
	if let Some(slot) = create.functional_mut("published") {
		*slot = published;
	}
	if let Some(slot) = create.non_functional_mut("object") {
		*slot = object;
	}
	println!("{}", ctx.emit(vocab::encode(&create)?)?);

	let resolver : Resolver<Option<TypedObject>> = Resolver::new(ctx.schema.clone())
		.with("Person", |person| Ok(Some(person)))?
		.with("Note", |note| {
			println!("got a note: {}", crate::summary(&note));
			Ok(None)
		})?;

	let person = resolver
		.resolve_json(serde_json::from_str(PERSON)?)
		.warn_failed("could not resolve person")
		.flatten();
	if let Some(person) = person {
		println!("{}", ctx.emit(vocab::encode(&person)?)?);
	}

	// known type without a callback, then a type foreign to the schema
	resolver
		.resolve_json(serde_json::json!({ "type": "Collection" }))
		.warn_failed("json resolver skipped collection");
	resolver
		.resolve_json(serde_json::json!({ "type": "ChatMessage" }))
		.info_failed("json resolver skipped chat message");

	let collection = TypedObject::new("Collection", &ctx.schema)?;
	println!("{}", ctx.emit(vocab::encode(&collection)?)?);

	let type_resolver : Resolver = Resolver::new(ctx.schema.clone())
		.with("OrderedCollection", |oc| {
			println!("ordered collection: {}", crate::summary(&oc));
			Ok(())
		})?
		.with("Collection", |c| {
			println!("collection: {}", crate::summary(&c));
			Ok(())
		})?;
	type_resolver
		.resolve(collection)
		.err_failed("type resolver could not dispatch collection");

	Ok(())
}

fn build_note(ctx: &Context) -> VocabResult<TypedObject> {
	let mut note = TypedObject::new("Note", &ctx.schema)?;
	note.set_id(Some(Link::parse("https://example.com/some/path/to/this/note")?));
	// declared slots always exist, they're only missing when the schema doesn't know them
	match note.functional_mut("content") {
		Some(content) => content.set("Hello, world!"),
		None => tracing::warn!("schema declares no functional content for Note"),
	}
	Ok(note)
}

#[cfg(test)]
mod test {
	#[test]
	fn demo_runs_against_builtin_schema() {
		let ctx = crate::test_context();
		super::demo(&ctx).unwrap();
	}

	#[test]
	fn demo_note_has_id_and_content() {
		let ctx = crate::test_context();
		let note = super::build_note(&ctx).unwrap();
		assert_eq!(
			vocab::encode_value(&note).unwrap(),
			serde_json::json!({
				"id": "https://example.com/some/path/to/this/note",
				"type": "Note",
				"content": "Hello, world!",
			}),
		);
	}

	#[test]
	fn demo_fails_cleanly_without_expected_types() {
		let mut ctx = crate::test_context();
		ctx.schema = std::sync::Arc::new(vocab::Schema::default());
		assert!(super::demo(&ctx).is_err());
	}
}
