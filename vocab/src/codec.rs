use chrono::{DateTime, Utc};
use serde_json::{Map, Value as Json};

use crate::{Cardinality, Link, Literal, Property, PropertyDecl, Schema, TypedObject, Value, ValueKind, VocabError, VocabResult};

/// how deep embedded objects may nest before we give up
pub const MAX_DEPTH : usize = 64;

/// reads the `type` field of a wire object
pub fn type_of(map: &Map<String, Json>) -> VocabResult<&str> {
	match map.get("type") {
		None | Some(Json::Null) => Err(VocabError::MissingType),
		Some(Json::String(t)) => Ok(t.as_str()),
		Some(other) => Err(VocabError::malformed("type", format!("expected a string, got {}", json_kind(other)))),
	}
}

pub fn decode(schema: &Schema, value: Json) -> VocabResult<TypedObject> {
	match value {
		Json::Object(map) => decode_map(schema, map),
		other => Err(VocabError::malformed("type", format!("expected an object, got {}", json_kind(&other)))),
	}
}

pub fn decode_map(schema: &Schema, map: Map<String, Json>) -> VocabResult<TypedObject> {
	decode_object(schema, map, 0)
}

/// decode raw wire bytes
pub fn decode_str(schema: &Schema, raw: &str) -> VocabResult<TypedObject> {
	decode(schema, serde_json::from_str(raw)?)
}

pub fn encode(object: &TypedObject) -> VocabResult<Map<String, Json>> {
	encode_object(object, 0)
}

pub fn encode_value(object: &TypedObject) -> VocabResult<Json> {
	Ok(Json::Object(encode(object)?))
}

/// encode to raw wire bytes
pub fn encode_string(object: &TypedObject) -> VocabResult<String> {
	Ok(serde_json::to_string(&encode(object)?)?)
}

fn decode_object(schema: &Schema, map: Map<String, Json>, depth: usize) -> VocabResult<TypedObject> {
	if depth > MAX_DEPTH {
		return Err(VocabError::malformed("type", format!("objects nested deeper than {MAX_DEPTH} levels")));
	}

	let type_tag = type_of(&map)?;
	let decl = schema.decl(type_tag)
		.ok_or_else(|| VocabError::UnknownType(type_tag.to_string()))?;

	let mut object = TypedObject::from_decl(decl.clone());
	for (key, value) in map {
		match key.as_str() {
			"type" => continue,
			"id" => match value {
				Json::Null => {},
				Json::String(id) => { object.set_id(Some(Link::parse_for("id", id)?)); },
				other => return Err(VocabError::malformed("id", format!("expected a string, got {}", json_kind(&other)))),
			},
			_ => match decl.get(&key) {
				Some(prop) => decode_property(schema, &mut object, prop, value, depth)?,
				None => { object.extensions_mut().insert(key, value); },
			},
		}
	}

	tracing::debug!("decoded {} with {} extension fields", object.type_tag(), object.extensions().len());
	Ok(object)
}

fn decode_property(schema: &Schema, object: &mut TypedObject, prop: &PropertyDecl, value: Json, depth: usize) -> VocabResult<()> {
	if let (Cardinality::Functional, Json::Array(arr)) = (prop.cardinality, &value) {
		if arr.len() > 1 {
			return Err(VocabError::CardinalityViolation {
				type_tag: object.type_tag().to_string(),
				property: prop.name.clone(),
				count: arr.len(),
			});
		}
	}

	let values = match value {
		Json::Null => Vec::new(),
		Json::Array(arr) => arr
			.into_iter()
			.map(|x| decode_value(schema, prop, x, depth))
			.collect::<VocabResult<Vec<Value>>>()?,
		x => vec![decode_value(schema, prop, x, depth)?],
	};

	let type_tag = object.type_tag().to_string();
	match object.property_mut(&prop.name) {
		Some(Property::Functional(f)) => {
			if let Some(v) = values.into_iter().next() {
				f.set(v);
			}
		},
		Some(Property::NonFunctional(n)) => {
			for v in values {
				n.append(v);
			}
		},
		None => return Err(VocabError::UndeclaredProperty { type_tag, property: prop.name.clone() }),
	}

	Ok(())
}

fn decode_value(schema: &Schema, prop: &PropertyDecl, value: Json, depth: usize) -> VocabResult<Value> {
	match value {
		Json::String(s) => decode_string(prop, s),
		Json::Number(n) if prop.allows(ValueKind::Number) => Ok(Value::from(n)),
		Json::Bool(b) if prop.allows(ValueKind::Boolean) => Ok(Value::from(b)),
		Json::Object(map) if prop.allows(ValueKind::Object) => Ok(Value::from(decode_object(schema, map, depth + 1)?)),
		Json::Array(_) => Err(VocabError::malformed(&prop.name, "sequences cannot be nested")),
		other => Err(VocabError::malformed(&prop.name, format!("{} not allowed, expected {}", json_kind(&other), expected(prop)))),
	}
}

// absolute uris become links first, then timestamps, plain strings last
fn decode_string(prop: &PropertyDecl, s: String) -> VocabResult<Value> {
	if prop.allows(ValueKind::Link) && Link::is_absolute(&s) {
		return Ok(Value::Link(Link::parse_for(&prop.name, s)?));
	}

	if prop.allows(ValueKind::DateTime) {
		if let Ok(t) = DateTime::parse_from_rfc3339(&s) {
			return Ok(Value::from(t.with_timezone(&Utc)));
		}
	}

	if prop.allows(ValueKind::String) {
		return Ok(Value::from(s));
	}

	Err(VocabError::malformed(&prop.name, format!("'{s}' is not a valid {}", expected(prop))))
}

fn encode_object(object: &TypedObject, depth: usize) -> VocabResult<Map<String, Json>> {
	if depth > MAX_DEPTH {
		return Err(VocabError::malformed("type", format!("objects nested deeper than {MAX_DEPTH} levels")));
	}

	// declared fields are inserted later so they always win over extensions
	let mut map = object.extensions().clone();
	map.insert("type".to_string(), Json::String(object.type_tag().to_string()));
	if let Some(id) = object.id() {
		map.insert("id".to_string(), Json::String(id.to_string()));
	}

	for prop in &object.decl().properties {
		match object.property(&prop.name) {
			Some(Property::Functional(f)) => {
				if let Some(v) = f.get() {
					map.insert(prop.name.clone(), encode_single(prop, v, depth)?);
				}
			},
			// never collapsed to a single value, even with only one element
			Some(Property::NonFunctional(n)) if !n.is_empty() => {
				let values = n
					.iter()
					.map(|v| encode_single(prop, v, depth))
					.collect::<VocabResult<Vec<Json>>>()?;
				map.insert(prop.name.clone(), Json::Array(values));
			},
			_ => {},
		}
	}

	Ok(map)
}

fn encode_single(prop: &PropertyDecl, value: &Value, depth: usize) -> VocabResult<Json> {
	if !prop.allows(value.kind()) {
		return Err(VocabError::malformed(&prop.name, format!("{} not allowed, expected {}", value.kind(), expected(prop))));
	}

	Ok(match value {
		Value::Literal(Literal::String(s)) => Json::String(s.clone()),
		Value::Literal(Literal::DateTime(t)) => Json::String(t.to_rfc3339()),
		Value::Literal(Literal::Number(n)) => Json::Number(n.clone()),
		Value::Literal(Literal::Boolean(b)) => Json::Bool(*b),
		Value::Link(l) => Json::String(l.to_string()),
		Value::Object(o) => Json::Object(encode_object(o, depth + 1)?),
	})
}

fn expected(prop: &PropertyDecl) -> String {
	prop.kinds
		.iter()
		.map(|k| k.as_ref())
		.collect::<Vec<&str>>()
		.join(" or ")
}

fn json_kind(value: &Json) -> &'static str {
	match value {
		Json::Null => "null",
		Json::Bool(_) => "boolean",
		Json::Number(_) => "number",
		Json::String(_) => "string",
		Json::Array(_) => "array",
		Json::Object(_) => "object",
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::{decode, encode, encode_value, decode_str};
	use crate::{schema::test_schema, Link, TypedObject, Value, VocabError};

	#[test]
	fn new_note_encodes_only_what_was_set() {
		let schema = test_schema();
		let mut note = TypedObject::new("Note", &schema).unwrap();
		note.set_property("content", "Hello, world!").unwrap();
		assert_eq!(
			encode_value(&note).unwrap(),
			json!({ "type": "Note", "content": "Hello, world!" }),
		);
	}

	#[test]
	fn decoded_objects_survive_a_round_trip() {
		let schema = test_schema();
		let wire = json!({
			"@context": "https://www.w3.org/ns/activitystreams",
			"id": "https://example.com/some/path/to/this/note",
			"type": "Note",
			"content": "hello world!",
			"published": "2024-06-04T17:09:20Z",
			"to": "https://example.com/users/root/followers",
			"tag": ["#rust", "https://example.com/tags/rust"],
			"attributedTo": {
				"id": "https://example.com/users/root",
				"type": "Person",
				"name": "root",
				"inbox": "https://example.com/users/root/inbox",
				"discoverable": true,
				"publicKey": { "id": "https://example.com/users/root#main-key" },
			},
			"object": [],
			"customField": "x",
		});

		let first = decode(&schema, wire).unwrap();
		let encoded = encode_value(&first).unwrap();
		let second = decode(&schema, encoded.clone()).unwrap();
		assert_eq!(first, second);

		// structural cardinality is kept on the way out
		assert_eq!(encoded["to"], json!(["https://example.com/users/root/followers"]));
		assert_eq!(encoded["published"], json!("2024-06-04T17:09:20+00:00"));
		assert!(encoded.get("object").is_none());
		assert_eq!(encoded["attributedTo"][0]["inbox"], json!("https://example.com/users/root/inbox"));
		assert_eq!(encoded["attributedTo"][0]["publicKey"], json!({ "id": "https://example.com/users/root#main-key" }));
		assert_eq!(encoded["@context"], json!("https://www.w3.org/ns/activitystreams"));
	}

	#[test]
	fn strings_are_classified_by_allowed_kinds() {
		let schema = test_schema();
		let note = decode(&schema, json!({
			"type": "Note",
			"content": "https://this.is/just/text",
			"published": "https://go-fed.org/some/path",
			"tag": ["#rust", "https://example.com/tags/rust"],
		})).unwrap();

		assert!(note.value("content").unwrap().is_string());
		assert!(note.functional("published").unwrap().get().unwrap().is_link());
		let tags = note.non_functional("tag").unwrap();
		assert!(tags.at(0).unwrap().is_string());
		assert!(tags.at(1).unwrap().is_link());

		// scheme-looking prose is still prose
		let note = decode(&schema, json!({ "type": "Note", "tag": ["Re: foo bar"] })).unwrap();
		assert_eq!(note.non_functional("tag").unwrap().at(0).unwrap().as_string(), Some("Re: foo bar"));

		let note = decode(&schema, json!({ "type": "Note", "published": "2024-06-04T19:09:20+02:00" })).unwrap();
		let published = note.value("published").and_then(Value::as_datetime).unwrap();
		assert_eq!(published.to_rfc3339(), "2024-06-04T17:09:20+00:00");
	}

	#[test]
	fn functional_references_encode_as_bare_uris() {
		let schema = test_schema();
		let mut note = TypedObject::new("Note", &schema).unwrap();
		note.set_property("published", Link::parse("https://example.com/clock/now").unwrap()).unwrap();
		let encoded = encode(&note).unwrap();
		assert_eq!(encoded["published"], json!("https://example.com/clock/now"));

		let mut person = TypedObject::new("Person", &schema).unwrap();
		person.set_property("inbox", Link::parse("https://example.com/users/root/inbox").unwrap()).unwrap();
		assert_eq!(encode(&person).unwrap()["inbox"], json!("https://example.com/users/root/inbox"));
	}

	#[test]
	fn functional_property_rejects_many_values() {
		let schema = test_schema();
		let res = decode(&schema, json!({ "type": "Note", "content": ["a", "b"] }));
		assert!(matches!(res, Err(VocabError::CardinalityViolation { count: 2, ref property, .. }) if property == "content"));

		let note = decode(&schema, json!({ "type": "Note", "content": "a" })).unwrap();
		assert_eq!(note.functional("content").unwrap().get(), Some(&Value::from("a")));

		let note = decode(&schema, json!({ "type": "Note", "content": ["a"] })).unwrap();
		assert_eq!(note.value("content").and_then(Value::as_string), Some("a"));

		let note = decode(&schema, json!({ "type": "Note", "content": [] })).unwrap();
		assert!(!note.functional("content").unwrap().is_set());
	}

	#[test]
	fn single_value_for_non_functional_becomes_sequence() {
		let schema = test_schema();
		let note = decode(&schema, json!({ "type": "Note", "to": "https://example.com/users/alice" })).unwrap();
		let to = note.non_functional("to").unwrap();
		assert_eq!(to.len(), 1);
		assert_eq!(to.at(0).unwrap().as_link().map(Link::as_str), Some("https://example.com/users/alice"));
	}

	#[test]
	fn unknown_fields_are_preserved_verbatim() {
		let schema = test_schema();
		let note = decode(&schema, json!({
			"type": "Note",
			"customField": "x",
			"nested": { "a": [1, 2, { "b": null }] },
		})).unwrap();
		assert_eq!(note.extension("customField"), Some(&json!("x")));

		let out = encode(&note).unwrap();
		assert_eq!(out.get("customField"), Some(&json!("x")));
		assert_eq!(out.get("nested"), Some(&json!({ "a": [1, 2, { "b": null }] })));
	}

	#[test]
	fn null_means_absent() {
		let schema = test_schema();
		let note = decode(&schema, json!({ "type": "Note", "id": null, "content": null, "to": null })).unwrap();
		assert!(note.id().is_none());
		assert_eq!(encode_value(&note).unwrap(), json!({ "type": "Note" }));
	}

	#[test]
	fn type_field_is_checked_first() {
		let schema = test_schema();
		assert!(matches!(decode(&schema, json!({ "content": "a" })), Err(VocabError::MissingType)));
		assert!(matches!(decode(&schema, json!({ "type": "Article" })), Err(VocabError::UnknownType(t)) if t == "Article"));
		assert!(matches!(decode(&schema, json!({ "type": ["Note"] })), Err(VocabError::MalformedValue { .. })));
		assert!(matches!(decode(&schema, json!("Note")), Err(VocabError::MalformedValue { .. })));
	}

	#[test]
	fn wrong_shapes_are_malformed() {
		let schema = test_schema();
		for wire in [
			json!({ "type": "Note", "id": "/relative/note" }),
			json!({ "type": "Note", "id": 12 }),
			json!({ "type": "Note", "published": "yesterday" }),
			json!({ "type": "Note", "content": { "type": "Note" } }),
			json!({ "type": "Note", "to": [["https://example.com/a"]] }),
			json!({ "type": "Note", "to": [null] }),
			json!({ "type": "Person", "inbox": 3 }),
			json!({ "type": "Person", "discoverable": "yes" }),
			json!({ "type": "Person", "id": "https://example.com/u/a b" }),
			json!({ "type": "Person", "inbox": "https://example.com/in box" }),
			json!({ "type": "Person", "outbox": " https://example.com/outbox" }),
			json!({ "type": "Note", "to": ["https://exa\tmple.com/"] }),
		] {
			let res = decode(&schema, wire.clone());
			assert!(matches!(res, Err(VocabError::MalformedValue { .. })), "accepted {wire}");
		}
	}

	#[test]
	fn nested_failure_fails_the_whole_object() {
		let schema = test_schema();
		let res = decode(&schema, json!({
			"type": "Note",
			"content": "fine",
			"object": [{ "type": "Note" }, { "type": "Weird" }],
		}));
		assert!(matches!(res, Err(VocabError::UnknownType(t)) if t == "Weird"));
	}

	#[test]
	fn deep_nesting_is_refused_without_crashing() {
		let schema = test_schema();
		let mut wire = json!({ "type": "Note" });
		for _ in 0..200 {
			wire = json!({ "type": "Note", "object": wire });
		}
		assert!(matches!(decode(&schema, wire), Err(VocabError::MalformedValue { .. })));
	}

	#[test]
	fn invalid_json_text_is_reported() {
		let schema = test_schema();
		assert!(matches!(decode_str(&schema, "{ \"type\": "), Err(VocabError::Json(_))));
		let person = decode_str(&schema, r#"{ "type": "Person", "name": "Foo Bar" }"#).unwrap();
		assert_eq!(person.value("name").and_then(Value::as_string), Some("Foo Bar"));
	}

	#[test]
	fn encode_validates_values_against_schema() {
		let schema = test_schema();
		let mut note = TypedObject::new("Note", &schema).unwrap();
		note.set_property("content", Link::parse("https://example.com").unwrap()).unwrap();
		assert!(matches!(encode(&note), Err(VocabError::MalformedValue { ref property, .. }) if property == "content"));

		note.set_property("content", "text").unwrap();
		note.set_property("published", chrono::Utc::now()).unwrap();
		assert!(encode(&note).is_ok());
	}

	#[test]
	fn declared_fields_win_over_extensions() {
		let schema = test_schema();
		let mut note = TypedObject::new("Note", &schema).unwrap();
		note.set_extension("type", json!("Sneaky"));
		note.set_extension("content", json!("shadowed"));
		note.set_property("content", "real").unwrap();
		let out = encode(&note).unwrap();
		assert_eq!(out.get("type"), Some(&json!("Note")));
		assert_eq!(out.get("content"), Some(&json!("real")));
	}
}
