// https://www.w3.org/TR/activitystreams-vocabulary/

use super::{Schema, SchemaError, TypeDecl};
use crate::ValueKind;

const TEXT : &[ValueKind] = &[ValueKind::String];
const NUMBER : &[ValueKind] = &[ValueKind::Number];
const TIME : &[ValueKind] = &[ValueKind::DateTime, ValueKind::Link];
const LINK : &[ValueKind] = &[ValueKind::Link];
const NODE : &[ValueKind] = &[ValueKind::Link, ValueKind::Object];

const ACTIVITY_TYPES : [&str; 28] = [
	"Accept", "Add", "Announce", "Arrive", "Block", "Create", "Delete", "Dislike", "Flag",
	"Follow", "Ignore", "Invite", "Join", "Leave", "Like", "Listen", "Move", "Offer", "Question",
	"Read", "Reject", "Remove", "TentativeAccept", "TentativeReject", "Travel", "Undo", "Update",
	"View",
];

const ACTOR_TYPES : [&str; 5] = ["Application", "Group", "Organization", "Person", "Service"];

impl Schema {
	/// ActivityStreams 2.0 core and extended types
	///
	/// actor `endpoints` is left undeclared: it's an untyped map, kept as extension data
	pub fn activitystreams() -> Result<Self, SchemaError> {
		let mut builder = Schema::builder()
			.declare(object())
			.declare(link())
			.declare(TypeDecl::new("Mention").extends("Link"))
			.declare(activity())
			.declare(TypeDecl::new("IntransitiveActivity").extends("Activity"))
			.declare(collection())
			.declare(
				TypeDecl::new("OrderedCollection")
					.extends("Collection")
					.non_functional("orderedItems", NODE)
			)
			.declare(
				TypeDecl::new("CollectionPage")
					.extends("Collection")
					.functional("partOf", NODE)
					.functional("next", NODE)
					.functional("prev", NODE)
			)
			.declare(
				TypeDecl::new("OrderedCollectionPage")
					.extends("CollectionPage")
					.non_functional("orderedItems", NODE)
					.functional("startIndex", NUMBER)
			)
			.declare(
				TypeDecl::new("Place")
					.extends("Object")
					.functional("accuracy", NUMBER)
					.functional("altitude", NUMBER)
					.functional("latitude", NUMBER)
					.functional("longitude", NUMBER)
					.functional("radius", NUMBER)
					.functional("units", TEXT)
			)
			.declare(
				TypeDecl::new("Profile")
					.extends("Object")
					.functional("describes", NODE)
			)
			.declare(
				TypeDecl::new("Relationship")
					.extends("Object")
					.functional("subject", NODE)
					.non_functional("object", NODE)
					.non_functional("relationship", NODE)
			)
			.declare(
				TypeDecl::new("Tombstone")
					.extends("Object")
					.non_functional("formerType", TEXT)
					.functional("deleted", TIME)
			)
			.declare(TypeDecl::new("Document").extends("Object"));

		for plain in ["Article", "Event", "Note"] {
			builder = builder.declare(TypeDecl::new(plain).extends("Object"));
		}

		for document in ["Audio", "Image", "Page", "Video"] {
			builder = builder.declare(TypeDecl::new(document).extends("Document"));
		}

		for actor in ACTOR_TYPES {
			builder = builder.declare(actor_type(actor));
		}

		for activity in ACTIVITY_TYPES {
			builder = builder.declare(activity_type(activity));
		}

		builder.build()
	}
}

fn object() -> TypeDecl {
	TypeDecl::new("Object")
		.non_functional("attachment", NODE)
		.non_functional("attributedTo", NODE)
		.non_functional("audience", NODE)
		.functional("content", TEXT) // TODO handle language maps
		.non_functional("context", NODE)
		.functional("name", TEXT)
		.functional("endTime", TIME)
		.non_functional("generator", NODE)
		.non_functional("icon", NODE)
		.non_functional("image", NODE)
		.non_functional("inReplyTo", NODE)
		.non_functional("location", NODE)
		.non_functional("preview", NODE)
		.functional("published", TIME)
		.functional("replies", NODE)
		.functional("startTime", TIME)
		.functional("summary", TEXT)
		.non_functional("tag", NODE)
		.functional("updated", TIME)
		.non_functional("url", NODE)
		.non_functional("to", NODE)
		.non_functional("bto", NODE)
		.non_functional("cc", NODE)
		.non_functional("bcc", NODE)
		.functional("mediaType", TEXT)
		.functional("duration", TEXT)
		.functional("likes", NODE)
		.functional("shares", NODE)
}

fn link() -> TypeDecl {
	TypeDecl::new("Link")
		.functional("href", LINK)
		.non_functional("rel", TEXT)
		.functional("mediaType", TEXT)
		.functional("name", TEXT)
		.functional("hreflang", TEXT)
		.functional("height", NUMBER)
		.functional("width", NUMBER)
		.non_functional("preview", NODE)
}

fn activity() -> TypeDecl {
	TypeDecl::new("Activity")
		.extends("Object")
		.non_functional("actor", NODE)
		.non_functional("object", NODE)
		.non_functional("target", NODE)
		.non_functional("result", NODE)
		.non_functional("origin", NODE)
		.non_functional("instrument", NODE)
}

fn collection() -> TypeDecl {
	TypeDecl::new("Collection")
		.extends("Object")
		.functional("totalItems", NUMBER)
		.functional("current", NODE)
		.functional("first", NODE)
		.functional("last", NODE)
		.non_functional("items", NODE)
}

fn actor_type(name: &str) -> TypeDecl {
	TypeDecl::new(name)
		.extends("Object")
		.functional("inbox", NODE)
		.functional("outbox", NODE)
		.functional("following", NODE)
		.functional("followers", NODE)
		.functional("liked", NODE)
		.non_functional("streams", NODE)
		.functional("preferredUsername", TEXT)
}

fn activity_type(name: &str) -> TypeDecl {
	match name {
		"Arrive" | "Travel" => TypeDecl::new(name).extends("IntransitiveActivity"),
		"Question" => TypeDecl::new(name)
			.extends("IntransitiveActivity")
			.non_functional("oneOf", NODE)
			.non_functional("anyOf", NODE)
			.non_functional("closed", &[ValueKind::DateTime, ValueKind::Boolean, ValueKind::Link, ValueKind::Object]),
		"Block" => TypeDecl::new(name).extends("Ignore"),
		"Invite" => TypeDecl::new(name).extends("Offer"),
		"TentativeAccept" => TypeDecl::new(name).extends("Accept"),
		"TentativeReject" => TypeDecl::new(name).extends("Reject"),
		_ => TypeDecl::new(name).extends("Activity"),
	}
}
