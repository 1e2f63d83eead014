use crate::{VocabError, VocabResult};

/// opaque absolute uri standing in for a value, never dereferenced
///
/// the original string is kept verbatim so that it's emitted back exactly as received
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Link(String);

impl Link {
	pub fn parse(uri: impl Into<String>) -> VocabResult<Self> {
		Self::parse_for("link", uri.into())
	}

	pub(crate) fn parse_for(property: &str, uri: String) -> VocabResult<Self> {
		if let Some(c) = uri.chars().find(|c| !uri_char(*c)) {
			return Err(VocabError::malformed(property, format!("{uri:?} is not an absolute uri: invalid character {c:?}")));
		}
		if !percent_escapes_ok(&uri) {
			return Err(VocabError::malformed(property, format!("{uri:?} is not an absolute uri: broken percent escape")));
		}
		// url fixes up whitespace and stray characters on its own, so it only gets to judge structure
		match url::Url::parse(&uri) {
			Ok(_) => Ok(Link(uri)),
			Err(e) => Err(VocabError::malformed(property, format!("{uri:?} is not an absolute uri: {e}"))),
		}
	}

	/// true if given string would be accepted as a link
	pub fn is_absolute(uri: &str) -> bool {
		uri.chars().all(uri_char)
			&& percent_escapes_ok(uri)
			&& url::Url::parse(uri).is_ok()
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn into_inner(self) -> String {
		self.0
	}
}

// rfc3986 reserved and unreserved sets, plus non ascii letters as iris allow
fn uri_char(c: char) -> bool {
	if c.is_ascii() {
		c.is_ascii_alphanumeric() || "-._~:/?#[]@!$&'()*+,;=%".contains(c)
	} else {
		!c.is_control() && !c.is_whitespace()
	}
}

fn percent_escapes_ok(uri: &str) -> bool {
	let bytes = uri.as_bytes();
	bytes
		.iter()
		.enumerate()
		.filter(|(_, b)| **b == b'%')
		.all(|(i, _)| {
			bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
				&& bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit)
		})
}

impl AsRef<str> for Link {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl std::fmt::Display for Link {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

impl TryFrom<&str> for Link {
	type Error = VocabError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Link::parse(value)
	}
}

impl TryFrom<String> for Link {
	type Error = VocabError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Link::parse(value)
	}
}

impl From<Link> for String {
	fn from(value: Link) -> Self {
		value.0
	}
}

impl From<Link> for serde_json::Value {
	fn from(value: Link) -> Self {
		serde_json::Value::String(value.0)
	}
}
