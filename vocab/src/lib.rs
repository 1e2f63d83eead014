mod macros;
pub(crate) use macros::{strenum, accessors};
pub use macros::TypeValueError;

mod error;
pub use error::{VocabError, VocabResult};

mod link;
pub use link::Link;

mod value;
pub use value::{Literal, Value, ValueKind};

mod property;
pub use property::{Cardinality, Functional, NonFunctional, Property};

pub mod schema;
pub use schema::{PropertyDecl, Schema, SchemaBuilder, SchemaError, TypeDecl};

mod object;
pub use object::TypedObject;

pub mod codec;
pub use codec::{decode, decode_map, decode_str, encode, encode_string, encode_value};

mod resolver;
pub use resolver::{Handler, ResolveError, Resolver};

#[cfg(feature = "jsonld")]
mod jsonld;
#[cfg(feature = "jsonld")]
pub use jsonld::{LD, ACTIVITYSTREAMS_CONTEXT};
