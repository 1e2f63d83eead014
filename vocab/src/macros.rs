#[derive(Debug, thiserror::Error)]
#[error("invalid type value '{0}'")]
pub struct TypeValueError(pub String);

macro_rules! strenum {
	( $(pub enum $enum_name:ident { $($flat:ident),* $(,)? };)+ ) => {
		$(
			#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
			pub enum $enum_name {
				$($flat,)*
			}

			impl $enum_name {
				pub const ALL: &'static [$enum_name] = &[$(Self::$flat,)*];
			}

			impl AsRef<str> for $enum_name {
				fn as_ref(&self) -> &str {
					match self {
						$(Self::$flat => stringify!($flat),)*
					}
				}
			}

			impl std::fmt::Display for $enum_name {
				fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
					f.write_str(self.as_ref())
				}
			}

			impl TryFrom<&str> for $enum_name {
				type Error = $crate::macros::TypeValueError;

				fn try_from(value:&str) -> Result<Self, Self::Error> {
					match value {
						$(stringify!($flat) => Ok(Self::$flat),)*
						_ => Err($crate::macros::TypeValueError(value.to_string())),
					}
				}
			}

			impl serde::Serialize for $enum_name {
				fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
					serializer.serialize_str(self.as_ref())
				}
			}

			impl<'de> serde::Deserialize<'de> for $enum_name {
				fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
					let raw = <std::string::String as serde::Deserialize>::deserialize(deserializer)?;
					Self::try_from(raw.as_str()).map_err(serde::de::Error::custom)
				}
			}
		)*
	};
}

pub(crate) use strenum;

// generates `is_x` / `as_x` pairs for enums carrying payloads, the pattern must bind what the
// expression returns
macro_rules! accessors {
	($( $name:ident -> $t:ty { $pat:pat => $out:expr } )*) => {
		paste::paste! {
			$(
				#[doc = "returns contained " $name ", if this holds one"]
				pub fn [< as_ $name >](&self) -> Option<$t> {
					match self {
						$pat => Some($out),
						_ => None,
					}
				}

				#[doc = "true only if this holds a " $name]
				pub fn [< is_ $name >](&self) -> bool {
					self.[< as_ $name >]().is_some()
				}
			)*
		}
	};
}

pub(crate) use accessors;
