use std::collections::VecDeque;

use crate::{strenum, Value, VocabError, VocabResult};

strenum! {
	pub enum Cardinality {
		Functional,
		NonFunctional
	};
}

/// slot holding at most one value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Functional {
	value: Option<Value>,
}

impl Functional {
	/// replaces whatever was there before
	pub fn set(&mut self, value: impl Into<Value>) {
		self.value = Some(value.into());
	}

	pub fn get(&self) -> Option<&Value> {
		self.value.as_ref()
	}

	pub fn get_mut(&mut self) -> Option<&mut Value> {
		self.value.as_mut()
	}

	pub fn is_set(&self) -> bool {
		self.value.is_some()
	}

	pub fn clear(&mut self) {
		self.value = None;
	}

	pub fn take(&mut self) -> Option<Value> {
		self.value.take()
	}
}

/// slot holding an ordered sequence of values, duplicates allowed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonFunctional {
	values: VecDeque<Value>,
}

impl NonFunctional {
	pub fn append(&mut self, value: impl Into<Value>) {
		self.values.push_back(value.into());
	}

	pub fn prepend(&mut self, value: impl Into<Value>) {
		self.values.push_front(value.into());
	}

	pub fn at(&self, index: usize) -> VocabResult<&Value> {
		let len = self.values.len();
		self.values.get(index).ok_or(VocabError::IndexOutOfRange { index, len })
	}

	pub fn at_mut(&mut self, index: usize) -> VocabResult<&mut Value> {
		let len = self.values.len();
		self.values.get_mut(index).ok_or(VocabError::IndexOutOfRange { index, len })
	}

	/// insert before given index, which may be equal to len to append
	pub fn insert(&mut self, index: usize, value: impl Into<Value>) -> VocabResult<()> {
		let len = self.values.len();
		if index > len {
			return Err(VocabError::IndexOutOfRange { index, len });
		}
		self.values.insert(index, value.into());
		Ok(())
	}

	pub fn remove(&mut self, index: usize) -> VocabResult<Value> {
		let len = self.values.len();
		self.values.remove(index).ok_or(VocabError::IndexOutOfRange { index, len })
	}

	pub fn swap(&mut self, a: usize, b: usize) -> VocabResult<()> {
		let len = self.values.len();
		for index in [a, b] {
			if index >= len {
				return Err(VocabError::IndexOutOfRange { index, len });
			}
		}
		self.values.swap(a, b);
		Ok(())
	}

	pub fn clear(&mut self) {
		self.values.clear();
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	/// can be restarted any time, the borrow keeps the sequence frozen while iterating
	pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, Value> {
		self.values.iter()
	}

	pub fn iter_mut(&mut self) -> std::collections::vec_deque::IterMut<'_, Value> {
		self.values.iter_mut()
	}
}

impl<'a> IntoIterator for &'a NonFunctional {
	type Item = &'a Value;
	type IntoIter = std::collections::vec_deque::Iter<'a, Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.iter()
	}
}

impl IntoIterator for NonFunctional {
	type Item = Value;
	type IntoIter = std::collections::vec_deque::IntoIter<Value>;

	fn into_iter(self) -> Self::IntoIter {
		self.values.into_iter()
	}
}

impl<V: Into<Value>> FromIterator<V> for NonFunctional {
	fn from_iter<I: IntoIterator<Item = V>>(iter: I) -> Self {
		NonFunctional {
			values: iter.into_iter().map(Into::into).collect(),
		}
	}
}

/// a single property slot of an object, cardinality is fixed by the schema
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
	Functional(Functional),
	NonFunctional(NonFunctional),
}

impl Property {
	pub fn empty(cardinality: Cardinality) -> Self {
		match cardinality {
			Cardinality::Functional => Property::Functional(Functional::default()),
			Cardinality::NonFunctional => Property::NonFunctional(NonFunctional::default()),
		}
	}

	pub fn cardinality(&self) -> Cardinality {
		match self {
			Property::Functional(_) => Cardinality::Functional,
			Property::NonFunctional(_) => Cardinality::NonFunctional,
		}
	}

	/// true if nothing would be emitted for this slot
	pub fn is_empty(&self) -> bool {
		match self {
			Property::Functional(f) => !f.is_set(),
			Property::NonFunctional(n) => n.is_empty(),
		}
	}

	/// all held values, in order
	pub fn values(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
		match self {
			Property::Functional(f) => Box::new(f.get().into_iter()),
			Property::NonFunctional(n) => Box::new(n.iter()),
		}
	}

	pub fn as_functional(&self) -> Option<&Functional> {
		match self {
			Property::Functional(f) => Some(f),
			Property::NonFunctional(_) => None,
		}
	}

	pub fn as_functional_mut(&mut self) -> Option<&mut Functional> {
		match self {
			Property::Functional(f) => Some(f),
			Property::NonFunctional(_) => None,
		}
	}

	pub fn as_non_functional(&self) -> Option<&NonFunctional> {
		match self {
			Property::Functional(_) => None,
			Property::NonFunctional(n) => Some(n),
		}
	}

	pub fn as_non_functional_mut(&mut self) -> Option<&mut NonFunctional> {
		match self {
			Property::Functional(_) => None,
			Property::NonFunctional(n) => Some(n),
		}
	}
}
