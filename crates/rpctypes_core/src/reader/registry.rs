use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::reader::{Field, Struct, StructType};

/// Stable handle to a registry slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StructId(u32);

/// Arena of extracted structs addressed by `package.Name`.
///
/// Slots are inserted empty and filled in place, so a [`StructType`] taken before a slot is
/// populated still resolves once it is.
#[derive(Debug, Clone, Default)]
pub struct Registry {
	structs: Vec<Struct>,
	index: BTreeMap<Box<str>, StructId>,
}

impl Registry {
	/// Create an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Allocate an empty slot for `package.name`.
	///
	/// An existing slot under the same key is cleared and reused.
	pub fn insert_empty(&mut self, package: &str, name: &str) -> StructId {
		let item = Struct::new(package, name);
		let key = item.key();
		if let Some(&id) = self.index.get(key.as_str()) {
			self.structs[id.0 as usize] = item;
			return id;
		}

		let id = StructId(self.structs.len() as u32);
		self.structs.push(item);
		self.index.insert(key.into_boxed_str(), id);
		id
	}

	/// Replace the fields of a slot.
	pub fn set_fields(&mut self, id: StructId, fields: Vec<Field>) {
		if let Some(item) = self.get_mut(id) {
			item.fields = fields;
		}
	}

	/// Slot by handle.
	pub fn get(&self, id: StructId) -> Option<&Struct> {
		self.structs.get(id.0 as usize)
	}

	/// Mutable slot by handle.
	pub fn get_mut(&mut self, id: StructId) -> Option<&mut Struct> {
		self.structs.get_mut(id.0 as usize)
	}

	/// Handle registered under `package.Name`.
	pub fn id_of(&self, key: &str) -> Option<StructId> {
		self.index.get(key).copied()
	}

	/// Whether `package.Name` is registered.
	pub fn contains_key(&self, key: &str) -> bool {
		self.index.contains_key(key)
	}

	/// Struct registered under `package.Name`.
	pub fn by_key(&self, key: &str) -> Option<&Struct> {
		self.id_of(key).and_then(|id| self.get(id))
	}

	/// Follow a struct reference.
	pub fn resolve(&self, target: &StructType) -> Option<&Struct> {
		self.by_key(&target.key())
	}

	/// Number of registered structs.
	pub fn len(&self) -> usize {
		self.structs.len()
	}

	/// Whether nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.structs.is_empty()
	}

	/// Registered structs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &Struct)> {
		self.index.iter().map(|(key, id)| (&**key, &self.structs[id.0 as usize]))
	}

	/// Hand the registry over as a plain key-ordered map.
	pub fn into_map(self) -> BTreeMap<String, Struct> {
		let mut slots: Vec<Option<Struct>> = self.structs.into_iter().map(Some).collect();
		self.index
			.into_iter()
			.filter_map(|(key, id)| slots[id.0 as usize].take().map(|item| (key.into_string(), item)))
			.collect()
	}
}

impl Serialize for Registry {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_map(self.iter())
	}
}
