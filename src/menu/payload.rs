use std::collections::HashSet;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// One selectable entry of a context menu.
///
/// Only `title` and `description` are interpreted by the menu core (they are
/// what the search matches against). The remaining fields are presentation
/// hints for the option renderer or opaque data the host attached; anything
/// unrecognised is preserved in [`extra`](Self::extra).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextOption {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub title: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	#[serde(
		default,
		deserialize_with = "deserialize_metadata",
		skip_serializing_if = "Vec::is_empty"
	)]
	pub metadata: Vec<MetadataEntry>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<Value>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon_color: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub progress: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color_scheme: Option<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub arrow: bool,
	#[serde(default, deserialize_with = "null_as_default")]
	pub disabled: bool,
	#[serde(default, deserialize_with = "null_as_default")]
	pub read_only: bool,
	/// Submenu the host should open when this option is activated.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub menu: Option<String>,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl ContextOption {
	pub fn titled(title: impl Into<String>) -> Self {
		Self {
			title: Some(title.into()),
			..Self::default()
		}
	}

	pub fn described(description: impl Into<String>) -> Self {
		Self {
			description: Some(description.into()),
			..Self::default()
		}
	}

	/// Whether pressing the option should reach the host at all.
	pub fn is_interactive(&self) -> bool {
		!self.disabled && !self.read_only
	}

	/// Metadata as a label-keyed view; the first entry for a label wins.
	pub fn metadata_view(&self) -> Vec<&MetadataEntry> {
		let mut seen = HashSet::new();
		self.metadata
			.iter()
			.filter(|entry| seen.insert(entry.label.as_str()))
			.collect()
	}
}

/// A display-only annotation attached to an option.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataEntry {
	pub label: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub value: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub progress: Option<f64>,
}

impl MetadataEntry {
	pub fn new(label: impl Into<String>, value: Option<String>) -> Self {
		Self {
			label: label.into(),
			value,
			progress: None,
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetadata {
	List(Vec<RawMetadataItem>),
	Map(IndexMap<String, Value>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMetadataItem {
	Text(String),
	Entry {
		label: String,
		#[serde(default)]
		value: Option<Value>,
		#[serde(default)]
		progress: Option<f64>,
	},
}

fn display_value(value: Value) -> Option<String> {
	match value {
		Value::Null => None,
		Value::String(text) => Some(text),
		other => Some(other.to_string()),
	}
}

fn deserialize_metadata<'de, D>(deserializer: D) -> Result<Vec<MetadataEntry>, D::Error>
where
	D: Deserializer<'de>,
{
	let entries = match Option::<RawMetadata>::deserialize(deserializer)? {
		None => Vec::new(),
		Some(RawMetadata::Map(map)) => map
			.into_iter()
			.map(|(label, value)| MetadataEntry::new(label, display_value(value)))
			.collect(),
		Some(RawMetadata::List(items)) => items
			.into_iter()
			.map(|item| match item {
				RawMetadataItem::Text(label) => MetadataEntry::new(label, None),
				RawMetadataItem::Entry {
					label,
					value,
					progress,
				} => MetadataEntry {
					label,
					value: value.and_then(display_value),
					progress,
				},
			})
			.collect(),
	};
	Ok(entries)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
	D: Deserializer<'de>,
	T: Default + Deserialize<'de>,
{
	Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Options in display order, keyed by their identity within the menu.
///
/// Hosts may send either a JSON object (document order is kept) or a JSON
/// array, in which case each option is keyed by its zero-based index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuOptions(Vec<(String, ContextOption)>);

impl MenuOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Append an option, replacing the value of an existing key in place.
	pub fn insert(&mut self, key: impl Into<String>, option: ContextOption) {
		let key = key.into();
		match self.position(&key) {
			Some(index) => self.0[index].1 = option,
			None => self.0.push((key, option)),
		}
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextOption)> {
		self.0.iter().map(|(key, option)| (key.as_str(), option))
	}

	pub fn get(&self, key: &str) -> Option<&ContextOption> {
		self.position(key).map(|index| &self.0[index].1)
	}

	pub fn get_index(&self, index: usize) -> Option<(&str, &ContextOption)> {
		self.0
			.get(index)
			.map(|(key, option)| (key.as_str(), option))
	}

	pub fn position(&self, key: &str) -> Option<usize> {
		self.0.iter().position(|(candidate, _)| candidate == key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(key, _)| key.as_str())
	}
}

impl<K: Into<String>> FromIterator<(K, ContextOption)> for MenuOptions {
	fn from_iter<I: IntoIterator<Item = (K, ContextOption)>>(iter: I) -> Self {
		let mut options = Self::new();
		for (key, option) in iter {
			options.insert(key, option);
		}
		options
	}
}

impl Serialize for MenuOptions {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (key, option) in &self.0 {
			map.serialize_entry(key, option)?;
		}
		map.end()
	}
}

impl<'de> Deserialize<'de> for MenuOptions {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		#[derive(Deserialize)]
		#[serde(untagged)]
		enum RawOptions {
			Map(IndexMap<String, ContextOption>),
			List(Vec<ContextOption>),
		}

		let options = match Option::<RawOptions>::deserialize(deserializer)? {
			None => Self::new(),
			Some(RawOptions::Map(map)) => map.into_iter().collect(),
			Some(RawOptions::List(list)) => list
				.into_iter()
				.enumerate()
				.map(|(index, option)| (index.to_string(), option))
				.collect(),
		};
		Ok(options)
	}
}

/// Everything the host sends to display one menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextMenuPayload {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub title: String,
	/// Parent menu reopened by back-navigation.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub menu: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub can_close: Option<bool>,
	#[serde(default)]
	pub options: MenuOptions,
}

impl ContextMenuPayload {
	pub fn new(title: impl Into<String>, options: MenuOptions) -> Self {
		Self {
			title: title.into(),
			options,
			..Self::default()
		}
	}

	/// Only an explicit `canClose: false` makes the menu modal.
	pub fn is_closable(&self) -> bool {
		self.can_close != Some(false)
	}

	pub fn has_back(&self) -> bool {
		self.menu.is_some()
	}
}
