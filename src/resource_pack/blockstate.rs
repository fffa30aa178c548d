//! Blockstate documents.
//!
//! Only the default state's variant list (`variants[""]`) is interpreted.
//! The rest of the document is kept as parsed so a rewrite leaves unknown
//! keys, and their order, untouched.

use super::block_resource;
use crate::error::{EditorError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Property string of the block's only state.
pub const DEFAULT_STATE: &str = "";

/// A parsed blockstate file for one block.
#[derive(Debug, Clone, PartialEq)]
pub struct Blockstate {
    block: String,
    document: Value,
}

impl Blockstate {
    /// Parse blockstate JSON for `block`.
    pub fn parse(block: &str, contents: &str) -> std::result::Result<Self, serde_json::Error> {
        Ok(Self {
            block: block.to_string(),
            document: serde_json::from_str(contents)?,
        })
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    /// The whole document, including keys this crate does not interpret.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// The default state's variants, in file order.
    ///
    /// A single-object entry reads as a one-element list.
    pub fn variants(&self) -> Result<Vec<Variant>> {
        let entry = self.default_entry()?.clone();
        VariantList::parse(&self.block, entry)?
            .into_sequence()
            .into_iter()
            .map(|value| serde_json::from_value(value).map_err(EditorError::from))
            .collect()
    }

    /// Rewrite the default state into the canonical numbered form.
    ///
    /// A single object becomes a one-element list pointing at model `0`.
    /// In a list, references to the legacy `<name>` and `<name>_mirrored`
    /// models become `<name>/0` and `<name>/0_m`; numbered references are
    /// left alone. Returns whether anything changed.
    pub fn normalize(&mut self) -> Result<bool> {
        let block = self.block.clone();
        let entry = self.default_entry_mut()?;

        let (sequence, changed) = match VariantList::parse(&block, entry.take())? {
            VariantList::Single(mut object) => {
                object.insert(
                    "model".to_string(),
                    Value::String(block_resource(&block, "0")),
                );
                (vec![Value::Object(object)], true)
            }
            VariantList::Sequence(mut entries) => {
                let mut changed = false;
                for variant in entries.iter_mut() {
                    let rewritten = variant
                        .get("model")
                        .and_then(Value::as_str)
                        .and_then(|model| canonical_model(&block, model));
                    if let Some(model) = rewritten {
                        variant["model"] = Value::String(model);
                        changed = true;
                    }
                }
                (entries, changed)
            }
        };

        *entry = Value::Array(sequence);
        Ok(changed)
    }

    /// Append a variant and return its index.
    pub fn push_variant(&mut self, variant: &Variant) -> Result<usize> {
        let value = serde_json::to_value(variant)?;
        let entries = self.sequence_mut()?;
        entries.push(value);
        Ok(entries.len() - 1)
    }

    /// Replace the variant at `index`.
    pub fn replace_variant(&mut self, index: usize, variant: &Variant) -> Result<()> {
        let value = serde_json::to_value(variant)?;
        let block = self.block.clone();
        let entries = self.sequence_mut()?;

        let len = entries.len();
        match entries.get_mut(index) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(EditorError::VariantIndexOutOfRange { block, index, len }),
        }
    }

    fn default_entry(&self) -> Result<&Value> {
        self.document
            .get("variants")
            .and_then(|variants| variants.get(DEFAULT_STATE))
            .ok_or_else(|| self.invalid("missing variants[\"\"]"))
    }

    fn default_entry_mut(&mut self) -> Result<&mut Value> {
        let err = self.invalid("missing variants[\"\"]");
        self.document
            .get_mut("variants")
            .and_then(|variants| variants.get_mut(DEFAULT_STATE))
            .ok_or(err)
    }

    fn sequence_mut(&mut self) -> Result<&mut Vec<Value>> {
        let err = self.invalid("variants[\"\"] is not a list; prepare the block first");
        self.default_entry_mut()?.as_array_mut().ok_or(err)
    }

    fn invalid(&self, reason: &str) -> EditorError {
        EditorError::InvalidBlockstate {
            block: self.block.clone(),
            reason: reason.to_string(),
        }
    }
}

/// One weighted model choice of the default state.
///
/// Missing numeric fields read as 0. Z rotation is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Model resource location, e.g. `block/stone/2`.
    pub model: String,
    /// Relative chance of this variant being picked.
    #[serde(default)]
    pub weight: i64,
    /// X rotation in degrees.
    #[serde(default)]
    pub x: i32,
    /// Y rotation in degrees.
    #[serde(default)]
    pub y: i32,
}

impl Variant {
    /// A variant with zero weight and no rotation.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            weight: 0,
            x: 0,
            y: 0,
        }
    }

    /// Last path segment of the model, e.g. `2` or `0_m`.
    pub fn model_id(&self) -> &str {
        self.model.rsplit('/').next().unwrap_or_default()
    }

    /// Texture the model is built on: the model id without its `_m` suffix.
    pub fn texture_id(&self) -> &str {
        self.model_id().split('_').next().unwrap_or_default()
    }

    /// Whether this variant reuses another texture flipped horizontally.
    pub fn is_mirrored(&self) -> bool {
        self.model_id().ends_with("_m")
    }
}

/// The two shapes `variants[""]` takes on disk.
#[derive(Debug)]
enum VariantList {
    Single(Map<String, Value>),
    Sequence(Vec<Value>),
}

impl VariantList {
    fn parse(block: &str, value: Value) -> Result<Self> {
        match value {
            Value::Object(object) => Ok(VariantList::Single(object)),
            Value::Array(entries) => Ok(VariantList::Sequence(entries)),
            other => Err(EditorError::InvalidBlockstate {
                block: block.to_string(),
                reason: format!("variants[\"\"] must be an object or a list, got {}", other),
            }),
        }
    }

    fn into_sequence(self) -> Vec<Value> {
        match self {
            VariantList::Single(object) => vec![Value::Object(object)],
            VariantList::Sequence(entries) => entries,
        }
    }
}

/// Numbered form of a legacy model reference, if `model` is one.
/// "block/stone" -> "block/stone/0"
/// "block/stone_mirrored" -> "block/stone/0_m"
fn canonical_model(block: &str, model: &str) -> Option<String> {
    if let Some(prefix) = model.strip_suffix(&format!("/{}_mirrored", block)) {
        Some(format!("{}/{}/0_m", prefix, block))
    } else {
        model
            .strip_suffix(&format!("/{}", block))
            .map(|prefix| format!("{}/{}/0", prefix, block))
    }
}
