//! Block model files.
//!
//! Models are handled as plain JSON so that anything the editor does not
//! understand (elements, display transforms, ...) survives a rewrite.

use crate::config::EditorConfig;
use crate::error::Result;
use serde_json::{json, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a model file, or `None` if it does not exist or is not valid JSON.
pub fn read_model(path: &Path) -> Result<Option<Value>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    match serde_json::from_str(&contents) {
        Ok(model) => Ok(Some(model)),
        Err(e) => {
            log::warn!("Ignoring unparsable model {:?}: {}", path, e);
            Ok(None)
        }
    }
}

/// Point every texture variable that references `from` at `to` instead.
///
/// Both the bare (`block/stone`) and namespaced (`minecraft:block/stone`)
/// spellings are matched. Returns whether the model changed.
pub fn retarget_textures(model: &mut Value, namespace: &str, from: &str, to: &str) -> bool {
    let Some(textures) = model.get_mut("textures").and_then(Value::as_object_mut) else {
        return false;
    };

    let namespaced_from = format!("{}:{}", namespace, from);
    let mut changed = false;

    for texture in textures.values_mut() {
        let replacement = match texture.as_str() {
            Some(t) if t == from => to.to_string(),
            Some(t) if t == namespaced_from => format!("{}:{}", namespace, to),
            _ => continue,
        };
        *texture = Value::String(replacement);
        changed = true;
    }

    changed
}

/// Model for a newly added variant whose texture is `texture`.
///
/// With a template (the block's first model), the template's references to
/// any of `template_textures` are redirected to the new texture. Without a
/// template, or when the template references none of them, a plain full cube
/// is used so the new texture is always shown.
pub fn variant_model(
    template: Option<Value>,
    namespace: &str,
    template_textures: &[&str],
    texture: &str,
) -> Value {
    if let Some(mut model) = template {
        let mut retargeted = false;
        for from in template_textures {
            retargeted |= retarget_textures(&mut model, namespace, from, texture);
        }
        if retargeted {
            return model;
        }
        log::warn!(
            "Template model references none of {:?}; using a full cube for {}",
            template_textures,
            texture
        );
    }

    json!({
        "parent": "block/cube_all",
        "textures": {
            "all": texture
        }
    })
}

/// Rewrite a model file in place so its textures point at `to`.
pub fn retarget_model_file(
    path: &Path,
    config: &EditorConfig,
    from: &str,
    to: &str,
) -> Result<bool> {
    let Some(mut model) = read_model(path)? else {
        return Ok(false);
    };

    if retarget_textures(&mut model, &config.namespace, from, to) {
        super::write_json(path, &model, config)?;
        return Ok(true);
    }
    Ok(false)
}
