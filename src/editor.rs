//! Block layout migration and variant editing.
//!
//! A block is "prepared" by converting it to the numbered layout:
//!
//! ```text
//! blockstates/<name>.json          variants[""] = [{ "model": "block/<name>/<k>" }, ...]
//! models/block/<name>/<k>.json
//! textures/block/<name>/<k>.png
//! ```
//!
//! The blockstate is always rewritten before files are moved. Preparing is
//! idempotent, so a block left half-migrated by an interrupted run is
//! completed by preparing it again.

use crate::error::{EditorError, Result};
use crate::resource_pack::{block_resource, model, texture, Pack, Variant};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What [`BlockEditor::prepare`] changed on disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preparation {
    /// The blockstate file was rewritten.
    pub blockstate_rewritten: bool,
    /// Legacy files moved into the numbered layout, as (from, to).
    pub moved: Vec<(PathBuf, PathBuf)>,
}

impl Preparation {
    /// Whether the block was already in the numbered layout.
    pub fn is_noop(&self) -> bool {
        !self.blockstate_rewritten && self.moved.is_empty()
    }
}

/// Presentation data for one variant row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantView {
    /// Position in `variants[""]`.
    pub index: usize,
    pub model: String,
    /// Last segment of the model, e.g. `2` or `0_m`.
    pub model_id: String,
    /// Texture the model is built on, e.g. `0` for `0_m`.
    pub texture_id: String,
    pub mirrored: bool,
    pub texture_path: PathBuf,
    pub weight: i64,
    pub x: i32,
    pub y: i32,
}

impl VariantView {
    fn new(pack: &Pack, block: &str, index: usize, variant: Variant) -> Self {
        let model_id = variant.model_id().to_string();
        let texture_id = variant.texture_id().to_string();

        Self {
            index,
            mirrored: variant.is_mirrored(),
            texture_path: pack.texture_path(block, &texture_id),
            model_id,
            texture_id,
            weight: variant.weight,
            x: variant.x,
            y: variant.y,
            model: variant.model,
        }
    }

    /// Pixel size of the variant's texture, if it can be read.
    pub fn texture_dimensions(&self) -> Option<(u32, u32)> {
        texture::texture_dimensions(&self.texture_path)
    }
}

/// Edits one block of a pack. Every call reads the current state from disk.
#[derive(Debug, Clone)]
pub struct BlockEditor<'a> {
    pack: &'a Pack,
    block: String,
}

impl<'a> BlockEditor<'a> {
    pub fn new(pack: &'a Pack, block: &str) -> Self {
        Self {
            pack,
            block: block.to_string(),
        }
    }

    pub fn block(&self) -> &str {
        &self.block
    }

    /// Bring the block into the numbered layout.
    pub fn prepare(&self) -> Result<Preparation> {
        let mut preparation = Preparation::default();

        let mut blockstate = self.pack.read_blockstate(&self.block)?;
        if blockstate.normalize()? {
            self.pack.write_blockstate(&blockstate)?;
            preparation.blockstate_rewritten = true;
        }

        self.prepare_textures(&mut preparation)?;
        self.prepare_models(&mut preparation)?;

        if preparation.is_noop() {
            log::debug!("Block {} already prepared", self.block);
        } else {
            log::info!(
                "Prepared block {} ({} files moved)",
                self.block,
                preparation.moved.len()
            );
        }
        Ok(preparation)
    }

    fn prepare_models(&self, preparation: &mut Preparation) -> Result<()> {
        fs::create_dir_all(self.pack.model_dir(&self.block))?;

        let legacy_texture = format!("block/{}", self.block);
        let base_texture = block_resource(&self.block, "0");
        // Without a numbered texture the moved model keeps pointing at the
        // vanilla one, which the game still provides.
        let has_base_texture = self.pack.texture_path(&self.block, "0").is_file();

        for (suffix, id) in [("", "0"), ("_mirrored", "0_m")] {
            let from = self.pack.legacy_model_path(&self.block, suffix);
            let to = self.pack.model_path(&self.block, id);

            if move_legacy(&from, &to, preparation)? && has_base_texture {
                model::retarget_model_file(
                    &to,
                    self.pack.config(),
                    &legacy_texture,
                    &base_texture,
                )?;
            }
        }
        Ok(())
    }

    fn prepare_textures(&self, preparation: &mut Preparation) -> Result<()> {
        fs::create_dir_all(self.pack.texture_dir(&self.block))?;

        let from = self.pack.legacy_texture_path(&self.block);
        let to = self.pack.texture_path(&self.block, "0");
        move_legacy(&from, &to, preparation)?;

        // Animation metadata travels with its texture.
        let mut from_meta = from.into_os_string();
        from_meta.push(".mcmeta");
        let mut to_meta = to.into_os_string();
        to_meta.push(".mcmeta");
        move_legacy(Path::new(&from_meta), Path::new(&to_meta), preparation)?;

        Ok(())
    }

    /// The block's variants, in blockstate order.
    pub fn variants(&self) -> Result<Vec<VariantView>> {
        let blockstate = self.pack.read_blockstate(&self.block)?;

        Ok(blockstate
            .variants()?
            .into_iter()
            .enumerate()
            .map(|(index, variant)| VariantView::new(self.pack, &self.block, index, variant))
            .collect())
    }

    /// Index the next added variant gets: one past the highest index used by
    /// any texture or model of the block. Gaps are never reused.
    pub fn next_index(&self) -> Result<u32> {
        let textures = texture::max_variant_index(&self.pack.texture_dir(&self.block), "png")?;
        let models = texture::max_variant_index(&self.pack.model_dir(&self.block), "json")?;

        match textures.max(models) {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| EditorError::VariantIndexExhausted(self.block.clone())),
            None => Ok(0),
        }
    }

    /// Add a variant textured with a copy of `image`.
    ///
    /// The texture and model are written before the blockstate, so an
    /// interrupted add leaves at most unused files behind.
    pub fn add_variant<P: AsRef<Path>>(&self, image: P) -> Result<Vec<VariantView>> {
        let image = image.as_ref();
        texture::validate_png(image)?;
        self.prepare()?;

        let id = self.next_index()?.to_string();
        let texture_path = self.pack.texture_path(&self.block, &id);
        fs::copy(image, &texture_path)?;

        let template = model::read_model(&self.pack.model_path(&self.block, "0"))?;
        let base_texture = block_resource(&self.block, "0");
        let legacy_texture = format!("block/{}", self.block);
        let body = model::variant_model(
            template,
            &self.pack.config().namespace,
            &[base_texture.as_str(), legacy_texture.as_str()],
            &block_resource(&self.block, &id),
        );
        crate::resource_pack::write_json(
            &self.pack.model_path(&self.block, &id),
            &body,
            self.pack.config(),
        )?;

        let mut blockstate = self.pack.read_blockstate(&self.block)?;
        blockstate.push_variant(&Variant::new(block_resource(&self.block, &id)))?;
        self.pack.write_blockstate(&blockstate)?;

        log::info!("Added variant {} to {} from {:?}", id, self.block, image);
        self.variants()
    }

    /// Overwrite the weight and rotation of the variant at `index`.
    ///
    /// Inputs are raw field text. If any of them is not an integer nothing is
    /// written and [`EditorError::NonNumericField`] is returned.
    pub fn update_variant(&self, index: usize, weight: &str, x: &str, y: &str) -> Result<()> {
        let weight = parse_field("weight", weight)?;
        let x = parse_field("x", x)?;
        let y = parse_field("y", y)?;

        let variants = self.pack.read_blockstate(&self.block)?.variants()?;
        let current = variants
            .get(index)
            .ok_or_else(|| EditorError::VariantIndexOutOfRange {
                block: self.block.clone(),
                index,
                len: variants.len(),
            })?;

        let variant = Variant {
            model: current.model.clone(),
            weight,
            x,
            y,
        };
        self.pack.write_variant(&self.block, index, &variant)?;

        log::debug!(
            "Updated {}[{}]: weight={} x={} y={}",
            self.block,
            index,
            weight,
            x,
            y
        );
        Ok(())
    }
}

/// Move `from` to `to` if `from` exists and `to` does not.
fn move_legacy(from: &Path, to: &Path, preparation: &mut Preparation) -> Result<bool> {
    if !from.is_file() {
        return Ok(false);
    }
    if to.exists() {
        log::warn!("Leaving {:?} in place, {:?} already exists", from, to);
        return Ok(false);
    }

    fs::rename(from, to)?;
    log::debug!("Moved {:?} -> {:?}", from, to);
    preparation.moved.push((from.to_path_buf(), to.to_path_buf()));
    Ok(true)
}

fn parse_field<T: FromStr>(field: &'static str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| EditorError::NonNumericField {
            field,
            value: value.to_string(),
        })
}
