//! Resource pack directory access.
//!
//! This module resolves a pack root into the directories that hold
//! blockstates, block models and block textures, and reads and writes the
//! JSON files inside them.

pub mod blockstate;
pub mod model;
pub mod pack_meta;
pub mod texture;

pub use blockstate::{Blockstate, Variant};
pub use pack_meta::{PackFormat, PackMetadata, PACK_FORMATS};

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Marker file identifying a resource pack root.
pub const PACK_MCMETA: &str = "pack.mcmeta";

/// An opened resource pack directory.
#[derive(Debug, Clone)]
pub struct Pack {
    root: PathBuf,
    config: EditorConfig,
    textures_dir: PathBuf,
    block_textures_dir: PathBuf,
    blockstates_dir: PathBuf,
    block_models_dir: PathBuf,
}

impl Pack {
    /// Open a pack with the default configuration.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        Self::open_with_config(root, EditorConfig::default())
    }

    /// Open a pack, creating its asset directories if they are missing.
    ///
    /// Nothing is created when `root` is not a resource pack.
    pub fn open_with_config<P: AsRef<Path>>(root: P, config: EditorConfig) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        if !is_resource_pack_root(&root) {
            return Err(EditorError::NotAResourcePack(root));
        }

        let assets = root.join("assets").join(&config.namespace);
        let textures_dir = assets.join("textures");
        let pack = Self {
            block_textures_dir: textures_dir.join("block"),
            textures_dir,
            blockstates_dir: assets.join("blockstates"),
            block_models_dir: assets.join("models").join("block"),
            root,
            config,
        };

        for dir in [
            &pack.textures_dir,
            &pack.block_textures_dir,
            &pack.blockstates_dir,
            &pack.block_models_dir,
        ] {
            fs::create_dir_all(dir)?;
        }

        log::debug!("Opened resource pack at {:?}", pack.root);
        Ok(pack)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn textures_dir(&self) -> &Path {
        &self.textures_dir
    }

    pub fn block_textures_dir(&self) -> &Path {
        &self.block_textures_dir
    }

    pub fn blockstates_dir(&self) -> &Path {
        &self.blockstates_dir
    }

    pub fn block_models_dir(&self) -> &Path {
        &self.block_models_dir
    }

    /// `<blockstates>/<name>.json`
    pub fn blockstate_path(&self, block: &str) -> PathBuf {
        self.blockstates_dir.join(format!("{}.json", block))
    }

    /// Folder holding the numbered textures of a block.
    pub fn texture_dir(&self, block: &str) -> PathBuf {
        self.block_textures_dir.join(block)
    }

    /// `<block-textures>/<name>/<id>.png`
    pub fn texture_path(&self, block: &str, id: &str) -> PathBuf {
        self.texture_dir(block).join(format!("{}.png", id))
    }

    /// Pre-migration `<block-textures>/<name>.png`.
    pub fn legacy_texture_path(&self, block: &str) -> PathBuf {
        self.block_textures_dir.join(format!("{}.png", block))
    }

    /// Folder holding the numbered models of a block.
    pub fn model_dir(&self, block: &str) -> PathBuf {
        self.block_models_dir.join(block)
    }

    /// `<block-models>/<name>/<id>.json`
    pub fn model_path(&self, block: &str, id: &str) -> PathBuf {
        self.model_dir(block).join(format!("{}.json", id))
    }

    /// Pre-migration `<block-models>/<name><suffix>.json`.
    pub fn legacy_model_path(&self, block: &str, suffix: &str) -> PathBuf {
        self.block_models_dir.join(format!("{}{}.json", block, suffix))
    }

    /// Names of all blocks with a blockstate file, in directory listing order.
    pub fn block_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();

        for entry in fs::read_dir(&self.blockstates_dir)? {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type()?.is_file() {
                continue;
            }
            if path.extension().map(|e| e == "json").unwrap_or(false) {
                if let Some(stem) = path.file_stem() {
                    names.push(stem.to_string_lossy().to_string());
                }
            }
        }

        Ok(names)
    }

    /// Block names starting with `prefix`.
    pub fn search_blocks(&self, prefix: &str) -> Result<Vec<String>> {
        Ok(self
            .block_names()?
            .into_iter()
            .filter(|name| name.starts_with(prefix))
            .collect())
    }

    /// Read and parse a block's blockstate file.
    pub fn read_blockstate(&self, block: &str) -> Result<Blockstate> {
        let path = self.blockstate_path(block);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(EditorError::BlockNotFound(block.to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        Blockstate::parse(block, &contents)
            .map_err(|source| EditorError::MalformedBlockstate { path, source })
    }

    /// Replace a blockstate file with the given document.
    pub fn write_blockstate(&self, blockstate: &Blockstate) -> Result<()> {
        let path = self.blockstate_path(blockstate.block());
        write_json(&path, blockstate.document(), &self.config)?;
        log::debug!("Wrote blockstate {:?}", path);
        Ok(())
    }

    /// Replace `variants[""][index]` of a block with `variant`, keeping the
    /// rest of the document as it is on disk.
    pub fn write_variant(&self, block: &str, index: usize, variant: &Variant) -> Result<()> {
        let mut blockstate = self.read_blockstate(block)?;
        blockstate.replace_variant(index, variant)?;
        self.write_blockstate(&blockstate)
    }

    /// Parse the pack's `pack.mcmeta`.
    pub fn metadata(&self) -> Result<PackMetadata> {
        let contents = fs::read_to_string(self.root.join(PACK_MCMETA))?;
        Ok(pack_meta::parse_pack_mcmeta(&contents)?)
    }
}

/// Whether `path` is a resource pack root: it has a `pack.mcmeta` file as a
/// direct child. Has no side effects.
pub fn is_resource_pack_root<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref().join(PACK_MCMETA).is_file()
}

/// Create a new, empty resource pack at `root` and open it.
pub fn create_pack<P: AsRef<Path>>(
    root: P,
    description: &str,
    format: &PackFormat,
    config: EditorConfig,
) -> Result<Pack> {
    let root = root.as_ref();
    let mcmeta = root.join(PACK_MCMETA);
    if mcmeta.exists() {
        return Err(EditorError::PackAlreadyExists(root.to_path_buf()));
    }

    fs::create_dir_all(root)?;
    let document = pack_meta::pack_mcmeta_document(format, description);
    write_json(&mcmeta, &document, &config)?;
    log::info!(
        "Created resource pack {:?} (pack_format {})",
        root,
        format.format
    );

    Pack::open_with_config(root, config)
}

/// Resource location of a numbered block asset: `block/<name>/<id>`.
pub fn block_resource(block: &str, id: &str) -> String {
    format!("block/{}/{}", block, id)
}

/// Pretty-print `value` into a temporary file next to `path`, then rename it
/// over `path`. An existing file keeps its permissions; a new one is
/// readable by everyone, as a plain `fs::write` would leave it.
pub(crate) fn write_json(path: &Path, value: &Value, config: &EditorConfig) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut file = NamedTempFile::new_in(dir)?;

    {
        let indent = config.indent_bytes();
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut serializer = serde_json::Serializer::with_formatter(&mut file, formatter);
        value.serialize(&mut serializer)?;
    }
    file.flush()?;

    match fs::metadata(path) {
        Ok(meta) => file.as_file().set_permissions(meta.permissions())?,
        Err(e) if e.kind() == ErrorKind::NotFound => set_new_file_permissions(file.as_file())?,
        Err(e) => return Err(e.into()),
    }

    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// Temporary files start out owner-only.
#[cfg(unix)]
fn set_new_file_permissions(file: &fs::File) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_new_file_permissions(_file: &fs::File) -> std::io::Result<()> {
    Ok(())
}
