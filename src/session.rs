//! Editing session state.
//!
//! A [`Session`] is what a front-end holds between user actions: the open
//! pack and the selected block. Each method is one user action and reads
//! what it needs from disk.

use crate::config::EditorConfig;
use crate::editor::{BlockEditor, Preparation, VariantView};
use crate::error::{EditorError, Result};
use crate::resource_pack::{is_resource_pack_root, Pack};
use std::path::Path;

#[derive(Debug, Default)]
pub struct Session {
    config: EditorConfig,
    pack: Option<Pack>,
    block: Option<String>,
}

impl Session {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            pack: None,
            block: None,
        }
    }

    pub fn pack(&self) -> Option<&Pack> {
        self.pack.as_ref()
    }

    pub fn selected_block(&self) -> Option<&str> {
        self.block.as_deref()
    }

    /// Switch to the pack at `root`.
    ///
    /// An invalid root closes the current pack and deselects the block.
    pub fn set_pack_root<P: AsRef<Path>>(&mut self, root: P) -> Result<&Pack> {
        self.block = None;
        self.pack = None;

        let root = root.as_ref();
        if !is_resource_pack_root(root) {
            return Err(EditorError::NotAResourcePack(root.to_path_buf()));
        }

        let pack = Pack::open_with_config(root, self.config.clone())?;
        Ok(&*self.pack.insert(pack))
    }

    pub fn block_names(&self) -> Result<Vec<String>> {
        self.open_pack()?.block_names()
    }

    pub fn search_blocks(&self, prefix: &str) -> Result<Vec<String>> {
        self.open_pack()?.search_blocks(prefix)
    }

    /// Prepare `block` and make it the selected block.
    pub fn select_block(&mut self, block: &str) -> Result<Vec<VariantView>> {
        let (preparation, views) = self.open_block(block)?;
        if !preparation.is_noop() {
            log::debug!("Selecting {} migrated it to the numbered layout", block);
        }
        self.block = Some(block.to_string());
        Ok(views)
    }

    /// Variants of the selected block.
    pub fn variants(&self) -> Result<Vec<VariantView>> {
        self.editor()?.variants()
    }

    /// Add a variant to the selected block from a PNG file.
    pub fn add_texture<P: AsRef<Path>>(&self, image: P) -> Result<Vec<VariantView>> {
        self.editor()?.add_variant(image)
    }

    /// Write edited field text back to the selected block's variant.
    pub fn edit_variant(&self, index: usize, weight: &str, x: &str, y: &str) -> Result<()> {
        self.editor()?.update_variant(index, weight, x, y)
    }

    fn open_block(&self, block: &str) -> Result<(Preparation, Vec<VariantView>)> {
        let editor = BlockEditor::new(self.open_pack()?, block);
        let preparation = editor.prepare()?;
        Ok((preparation, editor.variants()?))
    }

    fn open_pack(&self) -> Result<&Pack> {
        self.pack.as_ref().ok_or(EditorError::NoPackOpen)
    }

    fn editor(&self) -> Result<BlockEditor<'_>> {
        let pack = self.open_pack()?;
        let block = self.block.as_deref().ok_or(EditorError::NoBlockSelected)?;
        Ok(BlockEditor::new(pack, block))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource_pack::PACK_MCMETA;
    use std::fs;

    fn pack_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(PACK_MCMETA), r#"{"pack":{"pack_format":8,"description":""}}"#)
            .unwrap();
        dir
    }

    #[test]
    fn test_requires_pack_and_block() {
        let session = Session::default();
        assert!(matches!(session.block_names(), Err(EditorError::NoPackOpen)));
        assert!(matches!(session.variants(), Err(EditorError::NoPackOpen)));

        let dir = pack_dir();
        let mut session = Session::default();
        session.set_pack_root(dir.path()).unwrap();
        assert!(matches!(session.variants(), Err(EditorError::NoBlockSelected)));
        assert!(matches!(
            session.edit_variant(0, "1", "0", "0"),
            Err(EditorError::NoBlockSelected)
        ));
    }

    #[test]
    fn test_invalid_root_closes_pack() {
        let dir = pack_dir();
        let other = tempfile::tempdir().unwrap();
        let mut session = Session::default();

        session.set_pack_root(dir.path()).unwrap();
        assert!(session.pack().is_some());

        let err = session.set_pack_root(other.path()).unwrap_err();
        assert!(matches!(err, EditorError::NotAResourcePack(_)));
        assert!(session.pack().is_none());
        assert!(session.selected_block().is_none());
        assert_eq!(fs::read_dir(other.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_edit_workflow() {
        let dir = pack_dir();
        let mut session = Session::new(EditorConfig::default());
        let pack = session.set_pack_root(dir.path()).unwrap().clone();

        fs::write(
            pack.blockstate_path("stone"),
            r#"{"variants":{"":{"model":"block/stone"}}}"#,
        )
        .unwrap();
        fs::write(pack.blockstate_path("stone_bricks"), "{}").unwrap();
        image::RgbaImage::new(2, 2)
            .save(pack.legacy_texture_path("stone"))
            .unwrap();

        assert_eq!(session.search_blocks("stone_").unwrap(), vec!["stone_bricks"]);

        let views = session.select_block("stone").unwrap();
        assert_eq!(session.selected_block(), Some("stone"));
        assert_eq!(views.len(), 1);
        assert_eq!(views[0].model, "block/stone/0");
        assert!(views[0].texture_path.is_file());

        let source = dir.path().join("mossy.png");
        image::RgbaImage::new(2, 2).save(&source).unwrap();
        let views = session.add_texture(&source).unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].model, "block/stone/1");

        session.edit_variant(1, "10", "0", "270").unwrap();
        let views = session.variants().unwrap();
        assert_eq!((views[1].weight, views[1].y), (10, 270));

        let err = session.edit_variant(1, "ten", "0", "270").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(session.variants().unwrap()[1].weight, 10);
    }

    #[test]
    fn test_select_unknown_block_keeps_selection() {
        let dir = pack_dir();
        let mut session = Session::default();
        let pack = session.set_pack_root(dir.path()).unwrap().clone();
        fs::write(
            pack.blockstate_path("dirt"),
            r#"{"variants":{"":[{"model":"block/dirt/0"}]}}"#,
        )
        .unwrap();
        session.select_block("dirt").unwrap();

        assert!(matches!(
            session.select_block("missing"),
            Err(EditorError::BlockNotFound(_))
        ));
        assert_eq!(session.selected_block(), Some("dirt"));
    }
}
