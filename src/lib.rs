//! # Pack Variant Editor
//!
//! A Rust library for editing the random texture variants of Minecraft
//! resource pack blocks.
//!
//! ## Overview
//!
//! A block's default state can list several weighted, rotated models. This
//! library keeps such blocks in a "one folder per block" layout, where every
//! variant has a numbered texture and model:
//!
//! ```text
//! assets/minecraft/blockstates/stone.json
//! assets/minecraft/models/block/stone/0.json, 1.json, 0_m.json, ...
//! assets/minecraft/textures/block/stone/0.png, 1.png, ...
//! ```
//!
//! Blocks still in the game's flat layout (`stone.json`, `stone.png`) are
//! migrated the first time they are opened.
//!
//! ## Quick Start
//!
//! ```ignore
//! use pack_variant_editor::{Session, EditorConfig};
//!
//! let mut session = Session::new(EditorConfig::default());
//! session.set_pack_root("path/to/pack")?;
//!
//! // Migrates the block if needed and lists its variants
//! let variants = session.select_block("stone")?;
//!
//! // Copy a texture in as a new variant
//! session.add_texture("mossy_stone.png")?;
//!
//! // Set weight, x and y rotation of variant 1
//! session.edit_variant(1, "5", "0", "90")?;
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod resource_pack;
pub mod session;

// Re-export main types for convenience
pub use config::{default_resource_pack_dir, EditorConfig};
pub use editor::{BlockEditor, Preparation, VariantView};
pub use error::{EditorError, Result};
pub use resource_pack::{
    create_pack, is_resource_pack_root, Blockstate, Pack, PackFormat, PackMetadata, Variant,
};
pub use session::Session;
