//! Rendering support
//!
//! Drawing itself belongs to the host. This module turns a state snapshot
//! into a flat, ordered list of sprites any backend can paint.

pub mod sprites;

pub use sprites::{Sprite, SpriteKind, build_sprites, score_label};
