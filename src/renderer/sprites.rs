//! Sprite layout for a frame
//!
//! Falling objects are drawn centered on their lane, the spider sits on top
//! of the interaction zone, and each lane gets a full-height web line.

use glam::Vec2;

use crate::sim::{GameState, LaneSet, ObjectKind};
use crate::tuning::Tuning;

/// Width of a lane's web line
pub const LINE_WIDTH: f32 = 20.0;

/// Score label anchor (text baseline, top-left of the field)
pub const SCORE_ANCHOR: Vec2 = Vec2::new(10.0, 30.0);

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteKind {
    Line,
    Spider,
    Droplet,
    Fly,
}

impl SpriteKind {
    /// Fallback fill color when the host has no image for this kind
    pub fn color(self) -> &'static str {
        match self {
            SpriteKind::Line => "#555555",
            SpriteKind::Spider => "#222222",
            SpriteKind::Droplet => "#3a8dde",
            SpriteKind::Fly => "#7cc242",
        }
    }
}

/// An axis-aligned image placement, top-left origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    pub pos: Vec2,
    pub size: Vec2,
}

impl Sprite {
    fn new(kind: SpriteKind, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Square sprite centered horizontally on `center_x`
    fn centered(kind: SpriteKind, center_x: f32, y: f32, width: f32) -> Self {
        Self::new(kind, center_x - width / 2.0, y, width, width)
    }
}

/// Build the draw list in paint order: lines, spider, droplets, flies
pub fn build_sprites(state: &GameState, lanes: &LaneSet, tuning: &Tuning) -> Vec<Sprite> {
    let mut sprites =
        Vec::with_capacity(lanes.len() + 1 + state.droplets.len() + state.flies.len());

    for &x in lanes.positions() {
        sprites.push(Sprite::new(
            SpriteKind::Line,
            x - LINE_WIDTH / 2.0,
            0.0,
            LINE_WIDTH,
            tuning.field_height,
        ));
    }

    sprites.push(Sprite::new(
        SpriteKind::Spider,
        lanes.x(state.spider.lane) - tuning.spider_width / 2.0,
        tuning.zone_top(),
        tuning.spider_width,
        tuning.spider_height,
    ));

    for (kind, object_kind) in [
        (SpriteKind::Droplet, ObjectKind::Droplet),
        (SpriteKind::Fly, ObjectKind::Fly),
    ] {
        let width = object_kind.width(tuning);
        sprites.extend(
            state
                .objects(object_kind)
                .iter()
                .map(|o| Sprite::centered(kind, o.x, o.y, width)),
        );
    }

    sprites
}

/// HUD text for the current score
pub fn score_label(state: &GameState) -> String {
    format!("Score: {}", state.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::FallingObject;

    #[test]
    fn test_reference_layout() {
        let tuning = Tuning::default();
        let lanes = LaneSet::from(&tuning);
        let mut state = GameState::new(&tuning, 1);
        state.droplets.push(FallingObject::at(200.0, 50.0));
        state.flies.push(FallingObject::at(400.0, 120.0));

        let sprites = build_sprites(&state, &lanes, &tuning);
        assert_eq!(sprites.len(), 5 + 1 + 1 + 1);

        let first_line = sprites[0];
        assert_eq!(first_line.kind, SpriteKind::Line);
        assert_eq!(first_line.pos, Vec2::new(90.0, 0.0));
        assert_eq!(first_line.size, Vec2::new(20.0, 600.0));

        let spider = sprites[5];
        assert_eq!(spider.kind, SpriteKind::Spider);
        assert_eq!(spider.pos, Vec2::new(280.0, 500.0));
        assert_eq!(spider.size, Vec2::new(40.0, 40.0));

        assert_eq!(sprites[6].kind, SpriteKind::Droplet);
        assert_eq!(sprites[6].pos, Vec2::new(185.0, 50.0));
        assert_eq!(sprites[7].kind, SpriteKind::Fly);
        assert_eq!(sprites[7].pos, Vec2::new(385.0, 120.0));
        assert_eq!(sprites[7].size, Vec2::splat(30.0));
    }

    #[test]
    fn test_spider_follows_lane() {
        let tuning = Tuning::default();
        let lanes = LaneSet::from(&tuning);
        let mut state = GameState::new(&tuning, 1);
        state.spider.lane = 0;

        let spider = build_sprites(&state, &lanes, &tuning)
            .into_iter()
            .find(|s| s.kind == SpriteKind::Spider)
            .unwrap();
        assert_eq!(spider.pos.x, 80.0);
    }

    #[test]
    fn test_score_label() {
        let mut state = GameState::new(&Tuning::default(), 1);
        state.score = 12;
        assert_eq!(score_label(&state), "Score: 12");
    }
}
