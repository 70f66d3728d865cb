//! Docking layout construction for the editor shell.
//!
//! A layout is built once per root identifier: the available viewport (minus
//! the menu strip) is split recursively into leaf regions, and panel names
//! are bound to those regions. After `finish()` the record is read-only and
//! lives for the rest of the session; re-running the construction for the
//! same root identifier is a guaranteed no-op.

use std::collections::HashMap;

use egui::{Pos2, Rect};

/// Height of the menu strip reserved above the dock area.
pub const MENU_BAR_HEIGHT: f32 = 18.0;

pub const WORLD_OBJECTS_PANEL: &str = "World Objects";
pub const COMPONENT_DETAILS_PANEL: &str = "Components Details";
pub const FILE_CONTENT_PANEL: &str = "File Content";
pub const GAME_ENGINE_PANEL: &str = "Game Engine";

/// Opaque handle for a dock region, allocated by the layout it belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct RegionId(u32);

/// Which side of a region a split carves from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SplitDir {
  Left,
  Right,
  Up,
  Down,
}

/// A docking layout record: the set of leaf regions produced by splitting the
/// root area, plus the panel-name bindings established at build time.
#[derive(Clone, Debug)]
pub struct DockLayout {
  root_rect: Rect,
  leaves:    HashMap<RegionId, Rect>,
  bindings:  HashMap<&'static str, RegionId>,
  next_id:   u32,
  finished:  bool,
}

impl DockLayout {
  /// Creates a layout whose root region spans `root_rect`, returning the
  /// layout and the root's region id.
  pub fn new(root_rect: Rect) -> (Self, RegionId) {
    let root = RegionId(0);
    let mut leaves = HashMap::new();
    leaves.insert(root, root_rect);
    (
      Self {
        root_rect,
        leaves,
        bindings: HashMap::new(),
        next_id: 1,
        finished: false,
      },
      root,
    )
  }

  /// Splits a leaf region, carving `ratio` of its extent off the `dir` side.
  ///
  /// Returns `(carved, remaining)`. The parent region stops being a leaf.
  pub fn split(&mut self, region: RegionId, dir: SplitDir, ratio: f32) -> (RegionId, RegionId) {
    debug_assert!(!self.finished, "split after finish()");
    debug_assert!(ratio > 0.0 && ratio < 1.0);

    let parent = self
      .leaves
      .remove(&region)
      .expect("split target is not a leaf region");

    let (carved, remaining) = match dir {
      SplitDir::Left => {
        let x = parent.min.x + parent.width() * ratio;
        (
          Rect::from_min_max(parent.min, Pos2::new(x, parent.max.y)),
          Rect::from_min_max(Pos2::new(x, parent.min.y), parent.max),
        )
      }
      SplitDir::Right => {
        let x = parent.max.x - parent.width() * ratio;
        (
          Rect::from_min_max(Pos2::new(x, parent.min.y), parent.max),
          Rect::from_min_max(parent.min, Pos2::new(x, parent.max.y)),
        )
      }
      SplitDir::Up => {
        let y = parent.min.y + parent.height() * ratio;
        (
          Rect::from_min_max(parent.min, Pos2::new(parent.max.x, y)),
          Rect::from_min_max(Pos2::new(parent.min.x, y), parent.max),
        )
      }
      SplitDir::Down => {
        let y = parent.max.y - parent.height() * ratio;
        (
          Rect::from_min_max(Pos2::new(parent.min.x, y), parent.max),
          Rect::from_min_max(parent.min, Pos2::new(parent.max.x, y)),
        )
      }
    };

    let carved_id = self.alloc_id();
    let remaining_id = self.alloc_id();
    self.leaves.insert(carved_id, carved);
    self.leaves.insert(remaining_id, remaining);
    (carved_id, remaining_id)
  }

  /// Binds a panel name to a leaf region. Each panel name may be bound once.
  pub fn dock_panel(&mut self, name: &'static str, region: RegionId) {
    debug_assert!(!self.finished, "dock_panel after finish()");
    debug_assert!(self.leaves.contains_key(&region), "binding to a non-leaf");
    let previous = self.bindings.insert(name, region);
    debug_assert!(previous.is_none(), "panel bound twice: {name}");
  }

  /// Commits the layout. Splits and bindings are frozen from here on.
  pub fn finish(&mut self) {
    self.finished = true;
  }

  pub fn is_finished(&self) -> bool {
    self.finished
  }

  pub fn root_rect(&self) -> Rect {
    self.root_rect
  }

  /// The region rectangle a panel is docked into, if it is bound.
  pub fn panel_rect(&self, name: &str) -> Option<Rect> {
    self
      .bindings
      .get(name)
      .and_then(|region| self.leaves.get(region))
      .copied()
  }

  pub fn leaf_rects(&self) -> impl Iterator<Item = Rect> + '_ {
    self.leaves.values().copied()
  }

  pub fn leaf_count(&self) -> usize {
    self.leaves.len()
  }

  pub fn bindings(&self) -> &HashMap<&'static str, RegionId> {
    &self.bindings
  }

  fn alloc_id(&mut self) -> RegionId {
    let id = RegionId(self.next_id);
    self.next_id += 1;
    id
  }
}

/// Registry of dock layouts keyed by root identifier.
///
/// This is the two-state machine guarding layout construction: a root id
/// without a record is Uninitialized, and `ensure_layout` performs the
/// one-time transition to Initialized. Later calls only look the record up.
#[derive(Default)]
pub struct DockState {
  layouts: HashMap<egui::Id, DockLayout>,
}

impl DockState {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the layout for `root`, building it from `viewport` if this is
  /// the first call for that identifier.
  pub fn ensure_layout(&mut self, root: egui::Id, viewport: Rect) -> &DockLayout {
    if !self.layouts.contains_key(&root) {
      // Stale-record removal; a no-op unless a partial build ever leaked.
      self.layouts.remove(&root);
      self.layouts.insert(root, editor_layout(viewport));
    }
    &self.layouts[&root]
  }

  pub fn layout(&self, root: egui::Id) -> Option<&DockLayout> {
    self.layouts.get(&root)
  }

  pub fn contains(&self, root: egui::Id) -> bool {
    self.layouts.contains_key(&root)
  }
}

/// Builds the editor layout: a 25% column on the right, a 30% strip along
/// the bottom of the remainder, and the rest split 30/70 between the
/// world-objects panel and the game view.
pub fn editor_layout(viewport: Rect) -> DockLayout {
  let root_rect = Rect::from_min_max(
    Pos2::new(viewport.min.x, viewport.min.y + MENU_BAR_HEIGHT),
    viewport.max,
  );
  let (mut layout, root) = DockLayout::new(root_rect);

  let (right, left) = layout.split(root, SplitDir::Right, 0.25);
  let (file_content, upper) = layout.split(left, SplitDir::Down, 0.30);
  let (world_objects, game) = layout.split(upper, SplitDir::Left, 0.30);

  layout.dock_panel(WORLD_OBJECTS_PANEL, world_objects);
  layout.dock_panel(COMPONENT_DETAILS_PANEL, right);
  layout.dock_panel(FILE_CONTENT_PANEL, file_content);
  layout.dock_panel(GAME_ENGINE_PANEL, game);

  layout.finish();
  layout
}

#[cfg(test)]
mod tests {
  use egui::vec2;

  use super::*;

  const PANELS: [&str; 4] = [
    WORLD_OBJECTS_PANEL,
    COMPONENT_DETAILS_PANEL,
    FILE_CONTENT_PANEL,
    GAME_ENGINE_PANEL,
  ];

  fn viewport(w: f32, h: f32) -> Rect {
    Rect::from_min_size(Pos2::ZERO, vec2(w, h))
  }

  #[test]
  fn every_panel_has_exactly_one_binding() {
    let layout = editor_layout(viewport(1280.0, 720.0));
    assert!(layout.is_finished());
    assert_eq!(layout.leaf_count(), 4);
    assert_eq!(layout.bindings().len(), 4);
    for panel in PANELS {
      assert!(layout.panel_rect(panel).is_some(), "unbound panel: {panel}");
    }
  }

  #[test]
  fn second_build_for_same_root_is_a_noop() {
    let root = egui::Id::new("main_dock");
    let mut state = DockState::new();

    let first: Vec<(String, Rect)> = {
      let layout = state.ensure_layout(root, viewport(1280.0, 720.0));
      PANELS
        .iter()
        .map(|p| (p.to_string(), layout.panel_rect(p).unwrap()))
        .collect()
    };

    // A different viewport on re-entry must not trigger a rebuild.
    let layout = state.ensure_layout(root, viewport(640.0, 480.0));
    assert_eq!(layout.leaf_count(), 4);
    assert_eq!(layout.bindings().len(), 4);
    for (panel, rect) in first {
      assert_eq!(layout.panel_rect(&panel), Some(rect));
    }
  }

  #[test]
  fn distinct_roots_get_distinct_records() {
    let mut state = DockState::new();
    state.ensure_layout(egui::Id::new("a"), viewport(800.0, 600.0));
    assert!(!state.contains(egui::Id::new("b")));
    state.ensure_layout(egui::Id::new("b"), viewport(800.0, 600.0));
    assert!(state.contains(egui::Id::new("a")));
    assert!(state.contains(egui::Id::new("b")));
  }

  #[test]
  fn leaves_partition_the_root_region() {
    for (w, h) in [(1280.0, 720.0), (1920.0, 1080.0), (997.0, 613.0)] {
      let layout = editor_layout(viewport(w, h));
      let root = layout.root_rect();
      assert_eq!(root.min.y, MENU_BAR_HEIGHT);

      let leaves: Vec<Rect> = layout.leaf_rects().collect();
      let mut area = 0.0;
      for (i, a) in leaves.iter().enumerate() {
        assert!(root.contains_rect(*a), "leaf outside root at {w}x{h}");
        area += a.area();
        for b in &leaves[i + 1..] {
          let overlap = a.intersect(*b);
          assert!(
            !overlap.is_positive(),
            "overlapping leaves at {w}x{h}: {a:?} / {b:?}"
          );
        }
      }
      let expected = root.area();
      assert!(
        (area - expected).abs() <= expected * 1e-5,
        "leaves do not cover root at {w}x{h}: {area} vs {expected}"
      );
    }
  }

  #[test]
  fn split_ratios_match_the_fixed_constants() {
    let layout = editor_layout(viewport(1280.0, 720.0));
    let root = layout.root_rect();

    let right = layout.panel_rect(COMPONENT_DETAILS_PANEL).unwrap();
    assert!((right.width() - root.width() * 0.25).abs() < 1e-3);
    assert!((right.height() - root.height()).abs() < 1e-3);

    let left_width = root.width() - right.width();
    let file_content = layout.panel_rect(FILE_CONTENT_PANEL).unwrap();
    assert!((file_content.width() - left_width).abs() < 1e-3);
    assert!((file_content.height() - root.height() * 0.30).abs() < 1e-3);

    let world_objects = layout.panel_rect(WORLD_OBJECTS_PANEL).unwrap();
    assert!((world_objects.width() - left_width * 0.30).abs() < 1e-3);
  }

  #[test]
  fn end_to_end_1280x720() {
    let layout = editor_layout(viewport(1280.0, 720.0));
    let root = layout.root_rect();
    assert!((root.height() - 702.0).abs() < 1e-3);
    assert!((root.width() - 1280.0).abs() < 1e-3);

    let right = layout.panel_rect(COMPONENT_DETAILS_PANEL).unwrap();
    assert!((right.width() - 320.0).abs() < 1e-3);
    assert!((right.height() - 702.0).abs() < 1e-3);

    let file_content = layout.panel_rect(FILE_CONTENT_PANEL).unwrap();
    assert!((file_content.width() - 960.0).abs() < 1e-3);
    assert!((file_content.height() - 210.6).abs() < 1e-2);

    let world_objects = layout.panel_rect(WORLD_OBJECTS_PANEL).unwrap();
    assert!((world_objects.width() - 288.0).abs() < 1e-2);
    assert!((world_objects.height() - 491.4).abs() < 1e-2);

    let game = layout.panel_rect(GAME_ENGINE_PANEL).unwrap();
    assert!((game.width() - 672.0).abs() < 1e-2);
    assert!((game.height() - 491.4).abs() < 1e-2);
  }

  #[test]
  fn split_carves_from_the_requested_side() {
    let (mut layout, root) = DockLayout::new(viewport(100.0, 100.0));
    let (carved, remaining) = layout.split(root, SplitDir::Right, 0.25);
    let carved = *layout.leaves.get(&carved).unwrap();
    let remaining = *layout.leaves.get(&remaining).unwrap();
    assert_eq!(carved.max.x, 100.0);
    assert!((carved.width() - 25.0).abs() < 1e-4);
    assert_eq!(remaining.min.x, 0.0);
    assert!((remaining.width() - 75.0).abs() < 1e-4);
  }
}
