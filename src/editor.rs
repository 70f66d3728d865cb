//! Editor overlay: menu bar, docking layout, and panel visibility flags.
//!
//! The menu bar is the only panel with real content in this example; the
//! world-objects and game panels are stubs that a full editor would fill in.

use egui::{Color32, Context, CornerRadius, Id, LayerId, Rect, Stroke, StrokeKind};

use crate::{
  context::EngineContext,
  dock::{DockLayout, DockState, MENU_BAR_HEIGHT},
};

/// Root identifier of the editor's docking layout.
pub const MAIN_DOCK_ID: &str = "main_dock";

/// The panels the editor knows about, one visibility flag each.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
  Menu,
  WorldObjects,
  Game,
  FileContent,
}

impl Panel {
  pub const ALL: [Panel; 4] = [Panel::Menu, Panel::WorldObjects, Panel::Game, Panel::FileContent];
}

/// Changes made through the UI that the frame driver has to act on.
#[derive(Default)]
pub struct EditorChanges {
  /// The user picked Exit from the menu.
  pub exit: bool,
}

/// The capability the application drives each frame.
pub trait UiLayer {
  /// One-shot setup at application start; builds the docking layout for the
  /// given viewport.
  fn initialize(&mut self, viewport: Rect);

  /// Draws the UI for the current frame. Must only be called after
  /// `initialize`.
  fn render(&mut self, ctx: &Context, engine: &mut EngineContext) -> EditorChanges;
}

pub struct EditorUi {
  menu_open:          bool,
  world_objects_open: bool,
  game_open:          bool,
  file_content_open:  bool,
  dock:               DockState,
}

impl EditorUi {
  pub fn new() -> Self {
    Self {
      menu_open:          true,
      world_objects_open: true,
      game_open:          true,
      file_content_open:  true,
      dock:               DockState::new(),
    }
  }

  pub fn is_open(&self, panel: Panel) -> bool {
    match panel {
      Panel::Menu => self.menu_open,
      Panel::WorldObjects => self.world_objects_open,
      Panel::Game => self.game_open,
      Panel::FileContent => self.file_content_open,
    }
  }

  pub fn toggle(&mut self, panel: Panel) {
    let flag = match panel {
      Panel::Menu => &mut self.menu_open,
      Panel::WorldObjects => &mut self.world_objects_open,
      Panel::Game => &mut self.game_open,
      Panel::FileContent => &mut self.file_content_open,
    };
    *flag = !*flag;
  }

  pub fn layout(&self) -> Option<&DockLayout> {
    self.dock.layout(Id::new(MAIN_DOCK_ID))
  }

  fn show_menu(&mut self, ctx: &Context, engine: &mut EngineContext, changes: &mut EditorChanges) {
    // Establish or reuse the docking layout before anything is drawn. This
    // stays idempotent: after `initialize` it is a pure lookup.
    let leaves: Vec<Rect> = self
      .dock
      .ensure_layout(Id::new(MAIN_DOCK_ID), ctx.screen_rect())
      .leaf_rects()
      .collect();

    // Dock-region outlines, painted behind everything else.
    let painter = ctx.layer_painter(LayerId::background());
    for rect in leaves {
      painter.rect_stroke(
        rect,
        CornerRadius::ZERO,
        Stroke::new(1.0, Color32::from_gray(60)),
        StrokeKind::Inside,
      );
    }

    if !self.menu_open {
      return;
    }

    let EditorUi {
      menu_open,
      world_objects_open,
      game_open,
      file_content_open,
      ..
    } = self;

    egui::TopBottomPanel::top("editor_menu")
      .exact_height(MENU_BAR_HEIGHT)
      .show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
          ui.menu_button("Menu", |ui| {
            if ui.button("Reload Current Level").clicked() {
              engine.reload_current_level();
              ui.close_menu();
            }
            if ui.button("Save Current Level").clicked() {
              engine.save_current_level();
              ui.close_menu();
            }
            ui.menu_button("Debug", |ui| {
              ui.menu_button("Animation", |ui| {
                if ui.button(flip_label(engine.debug.show_skeleton, "skeleton")).clicked() {
                  engine.debug.show_skeleton = !engine.debug.show_skeleton;
                }
                if ui.button(flip_label(engine.debug.show_bone_name, "bone name")).clicked() {
                  engine.debug.show_bone_name = !engine.debug.show_bone_name;
                }
              });
              ui.menu_button("Camera", |ui| {
                if ui
                  .button(flip_label(engine.debug.show_runtime_info, "runtime info"))
                  .clicked()
                {
                  engine.debug.show_runtime_info = !engine.debug.show_runtime_info;
                }
              });
              ui.menu_button("Game Object", |ui| {
                if ui
                  .button(flip_label(engine.debug.show_bounding_box, "bounding box"))
                  .clicked()
                {
                  engine.debug.show_bounding_box = !engine.debug.show_bounding_box;
                }
              });
            });
            if ui.button("Exit").clicked() {
              changes.exit = true;
              ui.close_menu();
            }
          });
          ui.menu_button("Window", |ui| {
            ui.checkbox(menu_open, "Editor Menu");
            ui.checkbox(world_objects_open, "World Objects");
            ui.checkbox(game_open, "Game");
            ui.checkbox(file_content_open, "File Content");
          });
        });
      });
  }

  // Panel bodies are stubs in this example; each skips itself when its
  // visibility flag is off.
  fn show_world_objects(&mut self, _ctx: &Context) {}

  fn show_game_window(&mut self, _ctx: &Context) {}
}

impl Default for EditorUi {
  fn default() -> Self {
    Self::new()
  }
}

impl UiLayer for EditorUi {
  fn initialize(&mut self, viewport: Rect) {
    self.dock.ensure_layout(Id::new(MAIN_DOCK_ID), viewport);
  }

  fn render(&mut self, ctx: &Context, engine: &mut EngineContext) -> EditorChanges {
    let mut changes = EditorChanges::default();
    self.show_menu(ctx, engine, &mut changes);
    self.show_world_objects(ctx);
    self.show_game_window(ctx);
    changes
  }
}

fn flip_label(shown: bool, what: &str) -> String {
  if shown {
    format!("off {what}")
  } else {
    format!("show {what}")
  }
}

#[cfg(test)]
mod tests {
  use egui::{Pos2, vec2};

  use super::*;

  fn viewport() -> Rect {
    Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 720.0))
  }

  #[test]
  fn panels_start_visible() {
    let ui = EditorUi::new();
    for panel in Panel::ALL {
      assert!(ui.is_open(panel), "{panel:?} should default to visible");
    }
  }

  #[test]
  fn toggle_flips_exactly_one_flag() {
    for target in Panel::ALL {
      let mut ui = EditorUi::new();
      ui.toggle(target);
      for panel in Panel::ALL {
        assert_eq!(
          ui.is_open(panel),
          panel != target,
          "toggling {target:?} affected {panel:?}"
        );
      }
      ui.toggle(target);
      assert!(ui.is_open(target));
    }
  }

  #[test]
  fn initialize_builds_the_layout_once() {
    let mut ui = EditorUi::new();
    ui.initialize(viewport());
    let before = ui.layout().unwrap().root_rect();

    // Re-entry with a different viewport must not rebuild.
    ui.initialize(Rect::from_min_size(Pos2::ZERO, vec2(640.0, 480.0)));
    assert_eq!(ui.layout().unwrap().root_rect(), before);
  }

  #[test]
  fn render_establishes_layout_and_requests_nothing() {
    let ctx = Context::default();
    let mut ui = EditorUi::new();
    let mut engine = EngineContext::new();

    let input = egui::RawInput {
      screen_rect: Some(viewport()),
      ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
      let changes = ui.render(ctx, &mut engine);
      assert!(!changes.exit);
    });

    let layout = ui.layout().expect("render must establish the dock layout");
    assert!(layout.is_finished());
    assert_eq!(layout.leaf_count(), 4);
  }

  #[test]
  fn hidden_menu_still_keeps_the_layout() {
    let ctx = Context::default();
    let mut ui = EditorUi::new();
    let mut engine = EngineContext::new();
    ui.toggle(Panel::Menu);

    let input = egui::RawInput {
      screen_rect: Some(viewport()),
      ..Default::default()
    };
    let _ = ctx.run(input, |ctx| {
      ui.render(ctx, &mut engine);
    });

    assert!(!ui.is_open(Panel::Menu));
    assert!(ui.layout().is_some());
  }
}
