//! Engine-side state shared with the editor UI.
//!
//! Stands in for the runtime the editor would normally drive (world manager,
//! render system, engine lifecycle). Passed by reference wherever it is
//! needed instead of living in a process-wide global.

use tracing::info;

/// Debug-visualization toggles owned by the render pipeline.
#[derive(Clone, Copy, Default, Debug)]
pub struct RenderDebugConfig {
  pub show_skeleton:     bool,
  pub show_bone_name:    bool,
  pub show_runtime_info: bool,
  pub show_bounding_box: bool,
}

/// World state the menu actions operate on.
#[derive(Clone, Debug)]
pub struct WorldState {
  pub current_level:   String,
  pub selected_object: Option<u32>,
}

pub struct EngineContext {
  pub debug: RenderDebugConfig,
  pub world: WorldState,
  running:   bool,
}

impl EngineContext {
  pub fn new() -> Self {
    Self {
      debug: RenderDebugConfig::default(),
      world: WorldState {
        current_level:   "levels/default.level".to_string(),
        selected_object: None,
      },
      running: true,
    }
  }

  /// Reloads the current level and drops any object selection, since object
  /// ids do not survive a reload.
  pub fn reload_current_level(&mut self) {
    info!(level = %self.world.current_level, "reloading current level");
    self.world.selected_object = None;
  }

  pub fn save_current_level(&self) {
    info!(level = %self.world.current_level, "saving current level");
  }

  /// Marks the engine as stopped. The frame loop checks this after every UI
  /// pass and terminates once it flips.
  pub fn shutdown(&mut self) {
    if self.running {
      info!("engine shutdown requested");
      self.running = false;
    }
  }

  pub fn is_running(&self) -> bool {
    self.running
  }
}

impl Default for EngineContext {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reload_clears_the_selection() {
    let mut engine = EngineContext::new();
    engine.world.selected_object = Some(42);
    engine.reload_current_level();
    assert_eq!(engine.world.selected_object, None);
  }

  #[test]
  fn shutdown_is_sticky() {
    let mut engine = EngineContext::new();
    assert!(engine.is_running());
    engine.shutdown();
    engine.shutdown();
    assert!(!engine.is_running());
  }
}
