use egui_winit_vulkano::Gui;
use vulkano::command_buffer::{
  AutoCommandBufferBuilder,
  RenderPassBeginInfo,
  SubpassBeginInfo,
  SubpassContents,
  SubpassEndInfo,
};

use crate::render::RenderContext;

/// Background clear color (0x303030ff).
const CLEAR_COLOR: [f32; 4] = [0.188, 0.188, 0.188, 1.0];

pub(crate) trait AutoCommandBufferBuilderExt<L> {
  fn build_editor_render_pass(&mut self, rcx: &RenderContext, image_index: u32, gui: &mut Option<Gui>);
}

impl<L> AutoCommandBufferBuilderExt<L> for AutoCommandBufferBuilder<L> {
  fn build_editor_render_pass(
    &mut self,
    rcx: &RenderContext,
    image_index: u32,
    gui: &mut Option<Gui>,
  ) {
    self
      .begin_render_pass(
        RenderPassBeginInfo {
          clear_values: vec![Some(CLEAR_COLOR.into())],
          ..RenderPassBeginInfo::framebuffer(rcx.framebuffers[image_index as usize].clone())
        },
        SubpassBeginInfo {
          contents: SubpassContents::Inline,
          ..Default::default()
        },
      )
      .unwrap();

    // The base subpass records no draws; beginning it is what applies the
    // clear, so the view is valid even when the GUI emits nothing.
    self
      .next_subpass(
        SubpassEndInfo::default(),
        SubpassBeginInfo {
          contents: SubpassContents::SecondaryCommandBuffers,
          ..Default::default()
        },
      )
      .unwrap();

    // Draw egui in the second subpass
    if let Some(gui) = gui {
      let cb = gui.draw_on_subpass_image([
        rcx.swapchain.image_extent()[0],
        rcx.swapchain.image_extent()[1],
      ]);
      self.execute_commands(cb).unwrap();
    }

    self.end_render_pass(SubpassEndInfo::default()).unwrap();
  }
}
