use std::sync::Arc;

use vulkano::{
  image::{Image, view::ImageView},
  render_pass::{Framebuffer, FramebufferCreateInfo, RenderPass},
  swapchain::Swapchain,
  sync::GpuFuture,
};
use winit::window::Window;

pub struct RenderContext {
  pub window: Arc<Window>,
  pub swapchain: Arc<Swapchain>,
  pub render_pass: Arc<RenderPass>,
  pub framebuffers: Vec<Arc<Framebuffer>>,
  pub swapchain_image_views: Vec<Arc<ImageView>>,
  pub recreate_swapchain: bool,
  pub previous_frame_end: Option<Box<dyn GpuFuture>>,
}

/// Called once during initialization, then again whenever the window is
/// resized. The frame has no offscreen attachments, so this only rebuilds
/// the swapchain framebuffers.
pub fn window_size_dependent_setup(
  images: &[Arc<Image>],
  render_pass: &Arc<RenderPass>,
) -> Vec<Arc<Framebuffer>> {
  images
    .iter()
    .map(|image| {
      let view = ImageView::new_default(image.clone()).unwrap();
      Framebuffer::new(
        render_pass.clone(),
        FramebufferCreateInfo {
          attachments: vec![view],
          ..Default::default()
        },
      )
      .unwrap()
    })
    .collect()
}
