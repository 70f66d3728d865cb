//! Application shell and frame driver.
//!
//! This module owns the per-frame control loop:
//! * `resumed` creates the window, swapchain, render pass and egui
//!   integration, and runs the one-shot editor setup
//! * `window_event` dispatches input to egui and handles close/resize
//! * `RedrawRequested` runs one tick of the frame driver
//!
//! # Frame Loop
//! Each tick follows this sequence:
//! 1. Recreate the swapchain if the window changed
//! 2. Begin a GUI frame and invoke the editor UI render callback
//! 3. End the GUI frame and record the command buffer: a clear-only base
//!    subpass (so the view is cleared even with no other draw calls),
//!    then the egui overlay subpass
//! 4. Submit and present, advancing the frame counter
//!
//! The tick reports continuation as a boolean; the only way it returns
//! `false` is the editor requesting exit. Unrecoverable Vulkan errors panic.

use std::{sync::Arc, time::Instant};

use anyhow::Result;
use egui_winit_vulkano::{Gui, GuiConfig};
use tracing::{info, warn};
use vulkano::{
  Validated,
  VulkanError,
  command_buffer::{
    AutoCommandBufferBuilder,
    CommandBufferUsage,
    allocator::StandardCommandBufferAllocator,
  },
  device::{Device, Queue},
  format::Format,
  image::{ImageUsage, view::ImageView},
  instance::Instance,
  render_pass::Subpass,
  swapchain::{
    PresentMode,
    Surface,
    Swapchain,
    SwapchainCreateInfo,
    SwapchainPresentInfo,
    acquire_next_image,
  },
  sync::{self, GpuFuture},
};
use winit::{
  application::ApplicationHandler,
  dpi::LogicalSize,
  event::WindowEvent,
  event_loop::{ActiveEventLoop, EventLoop},
  window::{Window, WindowId},
};

use crate::{
  command_buffer_builder_ext::AutoCommandBufferBuilderExt,
  context::EngineContext,
  editor::{EditorUi, UiLayer},
  init::initialize_vulkan,
  render::{RenderContext, window_size_dependent_setup},
};

/// Window and presentation settings taken from the command line.
#[derive(Clone, Copy, Debug)]
pub struct AppConfig {
  pub width:  u32,
  pub height: u32,
  /// Force FIFO presentation instead of preferring immediate/mailbox.
  pub vsync:  bool,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      width:  1280,
      height: 720,
      vsync:  false,
    }
  }
}

/// Rolling frame statistics shown in the debug-text overlay.
struct FrameStats {
  frame_count:            u64,
  fps:                    f32,
  avg_fps:                f32,
  frames_since_avg:       u32,
  frame_time_accumulator: f32,
  last_frame_time:        Instant,
  last_avg_update:        Instant,
}

impl FrameStats {
  fn new() -> Self {
    Self {
      frame_count:            0,
      fps:                    0.0,
      avg_fps:                0.0,
      frames_since_avg:       0,
      frame_time_accumulator: 0.0,
      last_frame_time:        Instant::now(),
      last_avg_update:        Instant::now(),
    }
  }

  fn tick(&mut self) {
    let now = Instant::now();
    let frame_time = now.duration_since(self.last_frame_time).as_secs_f32();
    if frame_time > 0.0 {
      self.fps = 1.0 / frame_time;
    }
    self.frame_time_accumulator += frame_time;
    self.frames_since_avg += 1;

    // Update the average once per second
    if now.duration_since(self.last_avg_update).as_secs_f32() >= 1.0 {
      self.avg_fps = self.frames_since_avg as f32 / self.frame_time_accumulator;
      self.frames_since_avg = 0;
      self.frame_time_accumulator = 0.0;
      self.last_avg_update = now;
    }

    self.last_frame_time = now;
  }
}

/// Main application state: Vulkan resources, the render context created on
/// resume, the egui integration, and the editor-side state.
pub struct App {
  // Vulkan resources
  instance: Arc<Instance>,
  device:   Arc<Device>,
  queue:    Arc<Queue>,
  command_buffer_allocator: Arc<StandardCommandBufferAllocator>,

  // Rendering context and UI
  rcx:    Option<RenderContext>,
  gui:    Option<Gui>,
  editor: EditorUi,
  engine: EngineContext,

  // Frame timing
  stats: FrameStats,

  config: AppConfig,
}

impl App {
  pub fn new(event_loop: &EventLoop<()>, config: AppConfig) -> Result<Self> {
    let initialized = initialize_vulkan(event_loop)?;

    Ok(App {
      instance: initialized.instance,
      device: initialized.device,
      queue: initialized.queue,
      command_buffer_allocator: initialized.command_buffer_allocator,
      rcx: None,
      gui: None,
      editor: EditorUi::new(),
      engine: EngineContext::new(),
      stats: FrameStats::new(),
      config,
    })
  }

  /// Drives one frame and reports whether the loop should continue.
  ///
  /// Returns `false` only when the editor UI requested exit; window close is
  /// handled as an event before this is reached.
  fn render_frame(&mut self) -> bool {
    let Self {
      rcx,
      gui,
      editor,
      engine,
      stats,
      device,
      queue,
      command_buffer_allocator,
      ..
    } = self;

    stats.tick();

    let rcx = rcx.as_mut().unwrap();
    let window_size = rcx.window.inner_size();
    if window_size.width == 0 || window_size.height == 0 {
      return true;
    }

    rcx.previous_frame_end.as_mut().unwrap().cleanup_finished();

    if rcx.recreate_swapchain {
      let (new_swapchain, new_images) = rcx
        .swapchain
        .recreate(SwapchainCreateInfo {
          image_extent: window_size.into(),
          ..rcx.swapchain.create_info()
        })
        .expect("failed to recreate swapchain");

      rcx.swapchain = new_swapchain;
      rcx.swapchain_image_views = new_images
        .iter()
        .map(|image| ImageView::new_default(image.clone()).unwrap())
        .collect();
      rcx.framebuffers = window_size_dependent_setup(&new_images, &rcx.render_pass);
      rcx.recreate_swapchain = false;
    }

    // GUI frame: editor UI first, then the debug-text overlay.
    let mut keep_running = true;
    if let Some(gui) = gui.as_mut() {
      gui.immediate_ui(|gui| {
        let ctx = gui.context();
        let changes = editor.render(&ctx, engine);
        if changes.exit {
          keep_running = false;
        }
        draw_debug_overlay(&ctx, stats, [window_size.width, window_size.height]);
      });
    }
    if !keep_running {
      return false;
    }

    let (image_index, suboptimal, acquire_future) =
      match acquire_next_image(rcx.swapchain.clone(), None).map_err(Validated::unwrap) {
        Ok(r) => r,
        Err(VulkanError::OutOfDate) => {
          rcx.recreate_swapchain = true;
          return true;
        }
        Err(e) => panic!("failed to acquire next image: {e}"),
      };

    if suboptimal {
      rcx.recreate_swapchain = true;
    }

    let mut builder = AutoCommandBufferBuilder::primary(
      command_buffer_allocator.clone(),
      queue.queue_family_index(),
      CommandBufferUsage::OneTimeSubmit,
    )
    .unwrap();

    builder.build_editor_render_pass(rcx, image_index, gui);

    let command_buffer = builder.build().unwrap();

    let final_future = rcx
      .previous_frame_end
      .take()
      .unwrap()
      .join(acquire_future)
      .then_execute(queue.clone(), command_buffer)
      .unwrap()
      .then_swapchain_present(
        queue.clone(),
        SwapchainPresentInfo::swapchain_image_index(rcx.swapchain.clone(), image_index),
      )
      .then_signal_fence_and_flush();

    match final_future.map_err(Validated::unwrap) {
      Ok(future) => {
        rcx.previous_frame_end = Some(future.boxed());
      }
      Err(VulkanError::OutOfDate) => {
        rcx.recreate_swapchain = true;
        rcx.previous_frame_end = Some(sync::now(device.clone()).boxed());
      }
      Err(e) => {
        warn!("failed to flush frame: {e}");
        rcx.previous_frame_end = Some(sync::now(device.clone()).boxed());
      }
    }

    stats.frame_count += 1;
    true
  }
}

impl ApplicationHandler for App {
  fn resumed(&mut self, event_loop: &ActiveEventLoop) {
    let window_attrs = Window::default_attributes()
      .with_decorations(true)
      .with_title("Vulkano Editor")
      .with_inner_size(LogicalSize::new(self.config.width, self.config.height));

    let window = Arc::new(event_loop.create_window(window_attrs).unwrap());
    let surface = Surface::from_window(self.instance.clone(), window.clone()).unwrap();
    let window_size = window.inner_size();

    let (swapchain, images) = {
      let surface_capabilities = self
        .device
        .physical_device()
        .surface_capabilities(&surface, Default::default())
        .unwrap();

      let present_modes = self
        .device
        .physical_device()
        .surface_present_modes(&surface, Default::default())
        .unwrap();

      let present_mode = if self.config.vsync {
        PresentMode::Fifo
      } else if present_modes.contains(&PresentMode::Immediate) {
        PresentMode::Immediate
      } else if present_modes.contains(&PresentMode::Mailbox) {
        PresentMode::Mailbox
      } else {
        PresentMode::Fifo
      };
      info!(?present_mode, "selected present mode");

      let (image_format, _) = self
        .device
        .physical_device()
        .surface_formats(&surface, Default::default())
        .unwrap()
        .into_iter()
        .find(|(format, _)| {
          matches!(
            format,
            Format::B8G8R8A8_UNORM | Format::R8G8B8A8_UNORM | Format::A8B8G8R8_UNORM_PACK32
          )
        })
        .unwrap_or_else(|| {
          self
            .device
            .physical_device()
            .surface_formats(&surface, Default::default())
            .unwrap()[0]
        });
      info!(?image_format, "selected surface format");

      Swapchain::new(self.device.clone(), surface.clone(), SwapchainCreateInfo {
        min_image_count: surface_capabilities.min_image_count.max(2),
        image_format,
        image_extent: window_size.into(),
        image_usage: ImageUsage::COLOR_ATTACHMENT,
        composite_alpha: vulkano::swapchain::CompositeAlpha::Opaque,
        pre_transform: surface_capabilities.current_transform,
        clipped: true,
        present_mode,
        ..Default::default()
      })
      .unwrap()
    };

    // Two subpasses on one attachment: the clear-only base pass, then the
    // egui overlay recorded as secondary command buffers.
    let render_pass = vulkano::ordered_passes_renderpass!(
      self.device.clone(),
      attachments: {
        color: {
          format: swapchain.image_format(),
          samples: 1,
          load_op: Clear,
          store_op: Store,
        }
      },
      passes: [
        {
          color: [color],
          depth_stencil: {},
          input: []
        },
        {
          color: [color],
          depth_stencil: {},
          input: []
        }
      ]
    )
    .unwrap();

    let swapchain_image_views: Vec<_> = images
      .iter()
      .map(|image| ImageView::new_default(image.clone()).unwrap())
      .collect();

    let framebuffers = window_size_dependent_setup(&images, &render_pass);

    self.gui = Some(Gui::new_with_subpass(
      event_loop,
      surface.clone(),
      self.queue.clone(),
      Subpass::from(render_pass.clone(), 1).unwrap(),
      swapchain.image_format(),
      GuiConfig::default(),
    ));

    // One-shot docking-layout construction; the per-frame path only re-checks.
    self.editor.initialize(egui::Rect::from_min_size(
      egui::Pos2::ZERO,
      egui::vec2(window_size.width as f32, window_size.height as f32),
    ));

    self.rcx = Some(RenderContext {
      window,
      swapchain,
      render_pass,
      framebuffers,
      swapchain_image_views,
      recreate_swapchain: false,
      previous_frame_end: Some(sync::now(self.device.clone()).boxed()),
    });
  }

  fn window_event(
    &mut self,
    event_loop: &ActiveEventLoop,
    _window_id: WindowId,
    event: WindowEvent,
  ) {
    if let Some(gui) = &mut self.gui {
      gui.update(&event);
    }

    match event {
      WindowEvent::CloseRequested => {
        self.engine.shutdown();
        event_loop.exit();
      }
      WindowEvent::Resized(_) => {
        if let Some(rcx) = self.rcx.as_mut() {
          rcx.recreate_swapchain = true;
        }
      }
      WindowEvent::RedrawRequested => {
        if !self.render_frame() {
          self.engine.shutdown();
          event_loop.exit();
        }
      }
      _ => {}
    }
  }

  fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
    if let Some(rcx) = self.rcx.as_ref() {
      rcx.window.request_redraw();
    }
  }
}

/// Monospace stats readout in the corner, in the spirit of a renderer's
/// debug-text output.
fn draw_debug_overlay(ctx: &egui::Context, stats: &FrameStats, backbuffer: [u32; 2]) {
  egui::Area::new(egui::Id::new("debug_text"))
    .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(8.0, -8.0))
    .interactable(false)
    .show(ctx, |ui| {
      ui.label(
        egui::RichText::new(format!(
          "frame {}  backbuffer {}x{}  fps {:.1} (avg {:.1})",
          stats.frame_count, backbuffer[0], backbuffer[1], stats.fps, stats.avg_fps,
        ))
        .monospace()
        .color(egui::Color32::from_gray(200)),
      );
    });
}
