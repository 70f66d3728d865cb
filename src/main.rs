use anyhow::Result;
use clap::Parser;
use vulkano_editor::{App, AppConfig};
use winit::event_loop::EventLoop;

/// Minimal editor shell: Vulkan backend, egui overlay, docked panel layout.
#[derive(Parser, Debug)]
#[command(name = "vulkano-editor", version, about)]
struct Args {
  /// Window width in pixels
  #[arg(long, default_value_t = 1280)]
  width: u32,

  /// Window height in pixels
  #[arg(long, default_value_t = 720)]
  height: u32,

  /// Force FIFO (vsync) presentation
  #[arg(long)]
  vsync: bool,
}

fn main() -> Result<()> {
  vulkano_editor::logging::init();
  let args = Args::parse();

  let event_loop = EventLoop::new()?;
  let mut app = App::new(&event_loop, AppConfig {
    width:  args.width,
    height: args.height,
    vsync:  args.vsync,
  })?;
  event_loop.run_app(&mut app)?;
  Ok(())
}
