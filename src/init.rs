use std::sync::Arc;

use anyhow::{Context as _, Result};
use tracing::info;
use vulkano::{
  VulkanLibrary,
  command_buffer::allocator::StandardCommandBufferAllocator,
  device::{
    Device,
    DeviceCreateInfo,
    DeviceExtensions,
    Queue,
    QueueCreateInfo,
    QueueFlags,
    physical::PhysicalDeviceType,
  },
  instance::{Instance, InstanceCreateFlags, InstanceCreateInfo},
  swapchain::Surface,
};
use winit::event_loop::EventLoop;

pub struct InitializedVulkan {
  pub instance: Arc<Instance>,
  pub device: Arc<Device>,
  pub queue: Arc<Queue>,
  pub command_buffer_allocator: Arc<StandardCommandBufferAllocator>,
}

/// Brings up the Vulkan instance, picks a device with presentation support,
/// and creates the graphics queue and command buffer allocator.
pub fn initialize_vulkan(event_loop: &EventLoop<()>) -> Result<InitializedVulkan> {
  let library = VulkanLibrary::new().context("failed to load the Vulkan library")?;
  let required_extensions = Surface::required_extensions(event_loop)?;
  let instance = Instance::new(
    library,
    InstanceCreateInfo {
      flags: InstanceCreateFlags::ENUMERATE_PORTABILITY,
      enabled_extensions: required_extensions,
      ..Default::default()
    },
  )
  .context("failed to create Vulkan instance")?;

  let device_extensions = DeviceExtensions {
    khr_swapchain: true,
    ..DeviceExtensions::empty()
  };

  let (physical_device, queue_family_index) = instance
    .enumerate_physical_devices()?
    .filter(|p| p.supported_extensions().contains(&device_extensions))
    .filter_map(|p| {
      p.queue_family_properties()
        .iter()
        .enumerate()
        .position(|(i, q)| {
          q.queue_flags.intersects(QueueFlags::GRAPHICS)
            && p.presentation_support(i as u32, event_loop).unwrap_or(false)
        })
        .map(|i| (p, i as u32))
    })
    .min_by_key(|(p, _)| match p.properties().device_type {
      PhysicalDeviceType::DiscreteGpu => 0,
      PhysicalDeviceType::IntegratedGpu => 1,
      PhysicalDeviceType::VirtualGpu => 2,
      PhysicalDeviceType::Cpu => 3,
      PhysicalDeviceType::Other => 4,
      _ => 5,
    })
    .context("no suitable physical device found")?;

  info!(
    device = %physical_device.properties().device_name,
    device_type = ?physical_device.properties().device_type,
    "using device"
  );

  let (device, mut queues) = Device::new(
    physical_device,
    DeviceCreateInfo {
      enabled_extensions: device_extensions,
      queue_create_infos: vec![QueueCreateInfo {
        queue_family_index,
        ..Default::default()
      }],
      ..Default::default()
    },
  )
  .context("failed to create logical device")?;

  let queue = queues.next().context("device returned no queues")?;

  let command_buffer_allocator = Arc::new(StandardCommandBufferAllocator::new(
    device.clone(),
    Default::default(),
  ));

  Ok(InitializedVulkan {
    instance,
    device,
    queue,
    command_buffer_allocator,
  })
}
