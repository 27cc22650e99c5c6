//! wgpu adapter and device acquisition.

use crate::error::{GpuError, Result};
use tracing::info;

/// Holds the wgpu instance, adapter, device, and queue.
#[derive(Debug)]
pub struct WgpuDevice {
    pub instance: wgpu::Instance,
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl WgpuDevice {
    /// Acquire a device, preferring high-performance adapters.
    ///
    /// Fails with [`GpuError::NoAdapter`] when the platform exposes no
    /// compute-capable adapter at all.
    pub async fn new() -> Result<Self> {
        Self::with_power_preference(wgpu::PowerPreference::HighPerformance).await
    }

    /// Acquire a device using the given adapter power preference.
    pub async fn with_power_preference(power_preference: wgpu::PowerPreference) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        info!(
            backend = ?adapter_info.backend,
            device = %adapter_info.name,
            device_type = ?adapter_info.device_type,
            "selected wgpu adapter"
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("gk-wgpu"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::downlevel_defaults(),
                    ..Default::default()
                },
                None,
            )
            .await?;

        Ok(Self {
            instance,
            adapter,
            device,
            queue,
        })
    }

    /// Return the adapter name.
    pub fn adapter_name(&self) -> String {
        self.adapter.get_info().name
    }

    /// Return the wgpu backend in use (Vulkan, Metal, DX12, ...).
    pub fn backend(&self) -> wgpu::Backend {
        self.adapter.get_info().backend
    }

    /// Largest workgroup count the device accepts in a single dimension.
    pub fn max_workgroups_per_dimension(&self) -> u32 {
        self.device.limits().max_compute_workgroups_per_dimension
    }

    /// Largest storage buffer the device can bind, in bytes.
    pub fn max_storage_binding_size(&self) -> u64 {
        u64::from(self.device.limits().max_storage_buffer_binding_size)
    }
}
