//! Compute pipeline construction from WGSL sources.

use crate::error::{GpuError, Result};
use tracing::debug;

/// A compiled compute pipeline ready for dispatch.
#[derive(Debug)]
pub struct ComputePipeline {
    pub pipeline: wgpu::ComputePipeline,
    pub bind_group_layout: wgpu::BindGroupLayout,
    label: String,
}

impl ComputePipeline {
    /// Compile a WGSL shader and build the pipeline with an automatic layout.
    ///
    /// Validation errors raised while compiling the module or building the
    /// pipeline are captured and returned as [`GpuError::ShaderCompilation`].
    pub async fn new(
        device: &wgpu::Device,
        wgsl_source: &str,
        label: &str,
        entry_point: &str,
    ) -> Result<Self> {
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(wgsl_source.into()),
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some(label),
            layout: None,
            module: &shader_module,
            entry_point: Some(entry_point),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(GpuError::ShaderCompilation(format!("{label}: {err}")));
        }

        // Only query the layout once the pipeline is known to be valid.
        let bind_group_layout = pipeline.get_bind_group_layout(0);

        debug!(label, entry_point, "compiled compute pipeline");

        Ok(Self {
            pipeline,
            bind_group_layout,
            label: label.to_string(),
        })
    }

    /// Create a bind group for this pipeline.
    pub fn bind_group(
        &self,
        device: &wgpu::Device,
        entries: &[wgpu::BindGroupEntry<'_>],
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{}-bind-group", self.label)),
            layout: &self.bind_group_layout,
            entries,
        })
    }

    /// Record a single compute pass dispatching `workgroups` into `encoder`.
    pub fn record_dispatch(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        bind_group: &wgpu::BindGroup,
        workgroups: (u32, u32, u32),
    ) {
        let (x, y, z) = workgroups;
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some(&format!("{}-pass", self.label)),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, bind_group, &[]);
        pass.dispatch_workgroups(x, y, z);
        debug!(label = %self.label, x, y, z, "recorded dispatch");
    }
}
