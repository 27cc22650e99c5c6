//! wgpu compute backend for gpu-kernels.
//!
//! This crate provides a [`WgpuBackend`] that runs the WGSL matrix-multiply
//! and doubling kernels on any GPU the platform exposes through wgpu
//! (Vulkan, Metal, DX12, OpenGL, or WebGPU in the browser). Every call
//! allocates its own buffers, submits once, reads the result back and
//! releases everything; nothing is pooled between calls.

pub mod buffer;
pub mod device;
pub mod error;
pub mod pipeline;
pub mod shader;

pub use buffer::{GpuBuffer, MappedRead, StagingBuffer};
pub use device::WgpuDevice;
pub use error::{GpuError, Result};
pub use pipeline::ComputePipeline;

use bytemuck::{Pod, Zeroable};
use gk_tensor::{ComputeBackend, KernelError, MatmulDims};
use tracing::{debug, info};

/// Uniform parameters for the matrix-multiply shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct MatmulParams {
    pub m: u32,
    pub k: u32,
    pub n: u32,
    pub _pad: u32,
}

impl MatmulParams {
    pub fn new(dims: MatmulDims) -> Result<Self> {
        Ok(Self {
            m: to_u32("m", dims.m)?,
            k: to_u32("k", dims.k)?,
            n: to_u32("n", dims.n)?,
            _pad: 0,
        })
    }
}

/// Workgroup grid covering an M×N output with square tiles of
/// [`shader::MATMUL_TILE`] lanes. The x axis walks rows, y walks columns.
pub fn matmul_workgroups(dims: MatmulDims) -> Result<(u32, u32, u32)> {
    let (rows, cols) = dims.tiles(shader::MATMUL_TILE);
    Ok((to_u32("row tiles", rows)?, to_u32("column tiles", cols)?, 1))
}

fn to_u32(what: &str, value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| GpuError::InvalidDimensions(format!("{what}={value} does not fit in u32")))
}

/// High-level wgpu backend wrapping device, pipelines and dispatch.
#[derive(Debug)]
pub struct WgpuBackend {
    pub gpu: WgpuDevice,
    matmul_pipeline: ComputePipeline,
    double_pipeline: ComputePipeline,
}

impl WgpuBackend {
    /// Initialise the backend: request adapter/device, compile all shaders.
    pub async fn new() -> Result<Self> {
        let gpu = WgpuDevice::new().await?;

        let matmul_pipeline = ComputePipeline::new(
            &gpu.device,
            shader::MATMUL_WGSL,
            "matmul",
            shader::MATMUL_ENTRY,
        )
        .await?;
        let double_pipeline = ComputePipeline::new(
            &gpu.device,
            shader::DOUBLE_WGSL,
            "double",
            shader::DOUBLE_ENTRY,
        )
        .await?;

        info!(
            adapter = %gpu.adapter_name(),
            backend = ?gpu.backend(),
            "wgpu backend ready"
        );

        Ok(Self {
            gpu,
            matmul_pipeline,
            double_pipeline,
        })
    }

    /// Blocking variant of [`WgpuBackend::new`].
    pub fn new_blocking() -> Result<Self> {
        pollster::block_on(Self::new())
    }

    /// Run matrix multiplication: `R = A × B`.
    ///
    /// `a` is M×K row-major, `b` is K×N row-major, returns M×N.
    pub async fn matmul_async(&self, a: &[f32], b: &[f32], dims: MatmulDims) -> Result<Vec<f32>> {
        dims.check(a.len(), b.len())?;
        let out_len = dims.out_len()?;
        if out_len == 0 {
            return Ok(Vec::new());
        }

        let params = MatmulParams::new(dims)?;
        let workgroups = matmul_workgroups(dims)?;
        self.check_workgroups(workgroups)?;
        self.check_binding_size("a", a.len())?;
        self.check_binding_size("b", b.len())?;
        self.check_binding_size("r", out_len)?;

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        let buf_params = GpuBuffer::uniform(device, &params, "matmul-params");
        let buf_a =
            GpuBuffer::from_slice_mapped(device, a, wgpu::BufferUsages::STORAGE, "matmul-a");
        let buf_b =
            GpuBuffer::from_slice_mapped(device, b, wgpu::BufferUsages::STORAGE, "matmul-b");
        let buf_r = GpuBuffer::zeroed::<f32>(
            device,
            out_len,
            wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            "matmul-r",
        );

        let bind_group = self.matmul_pipeline.bind_group(
            device,
            &[
                wgpu::BindGroupEntry { binding: 0, resource: buf_params.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: buf_a.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 2, resource: buf_b.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 3, resource: buf_r.as_entire_binding() },
            ],
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("matmul-encoder"),
        });
        self.matmul_pipeline
            .record_dispatch(&mut encoder, &bind_group, workgroups);
        let staging = StagingBuffer::record_copy(device, &mut encoder, &buf_r, "matmul-readback");
        queue.submit(Some(encoder.finish()));

        debug!(%dims, ?workgroups, "submitted matmul");
        staging.read_back::<f32>(device)
    }

    /// Double every element of `data` on the device.
    pub async fn double_async(&self, data: &[f32]) -> Result<Vec<f32>> {
        if data.is_empty() {
            return Ok(Vec::new());
        }
        let lanes = to_u32("data length", data.len())?;
        self.check_workgroups((lanes, 1, 1))?;
        self.check_binding_size("data", data.len())?;

        let device = &self.gpu.device;
        let queue = &self.gpu.queue;

        let work = GpuBuffer::from_slice_queued(device, queue, data, "double-work");
        let bind_group = self.double_pipeline.bind_group(
            device,
            &[wgpu::BindGroupEntry { binding: 0, resource: work.as_entire_binding() }],
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("double-encoder"),
        });
        self.double_pipeline
            .record_dispatch(&mut encoder, &bind_group, (lanes, 1, 1));
        let staging = StagingBuffer::record_copy(device, &mut encoder, &work, "double-result");
        queue.submit(Some(encoder.finish()));

        debug!(lanes, "submitted double");
        staging.read_back::<f32>(device)
    }

    fn check_workgroups(&self, (x, y, z): (u32, u32, u32)) -> Result<()> {
        let max = self.gpu.max_workgroups_per_dimension();
        if x > max || y > max || z > max {
            return Err(GpuError::InvalidDimensions(format!(
                "dispatch ({x}, {y}, {z}) exceeds {max} workgroups per dimension"
            )));
        }
        Ok(())
    }

    /// `len` is counted in f32 elements.
    fn check_binding_size(&self, what: &str, len: usize) -> Result<()> {
        let max = self.gpu.max_storage_binding_size();
        let bytes = (len as u64).saturating_mul(std::mem::size_of::<f32>() as u64);
        if bytes > max {
            return Err(GpuError::InvalidDimensions(format!(
                "buffer {what} needs {bytes} bytes, device binds at most {max}"
            )));
        }
        Ok(())
    }

    /// Name of the adapter the backend runs on.
    pub fn adapter_name(&self) -> String {
        self.gpu.adapter_name()
    }
}

impl ComputeBackend for WgpuBackend {
    fn name(&self) -> &str {
        "wgpu"
    }

    fn matmul(
        &self,
        a: &[f32],
        b: &[f32],
        m: usize,
        k: usize,
        n: usize,
    ) -> gk_tensor::Result<Vec<f32>> {
        pollster::block_on(self.matmul_async(a, b, MatmulDims::new(m, k, n)))
            .map_err(KernelError::from)
    }

    fn double(&self, data: &[f32]) -> gk_tensor::Result<Vec<f32>> {
        pollster::block_on(self.double_async(data)).map_err(KernelError::from)
    }
}
