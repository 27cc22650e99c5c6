//! GPU buffer management with staging readback.

use std::sync::mpsc;

use crate::error::{GpuError, Result};
use bytemuck::Pod;
use tracing::trace;
use wgpu::util::DeviceExt;

/// A device buffer and its size in bytes.
#[derive(Debug)]
pub struct GpuBuffer {
    pub buffer: wgpu::Buffer,
    pub size: u64,
}

impl GpuBuffer {
    /// Create a buffer whose contents are written while it is mapped at
    /// creation, the cheapest way to upload data that never changes.
    ///
    /// An empty `data` slice is padded to one zeroed element: wgpu rejects
    /// zero-sized bindings, and kernels never read the padding.
    pub fn from_slice_mapped<T: Pod>(
        device: &wgpu::Device,
        data: &[T],
        usage: wgpu::BufferUsages,
        label: &str,
    ) -> Self {
        let padding = [T::zeroed()];
        let contents: &[u8] = if data.is_empty() {
            bytemuck::cast_slice(&padding)
        } else {
            bytemuck::cast_slice(data)
        };
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents,
            usage,
        });
        trace!(label, bytes = contents.len(), "uploaded buffer at creation");
        Self {
            size: buffer.size(),
            buffer,
        }
    }

    /// Create a storage buffer and schedule `data` to be written to it
    /// through the queue. The write lands before the next submission.
    pub fn from_slice_queued<T: Pod>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[T],
        label: &str,
    ) -> Self {
        let bytes: &[u8] = bytemuck::cast_slice(data);
        let size = bytes.len() as u64;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage: wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_SRC
                | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&buffer, 0, bytes);
        trace!(label, bytes = size, "queued buffer upload");
        Self { buffer, size }
    }

    /// Create a zero-initialised buffer of `len` elements of `T`.
    pub fn zeroed<T: Pod>(
        device: &wgpu::Device,
        len: usize,
        usage: wgpu::BufferUsages,
        label: &str,
    ) -> Self {
        let size = (len * std::mem::size_of::<T>()) as u64;
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        });
        Self { buffer, size }
    }

    /// Create a uniform buffer from a `Pod` value.
    pub fn uniform<T: Pod>(device: &wgpu::Device, value: &T, label: &str) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(value),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        Self {
            size: buffer.size(),
            buffer,
        }
    }

    pub fn as_entire_binding(&self) -> wgpu::BindingResource<'_> {
        self.buffer.as_entire_binding()
    }
}

/// A host-readable copy destination for a storage buffer.
#[derive(Debug)]
pub struct StagingBuffer {
    buffer: wgpu::Buffer,
    size: u64,
}

impl StagingBuffer {
    /// Allocate a MAP_READ buffer the size of `source` and record a copy of
    /// `source` into it. The copy runs when `encoder` is submitted.
    pub fn record_copy(
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        source: &GpuBuffer,
        label: &str,
    ) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: source.size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        encoder.copy_buffer_to_buffer(&source.buffer, 0, &buffer, 0, source.size);
        Self {
            buffer,
            size: source.size,
        }
    }

    /// Map the buffer for reading and block until the mapping is ready.
    ///
    /// Must be called after the submission that fills the buffer. The
    /// returned guard unmaps the buffer when dropped.
    pub fn map_read(&self, device: &wgpu::Device) -> Result<MappedRead<'_>> {
        let slice = self.buffer.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = device.poll(wgpu::Maintain::Wait);
        rx.recv()
            .map_err(|e| GpuError::BufferMap(e.to_string()))?
            .map_err(|e: wgpu::BufferAsyncError| GpuError::BufferMap(e.to_string()))?;
        trace!(bytes = self.size, "staging buffer mapped");

        Ok(MappedRead {
            view: Some(slice.get_mapped_range()),
            buffer: &self.buffer,
        })
    }

    /// Map, copy out as `T`s, and unmap.
    pub fn read_back<T: Pod>(&self, device: &wgpu::Device) -> Result<Vec<T>> {
        let mapped = self.map_read(device)?;
        Ok(mapped.to_vec())
    }
}

/// A live host mapping of a [`StagingBuffer`].
///
/// The mapped bytes are only reachable through this guard, and dropping it
/// releases the view and unmaps the buffer, in that order.
pub struct MappedRead<'a> {
    view: Option<wgpu::BufferView<'a>>,
    buffer: &'a wgpu::Buffer,
}

impl MappedRead<'_> {
    pub fn bytes(&self) -> &[u8] {
        self.view.as_deref().unwrap_or(&[])
    }

    /// Copy the mapped bytes out as a vector of `T`. The view need not be
    /// aligned for `T`.
    pub fn to_vec<T: Pod>(&self) -> Vec<T> {
        collect_pod(self.bytes())
    }
}

fn collect_pod<T: Pod>(bytes: &[u8]) -> Vec<T> {
    bytemuck::pod_collect_to_vec(bytes)
}

impl Drop for MappedRead<'_> {
    fn drop(&mut self) {
        drop(self.view.take());
        self.buffer.unmap();
    }
}
