// SPDX-License-Identifier: MIT

//! Uploads the screen canvas into a texture and blits it onto the window swapchain.

use std::sync::Arc;

use vello::wgpu::util::TextureBlitter;
use vello::wgpu::{self, Device, Queue, SurfaceConfiguration, TextureFormat, TextureUsages};
use winit::window::Window;

use crate::config::PresentMode;
use crate::error::Error;
use crate::surface::{Canvas, Surface};
use crate::types::Size2d;
use crate::Result;

fn wgpu_present_mode(mode: PresentMode) -> wgpu::PresentMode {
    match mode {
        PresentMode::AutoVsync => wgpu::PresentMode::AutoVsync,
        PresentMode::AutoNoVsync => wgpu::PresentMode::AutoNoVsync,
        PresentMode::Fifo => wgpu::PresentMode::Fifo,
        PresentMode::Immediate => wgpu::PresentMode::Immediate,
        PresentMode::Mailbox => wgpu::PresentMode::Mailbox,
    }
}

/// A canvas sized texture, recreated whenever the canvas size changes.
struct Upload {
    texture: wgpu::Texture,
    size: Size2d,
}

pub(crate) struct Presenter {
    surface: wgpu::Surface<'static>,
    device: Device,
    queue: Queue,
    config: SurfaceConfiguration,
    blitter: TextureBlitter,
    upload: Option<Upload>,
}

impl Presenter {
    pub fn new(window: Arc<Window>, present_mode: PresentMode) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .map_err(|err| Error::Backend(format!("cannot create surface: {}", err)))?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .map_err(|err| Error::Backend(format!("no suitable adapter: {}", err)))?;
        log::debug!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .map_err(|err| Error::Backend(format!("cannot create device: {}", err)))?;

        let capabilities = surface.get_capabilities(&adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|format| matches!(format, TextureFormat::Bgra8Unorm | TextureFormat::Rgba8Unorm))
            .or_else(|| capabilities.formats.first().copied())
            .ok_or_else(|| Error::Backend("surface supports no texture format".to_string()))?;
        let desired = wgpu_present_mode(present_mode);
        let present_mode = if capabilities.present_modes.contains(&desired) {
            desired
        } else {
            capabilities
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo)
        };
        let alpha_mode = capabilities
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let size = window.inner_size();
        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let blitter = TextureBlitter::new(&device, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            blitter,
            upload: None,
        })
    }

    /// Reconfigure the swapchain if the window size changed.
    fn configure(&mut self, window_size: Size2d) {
        let width = window_size.width.max(1);
        let height = window_size.height.max(1);
        if self.config.width != width || self.config.height != height {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Copy `view` into the upload texture and return a view of it.
    fn upload(&mut self, view: &Canvas) -> wgpu::TextureView {
        let size = view.size();
        let upload = match self.upload.take() {
            Some(upload) if upload.size == size => upload,
            _ => Upload {
                texture: self.device.create_texture(&wgpu::TextureDescriptor {
                    label: Some("jacui screen"),
                    size: wgpu::Extent3d {
                        width: size.width,
                        height: size.height,
                        depth_or_array_layers: 1,
                    },
                    mip_level_count: 1,
                    sample_count: 1,
                    dimension: wgpu::TextureDimension::D2,
                    format: TextureFormat::Rgba8Unorm,
                    usage: TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST,
                    view_formats: &[],
                }),
                size,
            },
        };

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &upload.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            view.as_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
        );

        let texture_view = upload
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.upload = Some(upload);
        texture_view
    }

    /// Show `view` in the window, scaled to the window size.
    pub fn present(&mut self, window: &Window, view: &Canvas) -> Result<()> {
        if view.is_empty() {
            return Ok(());
        }

        let inner = window.inner_size();
        self.configure(Size2d::new(inner.width, inner.height));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("swapchain out of date, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("timed out acquiring the next frame");
                return Ok(());
            }
            Err(err) => {
                log::error!("cannot acquire frame: {}", err);
                return Err(Error::Backend(err.to_string()));
            }
        };

        let source = self.upload(view);
        let target = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("jacui present"),
            });
        self.blitter.copy(&self.device, &mut encoder, &source, &target);
        self.queue.submit(Some(encoder.finish()));

        window.pre_present_notify();
        frame.present();
        Ok(())
    }
}
