use std::sync::Arc;

use wgpu::util::DeviceExt;

use crate::coords::{ColorRgba, PixelSize, Rect};
use crate::device::{Gpu, GpuFrame, SurfaceErrorAction};
use crate::image::{ImageSource, ImageSurface, PixelBuffer};
use crate::render::{ColorSpace, Compositor};

use super::pipeline::{BoundTexture, ImagePipeline};
use super::quad::{decodes_samples, image_quad, scissor_rect, target_color, QUAD_INDICES};

/// Last uploaded source frame. Holding the `Arc` keeps the allocation alive,
/// so pointer equality reliably means "same pixels".
struct SourceTexture {
    pixels: Arc<PixelBuffer>,
    bound: BoundTexture,
}

/// [`Compositor`] that draws into a wgpu surface.
///
/// Pipeline and textures are created lazily on first use and rebuilt when the
/// surface format changes. One acquired drawable is held between
/// `begin_pass` and `present`.
pub struct WgpuCompositor<'w> {
    gpu: Gpu<'w>,
    pipeline: Option<ImagePipeline>,
    white: Option<BoundTexture>,
    source: Option<SourceTexture>,
    quad_ibo: Option<wgpu::Buffer>,

    frame: Option<GpuFrame>,
    pending_clear: Option<wgpu::Color>,
}

impl<'w> WgpuCompositor<'w> {
    pub fn new(gpu: Gpu<'w>) -> Self {
        Self {
            gpu,
            pipeline: None,
            white: None,
            source: None,
            quad_ibo: None,
            frame: None,
            pending_clear: None,
        }
    }

    pub fn gpu(&self) -> &Gpu<'w> {
        &self.gpu
    }

    fn ensure_pipeline(&mut self) {
        let format = self.gpu.surface_format();
        if self.pipeline.as_ref().is_some_and(|p| p.format == format) {
            return;
        }

        let device = self.gpu.device();
        self.pipeline = Some(ImagePipeline::new(device, format));

        // Bind groups belong to the old layout.
        self.white = None;
        self.source = None;
    }

    fn ensure_static_buffers(&mut self) {
        if self.quad_ibo.is_some() {
            return;
        }
        self.quad_ibo = Some(self.gpu.device().create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("camview quad ibo"),
                contents: bytemuck::cast_slice(&QUAD_INDICES),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
    }

    fn ensure_white(&mut self) {
        if self.white.is_some() {
            return;
        }
        let Some(pipeline) = self.pipeline.as_ref() else { return };
        self.white = Some(BoundTexture::white(
            self.gpu.device(),
            self.gpu.queue(),
            pipeline,
        ));
    }

    /// Uploads `pixels` unless they are already resident.
    fn ensure_source(&mut self, pixels: &Arc<PixelBuffer>) {
        let Some(pipeline) = self.pipeline.as_ref() else { return };

        if let Some(cached) = self.source.as_mut() {
            if Arc::ptr_eq(&cached.pixels, pixels) {
                return;
            }
            if cached.bound.fits(pixels) {
                cached.bound.write(self.gpu.queue(), pixels);
                cached.pixels = pixels.clone();
                return;
            }
        }

        log::debug!(
            "allocating source texture {}x{} {:?}",
            pixels.width(),
            pixels.height(),
            pixels.format()
        );
        let bound = BoundTexture::upload(self.gpu.device(), self.gpu.queue(), pipeline, pixels);
        self.source = Some(SourceTexture {
            pixels: pixels.clone(),
            bound,
        });
    }

    fn acquire(&mut self) -> Option<GpuFrame> {
        match self.gpu.begin_frame() {
            Ok(frame) => Some(frame),
            Err(err) => match self.gpu.handle_surface_error(err.clone()) {
                SurfaceErrorAction::Reconfigured => {
                    log::debug!("surface reconfigured after {err:?}; retrying acquire");
                    self.gpu.begin_frame().ok()
                }
                SurfaceErrorAction::SkipFrame => {
                    log::debug!("skipping frame: {err:?}");
                    None
                }
                SurfaceErrorAction::Fatal => {
                    log::error!("fatal surface error: {err:?}");
                    None
                }
            },
        }
    }

    fn take_load_op(&mut self) -> wgpu::LoadOp<wgpu::Color> {
        match self.pending_clear.take() {
            Some(color) => wgpu::LoadOp::Clear(color),
            None => wgpu::LoadOp::Load,
        }
    }
}

impl Compositor for WgpuCompositor<'_> {
    fn drawable_size(&self) -> PixelSize {
        self.gpu.size()
    }

    fn resize(&mut self, size: PixelSize) {
        self.gpu.resize(size);
    }

    fn begin_pass(&mut self, clear: Option<ColorRgba>) -> Option<PixelSize> {
        let size = self.gpu.size();
        if size.is_empty() {
            return None;
        }

        if self.frame.take().is_some() {
            log::warn!("begin_pass with an unpresented frame; discarding it");
        }

        let frame = self.acquire()?;
        let format = self.gpu.surface_format();
        self.pending_clear = clear.map(|c| target_color(c, format).to_wgpu());
        self.frame = Some(frame);
        Some(size)
    }

    fn draw_image(
        &mut self,
        image: &ImageSurface,
        in_rect: Rect,
        from_rect: Rect,
        color_space: ColorSpace,
    ) {
        if self.frame.is_none() {
            log::debug!("draw_image outside of a pass; ignored");
            return;
        }

        self.ensure_pipeline();
        self.ensure_static_buffers();

        let format = self.gpu.surface_format();
        let size = self.gpu.size();

        let tint = match image.source() {
            ImageSource::Pixels(px) => {
                self.ensure_source(px);
                ColorRgba::white()
            }
            ImageSource::Solid(color) => {
                self.ensure_white();
                target_color(*color, format)
            }
        };

        let decode = decodes_samples(color_space, format);
        let quad = image_quad(image, in_rect, from_rect, size, tint, decode);
        let scissor = scissor_rect(in_rect, size);
        let load = self.take_load_op();

        let bind_group = match image.source() {
            ImageSource::Pixels(_) => self.source.as_ref().map(|s| &s.bound.bind_group),
            ImageSource::Solid(_) => self.white.as_ref().map(|w| &w.bind_group),
        };

        let (Some(pipeline), Some(quad_ibo), Some(frame)) =
            (self.pipeline.as_ref(), self.quad_ibo.as_ref(), self.frame.as_mut())
        else {
            return;
        };

        let draw = match (quad, scissor, bind_group) {
            (Some(quad), Some(scissor), Some(bind_group)) => Some((quad, scissor, bind_group)),
            _ => None,
        };

        let vbo = draw.as_ref().map(|(quad, ..)| {
            self.gpu
                .device()
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("camview quad vbo"),
                    contents: bytemuck::cast_slice(quad),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("camview image pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        // A pass is still recorded for an invisible draw so a pending clear lands.
        let (Some((_, (sx, sy, sw, sh), bind_group)), Some(vbo)) = (draw, vbo.as_ref()) else {
            return;
        };

        rpass.set_pipeline(&pipeline.pipeline);
        rpass.set_bind_group(0, bind_group, &[]);
        rpass.set_vertex_buffer(0, vbo.slice(..));
        rpass.set_index_buffer(quad_ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.set_scissor_rect(sx, sy, sw, sh);
        rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..1);
    }

    fn present(&mut self) {
        let Some(mut frame) = self.frame.take() else {
            log::debug!("present without a pass; ignored");
            return;
        };

        if let Some(color) = self.pending_clear.take() {
            let _clear_pass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("camview clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(color),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.submit(frame);
    }
}
