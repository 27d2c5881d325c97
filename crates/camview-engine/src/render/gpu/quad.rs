//! CPU-side geometry for image draws.

use bytemuck::{Pod, Zeroable};

use crate::coords::{ColorRgba, PixelSize, Rect, Vec2};
use crate::image::{ImageSource, ImageSurface};
use crate::render::ColorSpace;

// ── vertex ────────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(super) struct ImageVertex {
    pub pos: [f32; 2], // NDC
    pub uv: [f32; 2],
    pub tint: [f32; 4],
    pub decode: f32, // 1.0: sample is sRGB-encoded, linearize before blending
}

impl ImageVertex {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4, // tint
        3 => Float32    // decode
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<ImageVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

pub(super) const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Texture coordinates for the source corners in [`Rect::corners`] order.
/// Row 0 of a pixel buffer is the top of the image, so y-up corners flip v.
const CORNER_UVS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]];

/// Builds the four vertices that place `image` in the drawable.
///
/// Source corners go through the image's pending transform, then through the
/// mapping that takes `from_rect` onto `in_rect`, then into NDC. Returns
/// `None` when any of the rectangles involved is degenerate.
pub(super) fn image_quad(
    image: &ImageSurface,
    in_rect: Rect,
    from_rect: Rect,
    drawable: PixelSize,
    tint: ColorRgba,
    decode: bool,
) -> Option<[ImageVertex; 4]> {
    if drawable.is_empty() || from_rect.is_empty() || in_rect.is_empty() {
        return None;
    }

    let corners = match image.source() {
        ImageSource::Pixels(px) => {
            let local = Rect::new(0.0, 0.0, px.width() as f32, px.height() as f32);
            local.corners().map(|p| image.transform().apply(p))
        }
        // Solids have no texels to orient; their extent is the quad.
        ImageSource::Solid(_) => image.extent().corners(),
    };

    let ratio = Vec2::new(
        in_rect.width() / from_rect.width(),
        in_rect.height() / from_rect.height(),
    );
    let size = Vec2::new(drawable.width as f32, drawable.height as f32);

    let mut out = [ImageVertex::zeroed(); 4];
    for (i, p) in corners.into_iter().enumerate() {
        let q = in_rect.origin + (p - from_rect.origin).scale_by(ratio);
        let ndc = Vec2::new(q.x / size.x * 2.0 - 1.0, q.y / size.y * 2.0 - 1.0);
        if !ndc.is_finite() {
            return None;
        }
        out[i] = ImageVertex {
            pos: [ndc.x, ndc.y],
            uv: CORNER_UVS[i],
            tint: tint.to_array(),
            decode: if decode { 1.0 } else { 0.0 },
        };
    }
    Some(out)
}

// ── scissor ───────────────────────────────────────────────────────────────

/// Converts a y-up drawable rect into framebuffer scissor arguments
/// (top-left origin), clamped to the drawable.
///
/// Returns `None` when nothing of `rect` is visible.
pub(super) fn scissor_rect(rect: Rect, drawable: PixelSize) -> Option<(u32, u32, u32, u32)> {
    let visible = rect.intersect(drawable.bounds())?;

    let x0 = visible.min().x.floor().max(0.0) as u32;
    let x1 = (visible.max().x.ceil() as u32).min(drawable.width);
    let y0 = visible.min().y.floor().max(0.0) as u32;
    let y1 = (visible.max().y.ceil() as u32).min(drawable.height);

    let (w, h) = (x1.saturating_sub(x0), y1.saturating_sub(y0));
    if w == 0 || h == 0 {
        return None;
    }
    Some((x0, drawable.height - y1, w, h))
}

// ── color ─────────────────────────────────────────────────────────────────

fn srgb_channel_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Linearizes the color channels; alpha is untouched.
pub(super) fn srgb_to_linear(color: ColorRgba) -> ColorRgba {
    ColorRgba::new(
        srgb_channel_to_linear(color.r),
        srgb_channel_to_linear(color.g),
        srgb_channel_to_linear(color.b),
        color.a,
    )
}

/// Whether sampled texels are linearized before blending into `format`.
pub(super) fn decodes_samples(color_space: ColorSpace, format: wgpu::TextureFormat) -> bool {
    match color_space {
        // Blend sRGB sources in linear space.
        ColorSpace::Srgb => format.is_srgb(),
        // The target encodes on write; decoding first leaves values as sampled.
        ColorSpace::Passthrough => format.is_srgb(),
    }
}

/// Color as stored in a target of the given format.
///
/// sRGB targets encode on write, so the value handed to the GPU must be
/// linear for the displayed color to match `color`.
pub(super) fn target_color(color: ColorRgba, format: wgpu::TextureFormat) -> ColorRgba {
    if format.is_srgb() {
        srgb_to_linear(color)
    } else {
        color
    }
}
