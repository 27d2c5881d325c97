use super::ImageError;

/// Memory layout of a pixel buffer. The core forwards it to the compositor
/// without interpreting the bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    Rgba8,
    Bgra8,
}

impl PixelFormat {
    #[inline]
    pub const fn bytes_per_pixel(self) -> u32 {
        4
    }
}

/// Raw pixel data handed over by the capture collaborator.
///
/// Rows are stored top to bottom, `stride` bytes apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps tightly-packed rows.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self, ImageError> {
        let stride = width.saturating_mul(format.bytes_per_pixel());
        Self::with_stride(width, height, stride, format, data)
    }

    /// Wraps rows that are `stride` bytes apart (padding allowed).
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::ZeroSize { width, height });
        }

        let row_bytes = width as u64 * format.bytes_per_pixel() as u64;
        if (stride as u64) < row_bytes {
            return Err(ImageError::StrideTooSmall { stride, width });
        }

        // The last row only needs its visible pixels.
        let expected = (stride as u64 * (height as u64 - 1) + row_bytes) as usize;
        if data.len() < expected {
            return Err(ImageError::TooShort {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> u32 {
        self.stride
    }

    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_buffer_is_accepted() {
        let buf = PixelBuffer::new(2, 3, PixelFormat::Rgba8, vec![0; 24]).unwrap();
        assert_eq!((buf.width(), buf.height(), buf.stride()), (2, 3, 8));
    }

    #[test]
    fn padded_last_row_may_be_short() {
        // 2 rows of 16-byte stride, last row only carries its 8 visible bytes.
        let buf = PixelBuffer::with_stride(2, 2, 16, PixelFormat::Bgra8, vec![0; 24]);
        assert!(buf.is_ok());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = PixelBuffer::new(4, 4, PixelFormat::Rgba8, vec![0; 10]).unwrap_err();
        assert_eq!(err, ImageError::TooShort { expected: 64, actual: 10 });
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = PixelBuffer::new(0, 4, PixelFormat::Rgba8, Vec::new()).unwrap_err();
        assert_eq!(err, ImageError::ZeroSize { width: 0, height: 4 });
    }

    #[test]
    fn narrow_stride_is_rejected() {
        let err = PixelBuffer::with_stride(4, 1, 8, PixelFormat::Rgba8, vec![0; 16]).unwrap_err();
        assert_eq!(err, ImageError::StrideTooSmall { stride: 8, width: 4 });
    }
}
