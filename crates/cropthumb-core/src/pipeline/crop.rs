//! Crop geometry and borrowed sub-views.
//!
//! The crop box has its top-left corner on the image midpoint
//! `(width / 2, height / 2)` and extends by the thumbnail size, so any image
//! with `width - width / 2` below the box width (likewise for height)
//! overhangs the edge. [`CropPolicy`] decides whether that is clipped or
//! rejected.

use image::{GenericImageView, SubImage};
use std::path::Path;

use crate::config::{CropPolicy, ThumbnailConfig};
use crate::error::PipelineError;

/// Half-open rectangle `[x0, x1) x [y0, y1)` in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl CropRegion {
    /// Box of `box_width x box_height` translated to the midpoint of a
    /// `width x height` image. Not clipped.
    pub fn anchored_at_center(width: u32, height: u32, box_width: u32, box_height: u32) -> Self {
        let (cx, cy) = (width / 2, height / 2);
        Self {
            x0: cx,
            y0: cy,
            x1: cx.saturating_add(box_width),
            y1: cy.saturating_add(box_height),
        }
    }

    pub fn width(&self) -> u32 {
        self.x1.saturating_sub(self.x0)
    }

    pub fn height(&self) -> u32 {
        self.y1.saturating_sub(self.y0)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// True if the region lies entirely inside a `width x height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x1 <= width && self.y1 <= height
    }

    /// Intersection with `[0, width) x [0, height)`, or `None` if empty.
    pub fn intersect(&self, width: u32, height: u32) -> Option<Self> {
        let clipped = Self {
            x0: self.x0.min(width),
            y0: self.y0.min(height),
            x1: self.x1.min(width),
            y1: self.y1.min(height),
        };
        (!clipped.is_empty()).then_some(clipped)
    }
}

/// Computes crop regions and hands out views into the decoded image.
pub struct Cropper {
    box_width: u32,
    box_height: u32,
    policy: CropPolicy,
}

impl Cropper {
    pub fn new(config: &ThumbnailConfig) -> Self {
        Self {
            box_width: config.width,
            box_height: config.height,
            policy: config.crop_policy,
        }
    }

    /// Resolve the in-bounds region for an image of the given size.
    pub fn region(&self, width: u32, height: u32, path: &Path) -> Result<CropRegion, PipelineError> {
        let region = CropRegion::anchored_at_center(width, height, self.box_width, self.box_height);

        if self.policy == CropPolicy::Skip && !region.fits_within(width, height) {
            return Err(PipelineError::ImageTooSmall {
                path: path.to_path_buf(),
                width,
                height,
                required_width: region.x1,
                required_height: region.y1,
            });
        }

        region
            .intersect(width, height)
            .ok_or_else(|| PipelineError::EmptyCrop {
                path: path.to_path_buf(),
                width,
                height,
            })
    }

    /// Borrow the crop region of `image` without copying pixels.
    pub fn crop<'a, I: GenericImageView>(
        &self,
        image: &'a I,
        path: &Path,
    ) -> Result<SubImage<&'a I>, PipelineError> {
        let (width, height) = image.dimensions();
        let region = self.region(width, height, path)?;
        tracing::trace!("Crop {:?}: {:?} of {}x{}", path, region, width, height);
        Ok(image.view(region.x0, region.y0, region.width(), region.height()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgb, RgbImage};

    fn cropper(policy: CropPolicy) -> Cropper {
        Cropper::new(&ThumbnailConfig {
            crop_policy: policy,
            ..ThumbnailConfig::default()
        })
    }

    #[test]
    fn test_anchor_uses_integer_midpoint() {
        let region = CropRegion::anchored_at_center(801, 601, 300, 300);
        assert_eq!(
            region,
            CropRegion {
                x0: 400,
                y0: 300,
                x1: 700,
                y1: 600
            }
        );
        assert!(region.fits_within(801, 601));
    }

    #[test]
    fn test_large_image_gets_full_box() {
        let region = cropper(CropPolicy::Clamp)
            .region(1000, 600, Path::new("big.jpg"))
            .unwrap();
        assert_eq!((region.x0, region.y0), (500, 300));
        assert_eq!((region.width(), region.height()), (300, 300));
    }

    #[test]
    fn test_small_image_is_clamped() {
        let region = cropper(CropPolicy::Clamp)
            .region(400, 200, Path::new("small.jpg"))
            .unwrap();
        assert_eq!(
            region,
            CropRegion {
                x0: 200,
                y0: 100,
                x1: 400,
                y1: 200
            }
        );
    }

    #[test]
    fn test_odd_sizes_keep_the_extra_pixel() {
        let region = cropper(CropPolicy::Clamp)
            .region(5, 3, Path::new("tiny.png"))
            .unwrap();
        // midpoint (2, 1), clamped to the remaining 3x2
        assert_eq!((region.width(), region.height()), (3, 2));
    }

    #[test]
    fn test_one_pixel_image() {
        let region = cropper(CropPolicy::Clamp)
            .region(1, 1, Path::new("dot.gif"))
            .unwrap();
        assert_eq!((region.x0, region.y0, region.width(), region.height()), (0, 0, 1, 1));
    }

    #[test]
    fn test_zero_sized_image_is_empty_crop() {
        let err = cropper(CropPolicy::Clamp)
            .region(0, 10, Path::new("void.png"))
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCrop { .. }));
    }

    #[test]
    fn test_skip_policy_rejects_overhang() {
        let err = cropper(CropPolicy::Skip)
            .region(598, 800, Path::new("narrow.jpg"))
            .unwrap_err();
        match err {
            PipelineError::ImageTooSmall {
                width,
                required_width,
                required_height,
                ..
            } => {
                assert_eq!(width, 598);
                assert_eq!(required_width, 599);
                assert_eq!(required_height, 700);
            }
            other => panic!("expected ImageTooSmall, got {other:?}"),
        }
    }

    #[test]
    fn test_skip_policy_accepts_odd_width_that_fits() {
        // midpoint 299 + 300 lands exactly on the edge
        let region = cropper(CropPolicy::Skip)
            .region(599, 599, Path::new("odd.jpg"))
            .unwrap();
        assert_eq!((region.width(), region.height()), (300, 300));
    }

    #[test]
    fn test_skip_policy_accepts_exact_fit() {
        let region = cropper(CropPolicy::Skip)
            .region(600, 600, Path::new("square.jpg"))
            .unwrap();
        assert_eq!((region.width(), region.height()), (300, 300));
    }

    #[test]
    fn test_crop_view_borrows_the_right_pixels() {
        let mut img = RgbImage::new(600, 600);
        img.put_pixel(300, 300, Rgb([255, 0, 0]));
        img.put_pixel(599, 599, Rgb([0, 0, 255]));
        let img = DynamicImage::ImageRgb8(img);

        let cropper = cropper(CropPolicy::Clamp);
        let view = cropper.crop(&img, Path::new("grid.png")).unwrap();

        assert_eq!(view.dimensions(), (300, 300));
        assert_eq!(view.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(view.get_pixel(299, 299).0, [0, 0, 255, 255]);
    }
}
