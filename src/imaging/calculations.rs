//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

use super::backend::Dimensions;

/// Outcome of [`plan_resize`] for a single image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizePlan {
    /// Whether the image exceeds the bounds and has to be scaled down.
    pub resize_needed: bool,
    /// Target width (the original width when no resize is needed).
    pub width: u32,
    /// Target height (the original height when no resize is needed).
    pub height: u32,
}

impl ResizePlan {
    pub fn target(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}

/// Decide whether an image must shrink to fit `max`, and to what size.
///
/// Images that already fit are left alone. Oversized images are scaled down
/// preserving the aspect ratio: first the width is capped, then, if the height
/// still overflows, the height is capped and the width recomputed. Derived
/// edges are truncated (never rounded up) and never drop below one pixel.
///
/// # Examples
/// ```
/// # use resize_images::imaging::{Dimensions, plan_resize};
/// let max = Dimensions { width: 800, height: 600 };
///
/// // 3:2 landscape is width-bound → 800x533
/// let plan = plan_resize(Dimensions { width: 3000, height: 2000 }, max);
/// assert!(plan.resize_needed);
/// assert_eq!((plan.width, plan.height), (800, 533));
///
/// // Already fits → untouched
/// let plan = plan_resize(Dimensions { width: 640, height: 480 }, max);
/// assert!(!plan.resize_needed);
/// assert_eq!((plan.width, plan.height), (640, 480));
/// ```
pub fn plan_resize(original: Dimensions, max: Dimensions) -> ResizePlan {
    let Dimensions {
        width: orig_w,
        height: orig_h,
    } = original;

    if orig_w <= max.width && orig_h <= max.height {
        return ResizePlan {
            resize_needed: false,
            width: orig_w,
            height: orig_h,
        };
    }

    let aspect = orig_w as f64 / orig_h as f64;

    let (mut width, mut height) = if orig_w > max.width {
        (max.width, (max.width as f64 / aspect).floor() as u32)
    } else {
        (orig_w, orig_h)
    };

    if height > max.height {
        height = max.height;
        width = (max.height as f64 * aspect).floor() as u32;
    }

    ResizePlan {
        resize_needed: true,
        width: width.max(1),
        height: height.max(1),
    }
}
