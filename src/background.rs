use std::collections::VecDeque;

use image::{Rgba, RgbaImage};

/// Channel values strictly above this count as "whiteish".
pub const WHITEISH_THRESHOLD: u8 = 240;

/// The only value the remover ever writes.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// A pixel is background when red, green and blue all exceed `threshold`.
/// Alpha does not take part in the classification.
#[inline(always)]
pub fn is_background(pixel: &Rgba<u8>, threshold: u8) -> bool {
    let [r, g, b, _] = pixel.0;
    r > threshold && g > threshold && b > threshold
}

/// Erases the white background region connected to the image corners.
///
/// The fill is seeded from the four corners and spreads through whiteish
/// pixels using 4-connectivity. White areas enclosed by foreground (highlights,
/// decorative details) are never reached and keep their original value.
#[derive(Clone, Copy, Debug)]
pub struct BackgroundRemover {
    pub threshold: u8,
}

impl Default for BackgroundRemover {
    fn default() -> Self {
        Self {
            threshold: WHITEISH_THRESHOLD,
        }
    }
}

impl BackgroundRemover {
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    /// Flood-fill `img` in place and return how many pixels were cleared.
    ///
    /// Background pixels that are already transparent are left as they are but
    /// still carry the fill to their neighbours. Every reachable whiteish pixel
    /// ends up transparent, so running this twice gives the same result as once.
    pub fn strip(&self, img: &mut RgbaImage) -> usize {
        let (w, h) = img.dimensions();
        if w == 0 || h == 0 {
            return 0;
        }

        let idx = |x: u32, y: u32| (y as usize) * (w as usize) + x as usize;

        let mut visited = vec![false; (w as usize) * (h as usize)];
        let mut queue: VecDeque<(u32, u32)> = VecDeque::new();

        // Corners coincide on 1-pixel-wide or -tall images.
        for (x, y) in [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)] {
            if !visited[idx(x, y)] {
                visited[idx(x, y)] = true;
                queue.push_back((x, y));
            }
        }

        let mut cleared = 0usize;

        while let Some((x, y)) = queue.pop_front() {
            let pixel = img.get_pixel_mut(x, y);
            if !is_background(pixel, self.threshold) {
                continue;
            }
            if pixel[3] != 0 {
                *pixel = TRANSPARENT_WHITE;
                cleared += 1;
            }

            let neighbours = [
                x.checked_sub(1).map(|nx| (nx, y)),
                (x + 1 < w).then(|| (x + 1, y)),
                y.checked_sub(1).map(|ny| (x, ny)),
                (y + 1 < h).then(|| (x, y + 1)),
            ];
            for (nx, ny) in neighbours.into_iter().flatten() {
                let i = idx(nx, ny);
                if !visited[i] {
                    visited[i] = true;
                    queue.push_back((nx, ny));
                }
            }
        }

        log::debug!("flood fill cleared {cleared} of {} pixels ({w}x{h})", w as usize * h as usize);
        cleared
    }
}

/// Return a copy of `img` with its corner-connected white background removed,
/// using the default threshold.
pub fn remove_background(img: &RgbaImage) -> RgbaImage {
    let mut out = img.clone();
    BackgroundRemover::default().strip(&mut out);
    out
}
