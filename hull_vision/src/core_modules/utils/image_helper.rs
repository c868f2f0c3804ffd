// THEORY:
// Rendering helpers for eyeballing results. A point set is fitted into an RGBA
// canvas (y flipped so that "up" in geometry is "up" in the picture), then the
// input points, the hull polygon and the minimum-area rectangle are drawn on top.
// Nothing in the geometric core depends on this module.

pub mod image_helper {
    use crate::core_modules::bounding_box::Bounds;
    use crate::core_modules::error::{GeometryError, Result};
    use crate::core_modules::point::point::Point;
    use image::{ImageEncoder, Rgba, RgbaImage};
    use std::path::Path;

    const BACKGROUND: Rgba<u8> = Rgba([16, 16, 24, 255]);
    const POINT_COLOR: Rgba<u8> = Rgba([230, 230, 230, 255]);
    const HULL_COLOR: Rgba<u8> = Rgba([80, 220, 120, 255]);
    const RECTANGLE_COLOR: Rgba<u8> = Rgba([250, 200, 40, 255]);
    const MARGIN: f64 = 0.1;

    /// Maps geometry coordinates onto canvas pixels.
    struct Viewport {
        origin: Point,
        scale: f64,
        height: u32,
    }

    impl Viewport {
        fn fit(bounds: &Bounds, width: u32, height: u32) -> Self {
            let usable_w = width as f64 * (1.0 - 2.0 * MARGIN);
            let usable_h = height as f64 * (1.0 - 2.0 * MARGIN);
            let span = bounds.width().max(bounds.height());
            // A zero extent on one axis divides to +inf and loses the `min`.
            let scale = if span > 0.0 {
                (usable_w / bounds.width()).min(usable_h / bounds.height())
            } else {
                1.0
            };
            // Centre the content in the canvas.
            let origin = Point::new(
                bounds.min.x - (width as f64 / scale - bounds.width()) / 2.0,
                bounds.min.y - (height as f64 / scale - bounds.height()) / 2.0,
            );
            Self {
                origin,
                scale,
                height,
            }
        }

        fn to_pixel(&self, p: &Point) -> (i64, i64) {
            let x = (p.x - self.origin.x) * self.scale;
            let y = self.height as f64 - 1.0 - (p.y - self.origin.y) * self.scale;
            (x.round() as i64, y.round() as i64)
        }
    }

    fn put(image: &mut RgbaImage, x: i64, y: i64, color: Rgba<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < image.width() && (y as u32) < image.height() {
            image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Bresenham line between two pixel positions.
    fn draw_line(image: &mut RgbaImage, from: (i64, i64), to: (i64, i64), color: Rgba<u8>) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            put(image, x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    fn draw_polygon(image: &mut RgbaImage, view: &Viewport, polygon: &[Point], color: Rgba<u8>) {
        for (i, p) in polygon.iter().enumerate() {
            let q = &polygon[(i + 1) % polygon.len()];
            draw_line(image, view.to_pixel(p), view.to_pixel(q), color);
        }
    }

    /// Draws `points`, their `hull` and an optional enclosing `rectangle`.
    pub fn render_overlay(
        points: &[Point],
        hull: &[Point],
        rectangle: Option<&[Point; 4]>,
        width: u32,
        height: u32,
    ) -> Result<RgbaImage> {
        let extent = points
            .iter()
            .chain(rectangle.into_iter().flatten())
            .copied();
        let bounds = Bounds::from_points(extent).ok_or(GeometryError::EmptyPointSet)?;
        let view = Viewport::fit(&bounds, width, height);

        let mut image = RgbaImage::from_pixel(width, height, BACKGROUND);
        if let Some(rectangle) = rectangle {
            draw_polygon(&mut image, &view, rectangle, RECTANGLE_COLOR);
        }
        draw_polygon(&mut image, &view, hull, HULL_COLOR);
        for p in points {
            let (x, y) = view.to_pixel(p);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    put(&mut image, x + dx, y + dy, POINT_COLOR);
                }
            }
        }
        Ok(image)
    }

    /// Writes `image` as a PNG file.
    pub fn save<P: AsRef<Path>>(path: P, image: &RgbaImage) -> Result<()> {
        let output = std::fs::File::create(path)?;
        let encoder = image::codecs::png::PngEncoder::new(output);

        encoder.write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }
}
