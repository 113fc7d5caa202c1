//! Rendering maps to 24-bit BMP and importing them back.
//!
//! Map row `y = 0` is the bottom scan line of the image, so in the encoded
//! file it is the first row of pixel data.

use std::io::Cursor;

use gridway_core::{Color, Point};
use image::{ImageFormat, Rgb, RgbImage};

use crate::error::{Error, Result};
use crate::map::{GridMap, Tile};

/// Colours used to draw a map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub wall: Color,
    pub road: Color,
    pub path: Color,
}

#[inline]
fn pixel(c: Color) -> Rgb<u8> {
    Rgb(c.to_rgb())
}

/// Draw `map` with `path` highlighted. Path points outside the map are
/// ignored.
pub fn render(map: &GridMap, path: &[Point], palette: &Palette) -> RgbImage {
    let (w, h) = (map.width() as u32, map.height() as u32);
    let mut img = RgbImage::from_fn(w, h, |x, row| {
        let p = Point::new(x as i32, (h - 1 - row) as i32);
        match map.at(p) {
            Some(Tile::Collision) => pixel(palette.wall),
            _ => pixel(palette.road),
        }
    });
    for &p in path.iter().filter(|&&p| map.contains(p)) {
        let row = h - 1 - p.y as u32;
        img.put_pixel(p.x as u32, row, pixel(palette.path));
    }
    img
}

/// Encode an image as an uncompressed 24-bit BMP file.
pub fn encode_bmp(img: &RgbImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Bmp)?;
    Ok(out.into_inner())
}

/// Build a map from BMP bytes.
///
/// Pixels equal to `wall` become collisions, pixels equal to `road` become
/// road, anything else stays at the fresh map's default ([`Tile::Road`]).
pub fn import(bytes: &[u8], wall: Color, road: Color) -> Result<GridMap> {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Bmp)?.to_rgb8();
    let (w, h) = img.dimensions();
    let (width, height) = match (i32::try_from(w), i32::try_from(h)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(Error::InvalidParameters(format!(
                "bitmap size {w}x{h} is too large"
            )));
        }
    };
    let mut map = GridMap::new(width, height)?;
    for (x, row, px) in img.enumerate_pixels() {
        let c = Color::from(px.0);
        let tile = if c == wall {
            Tile::Collision
        } else if c == road {
            Tile::Road
        } else {
            continue;
        };
        map.set(Point::new(x as i32, (h - 1 - row) as i32), tile);
    }
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PALETTE: Palette = Palette {
        wall: Color::BLACK,
        road: Color::WHITE,
        path: Color(0xEA6769),
    };

    fn u32_at(b: &[u8], off: usize) -> u32 {
        u32::from_le_bytes([b[off], b[off + 1], b[off + 2], b[off + 3]])
    }

    #[test]
    fn header_layout() {
        let map = GridMap::new(3, 2).unwrap();
        let bytes = encode_bmp(&render(&map, &[], &PALETTE)).unwrap();
        assert_eq!(&bytes[0..2], b"BM");
        // 3 px * 3 bytes = 9, padded to 12 per row.
        assert_eq!(u32_at(&bytes, 2) as usize, bytes.len());
        assert_eq!(bytes.len(), 54 + 12 * 2);
        assert_eq!(u32_at(&bytes, 10), 54);
        assert_eq!(u32_at(&bytes, 18), 3);
        assert_eq!(u32_at(&bytes, 22), 2);
        assert_eq!(u16::from_le_bytes([bytes[28], bytes[29]]), 24);
    }

    #[test]
    fn rows_bottom_up_in_bgr() {
        let mut map = GridMap::new(2, 2).unwrap();
        map.set(Point::new(1, 1), Tile::Collision);
        let path = [Point::new(0, 0)];
        let bytes = encode_bmp(&render(&map, &path, &PALETTE)).unwrap();
        // First stored row is y = 0: path pixel then road.
        assert_eq!(&bytes[54..57], &[0x69, 0x67, 0xEA]);
        assert_eq!(&bytes[57..60], &[0xFF, 0xFF, 0xFF]);
        // Second stored row (after 2 bytes of padding) is y = 1.
        assert_eq!(&bytes[62..65], &[0xFF, 0xFF, 0xFF]);
        assert_eq!(&bytes[65..68], &[0x00, 0x00, 0x00]);
    }

    #[test]
    fn path_overrides_and_ignores_outside_points() {
        let mut map = GridMap::new(2, 1).unwrap();
        map.set(Point::new(1, 0), Tile::Collision);
        let img = render(&map, &[Point::new(1, 0), Point::new(5, 5)], &PALETTE);
        assert_eq!(img.get_pixel(1, 0), &Rgb([0xEA, 0x67, 0x69]));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0xFF, 0xFF, 0xFF]));
    }

    #[test]
    fn import_round_trip() {
        let mut map = GridMap::new(5, 3).unwrap();
        for p in [Point::new(0, 0), Point::new(4, 2), Point::new(2, 1)] {
            map.set(p, Tile::Collision);
        }
        let bytes = encode_bmp(&render(&map, &[], &PALETTE)).unwrap();
        let back = import(&bytes, PALETTE.wall, PALETTE.road).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn unknown_colors_stay_road() {
        let mut map = GridMap::new(3, 1).unwrap();
        map.set(Point::new(0, 0), Tile::Collision);
        let bytes = encode_bmp(&render(&map, &[Point::new(2, 0)], &PALETTE)).unwrap();
        let back = import(&bytes, PALETTE.wall, PALETTE.road).unwrap();
        assert!(back.is_collision(Point::new(0, 0)));
        assert!(back.is_road(Point::new(2, 0)));
    }

    #[test]
    fn import_rejects_garbage() {
        assert!(matches!(
            import(b"not a bitmap", Color::BLACK, Color::WHITE),
            Err(Error::Image(_))
        ));
    }
}
