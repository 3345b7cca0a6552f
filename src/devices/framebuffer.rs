use std::fmt;

use crate::definitions::display::{HEIGHT, RESOLUTION, SPRITE_WIDTH, WIDTH};

/// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
/// `(64 x 32)`. Each pixel is either lit or not.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer {
    pixels: Box<[[bool; WIDTH]; HEIGHT]>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    pub fn new() -> Self {
        Self {
            pixels: Box::new([[false; WIDTH]; HEIGHT]),
        }
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        for row in self.pixels.iter_mut() {
            row.fill(false);
        }
    }

    /// XORs the `8 x sprite.len()` sprite onto the screen with its origin
    /// at `(x mod 64, y mod 32)`. The screen is addressed row after row, so
    /// pixels past the right edge continue on the next row. Pixels past the
    /// last pixel of the screen are skipped.
    ///
    /// Returns `true` if any lit pixel was turned off.
    ///
    /// # Example
    /// ```rust
    /// # use chip::devices::Framebuffer;
    /// let mut frame = Framebuffer::new();
    /// assert!(!frame.draw(0, 0, &[0xF0]));
    /// assert!(frame.get(3, 0) && !frame.get(4, 0));
    /// assert!(frame.draw(0, 0, &[0xF0]));
    /// assert!(!frame.get(3, 0));
    /// ```
    pub fn draw(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let origin_x = x as usize % WIDTH;
        let origin_y = y as usize % HEIGHT;
        let mut collision = false;

        for (i, row) in sprite.iter().enumerate() {
            let start = (origin_y + i) * WIDTH + origin_x;
            if start >= RESOLUTION {
                break;
            }

            for j in 0..SPRITE_WIDTH {
                let position = start + j;
                if position >= RESOLUTION {
                    break;
                }

                let mask = 0x80u8 >> j;
                if row & mask == 0 {
                    continue;
                }

                let pixel = &mut self.pixels[position / WIDTH][position % WIDTH];
                if *pixel {
                    collision = true;
                }
                *pixel = !*pixel;
            }
        }

        collision
    }

    /// The state of the pixel at the given coordinates.
    ///
    /// Panics if the coordinates are outside of the screen.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.pixels[y][x]
    }

    /// The rows of the screen from top to bottom.
    pub fn rows(&self) -> &[[bool; WIDTH]] {
        &self.pixels[..]
    }

    /// Counts the lit pixels.
    pub fn lit(&self) -> usize {
        self.pixels
            .iter()
            .map(|row| row.iter().filter(|&&pixel| pixel).count())
            .sum()
    }
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.iter() {
            let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
