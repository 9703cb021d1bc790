use std::collections::VecDeque;

use crate::surface::{Key, Rgb, Surface};

/// In-memory surface. Input is pushed in from outside (by the window
/// frontend or by a test script) and drained by the game loop.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,

    pending_keys: VecDeque<Key>,
    quit_requested: bool,

    /// Number of calls to `present`
    presented: usize,
    /// Set by `present`, cleared by `take_presented`
    unseen_frame: bool,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            pending_keys: VecDeque::new(),
            quit_requested: false,
            presented: 0,
            unseen_frame: false,
        }
    }

    pub fn push_key(&mut self, key: Key) {
        self.pending_keys.push_back(key)
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    /// Whether a new frame was presented since the last call
    pub fn take_presented(&mut self) -> bool {
        std::mem::take(&mut self.unseen_frame)
    }

    /// RGBA8 bytes, row-major, fully opaque
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&rgb| [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8, 0xff])
            .collect()
    }
}

impl Surface for FrameBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            self.pixels[(self.width * y + x) as usize] = color;
        }
    }

    fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixels[(self.width * y + x) as usize])
        } else {
            None
        }
    }

    fn present(&mut self) {
        self.presented += 1;
        self.unseen_frame = true;
    }

    fn poll_key(&mut self) -> Option<Key> {
        self.pending_keys.pop_front()
    }

    fn poll_quit(&mut self) -> bool {
        self.quit_requested
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.iter_mut().for_each(|p| *p = color);
    }
}

#[test]
fn test_pixels_and_bounds() {
    let mut fb = FrameBuffer::new(4, 3);
    fb.fill_block(2, 1, 2, 0x00ff00);
    assert_eq!(fb.get_pixel(3, 2), Some(0x00ff00));
    assert_eq!(fb.get_pixel(1, 1), Some(0));
    assert_eq!(fb.get_pixel(4, 0), None);

    // the block runs off the bottom edge, the rest is dropped silently
    fb.fill_block(0, 2, 2, 0xffffff);
    assert_eq!(fb.get_pixel(1, 2), Some(0xffffff));

    let rgba = fb.to_rgba();
    assert_eq!(rgba.len(), 4 * 3 * 4);
    let i = ((3 + 2 * 4) * 4) as usize;
    assert_eq!(&rgba[i..i + 4], &[0, 0xff, 0, 0xff]);
}

#[test]
fn test_input_is_fifo_and_non_blocking() {
    let mut fb = FrameBuffer::new(1, 1);
    assert_eq!(fb.poll_key(), None);
    fb.push_key(Key::Left);
    fb.push_key(Key::Up);
    assert_eq!(fb.poll_key(), Some(Key::Left));
    assert_eq!(fb.poll_key(), Some(Key::Up));
    assert_eq!(fb.poll_key(), None);

    assert!(!fb.poll_quit());
    fb.request_quit();
    assert!(fb.poll_quit());
}

#[test]
fn test_present_is_seen_once() {
    let mut fb = FrameBuffer::new(1, 1);
    assert!(!fb.take_presented());
    fb.present();
    assert!(fb.take_presented());
    assert!(!fb.take_presented());
    assert_eq!(fb.presented(), 1);
}
