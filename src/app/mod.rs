use std::time::Instant;

use ggez::conf::{WindowMode, WindowSetup};
use ggez::event::EventHandler;
use ggez::graphics::{
    Canvas, Color, DrawParam, Image, ImageFormat, PxScale, Sampler, Text, TextLayout,
};
use ggez::input::keyboard::{KeyCode, KeyInput, KeyMods};
use ggez::{Context, GameResult};
use log::info;

use crate::app::game_loop::Runner;
use crate::app::palette::{GREEN, WHITE};
use crate::app::prefs::Prefs;
use crate::app::screen::{Label, LabelStyle};
use crate::surface::{FrameBuffer, Key, Rgb, Surface};

pub mod collisions;
pub mod control;
pub mod food;
pub mod game_loop;
pub mod occupancy;
pub mod palette;
pub mod prefs;
pub mod rendering;
pub mod screen;
pub mod snake;

const HINT_GRAY: Rgb = 0x80_80_80;

/// Window frontend: feeds ggez input into the frame buffer, steps the
/// runner at the configured rate and uploads the buffer when it changes
pub struct App {
    runner: Runner,
    fb: FrameBuffer,
    image: Option<Image>,
    frames_per_second: u32,
    wm: WindowMode,
    ws: WindowSetup,
}

impl App {
    pub fn new(prefs: Prefs) -> Self {
        let board = prefs.board;
        let wm = WindowMode::default()
            .dimensions(board.width as f32, board.height as f32)
            .resizable(false);
        let ws = WindowSetup::default().title("Snake").vsync(true);

        Self {
            fb: FrameBuffer::new(board.width, board.height),
            frames_per_second: prefs.frames_per_second,
            runner: Runner::new(prefs),
            image: None,
            wm,
            ws,
        }
    }

    pub fn wm(&self) -> WindowMode {
        self.wm.clone()
    }

    pub fn ws(&self) -> WindowSetup {
        self.ws.clone()
    }

    fn draw_labels(&self, canvas: &mut Canvas) {
        let labels = self.runner.screen().labels();
        let x = self.fb.width() as f32 / 2.;
        let mut y = self.fb.height() as f32 / 4.;

        for Label { text, style, highlighted } in labels {
            let (size, color) = match style {
                LabelStyle::Title => (72., WHITE),
                LabelStyle::Text => (32., WHITE),
                LabelStyle::Item if highlighted => (40., GREEN),
                LabelStyle::Item => (32., WHITE),
                LabelStyle::Hint => (20., HINT_GRAY),
            };

            let mut text = Text::new(text);
            text.set_scale(PxScale::from(size))
                .set_layout(TextLayout::center());
            canvas.draw(
                &text,
                DrawParam::default()
                    .dest([x, y])
                    .color(Color::from_rgb_u32(color)),
            );
            y += size * 1.5;
        }
    }
}

fn map_key(keycode: KeyCode) -> Option<Key> {
    match keycode {
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Return | KeyCode::NumpadEnter | KeyCode::Space => Some(Key::Confirm),
        _ => None,
    }
}

fn is_quit(keycode: KeyCode, mods: KeyMods) -> bool {
    match keycode {
        KeyCode::Escape => true,
        KeyCode::C | KeyCode::D => mods.contains(KeyMods::CTRL),
        _ => false,
    }
}

impl EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        while ctx.time.check_update_time(self.frames_per_second) {
            if !self.runner.frame(&mut self.fb, Instant::now()) {
                ctx.request_quit();
                break;
            }
        }
        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        if self.fb.take_presented() {
            self.image = Some(Image::from_pixels(
                ctx,
                &self.fb.to_rgba(),
                ImageFormat::Rgba8UnormSrgb,
                self.fb.width(),
                self.fb.height(),
            ));
        }

        let mut canvas = Canvas::from_frame(ctx, Color::BLACK);
        // cells must stay sharp-edged
        canvas.set_sampler(Sampler::nearest_clamp());
        if let Some(image) = &self.image {
            canvas.draw(image, DrawParam::default());
        }
        self.draw_labels(&mut canvas);
        canvas.finish(ctx)
    }

    fn key_down_event(&mut self, _ctx: &mut Context, input: KeyInput, repeated: bool) -> GameResult {
        if let Some(keycode) = input.keycode {
            if is_quit(keycode, input.mods) {
                info!("quit key pressed");
                self.fb.request_quit();
            } else if repeated && !self.runner.screen().accepts_repeats() {
                return Ok(());
            } else if let Some(key) = map_key(keycode) {
                self.fb.push_key(key);
            }
        }
        Ok(())
    }
}

#[test]
fn test_key_mapping() {
    assert_eq!(map_key(KeyCode::Return), Some(Key::Confirm));
    assert_eq!(map_key(KeyCode::Left), Some(Key::Left));
    assert_eq!(map_key(KeyCode::C), None);

    assert!(is_quit(KeyCode::Escape, KeyMods::empty()));
    assert!(is_quit(KeyCode::D, KeyMods::CTRL));
    assert!(!is_quit(KeyCode::C, KeyMods::SHIFT));
}
