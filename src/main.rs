use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use log::info;
use raylib::prelude::*;

use photodeck::Widget;
use photodeck::config::{Cli, Settings};
use photodeck::constants::*;
use photodeck::ffmpeg::Ffmpeg;
use photodeck::glow::{GlowCard, ParticleBurst, Point, Spotlight, Veil, relative_offset};
use photodeck::images::load_sorted_image_paths;
use photodeck::render::{Scene, Stage};
use photodeck::rotator::{Deck, DeckRotator};
use photodeck::texture_loader::load_deck_textures;
use photodeck::typing::TypingEffect;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load(cli.config.as_deref()).context("failed to load settings")?;
    settings.apply_cli(&cli);

    // --- Deck ---
    let timing = settings.timing()?;
    let paths = load_sorted_image_paths(&cli.images)?;
    info!("{} images found in {}", paths.len(), cli.images.display());
    let deck = Deck::from_paths(paths)?;

    let (mut rl, thread) = raylib::init()
        .size(RENDER_WIDTH, RENDER_HEIGHT)
        .title("Photo Deck")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let textures = load_deck_textures(&mut rl, &thread, &deck);
    let mut stage = Stage::new(textures);

    // --- Widgets ---
    let mut rotator = DeckRotator::new(deck, timing, settings.alt.clone());
    let mut typing = TypingEffect::new(settings.paragraphs()?, settings.typing_timing())?;
    let mut glow = GlowCard::new(settings.flash());
    let mut burst = ParticleBurst::new(settings.burst());
    let mut spotlight = Spotlight::default();
    let mut veil = Veil::default();

    rotator.mount();
    typing.mount();
    glow.mount();
    burst.mount();

    let mut recorder = cli
        .record
        .as_deref()
        .map(|path| Ffmpeg::spawn(RENDER_WIDTH, RENDER_HEIGHT, FPS, path))
        .transpose()?;
    let record_frames = (cli.record_seconds.max(0.0) * FPS as f32) as u64;

    let mut framebuffer = rl
        .load_render_texture(&thread, RENDER_WIDTH as u32, RENDER_HEIGHT as u32)
        .map_err(|e| anyhow!("failed to create render texture: {}", e))?;

    let mut hovering = false;

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Fixed steps while recording so the video does not depend on the display
        let dt = if recorder.is_some() { FRAME_TIME } else { rl.get_frame_time() };
        let elapsed = Duration::from_secs_f32(dt);

        // --- Pointer, in stage coordinates ---
        let mouse = rl.get_mouse_position();
        let pointer = Point::new(
            mouse.x * RENDER_WIDTH as f32 / rl.get_screen_width().max(1) as f32,
            mouse.y * RENDER_HEIGHT as f32 / rl.get_screen_height().max(1) as f32,
        );
        if pointer != spotlight.target() {
            spotlight.move_to(pointer);
            if rl.is_cursor_on_screen() {
                veil.fade_out();
            }
        }
        if !rl.is_cursor_on_screen() {
            veil.fade_in();
        }

        let panel = stage.panel();
        if panel.contains(pointer) {
            hovering = true;
            glow.pointer_moved(pointer, panel);
            burst.pointer_moved(relative_offset(pointer, panel));
            if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
                glow.flash(Some(pointer), panel);
            }
        } else if hovering {
            hovering = false;
            glow.pointer_left();
            burst.pointer_left();
        }
        if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
            glow.flash(None, panel);
        }

        // --- Update Logic ---
        let widgets: [&mut dyn Widget; 4] = [&mut rotator, &mut typing, &mut glow, &mut burst];
        for widget in widgets {
            widget.update(elapsed);
        }
        spotlight.update(elapsed);
        veil.update(elapsed);
        stage.update(&rotator, dt);

        // --- Render the stage into the fixed size framebuffer ---
        let scene = Scene {
            rotator: &rotator,
            typing: &typing,
            glow: &glow,
            burst: &burst,
            spotlight: &spotlight,
            veil: &veil,
        };
        rl.draw_texture_mode(&thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(&thread);
            stage.draw(&mut d, &scene);
        });

        // Render textures are stored upside down, flip while scaling to the window
        let mut d = rl.begin_drawing(&thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        if let Some(ffmpeg) = recorder.as_mut() {
            let image = framebuffer
                .load_image()
                .map_err(|e| anyhow!("failed to read back the framebuffer: {}", e))?;
            ffmpeg.write(&image)?;
            if ffmpeg.frames() >= record_frames {
                info!("recorded {} seconds, stopping", cli.record_seconds);
                break;
            }
        }
    }

    rotator.unmount();
    typing.unmount();
    glow.unmount();
    burst.unmount();

    // Closes ffmpeg's stdin and waits for the encoder
    drop(recorder);
    Ok(())
}
