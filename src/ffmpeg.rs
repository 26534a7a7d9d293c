use std::io::Write;
use std::path::Path;
use std::process::{Child, ChildStdin, Command, Stdio};

use anyhow::{Context, Result, anyhow};
use log::{error, info};
use raylib::prelude::*;

/// Encodes raw RGBA frames to H.264 through an `ffmpeg` child process.
pub struct Ffmpeg {
    process: Child,
    stdin: Option<ChildStdin>,
    frames: u64,
}

impl Ffmpeg {
    pub fn spawn(width: i32, height: i32, fps: u32, output: &Path) -> Result<Ffmpeg> {
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::piped())
            .args(["-loglevel", "error"])
            .arg("-y")
            .args(["-f", "rawvideo"])
            .args(["-pixel_format", "rgba"])
            .args(["-video_size", &format!("{}x{}", width, height)])
            .args(["-framerate", &format!("{}", fps)])
            .args(["-i", "-"])
            .args(["-c:v", "libx264"])
            .args(["-pix_fmt", "yuv420p"])
            .arg(output)
            .spawn()
            .context("failed to start ffmpeg")?;
        let stdin = process
            .stdin
            .take()
            .ok_or_else(|| anyhow!("ffmpeg stdin is not piped"))?;
        info!("recording to {}", output.display());
        Ok(Ffmpeg {
            process,
            stdin: Some(stdin),
            frames: 0,
        })
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Writes one frame. Render textures come out bottom row first, so rows
    /// are sent in reverse.
    pub fn write(&mut self, image: &Image) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| anyhow!("ffmpeg stdin already closed"))?;

        let row_len = (image.width() * 4) as usize; // RGBA
        let image_len = row_len * image.height() as usize;
        let pixels = unsafe { std::slice::from_raw_parts(image.data() as *const u8, image_len) };

        for row in pixels.chunks_exact(row_len).rev() {
            stdin.write_all(row).context("failed to write frame to ffmpeg")?;
        }
        self.frames += 1;
        Ok(())
    }
}

impl Drop for Ffmpeg {
    fn drop(&mut self) {
        // Closing stdin lets ffmpeg flush and exit
        self.stdin = None;
        match self.process.wait() {
            Ok(status) if status.success() => info!("recording finished after {} frames", self.frames),
            Ok(status) => error!("ffmpeg exited with {}", status),
            Err(e) => error!("failed to wait for ffmpeg: {}", e),
        }
    }
}
