pub const RENDER_WIDTH: i32 = 1280;           // Width of the stage render texture
pub const RENDER_HEIGHT: i32 = 720;           // Height of the stage render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const CARD_WIDTH: f32 = 300.0;            // Deck card width (pixels)
pub const CARD_HEIGHT: f32 = 400.0;           // Deck card height (pixels)
pub const VISIBLE_DEPTH: usize = 3;           // Cards drawn in the resting stack

// --- Deck rotation (milliseconds) ---
pub const ROTATION_PERIOD_MS: u64 = 4500;     // Time between two rotations
pub const FRAME_YIELD_MS: u64 = 16;           // Placed -> FlyingOut
pub const FLY_OUT_MS: u64 = 520;              // Rotation start -> SlidingBehind
pub const TRANSITION_MS: u64 = 900;           // Rotation start -> Idle
pub const RESTACK_MS: u64 = 500;              // Under-stack glide when a slot changes

// --- Typewriter (milliseconds) ---
pub const CHAR_INTERVAL_MS: u64 = 50;         // Time per typed character
pub const HOLD_AFTER_TYPING_MS: u64 = 2000;   // Pause once a paragraph is complete
pub const CURSOR_BLINK_MS: u64 = 500;         // Cursor visibility toggle

// --- Glow and particles ---
pub const GLOW_HIDDEN: (f32, f32) = (-200.0, -200.0); // Glow parked off-card
pub const FLASH_MS: u64 = 2000;               // Click/tap glow lifetime
pub const SPOTLIGHT_RADIUS: f32 = 300.0;      // Reach of the spotlight over the dot grid
pub const SPOTLIGHT_DAMPING_MS: u64 = 450;    // Spotlight glide duration
pub const VEIL_OUT_MS: u64 = 250;             // Grid veil lifting while the pointer moves
pub const VEIL_IN_MS: u64 = 600;              // Grid veil settling back after the pointer leaves
pub const PARTICLE_COUNT: usize = 12;         // Particles per burst
pub const PARTICLE_STAGGER_MS: u64 = 50;      // Delay between two spawned particles
pub const PARTICLE_SPREAD: f32 = 100.0;       // Max drift on each axis (pixels)
pub const PARTICLE_MIN_LIFE_MS: u64 = 1500;   // Shortest particle flight
pub const PARTICLE_MAX_LIFE_MS: u64 = 2500;   // Longest particle flight
pub const PARTICLE_RETIRE_MS: u64 = 300;      // Shrink-out after the pointer leaves
pub const DOT_SPACING: f32 = 32.0;            // Dot grid pitch (pixels)
