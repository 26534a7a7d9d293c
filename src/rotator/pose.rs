/// Resting placement of a card relative to the deck anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset_x: f32,
    pub offset_y: f32,
    pub scale: f32,
    pub opacity: f32,
    pub rotation: f32, // degrees
}

impl Pose {
    pub const fn new(offset_x: f32, offset_y: f32, scale: f32, opacity: f32, rotation: f32) -> Self {
        Self {
            offset_x,
            offset_y,
            scale,
            opacity,
            rotation,
        }
    }

    /// Where the outgoing card flies before dropping behind the stack.
    pub const OFF_STAGE: Pose = Pose::new(-190.0, -28.0, 0.97, 0.95, -8.0);

    pub fn resting(slot: StackSlot) -> Pose {
        match slot {
            StackSlot::Front  => Pose::new( 0.0,  0.0, 1.00, 1.00, 0.0),
            StackSlot::Middle => Pose::new(18.0, 14.0, 0.94, 0.80, 0.0),
            StackSlot::Back   => Pose::new(36.0, 28.0, 0.88, 0.60, 0.0),
        }
    }

    pub fn lerp(&self, to: &Pose, t: f32) -> Pose {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            offset_x: mix(self.offset_x, to.offset_x),
            offset_y: mix(self.offset_y, to.offset_y),
            scale: mix(self.scale, to.scale),
            opacity: mix(self.opacity, to.opacity),
            rotation: mix(self.rotation, to.rotation),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StackSlot {
    Front,
    Middle,
    Back,
}

impl StackSlot {
    pub const ALL: [StackSlot; 3] = [StackSlot::Front, StackSlot::Middle, StackSlot::Back];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stack layers sit between 10 (back) and 30 (front).
    pub fn z(self) -> i32 {
        (3 - self.index() as i32) * 10
    }
}
