// Visual tuning constants shared by the effect renderers and the render loop.

// Level generator
pub const BAND_COUNT: usize = 8;
pub const TICK_INTERVAL_MS: u64 = 120;
pub const LEVEL_FLOOR: f32 = 0.2; // lowest sampled level while playing
pub const LEVEL_DECAY: f32 = 0.9; // per-tick multiplier while paused

// Elapsed time is scaled so one unit is 500ms of wall clock
pub const TIME_SCALE_PER_MS: f64 = 0.002;

// Nominal display refresh used by simulated hosts
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

// Waves
pub const WAVES_RADIUS_SPAN: f32 = 0.3; // fraction of the short side
pub const WAVES_RADIUS_BASE: f32 = 50.0;
pub const WAVES_HUE_RATE: f32 = 30.0;
pub const WAVES_HUE_STEP: f32 = 45.0;
pub const WAVES_LINE_WIDTH: f32 = 3.0;
pub const PULSE_RADIUS_BASE: f32 = 20.0;
pub const PULSE_RADIUS_SPAN: f32 = 30.0;
pub const PULSE_HUE_RATE: f32 = 100.0;

// Particles
pub const PARTICLE_COUNT: usize = 30;
pub const PARTICLE_PHASE_STEP: f32 = 0.3;
pub const PARTICLE_Y_FREQ: f32 = 1.2;
pub const PARTICLE_ORBIT_X: (f32, f32) = (80.0, 200.0); // base, span by average level
pub const PARTICLE_ORBIT_Y: (f32, f32) = (60.0, 150.0);
pub const PARTICLE_SIZE: (f32, f32) = (3.0, 8.0);
pub const GLOW_RADIUS: (f32, f32) = (40.0, 40.0);

// Bars
pub const SPOKE_COUNT: usize = 16;
pub const SPOKE_INNER_RADIUS: f32 = 60.0;
pub const SPOKE_LENGTH_SPAN: f32 = 0.3; // fraction of the short side
pub const SPOKE_WIDTH: f32 = 8.0;
pub const SPOKE_HUE_STEP: f32 = 22.5;
pub const HUB_RADIUS: f32 = 25.0;

// Ripples
pub const RIPPLE_COUNT: usize = 6;
pub const RIPPLE_PHASE_STEP: f32 = 0.8;
pub const RIPPLE_RADIUS_SPAN: f32 = 0.4; // fraction of the short side
pub const RIPPLE_LINE_WIDTH: f32 = 2.0;
pub const RIPPLE_CORE: (f32, f32) = (15.0, 20.0);

// Spiral
pub const SPIRAL_ARMS: usize = 3;
pub const SPIRAL_TURNS_RAD: f32 = std::f32::consts::PI * 6.0;
pub const SPIRAL_ANGLE_STEP: f32 = 0.1;
pub const SPIRAL_ARM_GROWTH: f32 = 3.0; // radius gained per radian
pub const SPIRAL_ARM_SPAN: f32 = 50.0;
pub const SPIRAL_LINE_WIDTH: f32 = 4.0;
pub const SPIRAL_PARTICLES: usize = 15;
pub const SPIRAL_PARTICLE_GROWTH: f32 = 4.0;
pub const SPIRAL_PARTICLE_SPAN: f32 = 60.0;
pub const SPIRAL_PARTICLE_SIZE: (f32, f32) = (4.0, 6.0);
