// Shared tuning constants for the CPU reference path and the WGSL program.
//
// The shader generator emits these as a `const` header, so changing a value
// here changes both paths.

// Audio banding
pub const BASS_CUTOFF_HZ: f32 = 250.0; // bins at or below this frequency feed `bass`
pub const MID_CUTOFF_HZ: f32 = 4000.0; // bins above bass and at or below this feed `mid`

// Capture analyser (matches a browser AnalyserNode with fftSize 512)
pub const ANALYSER_FFT_SIZE: usize = 512;
pub const ANALYSER_SMOOTHING: f32 = 0.8;
pub const ANALYSER_MIN_DB: f32 = -100.0;
pub const ANALYSER_MAX_DB: f32 = -30.0;

// Interaction
pub const MIX_TARGET_PRESSED: f32 = 1.0;
pub const MIX_TARGET_RELEASED: f32 = 0.3;
pub const MIX_TRANSITION_SPEED: f32 = 1.5; // per second
pub const MIX_INITIAL: f32 = 0.0;

// Camera
pub const CAMERA_Z: f32 = 6.0;
pub const POINTER_CAMERA_SCALE_X: f32 = 1.0;
pub const POINTER_CAMERA_SCALE_Y: f32 = 0.5;

// Scene field
pub const METABALL_COUNT: usize = 8;
pub const BASS_SPREAD: f32 = 3.0; // horizontal amplitude per unit of bass
pub const BLEND_BASE: f32 = 0.6;
pub const BLEND_BASS_GAIN: f32 = 1.7;

// Fractal noise displacement
pub const FBM_OCTAVES: u32 = 6;
pub const FBM_AMPLITUDE: f32 = 1.2;
pub const FBM_FREQUENCY: f32 = 0.9;
pub const DISPLACE_STRENGTH_BASE: f32 = 0.2;
pub const DISPLACE_STRENGTH_HIGH: f32 = 2.8;
pub const DISPLACE_SCALE_BASE: f32 = 1.5;
pub const DISPLACE_SCALE_MID: f32 = 1.45;
pub const DISPLACE_SPEED_BASE: f32 = 3.05;
pub const DISPLACE_SPEED_HIGH: f32 = 0.6;
pub const DISPLACE_BASS_GAIN: f32 = 0.4;

// Raymarching
pub const MAX_STEPS: u32 = 100;
pub const HIT_EPSILON: f32 = 1e-4;
pub const FAR_PLANE: f32 = 20.0;
pub const MISS: f32 = -1.0; // sentinel distance for rays that hit nothing

// Shading
pub const NORMAL_EPSILON: f32 = 1e-3;
pub const SHININESS: f32 = 14.0;
pub const AUDIO_FLOOR_GAIN: f32 = 3.0; // (high + mid) * gain acts as a diffuse floor
pub const DIFFUSE_WEIGHT: f32 = 0.1;
pub const AMBIENT: f32 = 0.1;
pub const SPECULAR_BASS_GAIN: f32 = 0.8;
pub const FRESNEL_BIAS: f32 = 0.4;
pub const FRESNEL_BASS_GAIN: f32 = 1.8;
pub const ENV_MIX: f32 = 0.3;
pub const HIGH_DARKEN: f32 = 0.6; // subtracted from every channel per unit of high
pub const LIGHT_ORBIT_SPEED: f32 = 0.2;
pub const LIGHT_ORBIT_RADIUS: f32 = 2.0;
pub const VIGNETTE_STRENGTH: f32 = 0.5;
