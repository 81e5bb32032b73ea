//! Controller constants and tuning parameters.

/// Control-loop tick rate (Hz).
pub const TICK_RATE: u32 = 42;

/// Seconds per tick (~23.8 ms).
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Default fleet size.
pub const DEFAULT_FLEET_SIZE: usize = 33;

/// Target-seeking gain: fraction of remaining error closed per tick.
/// Deliberately gentler than deadbeat for bystander safety margin.
pub const TARGET_GAIN: f64 = 0.1;

// --- Formation geometry ---

/// Trinity triangle radius (meters) and altitude offset.
pub const TRINITY_RADIUS: f64 = 10.0;
pub const TRINITY_ALTITUDE: f64 = 5.0;

/// Circle radius (meters) and altitude offset.
pub const CIRCLE_RADIUS: f64 = 50.0;
pub const CIRCLE_ALTITUDE: f64 = 8.0;

/// Logarithmic spiral: turns, max radius, base altitude, climb per index.
pub const SPIRAL_TURNS: f64 = 5.0;
pub const SPIRAL_MAX_RADIUS: f64 = 80.0;
pub const SPIRAL_BASE_ALTITUDE: f64 = 10.0;
pub const SPIRAL_CLIMB_PER_UNIT: f64 = 0.5;

/// Parametric heart curve scale and altitude offset.
pub const HEART_SCALE: f64 = 30.0;
pub const HEART_ALTITUDE: f64 = 12.0;

/// Hexagonal lattice spacing (meters) and altitude offset.
pub const HEX_SPACING: f64 = 15.0;
pub const HEX_ALTITUDE: f64 = 10.0;

/// V-wedge: along-axis spacing, half-angle, altitude offset.
pub const WEDGE_SPACING: f64 = 12.0;
pub const WEDGE_HALF_ANGLE_DEG: f64 = 35.0;
pub const WEDGE_ALTITUDE: f64 = 10.0;

/// Diamond: concentric octagonal rings, 8 units per ring.
pub const DIAMOND_RING_SPACING: f64 = 15.0;
pub const DIAMOND_ALTITUDE: f64 = 10.0;

/// Starburst: radial arms and step length along each arm.
pub const STARBURST_ARMS: usize = 6;
pub const STARBURST_STEP: f64 = 10.0;
pub const STARBURST_ALTITUDE: f64 = 10.0;

/// Vertical helix: radius, units per full turn, climb per index.
pub const HELIX_RADIUS: f64 = 20.0;
pub const HELIX_UNITS_PER_TURN: usize = 8;
pub const HELIX_BASE_ALTITUDE: f64 = 5.0;
pub const HELIX_CLIMB_PER_UNIT: f64 = 1.5;

/// Lattice weave: staggered grid spacing and altitude weave amplitude.
pub const WEAVE_SPACING: f64 = 12.0;
pub const WEAVE_ALTITUDE: f64 = 10.0;
pub const WEAVE_ALTITUDE_STAGGER: f64 = 2.0;

// --- Sensor model ---

/// Nominal max detection ranges (meters).
pub const LIDAR_RANGE: f64 = 15.0;
pub const RADAR_RANGE: f64 = 30.0;
pub const THERMAL_RANGE: f64 = 50.0;
pub const ULTRASONIC_RANGE: f64 = 4.0;

/// Nominal ranging-noise coefficients (fraction of true distance).
pub const LIDAR_NOISE: f64 = 0.15;
pub const RADAR_NOISE: f64 = 0.05;
pub const THERMAL_NOISE: f64 = 0.08;

/// Lidar range shrinks with fog: visibility = 1 - this * fog_density.
pub const FOG_VISIBILITY_LOSS: f64 = 0.8;

/// Lidar miss probability scales with fog up to this ceiling at fog = 1.
pub const LIDAR_FOG_MISS_MAX: f64 = 0.5;

/// Radar/thermal are near-miss-proof; small residual miss chances.
pub const RADAR_MISS_CHANCE: f64 = 0.02;
pub const THERMAL_MISS_CHANCE: f64 = 0.03;

// --- Sensor arbitration ---

/// Fog density above which thermal becomes primary.
pub const FOG_THERMAL_THRESHOLD: f64 = 0.6;

/// Ambient light (lux) below which thermal becomes primary.
pub const LOW_LIGHT_THRESHOLD: f64 = 100.0;

/// Fog density above which radar becomes primary (when thermal did not win).
pub const FOG_RADAR_THRESHOLD: f64 = 0.4;

/// Base minimum separation distance (meters) — the mercy bubble.
pub const MIN_SEPARATION: f64 = 10.0;

/// Safety-margin multipliers applied to the minimum separation.
pub const SAFETY_MARGIN_THERMAL: f64 = 1.3;
pub const SAFETY_MARGIN_RADAR_LIDAR: f64 = 1.4;

// --- Avoidance engine ---

/// Repulsion fires when perceived distance is within this multiple of the
/// margin-scaled safety bubble.
pub const BUBBLE_TRIGGER_FACTOR: f64 = 1.5;

/// Repulsive force constant (force = K / perceived_distance²).
pub const REPULSION_K: f64 = 800.0;

/// Human-classified obstacle priority weights.
pub const HUMAN_PRIORITY: f64 = 2.0;
pub const HUMAN_PRIORITY_THERMAL: f64 = 3.0;

/// Ultrasonic close-range override: hard safety floor.
pub const ULTRA_BUBBLE: f64 = 3.0;
pub const ULTRA_REPULSION_K: f64 = 2000.0;

/// Ultrasonic ring: 8 sensors at 45° spacing, each covering a half-cone.
pub const ULTRA_SENSOR_COUNT: usize = 8;
pub const ULTRA_SENSOR_SPACING_DEG: f64 = 45.0;
pub const ULTRA_HALF_CONE_DEG: f64 = 37.0;

/// Minimum distance floor for force computation (avoids division blowup).
pub const MIN_DISTANCE_FLOOR: f64 = 0.01;

/// Maximum magnitude of the combined correction vector per tick.
/// Scaled down (never up) by sensing confidence before clamping.
pub const DEFLECTION_CAP: f64 = 1.5;

/// Confidence penalty while radar or lidar is the primary sensor.
pub const RADAR_LIDAR_CONFIDENCE: f64 = 0.8;

/// Confidence lost per unit of rain noise factor.
pub const RAIN_CONFIDENCE_LOSS: f64 = 0.5;

// --- Disturbance compensation ---

/// Maximum wind counter-thrust magnitude.
pub const WIND_COUNTER_CAP: f64 = 1.8;

/// Bounded gust jitter applied to wind speed (fraction).
pub const WIND_GUST_JITTER: f64 = 0.1;

/// Rain intensity ceiling (mm/h); inputs above are clamped.
pub const RAIN_MAX: f64 = 50.0;

/// Rain noise/drag denominator: factor = intensity² / this.
pub const RAIN_DRAG_DENOM: f64 = 2500.0;

/// Rain lift-loss denominator: loss = intensity / this (25% at max rain).
pub const RAIN_LIFT_DENOM: f64 = 200.0;

/// Maximum formation tighten factor (targets pulled toward centroid).
pub const RAIN_TIGHTEN_MAX: f64 = 0.125;

// --- Telemetry ---

/// Maximum trail positions retained per unit.
pub const MAX_TRAIL_POSITIONS: usize = 12;

/// Trail recording interval in ticks.
pub const TRAIL_INTERVAL: u32 = 15;
