/// MapKit JS CDN script URL.
pub const MAPKIT_SCRIPT_URL: &str = "https://cdn.apple-mapkit.com/mk/5.x.x/mapkit.js";

/// Status reported when the MapKit script tag fails to load.
pub const LOAD_STATUS_SCRIPT_FAILED: u16 = 404;
/// Status reported when `mapkit.init` throws.
pub const LOAD_STATUS_INIT_FAILED: u16 = 500;
/// Status reported when the script loaded but `window.mapkit` is missing.
pub const LOAD_STATUS_UNAVAILABLE: u16 = 503;

/// `mapkit.Annotation.DisplayPriority` numeric values.
pub const DISPLAY_PRIORITY_LOW: f64 = 250.0;
pub const DISPLAY_PRIORITY_HIGH: f64 = 750.0;
pub const DISPLAY_PRIORITY_REQUIRED: f64 = 1000.0;

/// Marker defaults.
pub const DEFAULT_MARKER_COLOR: &str = "#fb0000";
pub const DEFAULT_GLYPH_COLOR: &str = "#ffffff";

/// Overlay style defaults.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
pub const DEFAULT_FILL_COLOR: &str = "#FF0000";
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
