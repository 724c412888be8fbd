/// Default locations and the built-in icon table

pub mod paths {
    /// Asset directory, relative to the directory that holds this tool
    pub const PUBLIC_DIR: &str = "../public";

    /// Source vector file inside the asset directory
    pub const SOURCE_SVG: &str = "favicon.svg";

    /// File name written by `init-config` when no path is given
    pub const CONFIG_FILE: &str = "pwa-icons.yaml";
}

pub mod icons {
    /// (name, edge length in px, padding fraction per side)
    /// Maskable variants keep 10% on each side so platform masks don't clip content
    pub const DEFAULT_ICONS: &[(&str, u32, f64)] = &[
        ("icon-192.png", 192, 0.0),
        ("icon-512.png", 512, 0.0),
        ("icon-maskable-192.png", 192, 0.1),
        ("icon-maskable-512.png", 512, 0.1),
        ("apple-touch-icon.png", 180, 0.0),
    ];

    /// Upper bound (exclusive) for padding, half the edge on each side leaves nothing
    pub const MAX_PADDING: f64 = 0.5;

    /// Largest edge length accepted from a manifest
    pub const MAX_SIZE: u32 = 4096;
}

pub mod canvas {
    /// Opaque white, used behind padded icons
    pub const BACKGROUND: [u8; 4] = [255, 255, 255, 255];
}
