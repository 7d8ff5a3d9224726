//! Module-format extension allow-list
//!
//! The synthesis engine's own format auto-detection is too forgiving: it
//! happily accepts streams it should not, so content sniffing cannot be
//! trusted. The adapter instead gates on the file-extension hint against
//! this fixed list of tracker formats the engine handles. Compressed
//! module containers are deliberately absent; the engine does not
//! decompress.

/// File extensions of the module formats the engine handles
pub const MODULE_EXTENSIONS: &[&str] = &[
    "669", // Composer 669 / UNIS 669
    "AMF", // ASYLUM Music Format / Advanced Music Format (DSM)
    "AMS", // AMS module
    "DBM", // DigiBooster Pro
    "DMF", // X-Tracker (DELUSION DIGITAL MUSIC FILEFORMAT)
    "DSM", // DSIK internal format
    "FAR", // Farandole Composer
    "GDM", // General Digital Music
    "IT",  // Impulse Tracker
    "MDL", // DigiTrakker
    "MED", // OctaMED
    "MOD", // ProTracker / NoiseTracker MOD/NST
    "MT2", // MadTracker 2.0
    "MTM", // MultiTracker
    "OKT", // Oktalyzer
    "PTM", // PolyTracker
    "PSM", // PSM module
    "S3M", // Scream Tracker 3
    "STM", // Scream Tracker 2.xx
    "ULT", // UltraTracker
    "UMX", // Unreal music package
    "XM",  // FastTracker II
];

/// Whether `ext` names a recognized module format (case-insensitive)
pub fn is_module_extension(ext: &str) -> bool {
    MODULE_EXTENSIONS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(ext))
}
