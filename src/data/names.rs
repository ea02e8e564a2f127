//! Driver-name normalization.
//!
//! Result files carry whatever name the driver typed into the sim that week,
//! so the same person shows up under several spellings. Every name is folded
//! onto one canonical spelling before grouping.

/// Known alternate spellings and their canonical form.
const DRIVER_ALIASES: [(&str, &str); 9] = [
    ("Greg Kach", "Greg Kachadurian"),
    ("R McLean", "Ross McLean"),
    ("Ricky Swaby", "Ricardo Swaby"),
    ("p thomas", "Parker Thomas"),
    ("David Carter", "Dave Carter"),
    ("David Carter#5529", "Dave Carter"),
    ("John P", "John Pflibsen"),
    ("Ayrton Senna", "Ayrton Torres"),
    ("Avi Ganti", "Avinash Ganti"),
];

/// Class tag some entries append to the driver name.
const CLASS_TAG: &str = "LMGT3";

/// Canonical display name for a raw `Name` element value.
pub fn normalize_driver_name(raw: &str) -> String {
    let name = match raw.find(CLASS_TAG) {
        Some(idx) => &raw[..idx],
        None => raw,
    };
    let name = name.trim();

    DRIVER_ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| (*canonical).to_string())
        .unwrap_or_else(|| name.to_string())
}
