use crate::types::ChordDir;

/// Sample folders of a full library: majors, minors, then dominant sevenths,
/// each row running Eb, Bb, F, C, G, D, A, E, B.
pub const STANDARD_CHORDS: [&str; 27] = [
  "eb", "bb", "f", "c", "g", "d", "a", "e", "b", //
  "ebm", "bbm", "fm", "cm", "gm", "dm", "am", "em", "bm", //
  "eb7", "bb7", "f7", "c7", "g7", "d7", "a7", "e7", "b7",
];

pub const DEFAULT_CHORD: &str = "a";

pub fn standard() -> Vec<ChordDir> {
  STANDARD_CHORDS
    .into_iter()
    .map(ChordDir::from_static)
    .collect()
}

pub fn default_dirs() -> Vec<ChordDir> {
  vec![ChordDir::from_static(DEFAULT_CHORD)]
}
