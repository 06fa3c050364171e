//! Suffix classification of texture paths.
//!
//! Texture file names carry a suffix such as `_co` or `_nohq` that tells the
//! engine how the texture is sampled. The classifier maps a path to its
//! suffix class code using an ordered rule table.

use std::fmt;

/// Suffix class codes stored in [`TextureEntry::suffix_type`](crate::TextureEntry::suffix_type).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u32)]
pub enum SuffixClass {
    DiffuseSrgb = 0,
    DiffuseLinear = 1,
    DetailLinear = 2,
    NormalMap = 3,
    IrradianceMap = 4,
    Random05To1 = 5,
    TreeCrownCalc = 6,
    MacroObjectSrgb = 7,
    AmbientShadow = 8,
    SpecularAmount = 9,
    DitherTexture = 10,
    DetailSpecularAmount = 11,
    MultiShaderMask = 12,
    ThermalImageCa = 13,
}

impl SuffixClass {
    pub const ALL: [Self; 14] = [
        Self::DiffuseSrgb,
        Self::DiffuseLinear,
        Self::DetailLinear,
        Self::NormalMap,
        Self::IrradianceMap,
        Self::Random05To1,
        Self::TreeCrownCalc,
        Self::MacroObjectSrgb,
        Self::AmbientShadow,
        Self::SpecularAmount,
        Self::DitherTexture,
        Self::DetailSpecularAmount,
        Self::MultiShaderMask,
        Self::ThermalImageCa,
    ];

    /// On-disk code.
    #[must_use]
    pub const fn code(self) -> u32 {
        self as u32
    }

    /// Returns the class for an on-disk code.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.get(code as usize).copied()
    }

    /// Human-readable name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::DiffuseSrgb => "diffuse sRGB",
            Self::DiffuseLinear => "diffuse linear",
            Self::DetailLinear => "detail linear",
            Self::NormalMap => "normal map",
            Self::IrradianceMap => "irradiance map",
            Self::Random05To1 => "random 0.5-1",
            Self::TreeCrownCalc => "tree crown calc",
            Self::MacroObjectSrgb => "macro object sRGB",
            Self::AmbientShadow => "ambient shadow",
            Self::SpecularAmount => "specular amount",
            Self::DitherTexture => "dither texture",
            Self::DetailSpecularAmount => "detail specular amount",
            Self::MultiShaderMask => "multi-shader mask",
            Self::ThermalImageCa => "thermal image CA",
        }
    }
}

impl fmt::Display for SuffixClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// First match wins; longer tokens precede the shorter tokens they contain.
const RULES: &[(&str, SuffixClass)] = &[
    ("_nohq_alpha", SuffixClass::DiffuseSrgb),
    ("_dtsmdi", SuffixClass::DetailSpecularAmount),
    ("_ti_ca", SuffixClass::ThermalImageCa),
    ("_smdi", SuffixClass::SpecularAmount),
    ("_detail", SuffixClass::DetailLinear),
    ("_normalmap", SuffixClass::NormalMap),
    ("_nohq", SuffixClass::NormalMap),
    ("_novhq", SuffixClass::NormalMap),
    ("_nofhq", SuffixClass::NormalMap),
    ("_nofex", SuffixClass::NormalMap),
    ("_noex", SuffixClass::NormalMap),
    ("_nsex", SuffixClass::NormalMap),
    ("_nshq", SuffixClass::NormalMap),
    ("_nopx", SuffixClass::NormalMap),
    ("_non", SuffixClass::NormalMap),
    ("_nof", SuffixClass::NormalMap),
    ("_nse", SuffixClass::NormalMap),
    ("_ns", SuffixClass::NormalMap),
    ("_no", SuffixClass::NormalMap),
    ("_mask", SuffixClass::MultiShaderMask),
    ("_sky", SuffixClass::DiffuseLinear),
    ("_lco", SuffixClass::DiffuseLinear),
    ("_dxt5", SuffixClass::DiffuseLinear),
    ("_mco", SuffixClass::DetailLinear),
    ("_cdt", SuffixClass::DetailLinear),
    ("_dt", SuffixClass::DetailLinear),
    ("_mc", SuffixClass::MacroObjectSrgb),
    ("_as", SuffixClass::AmbientShadow),
    ("_sm", SuffixClass::SpecularAmount),
    ("_ca", SuffixClass::DiffuseSrgb),
    ("_co", SuffixClass::DiffuseSrgb),
];

/// Classifies `path` by its suffix.
///
/// Returns the class code and whether a rule matched. Unrecognized paths
/// return `(0, false)`.
///
/// ```
/// use codec::classify_suffix;
///
/// assert_eq!(classify_suffix("data/wall_nohq.paa"), (3, true));
/// assert_eq!(classify_suffix("data/wall.paa"), (0, false));
/// ```
#[must_use]
pub fn classify_suffix(path: &str) -> (u32, bool) {
    match suffix_class(path) {
        Some(class) => (class.code(), true),
        None => (SuffixClass::DiffuseSrgb.code(), false),
    }
}

/// Typed form of [`classify_suffix`].
#[must_use]
pub fn suffix_class(path: &str) -> Option<SuffixClass> {
    let lower = path.to_lowercase();
    let stem = match lower.rfind('.') {
        Some(dot) if dot > 0 => &lower[..dot],
        _ => lower.as_str(),
    };
    RULES
        .iter()
        .find(|(token, _)| contains_token(stem.as_bytes(), token.as_bytes()))
        .map(|&(_, class)| class)
}

/// Returns `true` if `token` occurs in `s` followed by a separator or the end.
fn contains_token(s: &[u8], token: &[u8]) -> bool {
    let mut from = 0;
    while let Some(idx) = find(&s[from..], token) {
        let pos = from + idx;
        match s.get(pos + token.len()) {
            None | Some(b'_' | b'-' | b'.') => return true,
            Some(_) => from = pos + 1,
        }
    }
    false
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
