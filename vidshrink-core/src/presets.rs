//! Fixed encoder presets and the preset resolver.
//!
//! Each preset is a static, ordered list of ffmpeg flags that sits between
//! the `-i <input>` argument and the output path. Presets are never mutated
//! at runtime; resolving an unknown name is a configuration error.

use crate::error::{CoreError, CoreResult};

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A named, fixed set of encoder invocation flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// H.264 with a balanced CRF, AAC audio.
    #[default]
    H264,
    /// H.265 for higher compression, AAC audio.
    H265,
    /// H.264 at the slowest preset and a lower CRF; audio is copied.
    Crf,
    /// H.264 with a capped video bitrate.
    Bitrate,
    /// H.264 downscaled to 720p, aspect ratio preserved.
    Resolution,
    /// H.264 high profile tuned for film with web-friendly muxing.
    Advanced,
}

#[rustfmt::skip]
const H264_ARGS: &[&str] = &[
    "-c:v", "libx264",
    "-preset", "slow",
    "-crf", "23",
    "-c:a", "aac",
    "-b:a", "128k",
];

#[rustfmt::skip]
const H265_ARGS: &[&str] = &[
    "-c:v", "libx265",
    "-preset", "medium",
    // x265 CRF sits roughly 6 above the x264 equivalent
    "-crf", "28",
    "-c:a", "aac",
    "-b:a", "128k",
];

#[rustfmt::skip]
const CRF_ARGS: &[&str] = &[
    "-c:v", "libx264",
    "-preset", "veryslow",
    "-crf", "20",
    "-c:a", "copy",
];

#[rustfmt::skip]
const BITRATE_ARGS: &[&str] = &[
    "-c:v", "libx264",
    "-b:v", "2000k",
    "-bufsize", "2000k",
    "-maxrate", "2500k",
    "-c:a", "aac",
    "-b:a", "128k",
];

#[rustfmt::skip]
const RESOLUTION_ARGS: &[&str] = &[
    "-vf", "scale=-2:720",
    "-c:v", "libx264",
    "-crf", "23",
    "-c:a", "aac",
    "-b:a", "128k",
];

#[rustfmt::skip]
const ADVANCED_ARGS: &[&str] = &[
    "-c:v", "libx264",
    "-preset", "veryslow",
    "-crf", "22",
    "-profile:v", "high",
    "-level", "4.1",
    "-movflags", "+faststart",
    "-tune", "film",
    "-vf", "format=yuv420p",
    "-c:a", "aac",
    "-b:a", "128k",
    "-ar", "44100",
];

impl Preset {
    /// Every supported preset, in display order.
    pub const ALL: [Preset; 6] = [
        Preset::H264,
        Preset::H265,
        Preset::Crf,
        Preset::Bitrate,
        Preset::Resolution,
        Preset::Advanced,
    ];

    /// The identifier accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Preset::H264 => "h264",
            Preset::H265 => "h265",
            Preset::Crf => "crf",
            Preset::Bitrate => "bitrate",
            Preset::Resolution => "resolution",
            Preset::Advanced => "advanced",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::H264 => "H.264 (libx264, slow, CRF 23), AAC 128k",
            Preset::H265 => "H.265 (libx265, medium, CRF 28), AAC 128k",
            Preset::Crf => "H.264 (libx264, veryslow, CRF 20), audio copied",
            Preset::Bitrate => "H.264 capped at 2000k (max 2500k), AAC 128k",
            Preset::Resolution => "H.264 downscaled to 720p (CRF 23), AAC 128k",
            Preset::Advanced => "H.264 high@4.1 tuned for film, faststart, AAC 128k/44.1kHz",
        }
    }

    fn flags(self) -> &'static [&'static str] {
        match self {
            Preset::H264 => H264_ARGS,
            Preset::H265 => H265_ARGS,
            Preset::Crf => CRF_ARGS,
            Preset::Bitrate => BITRATE_ARGS,
            Preset::Resolution => RESOLUTION_ARGS,
            Preset::Advanced => ADVANCED_ARGS,
        }
    }

    /// The encoder flags for this preset, without input or output paths.
    pub fn encoder_args(self) -> Vec<String> {
        self.flags().iter().map(|s| (*s).to_string()).collect()
    }

    fn available_names() -> String {
        Self::ALL
            .iter()
            .map(|p| p.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::InvalidPreset {
                name: s.to_string(),
                available: Self::available_names(),
            })
    }
}

/// Resolves a preset name to its fixed argument sequence.
///
/// Unknown names fail with [`CoreError::InvalidPreset`].
pub fn resolve_preset(name: &str) -> CoreResult<Vec<String>> {
    Ok(name.parse::<Preset>()?.encoder_args())
}
