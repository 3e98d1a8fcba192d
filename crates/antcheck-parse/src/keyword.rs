//! Static keyword table mapping release-name tokens to canonical labels.
//!
//! Lookups are case-insensitive. Keys are stored uppercased so a single
//! `phf` map covers every capitalization found in the wild. The canonical
//! string is what ends up in [`crate::Elements`]; kinds whose canonical
//! form is empty only mark the token as identified so it cannot leak into
//! the title.

use phf::phf_map;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordKind {
    VideoCodec,
    VideoTerm,
    AudioCodec,
    AudioTerm,
    Resolution,
    Source,
    SourceTerm,
    Edition,
    ReleaseInfo,
    /// `UHD` marker; upgrades a Blu-ray source to Ultra HD Blu-ray.
    UltraHd,
}

#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub kind: KeywordKind,
    pub canonical: &'static str,
}

macro_rules! kw {
    ($kind:ident) => {
        Keyword { kind: KeywordKind::$kind, canonical: "" }
    };
    ($kind:ident, $canonical:literal) => {
        Keyword { kind: KeywordKind::$kind, canonical: $canonical }
    };
}

static KEYWORDS: phf::Map<&'static str, Keyword> = phf_map! {
    // Resolutions
    "480P" => kw!(Resolution, "480p"),
    "576P" => kw!(Resolution, "576p"),
    "720P" => kw!(Resolution, "720p"),
    "1080P" => kw!(Resolution, "1080p"),
    "1080I" => kw!(Resolution, "1080i"),
    "2160P" => kw!(Resolution, "2160p"),
    "4K" => kw!(Resolution, "2160p"),
    "UHD" => kw!(UltraHd),

    // Sources
    "BLURAY" => kw!(Source, "Blu-ray"),
    "BDRIP" => kw!(Source, "Blu-ray"),
    "BRRIP" => kw!(Source, "Blu-ray"),
    "BDREMUX" => kw!(Source, "Blu-ray"),
    "BD" => kw!(Source, "Blu-ray"),
    "WEB" => kw!(Source, "Web"),
    "WEBDL" => kw!(Source, "Web"),
    "WEBRIP" => kw!(Source, "Web"),
    "HDTV" => kw!(Source, "HDTV"),
    "PDTV" => kw!(Source, "PDTV"),
    "DVD" => kw!(Source, "DVD"),
    "DVDRIP" => kw!(Source, "DVD"),
    "DVDREMUX" => kw!(Source, "DVD"),
    "DVD5" => kw!(Source, "DVD"),
    "DVD9" => kw!(Source, "DVD"),
    "HDDVD" => kw!(Source, "HD-DVD"),
    "VHS" => kw!(Source, "VHS"),
    "CAM" => kw!(Source, "Cam"),
    "HDCAM" => kw!(Source, "Cam"),
    "TELESYNC" => kw!(Source, "Telesync"),
    "TELECINE" => kw!(Source, "Telecine"),
    "SCREENER" => kw!(Source, "Screener"),
    "DVDSCR" => kw!(Source, "Screener"),
    // Halves of split tags like WEB-DL; identified but never stored.
    "DL" => kw!(SourceTerm),
    "RIP" => kw!(SourceTerm),
    "REMUX" => kw!(SourceTerm),
    "HYBRID" => kw!(SourceTerm),

    // Video codecs
    "X264" => kw!(VideoCodec, "H264"),
    "H264" => kw!(VideoCodec, "H264"),
    "AVC" => kw!(VideoCodec, "H264"),
    "X265" => kw!(VideoCodec, "H265"),
    "H265" => kw!(VideoCodec, "H265"),
    "HEVC" => kw!(VideoCodec, "H265"),
    "XVID" => kw!(VideoCodec, "XviD"),
    "DIVX" => kw!(VideoCodec, "DivX"),
    "AV1" => kw!(VideoCodec, "AV1"),
    "VC1" => kw!(VideoCodec, "VC-1"),
    "MPEG2" => kw!(VideoCodec, "MPEG-2"),
    "10BIT" => kw!(VideoTerm),
    "HI10P" => kw!(VideoTerm),
    "HDR" => kw!(VideoTerm),
    "HDR10" => kw!(VideoTerm),
    "HDR10+" => kw!(VideoTerm),
    "DV" => kw!(VideoTerm),
    "SDR" => kw!(VideoTerm),
    "HD" => kw!(VideoTerm),

    // Audio
    "AAC" => kw!(AudioCodec),
    "AC3" => kw!(AudioCodec),
    "EAC3" => kw!(AudioCodec),
    "FLAC" => kw!(AudioCodec),
    "MP3" => kw!(AudioCodec),
    "OPUS" => kw!(AudioCodec),
    "DTS" => kw!(AudioCodec),
    "TRUEHD" => kw!(AudioCodec),
    "LPCM" => kw!(AudioCodec),
    "PCM" => kw!(AudioCodec),
    "DD5.1" => kw!(AudioCodec),
    "DDP5.1" => kw!(AudioCodec),
    "5.1" => kw!(AudioTerm),
    "7.1" => kw!(AudioTerm),
    "2.0" => kw!(AudioTerm),
    "5.1CH" => kw!(AudioTerm),
    "7.1CH" => kw!(AudioTerm),
    "ATMOS" => kw!(AudioTerm),

    // Editions
    "EXTENDED" => kw!(Edition, "Extended"),
    "THEATRICAL" => kw!(Edition, "Theatrical"),
    "UNRATED" => kw!(Edition, "Unrated"),
    "UNCUT" => kw!(Edition, "Uncut"),
    "REMASTERED" => kw!(Edition, "Remastered"),
    "IMAX" => kw!(Edition, "IMAX"),
    "CRITERION" => kw!(Edition, "Criterion"),

    // Scene tags with no canonical value of their own
    "PROPER" => kw!(ReleaseInfo),
    "REPACK" => kw!(ReleaseInfo),
    "INTERNAL" => kw!(ReleaseInfo),
    "LIMITED" => kw!(ReleaseInfo),
    "FESTIVAL" => kw!(ReleaseInfo),
    "RETAIL" => kw!(ReleaseInfo),
    "COMPLETE" => kw!(ReleaseInfo),
    "3D" => kw!(ReleaseInfo),
};

/// Looks up `token` in the keyword table, ignoring case.
pub fn find(token: &str) -> Option<&'static Keyword> {
    KEYWORDS.get(token.to_ascii_uppercase().as_str())
}
