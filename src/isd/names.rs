//! Qualified style attribute names as they appear in ISD `style_attrs`.

pub const TTS: &str = "http://www.w3.org/ns/ttml#styling";
pub const ITTS: &str = "http://www.w3.org/ns/ttml/profile/imsc1#styling";
pub const EBUTTS: &str = "urn:ebu:tt:style";
pub const SMPTE: &str = "http://www.smpte-ra.org/schemas/2052-1/2010/smpte-tt";

pub const BACKGROUND_COLOR: &str = "http://www.w3.org/ns/ttml#styling backgroundColor";
pub const COLOR: &str = "http://www.w3.org/ns/ttml#styling color";
pub const DIRECTION: &str = "http://www.w3.org/ns/ttml#styling direction";
pub const DISPLAY: &str = "http://www.w3.org/ns/ttml#styling display";
pub const DISPLAY_ALIGN: &str = "http://www.w3.org/ns/ttml#styling displayAlign";
pub const EXTENT: &str = "http://www.w3.org/ns/ttml#styling extent";
pub const FONT_FAMILY: &str = "http://www.w3.org/ns/ttml#styling fontFamily";
pub const FONT_SIZE: &str = "http://www.w3.org/ns/ttml#styling fontSize";
pub const FONT_STYLE: &str = "http://www.w3.org/ns/ttml#styling fontStyle";
pub const FONT_WEIGHT: &str = "http://www.w3.org/ns/ttml#styling fontWeight";
pub const LINE_HEIGHT: &str = "http://www.w3.org/ns/ttml#styling lineHeight";
pub const OPACITY: &str = "http://www.w3.org/ns/ttml#styling opacity";
pub const ORIGIN: &str = "http://www.w3.org/ns/ttml#styling origin";
pub const OVERFLOW: &str = "http://www.w3.org/ns/ttml#styling overflow";
pub const PADDING: &str = "http://www.w3.org/ns/ttml#styling padding";
pub const SHOW_BACKGROUND: &str = "http://www.w3.org/ns/ttml#styling showBackground";
pub const TEXT_ALIGN: &str = "http://www.w3.org/ns/ttml#styling textAlign";
pub const TEXT_DECORATION: &str = "http://www.w3.org/ns/ttml#styling textDecoration";
pub const TEXT_OUTLINE: &str = "http://www.w3.org/ns/ttml#styling textOutline";
pub const TEXT_SHADOW: &str = "http://www.w3.org/ns/ttml#styling textShadow";
pub const UNICODE_BIDI: &str = "http://www.w3.org/ns/ttml#styling unicodeBidi";
pub const VISIBILITY: &str = "http://www.w3.org/ns/ttml#styling visibility";
pub const WRAP_OPTION: &str = "http://www.w3.org/ns/ttml#styling wrapOption";
pub const WRITING_MODE: &str = "http://www.w3.org/ns/ttml#styling writingMode";
pub const Z_INDEX: &str = "http://www.w3.org/ns/ttml#styling zIndex";
pub const FILL_LINE_GAP: &str = "http://www.w3.org/ns/ttml/profile/imsc1#styling fillLineGap";
pub const FORCED_DISPLAY: &str = "http://www.w3.org/ns/ttml/profile/imsc1#styling forcedDisplay";
pub const LINE_PADDING: &str = "urn:ebu:tt:style linePadding";
pub const MULTI_ROW_ALIGN: &str = "urn:ebu:tt:style multiRowAlign";
pub const BACKGROUND_IMAGE: &str = "http://www.smpte-ra.org/schemas/2052-1/2010/smpte-tt backgroundImage";
