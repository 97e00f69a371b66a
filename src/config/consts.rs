// src/config/consts.rs

// Sources
pub const KJV_ONLINE_BASE: &str = "https://www.kingjamesbibleonline.org/";
pub const KJV_ONLINE_TEMPLATE: &str = "{name}-Chapter-{chapter}";
pub const SACRED_TEXTS_BASE: &str = "https://sacred-texts.com/bib/apo/";
pub const SACRED_TEXTS_TEMPLATE: &str = "{id_lower}.htm";

// Net
pub const USER_AGENT: &str = concat!("apocrypha_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_REDIRECTS: usize = 10;

// Scrape
pub const CHAPTER_DELAY_MS: u64 = 2_000; // be polite
pub const MAX_CHAPTERS: u32 = 200; // Sirach has 51; anything near this is a runaway loop

// Export
pub const DEFAULT_OUT_DIR: &str = "osis-documents";
pub const DEFAULT_AGGREGATE_FILE: &str = "kjv_apocrypha.xml";
pub const XML_EXT: &str = "xml";

// Header
pub const WORK_ID: &str = "kjv-apocrypha";
pub const WORK_NAME: &str = "King James Version Apocrypha";
pub const WORK_TITLE: &str = "King James Version--Apocrypha";
pub const WORK_LANG: &str = "en";
pub const TIMESTAMP_FMT: &str = "%Y.%m.%dT%H:%M:%S";
