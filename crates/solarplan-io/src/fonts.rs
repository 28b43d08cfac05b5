use thiserror::Error;

/// Families tried, in order, when no preferred family is configured or found.
const FALLBACK_FAMILIES: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];

#[derive(Error, Debug)]
pub enum FontError {
    #[error("No usable font found: {0}")]
    NotFound(String),

    #[error("Font parse error: {0}")]
    Parse(String),
}

/// Regular and bold faces used for all label text.
pub struct FontSet {
    regular: fontdue::Font,
    bold: Option<fontdue::Font>,
}

impl FontSet {
    /// Parse TrueType/OpenType bytes. Without a bold face, bold text uses regular.
    pub fn from_bytes(regular: &[u8], bold: Option<&[u8]>) -> Result<Self, FontError> {
        let regular = parse_font(regular, 0)?;
        let bold = bold.map(|bytes| parse_font(bytes, 0)).transpose()?;
        Ok(Self { regular, bold })
    }

    /// Look up a sans-serif face among the host's installed fonts.
    pub fn discover(preferred_family: Option<&str>) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        log::debug!("font database holds {} faces", db.len());

        let regular = query_face(&db, preferred_family, fontdb::Weight::NORMAL)
            .or_else(|| any_face(&db))
            .ok_or_else(|| {
                FontError::NotFound(format!("{} system faces searched", db.len()))
            })?;
        let bold = query_face(&db, preferred_family, fontdb::Weight::BOLD);
        Ok(Self { regular, bold })
    }

    pub fn regular(&self) -> &fontdue::Font {
        &self.regular
    }

    pub fn bold(&self) -> &fontdue::Font {
        self.bold.as_ref().unwrap_or(&self.regular)
    }

    pub fn face(&self, bold: bool) -> &fontdue::Font {
        if bold {
            self.bold()
        } else {
            self.regular()
        }
    }
}

impl std::fmt::Debug for FontSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontSet")
            .field("regular", &self.regular.name())
            .field("bold", &self.bold.as_ref().and_then(|b| b.name()))
            .finish()
    }
}

fn parse_font(bytes: &[u8], collection_index: u32) -> Result<fontdue::Font, FontError> {
    let settings = fontdue::FontSettings {
        collection_index,
        ..fontdue::FontSettings::default()
    };
    fontdue::Font::from_bytes(bytes, settings).map_err(|e| FontError::Parse(e.to_string()))
}

fn query_face(
    db: &fontdb::Database,
    preferred_family: Option<&str>,
    weight: fontdb::Weight,
) -> Option<fontdue::Font> {
    let mut families: Vec<fontdb::Family> = Vec::new();
    if let Some(name) = preferred_family {
        families.push(fontdb::Family::Name(name));
    }
    families.extend(FALLBACK_FAMILIES.iter().map(|name| fontdb::Family::Name(name)));
    families.push(fontdb::Family::SansSerif);

    let query = fontdb::Query {
        families: &families,
        weight,
        ..fontdb::Query::default()
    };
    let id = db.query(&query)?;
    load_face(db, id)
}

fn any_face(db: &fontdb::Database) -> Option<fontdue::Font> {
    let id = db.faces().next()?.id;
    load_face(db, id)
}

fn load_face(db: &fontdb::Database, id: fontdb::ID) -> Option<fontdue::Font> {
    let parsed = db.with_face_data(id, |data, index| parse_font(data, index))?;
    match parsed {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!("skipping unreadable system font: {}", e);
            None
        }
    }
}
