use crate::color::Rgba;
use crate::model::Panel;

/// Panels wired into one electrical string, with the color they draw in.
#[derive(Debug, Clone)]
pub struct PanelString<'a> {
    pub id: String,
    /// Zero-based position among distinct strings, in first-seen order.
    pub ordinal: usize,
    pub color: Rgba,
    pub panels: Vec<&'a Panel>,
}

impl PanelString<'_> {
    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    /// Legend entry, e.g. `"String 2 — 6 panels"`.
    pub fn legend_label(&self) -> String {
        let noun = if self.panels.len() == 1 { "panel" } else { "panels" };
        format!("String {} — {} {}", self.ordinal + 1, self.panels.len(), noun)
    }
}

/// Partition of a drawing's panels by string id.
///
/// Grouping is a pure function of the panel order: each distinct id takes
/// the next palette slot the first time it appears, so identical input
/// always yields identical groups and colors.
#[derive(Debug, Clone, Default)]
pub struct StringGroups<'a> {
    strings: Vec<PanelString<'a>>,
}

impl<'a> StringGroups<'a> {
    /// Group `panels`, treating a missing string id as `default_id`.
    pub fn group(panels: &'a [Panel], palette: &[Rgba], default_id: &str) -> Self {
        let mut strings: Vec<PanelString<'a>> = Vec::new();
        for panel in panels {
            let id = panel.string_id.as_deref().unwrap_or(default_id);
            match strings.iter_mut().find(|s| s.id == id) {
                Some(existing) => existing.panels.push(panel),
                None => {
                    let ordinal = strings.len();
                    strings.push(PanelString {
                        id: id.to_string(),
                        ordinal,
                        color: palette_color(palette, ordinal),
                        panels: vec![panel],
                    });
                }
            }
        }
        log::debug!(
            "grouped {} panels into {} strings",
            panels.len(),
            strings.len()
        );
        Self { strings }
    }

    pub fn get(&self, id: &str) -> Option<&PanelString<'a>> {
        self.strings.iter().find(|s| s.id == id)
    }

    pub fn color_of(&self, id: &str) -> Option<Rgba> {
        self.get(id).map(|s| s.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PanelString<'a>> {
        self.strings.iter()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

/// Palette slot for an ordinal, wrapping when strings outnumber colors.
pub fn palette_color(palette: &[Rgba], ordinal: usize) -> Rgba {
    if palette.is_empty() {
        return Rgba::BLACK;
    }
    palette[ordinal % palette.len()]
}
