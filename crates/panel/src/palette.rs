//! Color lookup: grid tags to LED colors.

use std::collections::HashMap;

use anyhow::{anyhow, Result};

use crate::types::{ColorTag, Rgb};

/// Resolves a cell's color tag to the color its LEDs should show.
pub trait ColorLookup {
    fn lookup(&self, tag: ColorTag) -> Option<Rgb>;
}

/// Tag-keyed color table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<ColorTag, Rgb>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The colors the panel was tuned for
    pub fn standard() -> Self {
        let mut palette = Self::new();
        palette.insert(ColorTag::EMPTY, Rgb::new(0x00, 0x00, 0x00));
        palette.insert(ColorTag::CYAN, Rgb::new(0x00, 0x8b, 0x8b));
        palette.insert(ColorTag::BLUE, Rgb::new(0x00, 0x00, 0xff));
        palette.insert(ColorTag::ORANGE, Rgb::new(0xff, 0x60, 0x00));
        palette.insert(ColorTag::YELLOW, Rgb::new(0xff, 0xb0, 0x00));
        palette.insert(ColorTag::GREEN, Rgb::new(0x00, 0x80, 0x00));
        palette.insert(ColorTag::PURPLE, Rgb::new(0x55, 0x28, 0xd0));
        palette.insert(ColorTag::RED, Rgb::new(0xff, 0x00, 0x00));
        palette
    }

    /// Add or replace a color; returns the previous one
    pub fn insert(&mut self, tag: ColorTag, color: Rgb) -> Option<Rgb> {
        self.colors.insert(tag, color)
    }

    pub fn remove(&mut self, tag: ColorTag) -> Option<Rgb> {
        self.colors.remove(&tag)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Fail unless `EMPTY` and every tag in `tags` has a color.
    pub fn ensure_covers(&self, tags: impl IntoIterator<Item = ColorTag>) -> Result<()> {
        let missing: Vec<char> = std::iter::once(ColorTag::EMPTY)
            .chain(tags)
            .filter(|tag| !self.colors.contains_key(tag))
            .map(ColorTag::as_char)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(anyhow!("palette: no color for tag(s) {:?}", missing))
        }
    }
}

impl ColorLookup for Palette {
    fn lookup(&self, tag: ColorTag) -> Option<Rgb> {
        self.colors.get(&tag).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_existing() {
        let mut palette = Palette::new();
        assert_eq!(palette.insert(ColorTag('a'), Rgb::new(1, 0, 0)), None);
        assert_eq!(
            palette.insert(ColorTag('a'), Rgb::new(4, 0, 0)),
            Some(Rgb::new(1, 0, 0))
        );
        assert_eq!(palette.lookup(ColorTag('a')), Some(Rgb::new(4, 0, 0)));
        assert_eq!(palette.len(), 1);
    }

    #[test]
    fn test_remove_makes_lookup_miss() {
        let mut palette = Palette::standard();
        assert!(palette.remove(ColorTag::GREEN).is_some());
        assert_eq!(palette.lookup(ColorTag::GREEN), None);
        assert_eq!(palette.lookup(ColorTag::BLUE), Some(Rgb::new(0, 0, 0xff)));
    }

    #[test]
    fn test_ensure_covers_reports_missing_tags() {
        let mut palette = Palette::standard();
        palette.remove(ColorTag::EMPTY);
        let err = palette
            .ensure_covers([ColorTag::RED, ColorTag('q')])
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'x'"), "{}", msg);
        assert!(msg.contains("'q'"), "{}", msg);
        assert!(!msg.contains("'r'"), "{}", msg);
    }
}
