use crate::color::Color;
use crate::params::ConfigError;

/// Ordered line colors plus the index of the one currently drawn.
///
/// The rotation timer is the only writer; the renderer reads the active color
/// every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
    active: usize,
}

impl Palette {
    pub fn new(colors: Vec<Color>) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Self { colors, active: 0 })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn active_index(&self) -> usize {
        self.active
    }

    #[inline]
    pub fn active_color(&self) -> Color {
        self.colors[self.active]
    }

    /// Move to the next color, wrapping after the last. Returns the new index.
    pub fn advance(&mut self) -> usize {
        self.advance_by(1)
    }

    pub fn advance_by(&mut self, steps: u64) -> usize {
        let len = self.colors.len() as u64;
        self.active = ((self.active as u64 + steps % len) % len) as usize;
        self.active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_palette_is_rejected() {
        assert_eq!(Palette::new(Vec::new()), Err(ConfigError::EmptyPalette));
    }

    #[test]
    fn single_color_palette_stays_put() {
        let mut p = Palette::new(vec![Color::WHITE]).unwrap();
        assert_eq!(p.advance(), 0);
        assert_eq!(p.advance_by(7), 0);
        assert_eq!(p.active_color(), Color::WHITE);
    }

    #[test]
    fn advance_by_matches_repeated_advance() {
        let colors = vec![Color::BLACK, Color::WHITE, Color::rgb8(1, 2, 3)];
        let mut a = Palette::new(colors.clone()).unwrap();
        let mut b = Palette::new(colors).unwrap();
        for _ in 0..11 {
            a.advance();
        }
        b.advance_by(11);
        assert_eq!(a.active_index(), b.active_index());
    }
}
