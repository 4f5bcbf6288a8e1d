use serde::{Deserialize, Serialize};

use crate::core::{Shape, Theme};

use super::shape_generator::ShapeGenerator;

/// Number of slots in the tray.
pub const TRAY_SLOTS: usize = 3;

/// The three-slot holding area shapes are dragged from.
///
/// Slots empty out as shapes are placed. Once all of them are empty the tray
/// is refilled with three new shapes in one step, so nothing outside the
/// session ever observes an empty tray mid-game.
///
/// Serializes as a 3-element array of `Shape | null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tray {
    slots: [Option<Shape>; TRAY_SLOTS],
}

impl Tray {
    #[must_use]
    pub const fn new(slots: [Option<Shape>; TRAY_SLOTS]) -> Self {
        Self { slots }
    }

    /// A full tray of freshly drawn shapes.
    pub fn drawn(generator: &mut ShapeGenerator, theme: &Theme) -> Self {
        Self {
            slots: std::array::from_fn(|_| Some(generator.draw(theme))),
        }
    }

    #[must_use]
    pub fn slots(&self) -> &[Option<Shape>; TRAY_SLOTS] {
        &self.slots
    }

    /// Shape in `slot`, or `None` if the slot is empty or does not exist.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Shape> {
        self.slots.get(slot)?.as_ref()
    }

    /// Iterates over the shapes still in the tray.
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> + '_ {
        self.slots.iter().flatten()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub(crate) fn take(&mut self, slot: usize) -> Option<Shape> {
        self.slots.get_mut(slot)?.take()
    }

    /// Refills the tray if every slot is empty. Returns whether it did.
    pub(crate) fn refill_if_empty(
        &mut self,
        generator: &mut ShapeGenerator,
        theme: &Theme,
    ) -> bool {
        if !self.is_empty() {
            return false;
        }
        *self = Self::drawn(generator, theme);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeSeed;

    #[test]
    fn test_take_and_refill() {
        let mut generator = ShapeGenerator::with_seed(ShapeSeed::from_bytes([1; 16]));
        let theme = Theme::DEFAULT;
        let mut tray = Tray::drawn(&mut generator, theme);
        assert_eq!(tray.shapes().count(), 3);

        let first = tray.get(0).cloned();
        assert_eq!(tray.take(0), first);
        assert_eq!(tray.get(0), None);
        assert_eq!(tray.take(0), None);
        assert_eq!(tray.take(3), None, "out of range slot");
        assert!(!tray.refill_if_empty(&mut generator, theme));
        assert_eq!(tray.shapes().count(), 2);

        tray.take(1);
        tray.take(2);
        assert!(tray.is_empty());
        assert!(tray.refill_if_empty(&mut generator, theme));
        assert!(tray.slots().iter().all(Option::is_some));
    }

    #[test]
    fn test_tray_serialization() {
        let mut generator = ShapeGenerator::with_seed(ShapeSeed::from_bytes([2; 16]));
        let mut tray = Tray::drawn(&mut generator, Theme::DEFAULT);
        tray.take(1);
        let json = serde_json::to_value(&tray).unwrap();
        let slots = json.as_array().unwrap();
        assert_eq!(slots.len(), 3);
        assert!(slots[1].is_null());
        let back: Tray = serde_json::from_value(json).unwrap();
        assert_eq!(back, tray);
    }
}
