use crate::slot::{SLOT_COUNT, Slot};

/// Physical slot order of an American wheel, clockwise from `0`.
///
/// `37` encodes the double zero, which sits diametrically opposite `0`.
const AMERICAN_ORDER: [u8; SLOT_COUNT] = [
    0, 28, 9, 26, 30, 11, 7, 20, 32, 17, 5, 22, 34, 15, 3, 24, 36, 13, 1, 37, 27, 10, 25, 29, 12,
    8, 19, 31, 18, 6, 21, 33, 16, 4, 23, 35, 14, 2,
];

/// Immutable description of the circular physical layout of a wheel.
///
/// Slot order on the rim has nothing to do with numeric order; analyzers that
/// reason about physical adjacency (neighbor spread, dispersion, ballistics)
/// go through this table. The topology carries no hidden state: it is built
/// once from the fixed ordering and shared read-only for the lifetime of the
/// process.
///
/// # Example
///
/// ```
/// use spinsight_wheel::{Slot, WheelTopology};
///
/// let wheel = WheelTopology::american();
/// let zero = Slot::straight(0)?;
/// assert_eq!(wheel.position_of(zero), 0);
/// // 0 and 00 face each other across the wheel.
/// assert_eq!(wheel.circular_distance(zero, Slot::DOUBLE_ZERO), 19);
/// # Ok::<(), spinsight_wheel::UnknownSlotError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WheelTopology {
    order: [Slot; SLOT_COUNT],
    position: [u8; SLOT_COUNT],
}

impl WheelTopology {
    /// Builds the standard American double-zero topology.
    #[must_use]
    pub fn american() -> Self {
        let order = AMERICAN_ORDER.map(Slot);
        let mut position = [0_u8; SLOT_COUNT];
        for (pos, slot) in order.iter().enumerate() {
            position[slot.index()] = u8::try_from(pos).unwrap();
        }
        Self { order, position }
    }

    /// All slots in physical order, starting at `0`.
    #[must_use]
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.order
    }

    /// Rim position of a slot, in `0..38`.
    #[must_use]
    pub fn position_of(&self, slot: Slot) -> usize {
        self.position[slot.index()] as usize
    }

    /// The slot sitting at a rim position.
    ///
    /// # Panics
    ///
    /// Panics if `position >= 38`; callers wrap positions beforehand.
    #[must_use]
    pub fn slot_at(&self, position: usize) -> Slot {
        self.order[position]
    }

    /// The slot at a signed rim offset, wrapping around the rim.
    #[must_use]
    pub fn slot_at_wrapped(&self, position: isize) -> Slot {
        let len = isize::try_from(SLOT_COUNT).unwrap();
        let wrapped = position.rem_euclid(len);
        self.order[usize::try_from(wrapped).unwrap()]
    }

    /// Physical neighbors within `radius` pockets on each side.
    ///
    /// Returned rim-order left to right, excluding `slot` itself; a radius of
    /// `2` yields four slots.
    #[must_use]
    pub fn neighbors(&self, slot: Slot, radius: usize) -> Vec<Slot> {
        let pos = isize::try_from(self.position_of(slot)).unwrap();
        let radius = isize::try_from(radius).unwrap();
        (-radius..=radius)
            .filter(|&d| d != 0)
            .map(|d| self.slot_at_wrapped(pos + d))
            .collect()
    }

    /// Shortest rim distance between two slots.
    ///
    /// Symmetric, and zero exactly when `a == b`.
    #[must_use]
    pub fn circular_distance(&self, a: Slot, b: Slot) -> usize {
        let (i, j) = (self.position_of(a), self.position_of(b));
        let d = i.abs_diff(j);
        d.min(SLOT_COUNT - d)
    }
}

impl Default for WheelTopology {
    fn default() -> Self {
        Self::american()
    }
}
