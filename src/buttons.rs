//! Logical controller buttons and the touch regions that drive them.
//!
//! A [`Region`] is a hit zone on screen; a [`Button`] is what the caller sees.
//! The D-pad diagonals press two buttons at once and the center cell is a
//! dead zone that presses nothing.

/// Logical buttons exposed to the caller, one callback each.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    Select,
    Start,
    B,
    A,
}

impl Button {
    /// Every button, in callback delivery order.
    pub const ALL: [Button; 8] = [
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
        Button::Select,
        Button::Start,
        Button::B,
        Button::A,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::Select => "select",
            Button::Start => "start",
            Button::B => "b",
            Button::A => "a",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    pub fn is_direction(self) -> bool {
        matches!(self, Button::Up | Button::Down | Button::Left | Button::Right)
    }
}

/// Touch hit zones: the 3x3 D-pad grid, the two meta capsules and the two
/// action circles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    UpLeft,
    Up,
    UpRight,
    Left,
    Center,
    Right,
    DownLeft,
    Down,
    DownRight,
    Select,
    Start,
    B,
    A,
}

impl Region {
    pub const ALL: [Region; 13] = [
        Region::UpLeft,
        Region::Up,
        Region::UpRight,
        Region::Left,
        Region::Center,
        Region::Right,
        Region::DownLeft,
        Region::Down,
        Region::DownRight,
        Region::Select,
        Region::Start,
        Region::B,
        Region::A,
    ];

    /// D-pad cells in row-major grid order.
    pub const DPAD_GRID: [[Region; 3]; 3] = [
        [Region::UpLeft, Region::Up, Region::UpRight],
        [Region::Left, Region::Center, Region::Right],
        [Region::DownLeft, Region::Down, Region::DownRight],
    ];

    /// Buttons pressed by a touch landing in this region.
    pub fn buttons(self) -> &'static [Button] {
        match self {
            // D-pad top row
            Region::UpLeft => &[Button::Up, Button::Left],
            Region::Up => &[Button::Up],
            Region::UpRight => &[Button::Up, Button::Right],
            // D-pad middle row
            Region::Left => &[Button::Left],
            Region::Center => &[],
            Region::Right => &[Button::Right],
            // D-pad bottom row
            Region::DownLeft => &[Button::Down, Button::Left],
            Region::Down => &[Button::Down],
            Region::DownRight => &[Button::Down, Button::Right],
            Region::Select => &[Button::Select],
            Region::Start => &[Button::Start],
            Region::B => &[Button::B],
            Region::A => &[Button::A],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_is_dead_zone() {
        assert!(Region::Center.buttons().is_empty());
    }

    #[test]
    fn diagonals_press_two_directions() {
        assert_eq!(Region::UpLeft.buttons(), &[Button::Up, Button::Left]);
        assert_eq!(Region::DownRight.buttons(), &[Button::Down, Button::Right]);
    }

    #[test]
    fn every_button_is_reachable() {
        for button in Button::ALL {
            assert!(
                Region::ALL.iter().any(|r| r.buttons().contains(&button)),
                "{button:?} has no region"
            );
        }
    }

    #[test]
    fn index_follows_all_order() {
        for (i, button) in Button::ALL.iter().enumerate() {
            assert_eq!(button.index(), i);
        }
    }

    #[test]
    fn dpad_grid_covers_nine_dpad_regions() {
        let cells: Vec<Region> = Region::DPAD_GRID.iter().flatten().copied().collect();
        assert_eq!(cells.len(), 9);
        for (i, region) in cells.iter().enumerate() {
            assert_eq!(Region::ALL[i], *region);
        }
    }
}
