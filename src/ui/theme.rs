use ratatui::style::Color;

use crate::vis::Marker;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_normal: Color,
    pub bar: Color,       // Resting bar color
    pub compare: Color,   // Elements under comparison
    pub swap: Color,      // Elements being swapped/written
    pub pivot: Color,     // Quick sort pivot
    pub pointer: Color,   // Moving pointers
    pub window: Color,    // Active range / window
    pub sorted: Color,    // Settled in final position
    pub found: Color,     // Search hit
    pub discarded: Color, // Eliminated from consideration
}

impl Theme {
    /// Bar color for a marker
    pub fn marker_color(&self, marker: Marker) -> Color {
        match marker {
            Marker::Plain => self.bar,
            Marker::Compare => self.compare,
            Marker::Swap => self.swap,
            Marker::Pivot => self.pivot,
            Marker::Pointer => self.pointer,
            Marker::Window => self.window,
            Marker::Sorted => self.sorted,
            Marker::Found => self.found,
            Marker::Discarded => self.discarded,
        }
    }
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_normal: Color::Rgb(108, 112, 134), // Grey border
    bar: Color::Rgb(147, 153, 178),           // Neutral lavender-grey
    compare: Color::Rgb(249, 226, 175),       // Yellow
    swap: Color::Rgb(243, 139, 168),          // Red/pink
    pivot: Color::Rgb(203, 166, 247),         // Mauve
    pointer: Color::Rgb(137, 180, 250),       // Blue
    window: Color::Rgb(148, 226, 213),        // Teal
    sorted: Color::Rgb(166, 227, 161),        // Green
    found: Color::Rgb(166, 227, 161),         // Green
    discarded: Color::Rgb(88, 91, 112),       // Dim grey
};
