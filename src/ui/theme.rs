//! Color themes for the chat surfaces.

use eframe::egui::Color32;

/// Theme palette.
///
/// Surface hierarchy:
/// - `surface[0]`: app background
/// - `surface[1]`: sidebar/panel backgrounds
/// - `surface[2]`: cards and elevated fragments
/// - `surface[3]`: hover states
/// - `surface[4]`: active/selected states
pub struct SimchatTheme {
    pub name: String,
    pub surface: [Color32; 5],
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub info: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,
    pub border_medium: Color32,
    pub bubble_sent: Color32,
    pub bubble_received: Color32,
}

impl SimchatTheme {
    /// Dark theme, messenger green accents
    pub fn dark() -> Self {
        Self {
            name: "Dark".to_string(),
            surface: [
                Color32::from_rgb(11, 20, 26),  // surface_0: App background
                Color32::from_rgb(17, 27, 33),  // surface_1: Sidebar background
                Color32::from_rgb(32, 44, 51),  // surface_2: Cards
                Color32::from_rgb(42, 57, 66),  // surface_3: Hover state
                Color32::from_rgb(52, 70, 81),  // surface_4: Active selection
            ],
            accent: Color32::from_rgb(0, 168, 132),
            success: Color32::from_rgb(37, 211, 102),
            warning: Color32::from_rgb(250, 166, 26),
            error: Color32::from_rgb(240, 71, 71),
            info: Color32::from_rgb(83, 189, 235),
            text_primary: Color32::from_rgb(233, 237, 239),
            text_secondary: Color32::from_rgb(185, 187, 190),
            text_muted: Color32::from_rgb(134, 150, 160),
            border_medium: Color32::from_rgb(42, 57, 66),
            bubble_sent: Color32::from_rgb(0, 92, 75),
            bubble_received: Color32::from_rgb(32, 44, 51),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light".to_string(),
            surface: [
                Color32::from_rgb(240, 242, 245), // surface_0: App background
                Color32::from_rgb(255, 255, 255), // surface_1: Sidebar background
                Color32::from_rgb(255, 255, 255), // surface_2: Cards
                Color32::from_rgb(232, 234, 237), // surface_3: Hover state
                Color32::from_rgb(214, 218, 224), // surface_4: Active selection
            ],
            accent: Color32::from_rgb(0, 150, 118),
            success: Color32::from_rgb(27, 170, 80),
            warning: Color32::from_rgb(214, 135, 0),
            error: Color32::from_rgb(200, 50, 50),
            info: Color32::from_rgb(20, 120, 200),
            text_primary: Color32::from_rgb(17, 27, 33),
            text_secondary: Color32::from_rgb(60, 70, 80),
            text_muted: Color32::from_rgb(120, 130, 140),
            border_medium: Color32::from_rgb(214, 218, 224),
            bubble_sent: Color32::from_rgb(217, 253, 211),
            bubble_received: Color32::from_rgb(255, 255, 255),
        }
    }
}
