use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 102, g: 178, b: 255 };
pub const SECONDARY: Color = Color::TrueColor { r: 153, g: 153, b: 204 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 204, b: 102 };
pub const SEPARATOR: Color = Color::TrueColor { r: 96, g: 96, b: 96 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 220 };
pub const LINK: Color = Color::TrueColor { r: 102, g: 204, b: 204 };
pub const MONEY: Color = Color::TrueColor { r: 128, g: 224, b: 128 };

pub const STATUS_ESTABLISHED: Color = Color::TrueColor { r: 96, g: 200, b: 120 };
pub const STATUS_UNDER_DEVELOPMENT: Color = Color::TrueColor { r: 240, g: 180, b: 60 };
pub const STATUS_ABOUT_TO_START: Color = Color::TrueColor { r: 100, g: 160, b: 255 };
pub const STATUS_PROPOSED_INVESTMENT: Color = Color::TrueColor { r: 190, g: 120, b: 255 };
