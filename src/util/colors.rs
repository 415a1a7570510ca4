use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x0022d3ee);
pub const SECONDARY: Color = Color::from_u32(0x004f46e5);
pub const SUCCESS: Color = Color::from_u32(0x0022c55e);
pub const NEUTRAL: Color = Color::from_u32(0x009ca3af);
pub const MUTED: Color = Color::from_u32(0x006b7280);
pub const BACKGROUND: Color = Color::from_u32(0x00020617);
pub const ACCENT: Color = Color::from_u32(0x00a5b4fc);
pub const ERROR: Color = Color::from_u32(0x00fecaca);
pub const ERROR_BORDER: Color = Color::from_u32(0x00f87171);
