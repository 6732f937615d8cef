/// Convert a `0xRRGGBB` colour from the config into an iced colour.
pub fn color_from_rgb(rgb: u32) -> iced::Color {
    iced::Color::from_rgb8(((rgb >> 16) & 0xFF) as u8, ((rgb >> 8) & 0xFF) as u8, (rgb & 0xFF) as u8)
}
