use owo_colors::{OwoColorize, Stream};
use std::fmt::Display;

/// Print a status line, decorated with a kaomoji matching the outcome
pub fn report(success: bool, message: impl Display) {
    if success {
        let kaomoji = "(^///^)".if_supports_color(Stream::Stdout, |text| text.green());
        println!("✅ {message} {kaomoji}");
    } else {
        let kaomoji = "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red());
        println!("⚠️ {message} {kaomoji}");
    }
}
