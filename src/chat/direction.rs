/// Reading direction for one message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Rtl,
    Ltr,
    Auto,
}

fn is_hebrew(c: char) -> bool {
    ('\u{0590}'..='\u{05FF}').contains(&c)
}

/// Hebrew only → RTL, Latin only → LTR, both or neither → Auto
pub fn detect_direction(text: &str) -> TextDirection {
    let hebrew = text.chars().any(is_hebrew);
    let latin = text.chars().any(|c| c.is_ascii_alphabetic());

    match (hebrew, latin) {
        (true, false) => TextDirection::Rtl,
        (false, true) => TextDirection::Ltr,
        _ => TextDirection::Auto,
    }
}
