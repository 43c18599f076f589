use super::ColorCapability;

pub(super) fn detect_color_capability_from(
    term: Option<&str>,
    colorterm: Option<&str>,
    no_color: Option<&str>,
) -> ColorCapability {
    if should_force_basic16(term, no_color) {
        return ColorCapability::Basic16;
    }
    if supports_truecolor(colorterm, term) {
        return ColorCapability::TrueColor;
    }
    if term.unwrap_or_default().to_lowercase().contains("256color") {
        ColorCapability::Xterm256
    } else {
        ColorCapability::Basic16
    }
}

fn should_force_basic16(term: Option<&str>, no_color: Option<&str>) -> bool {
    no_color.is_some_and(|value| !value.is_empty())
        || term.is_some_and(|value| value.eq_ignore_ascii_case("dumb"))
}

fn supports_truecolor(colorterm: Option<&str>, term: Option<&str>) -> bool {
    let colorterm = colorterm.unwrap_or_default().to_lowercase();
    let term = term.unwrap_or_default().to_lowercase();
    [colorterm, term]
        .iter()
        .any(|value| value.contains("truecolor") || value.contains("24bit"))
}
