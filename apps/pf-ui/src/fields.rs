//! Numeric text-field helpers for the input panel.

use egui::Ui;

/// Parse a numeric text field the way the input panel treats it: a blank
/// field means zero, anything unparseable is an error for the caller to
/// display.
pub fn parse_or_zero(text: &str, what: &str) -> Result<f64, String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("{what}: not a number: '{trimmed}'"))
}

/// Label plus single-line edit with a fixed edit width so rows line up.
pub fn numeric_field(ui: &mut Ui, label: &str, text: &mut String) {
    ui.label(label);
    ui.add(egui::TextEdit::singleline(text).desired_width(90.0));
}
