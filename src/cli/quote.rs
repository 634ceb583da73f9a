use super::ui;
use crate::core::SwapForm;

impl SwapForm {
    pub fn display_quote(&self) -> String {
        let output = self.output().to_string();
        let output_style = if self.output().amount().is_some() {
            ui::StyleType::Value
        } else {
            ui::StyleType::Error
        };

        format!(
            "{} {} {} {} {}",
            ui::style_text(self.amount(), ui::StyleType::Label),
            self.from_currency(),
            ui::style_text("=", ui::StyleType::Subtle),
            ui::style_text(&output, output_style),
            self.to_currency(),
        )
    }
}

/// Prints the converted amount for the form's current selection.
pub fn run(form: &SwapForm) {
    println!("{}", form.display_quote());
}
