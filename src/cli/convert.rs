use super::ui;
use crate::core::{Conversion, ConverterState, RateProvider, RateStatus, Unavailable};
use anyhow::Result;

/// `"{amount} {from} = {value} {to}"`, with an empty amount shown as `0`.
pub fn conversion_line(state: &ConverterState) -> String {
    let amount = match state.amount().trim() {
        "" => "0",
        a => a,
    };
    format!(
        "{} {} = {} {}",
        amount,
        state.from(),
        ui::style_text(&state.conversion().to_string(), ui::StyleType::Value),
        state.to()
    )
}

/// Explains a zero-value result, if there is one.
pub fn unavailable_hint(state: &ConverterState) -> Option<String> {
    let Conversion::Unavailable(reason) = state.conversion() else {
        return None;
    };

    let hint = match (reason, state.rate_status()) {
        (Unavailable::InvalidAmount, _) => "amount is not a valid number".to_string(),
        (Unavailable::MissingRate(_), RateStatus::Failed(e)) => {
            format!("exchange rates unavailable: {e}")
        }
        (Unavailable::MissingRate(_), RateStatus::Loading) => {
            "exchange rates are still loading".to_string()
        }
        (Unavailable::MissingRate(c), _) => format!("no exchange rate loaded for {c}"),
    };
    Some(hint)
}

/// Renders the conversion result plus any hint, one item per line.
pub fn display_conversion(state: &ConverterState) -> String {
    let mut output = conversion_line(state);
    if let Some(hint) = unavailable_hint(state) {
        output.push('\n');
        output.push_str(&ui::style_text(&format!("({hint})"), ui::StyleType::Subtle));
    }
    output
}

pub async fn run(state: &mut ConverterState, provider: &dyn RateProvider) -> Result<()> {
    ui::refresh_with_spinner(state, provider).await;
    println!("{}", display_conversion(state));
    Ok(())
}
