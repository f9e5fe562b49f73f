use super::ui;
use crate::core::{ChartSeries, ConverterState, Currency, RateProvider, RateStatus, RateTable};
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

const BAR_WIDTH: usize = 40;

pub fn display_rates_table(rates: &RateTable) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell("Name"),
        ui::header_cell(&format!("Buy ({})", Currency::BASE)),
    ]);

    for (currency, rate) in rates.iter() {
        table.add_row(vec![
            Cell::new(currency.code()),
            Cell::new(currency.name()),
            Cell::new(format!("{rate:.4}")).set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}

/// Draws the series as horizontal bars scaled to the largest value.
pub fn render_bar_chart(series: &ChartSeries, width: usize) -> String {
    let max = series.max_value();
    let mut lines = vec![ui::style_text(
        &format!("Rates relative to {}", Currency::BASE),
        ui::StyleType::Title,
    )];

    for (label, value) in series.points() {
        let len = if max > 0.0 {
            ((value / max) * width as f64).round().max(1.0) as usize
        } else {
            0
        };
        lines.push(format!(
            "{:<4} {} R$ {:.2}",
            label.code(),
            "█".repeat(len),
            value
        ));
    }

    lines.join("\n")
}

pub fn display_rates(state: &ConverterState) -> String {
    let Some(series) = state.chart() else {
        let reason = match state.rate_status() {
            RateStatus::Failed(e) => format!("Exchange rates unavailable: {e}"),
            _ => "Exchange rates not loaded".to_string(),
        };
        return ui::style_text(&reason, ui::StyleType::Error);
    };

    let mut output = display_rates_table(state.rates());
    output.push_str("\n\n");
    output.push_str(&render_bar_chart(&series, BAR_WIDTH));
    if let Some(updated_at) = state.updated_at() {
        output.push('\n');
        output.push_str(&ui::style_text(
            &format!("Updated {}", updated_at.format("%Y-%m-%d %H:%M:%S UTC")),
            ui::StyleType::Subtle,
        ));
    }
    output
}

pub async fn run(state: &mut ConverterState, provider: &dyn RateProvider) -> Result<()> {
    ui::refresh_with_spinner(state, provider).await;
    println!("{}", display_rates(state));
    Ok(())
}
