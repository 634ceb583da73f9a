use super::ui;
use crate::core::{IconResolver, PriceFeed, PriceSnapshot, load_snapshot};
use anyhow::Result;
use comfy_table::Cell;

impl PriceSnapshot {
    pub fn display_as_table(&self, icons: &IconResolver) -> String {
        let mut table = ui::new_styled_table();

        table.set_header(vec![
            ui::header_cell("Currency"),
            ui::header_cell("Price"),
            ui::header_cell("Icon"),
        ]);

        for (currency, price) in self.iter() {
            table.add_row(vec![
                Cell::new(currency),
                ui::price_cell(price),
                Cell::new(icons.icon_url(currency)),
            ]);
        }

        format!(
            "{}\n\n{}\n\n{} {}",
            ui::style_text("Latest prices", ui::StyleType::Title),
            table,
            ui::style_text("Currencies:", ui::StyleType::Label),
            ui::style_text(&self.len().to_string(), ui::StyleType::Value),
        )
    }
}

pub async fn run(feed: &(dyn PriceFeed + Send + Sync), icons: &IconResolver) -> Result<()> {
    let pb = ui::new_spinner("Fetching prices...");
    let snapshot = load_snapshot(feed).await;
    pb.finish_and_clear();

    let snapshot = snapshot?;
    if snapshot.is_empty() {
        println!("No prices available.");
        return Ok(());
    }

    println!("{}", snapshot.display_as_table(icons));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_display_as_table() {
        console::set_colors_enabled(false);
        let snapshot: PriceSnapshot = [("wstETH", 1872.15), ("USDC", 1.0)].into_iter().collect();
        let icons = IconResolver::new(
            "http://icons.test",
            "SWTH",
            HashMap::from([("wstETH".to_string(), "ETH".to_string())]),
        );

        let output = snapshot.display_as_table(&icons);

        assert!(output.contains("Latest prices"));
        assert!(output.contains("1872.150000"));
        assert!(output.contains("http://icons.test/ETH.svg"));
        assert!(output.contains("http://icons.test/USDC.svg"));
        assert!(output.contains("Currencies: 2"));
    }
}
